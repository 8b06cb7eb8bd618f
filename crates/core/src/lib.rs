//! Pixel core - packed storage, drawing and placement
//!
//! Everything a caller needs to draw arbitrary pixels that will later be
//! composited onto a tile-based display. This crate is pure: no I/O, no
//! display protocol, no global state.
//!
//! # Module Structure
//!
//! - [`packed`]: 4-bit cells, two per byte
//! - [`buffer`]: bounds-checked 2D view over packed cells
//! - [`draw`]: the [`Drawer`] primitives (pixel, rect, circle, line, sprite)
//! - [`sprite`]: immutable quantized images
//! - [`transform`]: 2×3 affine transforms
//! - [`surface`]: a buffer plus its placement transform
//! - [`blit`]: byte-aligned bulk copy for untransformed surfaces
//!
//! # Failure Model
//!
//! Drawing never fails. Out-of-bounds writes are dropped and out-of-bounds
//! reads are transparent; only construction with unusable dimensions returns
//! a [`ConstructionError`].
//!
//! # Example
//!
//! ```
//! use subtile_core::{Drawer, Surface};
//! use subtile_types::Glyph;
//!
//! let mut surface = Surface::new(16, 16).unwrap();
//! surface.draw_rect(0, 0, 16, 16, Glyph::Green);
//! surface.draw_line(0, 0, 15, 15, Glyph::Red);
//! assert_eq!(surface.buffer().get(7, 7), Glyph::Red);
//!
//! surface.offset(32.0, 0.0);
//! assert!(!surface.is_transformed());
//! ```

pub mod blit;
pub mod buffer;
pub mod draw;
pub mod error;
pub mod packed;
pub mod sprite;
pub mod surface;
pub mod transform;

pub use subtile_types as types;

pub use blit::{blit, blit_with, BlitMode};
pub use buffer::PixelBuffer;
pub use draw::{for_each_line_cell, Drawer};
pub use error::ConstructionError;
pub use packed::PackedStore;
pub use sprite::{quantize, Sprite};
pub use surface::Surface;
pub use transform::AffineTransform;
