//! Tile compositor - surfaces in, legends out
//!
//! Composites any number of [`Surface`](crate::core::Surface)s into a master
//! pixel buffer and republishes it to a [`HostDisplay`] that can only show a
//! fixed grid of text-defined tiles.
//!
//! # Module Structure
//!
//! - [`config`]: grid geometry and key budget, loadable from the environment
//! - [`legend`]: tile keys, the tile map and the legend table
//! - [`dirty`]: which tiles need their bitmaps regenerated this frame
//! - [`display`]: the publish contract plus in-memory displays
//! - [`compositor`]: the per-frame state machine
//!
//! # Frame Cycle
//!
//! ```text
//! begin_frame()          clear dirty set
//! ... draw into surfaces ...
//! end_frame(display)     composite, regenerate dirty tiles, publish once
//! ```
//!
//! # Example
//!
//! ```
//! use subtile_engine::core::{Drawer, Surface};
//! use subtile_engine::types::{Glyph, TileCoord};
//! use subtile_engine::{share, Compositor, CompositorConfig, RecordingDisplay};
//!
//! let mut display = RecordingDisplay::new();
//! let mut compositor = Compositor::new(CompositorConfig::with_grid(2, 2), &mut display).unwrap();
//!
//! let sprite = share(Surface::new(16, 16).unwrap());
//! sprite.borrow_mut().draw_rect(0, 0, 16, 16, Glyph::Green);
//! compositor.add_surface(&sprite, 0, 0);
//!
//! compositor.begin_frame();
//! compositor.end_frame(&mut display).unwrap();
//! assert!(compositor.bitmap(TileCoord::new(0, 0)).unwrap().starts_with("4444"));
//! ```

pub mod compositor;
pub mod config;
pub mod dirty;
pub mod display;
pub mod error;
pub mod legend;

pub use subtile_core as core;
pub use subtile_types as types;

pub use compositor::{share, Compositor, FramePhase, FrameStats, SharedSurface};
pub use config::CompositorConfig;
pub use dirty::DirtyTiles;
pub use display::{HostDisplay, NullDisplay, RecordingDisplay};
pub use error::{DisplayError, EngineError};
pub use legend::{CharOffsetEncoder, KeyEncoder, Legend, LegendEntry, TileKey};
