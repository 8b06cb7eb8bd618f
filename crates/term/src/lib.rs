//! Terminal preview of a tile display.
//!
//! Implements the host side of the publish contract on an ordinary terminal:
//! the tile map and each legend are decoded back into pixels, drawn with
//! half-block cells (two pixel rows per terminal row) and flushed as a diff
//! against the previous frame.
//!
//! - [`fb`]: styled cell framebuffer
//! - [`preview`]: tile map + legend decoding (pure)
//! - [`renderer`]: crossterm flush, full or diff
//! - [`display`]: the [`HostDisplay`](crate::engine::HostDisplay) tying them together

pub mod display;
pub mod fb;
pub mod preview;
pub mod renderer;

pub use subtile_engine as engine;
pub use subtile_types as types;

pub use display::TerminalDisplay;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use preview::{TilePreview, HALF_BLOCK};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
