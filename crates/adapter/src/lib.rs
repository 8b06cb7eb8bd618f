//! Adapter module - the publish contract as a JSON-lines stream
//!
//! Lets an out-of-process host consume a compositor: each call on the
//! [`HostDisplay`](crate::engine::HostDisplay) becomes one line of JSON on any
//! `io::Write` (stdout, a file, a pipe).
//!
//! # Message Types
//!
//! - **map**: the tile map, sent once when a compositor is created
//! - **legend**: `(key, bitmap)` pairs, sent once per frame
//!
//! With `changed_only`, legends after the first carry only the entries whose
//! bitmap differs from the previous legend and are flagged `"full":false`.
//!
//! # Example Stream
//!
//! ```text
//! {"type":"map","seq":1,"ts":1234567890,"grid_width":2,"grid_height":1,"map":"/0"}
//! {"type":"legend","seq":2,"ts":1234567890,"full":true,"entries":[{"key":"/","bitmap":"...."},{"key":"0","bitmap":"...."}]}
//! {"type":"legend","seq":3,"ts":1234567906,"full":false,"entries":[{"key":"0","bitmap":"44.."}]}
//! ```
//!
//! See [`protocol`] for message structure definitions.

pub mod protocol;
pub mod stream;

pub use subtile_engine as engine;
pub use subtile_types as types;

pub use protocol::{parse_message, LegendMessage, MapMessage, ParsedMessage, WireEntry};
pub use stream::StreamDisplay;
