//! Wire format of the tile stream.
//!
//! Line-delimited JSON. Every message has: type, seq (per-stream sequence
//! number, starting at 1) and ts (timestamp in ms).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapType {
    #[default]
    #[serde(rename = "map")]
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LegendType {
    #[default]
    #[serde(rename = "legend")]
    Legend,
}

/// Tile layout, sent once per compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMessage<'a> {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: MapType,
    pub seq: u64,
    pub ts: u64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub map: Cow<'a, str>,
}

/// One `(key, bitmap)` pair on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEntry<'a> {
    pub key: char,
    pub bitmap: Cow<'a, str>,
}

/// A published legend.
///
/// `full` is false when the stream only carries entries whose bitmap changed
/// since the previous legend message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendMessage<'a> {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: LegendType,
    pub seq: u64,
    pub ts: u64,
    pub full: bool,
    pub entries: Vec<WireEntry<'a>>,
}

/// Parsed stream message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Map(MapMessage<'static>),
    Legend(LegendMessage<'static>),
}

impl ParsedMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ParsedMessage::Map(m) => m.seq,
            ParsedMessage::Legend(m) => m.seq,
        }
    }
}

/// Parse one line of the stream.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Inbound {
        #[serde(rename = "map")]
        Map {
            seq: u64,
            ts: u64,
            grid_width: u32,
            grid_height: u32,
            map: String,
        },
        #[serde(rename = "legend")]
        Legend {
            seq: u64,
            ts: u64,
            full: bool,
            entries: Vec<WireEntry<'static>>,
        },
    }

    Ok(match serde_json::from_str::<Inbound>(json)? {
        Inbound::Map {
            seq,
            ts,
            grid_width,
            grid_height,
            map,
        } => ParsedMessage::Map(MapMessage {
            msg_type: MapType::Map,
            seq,
            ts,
            grid_width,
            grid_height,
            map: Cow::Owned(map),
        }),
        Inbound::Legend {
            seq,
            ts,
            full,
            entries,
        } => ParsedMessage::Legend(LegendMessage {
            msg_type: LegendType::Legend,
            seq,
            ts,
            full,
            entries,
        }),
    })
}

/// Current timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
