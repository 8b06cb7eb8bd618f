//! StreamDisplay: writes every publish as one JSON line.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::engine::{DisplayError, HostDisplay, LegendEntry};
use crate::protocol::{
    current_timestamp_ms, LegendMessage, LegendType, MapMessage, MapType, WireEntry,
};

pub struct StreamDisplay<W: Write> {
    out: W,
    seq: u64,
    changed_only: bool,
    previous: Vec<String>,
    line: Vec<u8>,
}

impl<W: Write> StreamDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            changed_only: false,
            previous: Vec::new(),
            line: Vec::with_capacity(16 * 1024),
        }
    }

    /// After the first full legend, only send entries whose bitmap changed.
    pub fn changed_only(mut self, enabled: bool) -> Self {
        self.changed_only = enabled;
        self
    }

    /// Sequence number of the last message written.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn write_line(&mut self, msg: &impl serde::Serialize) -> Result<(), DisplayError> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, msg).map_err(io::Error::from)?;
        self.line.push(b'\n');
        self.out.write_all(&self.line)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> HostDisplay for StreamDisplay<W> {
    fn set_map(&mut self, map: &str) -> Result<(), DisplayError> {
        let grid_height = map.lines().count() as u32;
        let grid_width = map.lines().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        self.previous.clear();

        let msg = MapMessage {
            msg_type: MapType::Map,
            seq: self.next_seq(),
            ts: current_timestamp_ms(),
            grid_width,
            grid_height,
            map: Cow::Borrowed(map),
        };
        self.write_line(&msg)?;
        tracing::debug!(seq = self.seq, grid_width, grid_height, "map streamed");
        Ok(())
    }

    fn set_legend(&mut self, legend: &[LegendEntry]) -> Result<(), DisplayError> {
        let full = !self.changed_only || self.previous.len() != legend.len();
        let entries: Vec<WireEntry<'_>> = legend
            .iter()
            .enumerate()
            .filter(|(i, e)| full || self.previous[*i] != e.bitmap)
            .map(|(_, e)| WireEntry {
                key: e.key.as_char(),
                bitmap: Cow::Borrowed(e.bitmap.as_str()),
            })
            .collect();
        let sent = entries.len();

        let msg = LegendMessage {
            msg_type: LegendType::Legend,
            seq: self.next_seq(),
            ts: current_timestamp_ms(),
            full,
            entries,
        };
        self.write_line(&msg)?;

        if self.changed_only {
            self.previous.resize_with(legend.len(), String::new);
            for (slot, e) in self.previous.iter_mut().zip(legend) {
                slot.clone_from(&e.bitmap);
            }
        }
        tracing::trace!(seq = self.seq, sent, full, "legend streamed");
        Ok(())
    }
}
