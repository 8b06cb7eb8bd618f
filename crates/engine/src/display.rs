//! Host display publish contract.
//!
//! A host display can only show tiles. It receives the tile map once and a
//! full legend once per frame. Implementations decide what "showing" means:
//! a terminal preview, a serialized stream, or a test recorder.

use crate::error::DisplayError;
use crate::legend::LegendEntry;

/// Receiver of the tile map and per-frame legends.
pub trait HostDisplay {
    /// Called once when a compositor is created.
    fn set_map(&mut self, map: &str) -> Result<(), DisplayError>;

    /// Called exactly once per completed frame with every legend slot.
    fn set_legend(&mut self, legend: &[LegendEntry]) -> Result<(), DisplayError>;
}

impl<D: HostDisplay + ?Sized> HostDisplay for &mut D {
    fn set_map(&mut self, map: &str) -> Result<(), DisplayError> {
        (**self).set_map(map)
    }

    fn set_legend(&mut self, legend: &[LegendEntry]) -> Result<(), DisplayError> {
        (**self).set_legend(legend)
    }
}

/// Keeps the tile map and a copy of every published legend.
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    pub map: Option<String>,
    pub legends: Vec<Vec<LegendEntry>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent legend, if any.
    pub fn last(&self) -> Option<&[LegendEntry]> {
        self.legends.last().map(Vec::as_slice)
    }

    pub fn publish_count(&self) -> usize {
        self.legends.len()
    }
}

impl HostDisplay for RecordingDisplay {
    fn set_map(&mut self, map: &str) -> Result<(), DisplayError> {
        self.map = Some(map.to_owned());
        Ok(())
    }

    fn set_legend(&mut self, legend: &[LegendEntry]) -> Result<(), DisplayError> {
        self.legends.push(legend.to_vec());
        Ok(())
    }
}

/// Discards everything; only counts calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullDisplay {
    pub maps: usize,
    pub legends: usize,
}

impl HostDisplay for NullDisplay {
    fn set_map(&mut self, _map: &str) -> Result<(), DisplayError> {
        self.maps += 1;
        Ok(())
    }

    fn set_legend(&mut self, _legend: &[LegendEntry]) -> Result<(), DisplayError> {
        self.legends += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::TileKey;

    #[test]
    fn recording_display_copies_legends() {
        let mut d = RecordingDisplay::new();
        d.set_map("ab").unwrap();
        let entries = vec![LegendEntry {
            key: TileKey::new('a'),
            bitmap: "..".into(),
        }];
        d.set_legend(&entries).unwrap();
        assert_eq!(d.map.as_deref(), Some("ab"));
        assert_eq!(d.publish_count(), 1);
        assert_eq!(d.last().unwrap()[0].bitmap, "..");
    }

    #[test]
    fn mut_ref_forwards() {
        fn publish(mut display: impl HostDisplay) {
            display.set_map("").unwrap();
            display.set_legend(&[]).unwrap();
        }

        let mut d = NullDisplay::default();
        publish(&mut d);
        assert_eq!(d, NullDisplay { maps: 1, legends: 1 });
    }
}
