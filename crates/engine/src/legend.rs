//! Tile keys, the tile map and the legend table.
//!
//! The host display shows a fixed grid of tiles. Each tile is named by a
//! single-character key, laid out once in the tile map; every frame the
//! legend binds each key to its current bitmap.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::ConstructionError;
use crate::types::TileCoord;

/// Opaque single-character tile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileKey(char);

impl TileKey {
    pub const fn new(ch: char) -> Self {
        Self(ch)
    }

    pub const fn as_char(self) -> char {
        self.0
    }
}

impl std::fmt::Display for TileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names tiles by legend index.
pub trait KeyEncoder {
    /// Number of distinct keys this encoder can produce.
    fn budget(&self) -> usize;

    /// Key for tile `index`, `None` when the index is out of budget or has
    /// no representable key.
    fn key(&self, index: usize) -> Option<TileKey>;
}

/// Keys are consecutive characters starting at `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharOffsetEncoder {
    first: char,
    budget: usize,
}

impl CharOffsetEncoder {
    pub const fn new(first: char, budget: usize) -> Self {
        Self { first, budget }
    }
}

impl KeyEncoder for CharOffsetEncoder {
    fn budget(&self) -> usize {
        self.budget
    }

    fn key(&self, index: usize) -> Option<TileKey> {
        if index >= self.budget {
            return None;
        }
        let code = (self.first as u32).checked_add(u32::try_from(index).ok()?)?;
        char::from_u32(code).map(TileKey)
    }
}

/// One legend slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub key: TileKey,
    pub bitmap: String,
}

/// Fixed-length table of `(key, bitmap)`, one per tile, row-major.
///
/// Keys never change after construction; only bitmaps do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    grid_width: u32,
    grid_height: u32,
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Build a legend whose bitmaps are all `blank`.
    pub fn new(
        grid_width: u32,
        grid_height: u32,
        encoder: &dyn KeyEncoder,
        blank: &str,
    ) -> Result<Self, ConstructionError> {
        let count = grid_width as usize * grid_height as usize;
        if count > encoder.budget() {
            return Err(ConstructionError::KeyBudgetExceeded {
                needed: count,
                budget: encoder.budget(),
            });
        }

        let mut seen = HashSet::with_capacity(count);
        let mut entries = Vec::with_capacity(count);
        for index in 0..count {
            let key = encoder
                .key(index)
                .filter(|k| !matches!(k.as_char(), '\n' | '\r'))
                .ok_or(ConstructionError::InvalidKey(index))?;
            if !seen.insert(key) {
                return Err(ConstructionError::DuplicateKey {
                    key: key.as_char(),
                    index,
                });
            }
            entries.push(LegendEntry {
                key,
                bitmap: blank.to_owned(),
            });
        }

        Ok(Self {
            grid_width,
            grid_height,
            entries,
        })
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, tile: TileCoord) -> Option<usize> {
        if tile.tx < 0
            || tile.ty < 0
            || tile.tx as u32 >= self.grid_width
            || tile.ty as u32 >= self.grid_height
        {
            return None;
        }
        Some(tile.index(self.grid_width))
    }

    pub fn get(&self, tile: TileCoord) -> Option<&LegendEntry> {
        self.index_of(tile).map(|i| &self.entries[i])
    }

    /// Mutable bitmap for slot `index`. Keys stay read-only.
    pub(crate) fn bitmap_mut(&mut self, index: usize) -> &mut String {
        &mut self.entries[index].bitmap
    }

    /// Tile map: one key per tile, rows joined with `\n`.
    pub fn tile_map(&self) -> String {
        let w = self.grid_width as usize;
        let mut out = String::with_capacity(self.entries.len() + self.grid_height as usize);
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 && i % w == 0 {
                out.push('\n');
            }
            out.push(entry.key.as_char());
        }
        out
    }
}
