//! Immutable, pre-quantized glyph images for stamping.
//!
//! Sprites are built once from true-color RGBA data by nearest-palette
//! matching and are never mutated afterwards.

use crate::buffer::cell_count;
use crate::error::ConstructionError;
use crate::packed::PackedStore;
use crate::types::{Glyph, PALETTE};

/// Packed glyph image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    glyphs: PackedStore,
}

impl Sprite {
    /// Quantize RGBA8 pixels (4 bytes per pixel, row-major).
    ///
    /// Every pixel maps to some glyph; only the data length can fail.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, ConstructionError> {
        let len = cell_count(width, height)?;
        let expected = len * 4;
        if rgba.len() != expected {
            return Err(ConstructionError::DataLength {
                expected,
                actual: rgba.len(),
            });
        }

        let mut glyphs = PackedStore::new(len);
        for (i, px) in rgba.chunks_exact(4).enumerate() {
            glyphs.set_glyph(i, quantize([px[0], px[1], px[2], px[3]]));
        }
        Ok(Self {
            width,
            height,
            glyphs,
        })
    }

    /// Wrap already-quantized glyphs.
    pub fn from_glyphs(width: u32, height: u32, glyphs: &[Glyph]) -> Result<Self, ConstructionError> {
        let len = cell_count(width, height)?;
        if glyphs.len() != len {
            return Err(ConstructionError::DataLength {
                expected: len,
                actual: glyphs.len(),
            });
        }
        let mut store = PackedStore::new(len);
        for (i, g) in glyphs.iter().enumerate() {
            store.set_glyph(i, *g);
        }
        Ok(Self {
            width,
            height,
            glyphs: store,
        })
    }

    /// Parse a newline-separated glyph bitmap.
    ///
    /// Width is the longest row; short rows are padded with transparent and
    /// characters outside the alphabet read as transparent. Leading and
    /// trailing blank lines are ignored.
    pub fn from_bitmap(bitmap: &str) -> Result<Self, ConstructionError> {
        let rows: Vec<&str> = bitmap.trim_matches('\n').lines().collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        let len = cell_count(width, height)?;

        let mut store = PackedStore::new(len);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let g = Glyph::from_char(ch).unwrap_or(Glyph::Transparent);
                store.set_glyph(x + y * width as usize, g);
            }
        }
        Ok(Self {
            width,
            height,
            glyphs: store,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounds-checked read; outside the sprite is transparent.
    pub fn get(&self, x: i32, y: i32) -> Glyph {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Glyph::Transparent;
        }
        self.glyph_at(x as usize + y as usize * self.width as usize)
    }

    /// Read by linear index. Callers guarantee `index < width * height`.
    #[inline(always)]
    pub(crate) fn glyph_at(&self, index: usize) -> Glyph {
        self.glyphs.glyph(index)
    }

    /// Serialize as newline-joined glyph rows (legend bitmap format).
    pub fn to_bitmap(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height as i32 {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width as i32 {
                out.push(self.get(x, y).as_char());
            }
        }
        out
    }
}

/// Map one RGBA8 pixel to the nearest glyph.
///
/// Alpha at or above one half means transparent. This is inverted from the
/// usual compositing convention but matches the asset pipeline the sprites
/// come from.
pub fn quantize(rgba: [u8; 4]) -> Glyph {
    let alpha = f32::from(rgba[3]) / 255.0;
    if alpha >= 0.5 {
        return Glyph::Transparent;
    }
    let rgb = [
        f32::from(rgba[0]) / 255.0,
        f32::from(rgba[1]) / 255.0,
        f32::from(rgba[2]) / 255.0,
    ];

    let mut best = PALETTE[0].0;
    let mut best_diff = f32::INFINITY;
    for (glyph, color) in PALETTE.iter() {
        let diff: f32 = rgb.iter().zip(color).map(|(a, b)| (a - b).abs()).sum();
        if diff < best_diff {
            best = *glyph;
            best_diff = diff;
        }
    }
    best
}
