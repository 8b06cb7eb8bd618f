//! TilePreview: rebuilds a pixel image from the published tile map and
//! legend, then rasterizes it into a terminal framebuffer.
//!
//! Pure (no I/O), so the decoding half of the terminal display is testable.

use std::collections::HashMap;

use crate::engine::{DisplayError, LegendEntry};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::Glyph;

/// Upper half block: foreground paints the top pixel, background the bottom.
pub const HALF_BLOCK: char = '▀';

#[derive(Debug, Clone, Default)]
pub struct TilePreview {
    tile_size: u32,
    grid_width: u32,
    grid_height: u32,
    slots: HashMap<char, usize>,
    pixels: Vec<Glyph>,
}

impl TilePreview {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            ..Self::default()
        }
    }

    pub fn has_map(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Image width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.grid_width * self.tile_size
    }

    /// Image height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.grid_height * self.tile_size
    }

    /// Terminal cells needed to show the whole image: one column per pixel,
    /// one row per two pixel rows.
    pub fn cell_size(&self) -> (u16, u16) {
        let w = self.pixel_width().min(u32::from(u16::MAX)) as u16;
        let h = self.pixel_height().div_ceil(2).min(u32::from(u16::MAX)) as u16;
        (w, h)
    }

    /// Learn the key layout. Resets the decoded image.
    pub fn set_map(&mut self, map: &str) {
        self.slots.clear();
        let width = map.lines().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut height = 0;
        for (ty, row) in map.lines().enumerate() {
            for (tx, ch) in row.chars().enumerate() {
                self.slots.insert(ch, ty * width + tx);
            }
            height += 1;
        }
        self.grid_width = width as u32;
        self.grid_height = height;
        self.pixels.clear();
        self.pixels
            .resize(self.pixel_width() as usize * self.pixel_height() as usize, Glyph::Transparent);
        tracing::debug!(grid_width = width, grid_height = height, "tile map loaded");
    }

    /// Decode every legend entry into the image. Returns the number of
    /// entries applied.
    ///
    /// Unknown characters inside a bitmap decode as transparent; rows or
    /// columns beyond the tile size are ignored.
    pub fn apply_legend(&mut self, legend: &[LegendEntry]) -> Result<usize, DisplayError> {
        if !self.has_map() {
            return Err(DisplayError::MapNotSet);
        }
        let ts = self.tile_size as usize;
        let pw = self.pixel_width() as usize;
        let gw = self.grid_width.max(1) as usize;

        for entry in legend {
            let key = entry.key.as_char();
            let index = *self.slots.get(&key).ok_or(DisplayError::UnknownKey(key))?;
            let (ox, oy) = ((index % gw) * ts, (index / gw) * ts);
            for (dy, row) in entry.bitmap.split('\n').take(ts).enumerate() {
                let base = (oy + dy) * pw + ox;
                for (dx, ch) in row.chars().take(ts).enumerate() {
                    self.pixels[base + dx] = Glyph::from_char(ch).unwrap_or_default();
                }
            }
        }
        Ok(legend.len())
    }

    /// Pixel at `(x, y)`, transparent outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Glyph {
        if x >= self.pixel_width() || y >= self.pixel_height() {
            return Glyph::Transparent;
        }
        self.pixels[(y * self.pixel_width() + x) as usize]
    }

    /// Rasterize into the top-left of `fb` with half-block cells.
    /// Transparent pixels show `background`.
    pub fn render_into(&self, fb: &mut FrameBuffer, background: Rgb) {
        let (w, h) = self.cell_size();
        for row in 0..h.min(fb.height()) {
            for x in 0..w.min(fb.width()) {
                let top = self.pixel(u32::from(x), u32::from(row) * 2);
                let bottom = self.pixel(u32::from(x), u32::from(row) * 2 + 1);
                let style = CellStyle {
                    fg: Rgb::for_glyph(top, background),
                    bg: Rgb::for_glyph(bottom, background),
                };
                fb.set(x, row, Cell { ch: HALF_BLOCK, style });
            }
        }
    }
}
