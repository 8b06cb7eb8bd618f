//! Bounds-checked 2D view over a [`PackedStore`].

use crate::error::ConstructionError;
use crate::packed::PackedStore;
use crate::types::Glyph;

/// 2D grid of glyphs, `width * height` cells, row-major.
///
/// Reads outside the grid yield [`Glyph::Transparent`]; writes outside the
/// grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    store: PackedStore,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, ConstructionError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            store: PackedStore::new(len),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn store(&self) -> &PackedStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PackedStore {
        &mut self.store
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Linear index `x + y * width`. Only valid for in-bounds coordinates.
    #[inline(always)]
    pub fn index(&self, x: i32, y: i32) -> usize {
        (x as usize) + (y as usize) * (self.width as usize)
    }

    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Glyph {
        if !self.in_bounds(x, y) {
            return Glyph::Transparent;
        }
        self.store.glyph(self.index(x, y))
    }

    #[inline(always)]
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.store.set_glyph(i, glyph);
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.store.reset();
    }

    /// Iterate `(x, y, glyph)` over every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Glyph)> + '_ {
        let w = self.width as i32;
        let h = self.height as i32;
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y, self.get(x, y))))
    }

    /// Render a rectangular region as newline-joined rows of glyph chars.
    ///
    /// Cells outside the buffer render as transparent. The output is written
    /// into `out` after clearing it, so a reused `String` does not allocate
    /// once its capacity covers the region.
    pub fn write_region(&self, x: i32, y: i32, w: u32, h: u32, out: &mut String) {
        out.clear();
        for row in 0..h as i32 {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..w as i32 {
                out.push(self.get(x + col, y + row).as_char());
            }
        }
    }
}

/// `width * height`, rejecting empty or overflowing grids.
pub(crate) fn cell_count(width: u32, height: u32) -> Result<usize, ConstructionError> {
    if width == 0 || height == 0 {
        return Err(ConstructionError::EmptyDimensions { width, height });
    }
    // Coordinates are i32 on the drawing side.
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(ConstructionError::TooLarge { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(ConstructionError::TooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            PixelBuffer::new(0, 3),
            Err(ConstructionError::EmptyDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(PixelBuffer::new(3, 0).is_err());
    }

    #[test]
    fn huge_dimensions_are_rejected() {
        assert!(matches!(
            PixelBuffer::new(u32::MAX, 2),
            Err(ConstructionError::TooLarge { .. })
        ));
    }

    #[test]
    fn index_is_row_major() {
        let b = PixelBuffer::new(5, 3).unwrap();
        assert_eq!(b.index(0, 0), 0);
        assert_eq!(b.index(4, 0), 4);
        assert_eq!(b.index(1, 2), 11);
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let mut b = PixelBuffer::new(2, 2).unwrap();
        b.set(0, 0, Glyph::Red);
        assert_eq!(b.get(0, 0), Glyph::Red);
        assert_eq!(b.get(-1, 0), Glyph::Transparent);
        assert_eq!(b.get(0, 2), Glyph::Transparent);
        assert_eq!(b.get(2, 0), Glyph::Transparent);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut b = PixelBuffer::new(2, 2).unwrap();
        let before = b.clone();
        b.set(2, 0, Glyph::Red);
        b.set(0, -1, Glyph::Red);
        b.set(-5, -5, Glyph::Red);
        assert_eq!(b, before);
    }

    #[test]
    fn odd_width_rows_do_not_bleed() {
        let mut b = PixelBuffer::new(3, 2).unwrap();
        b.set(2, 0, Glyph::Blue);
        b.set(0, 1, Glyph::Green);
        assert_eq!(b.get(2, 0), Glyph::Blue);
        assert_eq!(b.get(0, 1), Glyph::Green);
        assert_eq!(b.get(1, 1), Glyph::Transparent);
    }

    #[test]
    fn write_region_joins_rows_with_newlines() {
        let mut b = PixelBuffer::new(3, 2).unwrap();
        b.set(0, 0, Glyph::Black);
        b.set(2, 1, Glyph::Purple);
        let mut s = String::new();
        b.write_region(0, 0, 3, 2, &mut s);
        assert_eq!(s, "0..\n..H");

        // Regions hanging off the edge pad with transparent.
        b.write_region(2, 1, 2, 2, &mut s);
        assert_eq!(s, "H.\n..");
    }
}
