//! Dirty-tile set.

use crate::types::TileCoord;

/// Set of legend indices whose bitmaps must be regenerated.
///
/// Iteration follows first-insertion order. Clearing keeps the backing
/// storage so a frame loop never reallocates.
#[derive(Debug, Clone)]
pub struct DirtyTiles {
    grid_width: u32,
    grid_height: u32,
    flags: Vec<bool>,
    order: Vec<usize>,
}

impl DirtyTiles {
    pub fn new(grid_width: u32, grid_height: u32) -> Self {
        let count = grid_width as usize * grid_height as usize;
        Self {
            grid_width,
            grid_height,
            flags: vec![false; count],
            order: Vec::with_capacity(count),
        }
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        if tile.tx < 0
            || tile.ty < 0
            || tile.tx as u32 >= self.grid_width
            || tile.ty as u32 >= self.grid_height
        {
            return None;
        }
        Some(tile.index(self.grid_width))
    }

    /// Mark one tile. Out-of-range tiles are ignored.
    pub fn mark(&mut self, tile: TileCoord) {
        if let Some(i) = self.index(tile) {
            if !self.flags[i] {
                self.flags[i] = true;
                self.order.push(i);
            }
        }
    }

    /// Mark every tile overlapping the half-open pixel rectangle
    /// `[x0, x1) × [y0, y1)`, clipped to the grid.
    pub fn mark_pixel_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, tile_size: u32) {
        let ts = i64::from(tile_size);
        let max_x = i64::from(self.grid_width) * ts;
        let max_y = i64::from(self.grid_height) * ts;
        let (x0, y0) = (x0.max(0), y0.max(0));
        let (x1, y1) = (x1.min(max_x), y1.min(max_y));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for ty in y0 / ts..=(y1 - 1) / ts {
            for tx in x0 / ts..=(x1 - 1) / ts {
                self.mark(TileCoord::new(tx as i32, ty as i32));
            }
        }
    }

    pub fn mark_all(&mut self) {
        for i in 0..self.flags.len() {
            if !self.flags[i] {
                self.flags[i] = true;
                self.order.push(i);
            }
        }
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        self.index(tile).is_some_and(|i| self.flags[i])
    }

    pub fn clear(&mut self) {
        for &i in &self.order {
            self.flags[i] = false;
        }
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Dirty legend indices in marking order.
    pub fn indices(&self) -> &[usize] {
        &self.order
    }
}
