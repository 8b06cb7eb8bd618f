//! Compositor configuration.

use serde::{Deserialize, Serialize};

use crate::core::{BlitMode, ConstructionError};
use crate::types::{
    DEFAULT_FIRST_KEY, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_KEY_BUDGET,
    DEFAULT_TILE_SIZE,
};

/// Screen geometry and compositing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Tile edge in pixels.
    pub tile_size: u32,
    /// Screen width in tiles.
    pub grid_width: u32,
    /// Screen height in tiles.
    pub grid_height: u32,
    /// Maximum number of distinct tile keys the display accepts.
    pub key_budget: usize,
    /// Key of tile 0; later tiles count up from here.
    pub first_key: char,
    /// Parity handling for the untransformed fast path.
    pub blit_mode: BlitMode,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            key_budget: DEFAULT_KEY_BUDGET,
            first_key: DEFAULT_FIRST_KEY,
            blit_mode: BlitMode::Aligned,
        }
    }
}

impl CompositorConfig {
    /// Grid of `grid_width × grid_height` tiles, other fields default.
    pub fn with_grid(grid_width: u32, grid_height: u32) -> Self {
        Self {
            grid_width,
            grid_height,
            ..Self::default()
        }
    }

    /// Create from environment variables.
    ///
    /// - `SUBTILE_TILE_SIZE`, `SUBTILE_GRID_W`, `SUBTILE_GRID_H`,
    ///   `SUBTILE_KEY_BUDGET`: integers
    /// - `SUBTILE_FIRST_KEY`: a single character
    /// - `SUBTILE_EXACT_BLIT`: `1` or `true` selects [`BlitMode::Exact`]
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CompositorConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let num = |key: &str| lookup(key).and_then(|s| s.trim().parse().ok());

        let first_key = lookup("SUBTILE_FIRST_KEY")
            .and_then(|s| {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            })
            .unwrap_or(d.first_key);

        let exact = lookup("SUBTILE_EXACT_BLIT")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            tile_size: num("SUBTILE_TILE_SIZE").unwrap_or(d.tile_size),
            grid_width: num("SUBTILE_GRID_W").unwrap_or(d.grid_width),
            grid_height: num("SUBTILE_GRID_H").unwrap_or(d.grid_height),
            key_budget: lookup("SUBTILE_KEY_BUDGET")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(d.key_budget),
            first_key,
            blit_mode: if exact {
                BlitMode::Exact
            } else {
                BlitMode::Aligned
            },
        }
    }

    pub fn tile_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Master buffer width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.grid_width.saturating_mul(self.tile_size)
    }

    /// Master buffer height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.grid_height.saturating_mul(self.tile_size)
    }

    /// Reject geometry the compositor cannot back.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.tile_size == 0 {
            return Err(ConstructionError::InvalidTileSize(0));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConstructionError::EmptyDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        let too_large = ConstructionError::TooLarge {
            width: self.grid_width,
            height: self.grid_height,
        };
        let w = self
            .grid_width
            .checked_mul(self.tile_size)
            .ok_or(too_large.clone())?;
        let h = self
            .grid_height
            .checked_mul(self.tile_size)
            .ok_or(too_large.clone())?;
        if w > i32::MAX as u32 || h > i32::MAX as u32 {
            return Err(too_large);
        }
        if self.tile_count() > self.key_budget {
            return Err(ConstructionError::KeyBudgetExceeded {
                needed: self.tile_count(),
                budget: self.key_budget,
            });
        }
        Ok(())
    }
}
