//! The tile compositor.
//!
//! Owns the master pixel buffer and the legend. Once per frame it paints
//! every registered surface into the master buffer (in registration order),
//! re-serializes only the tiles those surfaces touched, and publishes the
//! full legend to the host display.
//!
//! ```text
//! Idle --begin_frame--> Accumulating --end_frame--> Idle
//! ```
//!
//! The master buffer is never cleared between frames; callers clear stale
//! pixels through their own surfaces.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CompositorConfig;
use crate::core::{blit_with, PixelBuffer, Surface};
use crate::dirty::DirtyTiles;
use crate::display::HostDisplay;
use crate::error::{DisplayError, EngineError};
use crate::legend::{CharOffsetEncoder, KeyEncoder, Legend, LegendEntry};
use crate::types::TileCoord;

/// A surface shared between game code (which draws into it) and the
/// compositor (which reads it while compositing).
pub type SharedSurface = Rc<RefCell<Surface>>;

/// Wrap a surface for registration.
pub fn share(surface: Surface) -> SharedSurface {
    Rc::new(RefCell::new(surface))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Accumulating,
}

/// Per-frame counters returned by [`Compositor::end_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Surfaces copied with the byte-aligned fast path.
    pub blitted: usize,
    /// Surfaces mapped pixel by pixel.
    pub transformed: usize,
    /// Surfaces skipped because game code held a mutable borrow.
    pub skipped: usize,
    /// Legend bitmaps regenerated.
    pub tiles_regenerated: usize,
}

pub struct Compositor {
    config: CompositorConfig,
    buffer: PixelBuffer,
    surfaces: Vec<SharedSurface>,
    legend: Legend,
    tile_map: String,
    dirty: DirtyTiles,
    phase: FramePhase,
    frames: u64,
}

impl Compositor {
    /// Build a compositor with consecutive character keys and publish the
    /// tile map plus a blank legend.
    pub fn new<D: HostDisplay + ?Sized>(
        config: CompositorConfig,
        display: &mut D,
    ) -> Result<Self, EngineError> {
        let encoder = CharOffsetEncoder::new(config.first_key, config.key_budget);
        Self::with_encoder(config, &encoder, display)
    }

    /// Same as [`Compositor::new`] with a custom key encoder.
    pub fn with_encoder<D: HostDisplay + ?Sized>(
        config: CompositorConfig,
        encoder: &dyn KeyEncoder,
        display: &mut D,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let buffer = PixelBuffer::new(config.pixel_width(), config.pixel_height())?;

        let ts = config.tile_size;
        let mut blank = String::with_capacity((ts as usize + 1) * ts as usize);
        buffer.write_region(0, 0, ts, ts, &mut blank);

        let legend = Legend::new(config.grid_width, config.grid_height, encoder, &blank)?;
        let tile_map = legend.tile_map();
        let dirty = DirtyTiles::new(config.grid_width, config.grid_height);

        display.set_map(&tile_map)?;
        display.set_legend(legend.entries())?;

        tracing::debug!(
            grid_width = config.grid_width,
            grid_height = config.grid_height,
            tile_size = ts,
            "compositor created"
        );

        Ok(Self {
            config,
            buffer,
            surfaces: Vec::new(),
            legend,
            tile_map,
            dirty,
            phase: FramePhase::Idle,
            frames: 0,
        })
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// The composited master buffer.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn legend(&self) -> &[LegendEntry] {
        self.legend.entries()
    }

    pub fn tile_map(&self) -> &str {
        &self.tile_map
    }

    /// Current bitmap of one tile.
    pub fn bitmap(&self, tile: TileCoord) -> Option<&str> {
        self.legend.get(tile).map(|e| e.bitmap.as_str())
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn contains(&self, surface: &SharedSurface) -> bool {
        self.surfaces.iter().any(|s| Rc::ptr_eq(s, surface))
    }

    /// Register a surface at `(x, y)` on top of everything else.
    ///
    /// Re-adding an already registered surface moves it to the top.
    pub fn add_surface(&mut self, surface: &SharedSurface, x: i32, y: i32) {
        match surface.try_borrow_mut() {
            Ok(mut s) => s.set_position(f64::from(x), f64::from(y)),
            Err(_) => tracing::warn!(x, y, "add_surface: surface is borrowed, position unchanged"),
        }
        self.remove_surface(surface);
        self.surfaces.push(Rc::clone(surface));
    }

    /// Unregister a surface. Returns whether it was registered.
    pub fn remove_surface(&mut self, surface: &SharedSurface) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|s| !Rc::ptr_eq(s, surface));
        self.surfaces.len() != before
    }

    /// Mark one tile for regeneration. Out-of-range tiles are ignored.
    pub fn mark_dirty(&mut self, tile: TileCoord) {
        self.dirty.mark(tile);
    }

    pub fn is_dirty(&self, tile: TileCoord) -> bool {
        self.dirty.contains(tile)
    }

    /// Regenerate every tile on the next [`Compositor::end_frame`].
    pub fn invalidate(&mut self) {
        self.dirty.mark_all();
    }

    /// Start a frame: forget last frame's dirty tiles. The master buffer
    /// keeps its pixels.
    pub fn begin_frame(&mut self) {
        self.dirty.clear();
        self.phase = FramePhase::Accumulating;
    }

    /// Composite, regenerate dirty tiles and publish the legend once.
    ///
    /// The legend is only handed to the display after every dirty bitmap is
    /// rebuilt, so a display never sees a partial frame.
    pub fn end_frame<D: HostDisplay + ?Sized>(
        &mut self,
        display: &mut D,
    ) -> Result<FrameStats, DisplayError> {
        if self.phase == FramePhase::Idle {
            tracing::debug!("end_frame called without begin_frame");
        }

        let mut stats = FrameStats::default();
        let ts = self.config.tile_size;

        for handle in &self.surfaces {
            let Ok(surface) = handle.try_borrow() else {
                tracing::warn!("surface mutably borrowed during compositing, skipped");
                stats.skipped += 1;
                continue;
            };

            let (x0, y0, x1, y1) = if surface.is_transformed() {
                for (x, y, glyph) in surface.transformed_pixels() {
                    self.buffer.set(x, y, glyph);
                }
                stats.transformed += 1;

                let (min_x, min_y, max_x, max_y) = surface
                    .transform()
                    .bounds(f64::from(surface.width()), f64::from(surface.height()));
                (
                    min_x.floor() as i64,
                    min_y.floor() as i64,
                    (max_x.floor() as i64).saturating_add(1),
                    (max_y.floor() as i64).saturating_add(1),
                )
            } else {
                let (ex, ey) = surface.position();
                let (x, y) = (ex.floor() as i32, ey.floor() as i32);
                blit_with(
                    surface.buffer(),
                    &mut self.buffer,
                    surface.width() as i32,
                    surface.height() as i32,
                    x,
                    y,
                    self.config.blit_mode,
                );
                stats.blitted += 1;

                (
                    i64::from(x),
                    i64::from(y),
                    i64::from(x) + i64::from(surface.width()),
                    i64::from(y) + i64::from(surface.height()),
                )
            };

            self.dirty.mark_pixel_rect(x0, y0, x1, y1, ts);
        }

        let grid_width = self.config.grid_width;
        for &index in self.dirty.indices() {
            let tile = TileCoord::from_index(index, grid_width);
            let bitmap = self.legend.bitmap_mut(index);
            self.buffer
                .write_region(tile.tx * ts as i32, tile.ty * ts as i32, ts, ts, bitmap);
        }
        stats.tiles_regenerated = self.dirty.len();

        display.set_legend(self.legend.entries())?;

        self.phase = FramePhase::Idle;
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            blitted = stats.blitted,
            transformed = stats.transformed,
            tiles = stats.tiles_regenerated,
            "frame published"
        );
        Ok(stats)
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("config", &self.config)
            .field("surfaces", &self.surfaces.len())
            .field("dirty", &self.dirty.len())
            .field("phase", &self.phase)
            .field("frames", &self.frames)
            .finish()
    }
}
