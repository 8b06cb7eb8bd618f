//! Demo scene shared by the `subtile` and `legend-dump` binaries.
//!
//! ```text
//! backdrop  painted once, then unregistered (stays in the master buffer)
//! pad       backdrop-colored square under the spinner, erases last rotation
//! spinner   rotating sprite, composited through the transformed path
//! ball      bouncing disc with a backdrop-colored margin, blitted
//! ```
//!
//! The master buffer is never cleared, so every moving surface carries its
//! own eraser: the ball's margin and the spinner's pad.

use std::f64::consts::TAU;

use anyhow::{ensure, Result};

use crate::core::{ConstructionError, Drawer, Sprite, Surface};
use crate::engine::{share, Compositor, HostDisplay, SharedSurface};
use crate::types::Glyph;

pub const BACKDROP: Glyph = Glyph::DarkGray;
const BORDER: Glyph = Glyph::Gray;

const BALL_SIZE: i32 = 10;
const BALL_RADIUS: i32 = 3;
const SPINNER_SIZE: u32 = 16;
/// Covers the spinner's rotated footprint: ceil(16 * sqrt(2)) rounded up to even.
const PAD_SIZE: u32 = 24;
const SPIN_PER_TICK: f64 = TAU / 120.0;

pub struct DemoScene {
    width: i32,
    height: i32,
    spinner: SharedSurface,
    ball: SharedSurface,
    ball_pos: (i32, i32),
    ball_vel: (i32, i32),
    angle: f64,
    ticks: u64,
}

impl DemoScene {
    /// Register the scene's surfaces and publish one frame with the backdrop.
    pub fn new<D: HostDisplay + ?Sized>(
        compositor: &mut Compositor,
        display: &mut D,
    ) -> Result<Self> {
        let width = compositor.buffer().width() as i32;
        let height = compositor.buffer().height() as i32;
        let min = PAD_SIZE as i32 + 2;
        ensure!(
            width >= min && height >= min,
            "screen of {width}x{height} pixels is smaller than the {min}x{min} demo"
        );

        let backdrop = share(backdrop(width as u32, height as u32)?);
        let pad = share(filled(PAD_SIZE, PAD_SIZE, BACKDROP)?);

        let mut spinner = Surface::new(SPINNER_SIZE, SPINNER_SIZE)?;
        spinner.draw_sprite(0, 0, &pinwheel()?);
        let spinner = share(spinner);

        let mut ball = filled(BALL_SIZE as u32, BALL_SIZE as u32, BACKDROP)?;
        ball.draw_circle(BALL_SIZE / 2, BALL_SIZE / 2, BALL_RADIUS, Glyph::Orange);
        let ball = share(ball);

        compositor.add_surface(&backdrop, 0, 0);
        compositor.begin_frame();
        compositor.end_frame(display)?;
        compositor.remove_surface(&backdrop);

        let (cx, cy) = (width / 2, height / 2);
        let half_pad = PAD_SIZE as i32 / 2;
        compositor.add_surface(&pad, cx - half_pad, cy - half_pad);
        compositor.add_surface(&spinner, 0, 0);
        compositor.add_surface(&ball, 1, 1);

        let scene = Self {
            width,
            height,
            spinner,
            ball,
            ball_pos: (1, 1),
            ball_vel: (1, 1),
            angle: 0.0,
            ticks: 0,
        };
        scene.place_spinner();
        tracing::info!(width, height, "demo scene ready");
        Ok(scene)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick: move the ball and turn the spinner.
    pub fn update(&mut self, compositor: &mut Compositor) {
        self.ticks += 1;

        let (mut x, mut y) = self.ball_pos;
        let (mut vx, mut vy) = self.ball_vel;
        let max_x = self.width - 1 - BALL_SIZE;
        let max_y = self.height - 1 - BALL_SIZE;
        if !(1..=max_x).contains(&(x + vx)) {
            vx = -vx;
        }
        if !(1..=max_y).contains(&(y + vy)) {
            vy = -vy;
        }
        x += vx;
        y += vy;
        self.ball_pos = (x, y);
        self.ball_vel = (vx, vy);
        compositor.add_surface(&self.ball, x, y);

        self.angle = (self.angle + SPIN_PER_TICK) % TAU;
        self.place_spinner();
    }

    fn place_spinner(&self) {
        let (cx, cy) = (f64::from(self.width / 2), f64::from(self.height / 2));
        let half = f64::from(SPINNER_SIZE) / 2.0;
        let mut s = self.spinner.borrow_mut();
        s.reset_transformations();
        s.offset(cx, cy);
        s.rotate(self.angle);
        s.offset(-half, -half);
    }
}

fn filled(width: u32, height: u32, glyph: Glyph) -> Result<Surface, ConstructionError> {
    let mut s = Surface::new(width, height)?;
    s.draw_rect(0, 0, width as i32, height as i32, glyph);
    Ok(s)
}

fn backdrop(width: u32, height: u32) -> Result<Surface, ConstructionError> {
    let (w, h) = (width as i32, height as i32);
    let mut s = filled(width, height, BACKDROP)?;
    s.draw_line(0, 0, w - 1, 0, BORDER);
    s.draw_line(0, h - 1, w - 1, h - 1, BORDER);
    s.draw_line(0, 0, 0, h - 1, BORDER);
    s.draw_line(w - 1, 0, w - 1, h - 1, BORDER);
    Ok(s)
}

/// Four-bladed pinwheel built from RGBA so it goes through quantization.
/// Alpha 255 marks transparent pixels.
fn pinwheel() -> Result<Sprite, ConstructionError> {
    const BLADES: [[u8; 3]; 4] = [[235, 73, 100], [254, 231, 15], [45, 224, 62], [26, 177, 249]];
    let n = SPINNER_SIZE as i32;
    let c = n / 2;
    let mut rgba = Vec::with_capacity((n * n * 4) as usize);
    for y in 0..n {
        for x in 0..n {
            let (dx, dy) = (x - c, y - c);
            let blade = match (dx >= 0, dy >= 0) {
                (true, false) => 0,
                (true, true) => 1,
                (false, true) => 2,
                (false, false) => 3,
            };
            let on_blade = dx.abs() <= 2 || dy.abs() <= 2 || dx.abs() == dy.abs();
            let inside = on_blade && dx * dx + dy * dy <= c * c;
            let [r, g, b] = BLADES[blade];
            rgba.extend_from_slice(&[r, g, b, if inside { 0 } else { 255 }]);
        }
    }
    Sprite::from_rgba(SPINNER_SIZE, SPINNER_SIZE, &rgba)
}
