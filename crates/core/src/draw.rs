//! Drawing primitives over a [`PixelBuffer`].
//!
//! All primitives clip silently. In debug builds a clipped call is reported
//! through `tracing` at debug level so misplaced draws are visible without
//! costing anything in release frames.

use crate::buffer::PixelBuffer;
use crate::sprite::Sprite;
use crate::types::Glyph;

/// Stateless drawing operations.
///
/// Implementors only expose the buffer to draw into; every primitive is a
/// provided method.
pub trait Drawer {
    /// Buffer the primitives write into.
    fn target(&mut self) -> &mut PixelBuffer;

    /// Single bounds-checked write.
    fn draw_pixel(&mut self, x: i32, y: i32, glyph: Glyph) {
        let buf = self.target();
        if !buf.in_bounds(x, y) {
            if cfg!(debug_assertions) {
                tracing::debug!(x, y, "draw_pixel clipped");
            }
            return;
        }
        buf.set(x, y, glyph);
    }

    /// Fill a rectangle, clipped to the buffer.
    ///
    /// The origin is checked once: if `(x, y)` is outside the buffer the whole
    /// call does nothing, even when part of the rectangle would be visible.
    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, glyph: Glyph) {
        let buf = self.target();
        if !buf.in_bounds(x, y) {
            if cfg!(debug_assertions) {
                tracing::debug!(x, y, width, height, "draw_rect origin out of bounds");
            }
            return;
        }
        let x_end = x.saturating_add(width).min(buf.width() as i32);
        let y_end = y.saturating_add(height).min(buf.height() as i32);
        for yi in y..y_end {
            for xi in x..x_end {
                buf.set(xi, yi, glyph);
            }
        }
    }

    /// Fill every cell within `radius` of `(cx, cy)`. Radius is clamped to 1.
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, glyph: Glyph) {
        let buf = self.target();
        let r = radius.max(1);
        let r_sq = i64::from(r) * i64::from(r);

        if cfg!(debug_assertions) && spills(buf, cx, cy, cx, cy, r) {
            tracing::debug!(cx, cy, radius, "draw_circle clipped");
        }

        let x_start = cx.saturating_sub(r).max(0);
        let y_start = cy.saturating_sub(r).max(0);
        let x_end = cx.saturating_add(r).saturating_add(1).min(buf.width() as i32);
        let y_end = cy.saturating_add(r).saturating_add(1).min(buf.height() as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let dx = i64::from(x) - i64::from(cx);
                let dy = i64::from(y) - i64::from(cy);
                if dx * dx + dy * dy <= r_sq {
                    buf.set(x, y, glyph);
                }
            }
        }
    }

    /// Transparent [`Drawer::draw_rect`].
    fn clear_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.draw_rect(x, y, width, height, Glyph::Transparent);
    }

    /// Reset the whole buffer to transparent.
    fn clear_surface(&mut self) {
        self.target().clear();
    }

    /// One-cell-wide Bresenham line, both endpoints inclusive.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, glyph: Glyph) {
        let buf = self.target();
        if cfg!(debug_assertions)
            && spills(buf, x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1), 0)
        {
            tracing::debug!(x0, y0, x1, y1, "draw_line clipped");
        }
        for_each_line_cell(x0, y0, x1, y1, |x, y| buf.set(x, y, glyph));
    }

    /// Bresenham line stamping a `(2 * (width / 2) + 1)`-sided square per step.
    fn draw_thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, glyph: Glyph) {
        let half = (width / 2).max(0);
        if half == 0 {
            self.draw_line(x0, y0, x1, y1, glyph);
            return;
        }
        let buf = self.target();
        if cfg!(debug_assertions)
            && spills(buf, x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1), half)
        {
            tracing::debug!(x0, y0, x1, y1, width, "draw_thick_line clipped");
        }
        for_each_line_cell(x0, y0, x1, y1, |x, y| {
            for sy in y.saturating_sub(half)..=y.saturating_add(half) {
                for sx in x.saturating_sub(half)..=x.saturating_add(half) {
                    buf.set(sx, sy, glyph);
                }
            }
        });
    }

    /// Copy every sprite glyph (transparent included) with its top-left at
    /// `(x, y)`. Only the destination side is clipped.
    fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite) {
        let buf = self.target();
        let sw = sprite.width() as i32;
        if cfg!(debug_assertions) {
            let (x0, y0) = (i64::from(x), i64::from(y));
            let x1 = x0 + i64::from(sprite.width()) - 1;
            let y1 = y0 + i64::from(sprite.height()) - 1;
            if spills_rect(buf, x0, y0, x1, y1) {
                tracing::debug!(x, y, "draw_sprite clipped");
            }
        }
        let x_end = x.saturating_add(sw).min(buf.width() as i32);
        let y_end = y.saturating_add(sprite.height() as i32).min(buf.height() as i32);

        for yi in y.max(0)..y_end {
            let row = (yi - y) as usize * sw as usize;
            for xi in x.max(0)..x_end {
                buf.set(xi, yi, sprite.glyph_at(row + (xi - x) as usize));
            }
        }
    }
}

impl Drawer for PixelBuffer {
    fn target(&mut self) -> &mut PixelBuffer {
        self
    }
}

/// True when the box `[x0 - pad, x1 + pad] × [y0 - pad, y1 + pad]` leaves `buf`.
fn spills(buf: &PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, pad: i32) -> bool {
    let pad = i64::from(pad);
    spills_rect(
        buf,
        i64::from(x0) - pad,
        i64::from(y0) - pad,
        i64::from(x1) + pad,
        i64::from(y1) + pad,
    )
}

fn spills_rect(buf: &PixelBuffer, x0: i64, y0: i64, x1: i64, y1: i64) -> bool {
    x0 < 0 || y0 < 0 || x1 >= i64::from(buf.width()) || y1 >= i64::from(buf.height())
}

/// Walk the Bresenham cells between two points.
///
/// Endpoints are put in a canonical order first so that swapping them visits
/// exactly the same cells.
pub fn for_each_line_cell(x0: i32, y0: i32, x1: i32, y1: i32, mut f: impl FnMut(i32, i32)) {
    let ((mut x, mut y), (xe, ye)) = if (x0, y0) <= (x1, y1) {
        ((x0, y0), (x1, y1))
    } else {
        ((x1, y1), (x0, y0))
    };

    let dx = (i64::from(xe) - i64::from(x)).abs();
    let dy = (i64::from(ye) - i64::from(y)).abs();
    let sx = if x < xe { 1 } else { -1 };
    let sy = if y < ye { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        f(x, y);
        if x == xe && y == ye {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
