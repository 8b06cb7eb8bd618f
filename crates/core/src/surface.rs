//! Independently drawable, placeable pixel surface.

use crate::buffer::PixelBuffer;
use crate::draw::Drawer;
use crate::error::ConstructionError;
use crate::transform::AffineTransform;
use crate::types::Glyph;

/// A private pixel buffer plus the transform that places it on screen.
///
/// Drawing goes through the [`Drawer`] trait; the compositor only reads the
/// buffer while compositing.
#[derive(Debug, Clone)]
pub struct Surface {
    buffer: PixelBuffer,
    transform: AffineTransform,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, ConstructionError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
            transform: AffineTransform::identity(),
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// `current = current ∘ t`, so `t` acts on surface coordinates before
    /// everything already applied.
    pub fn apply_transformation(&mut self, t: AffineTransform) {
        self.transform = self.transform.multiply(&t);
    }

    pub fn reset_transformations(&mut self) {
        self.transform = AffineTransform::identity();
    }

    pub fn rotate(&mut self, radians: f64) {
        self.apply_transformation(AffineTransform::rotation(radians));
    }

    pub fn shear(&mut self, shx: f64, shy: f64) {
        self.apply_transformation(AffineTransform::shear(shx, shy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.apply_transformation(AffineTransform::scaling(sx, sy));
    }

    pub fn offset(&mut self, dx: f64, dy: f64) {
        self.apply_transformation(AffineTransform::translation(dx, dy));
    }

    /// Overwrite the translation component, keeping the linear part.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.transform.e = x;
        self.transform.f = y;
    }

    /// Current translation `(e, f)`.
    pub fn position(&self) -> (f64, f64) {
        (self.transform.e, self.transform.f)
    }

    /// True once a scale, shear or rotation has been composed in.
    pub fn is_transformed(&self) -> bool {
        !self.transform.is_translation_only()
    }

    /// Screen-space `(x, y, glyph)` for every non-transparent cell.
    ///
    /// Lazy: nothing is buffered, so the compositor's slow path does not
    /// allocate.
    pub fn transformed_pixels(&self) -> impl Iterator<Item = (i32, i32, Glyph)> + '_ {
        let t = self.transform;
        self.buffer
            .cells()
            .filter(|(_, _, g)| !g.is_transparent())
            .map(move |(x, y, g)| {
                let (fx, fy) = t.apply(f64::from(x), f64::from(y));
                (fx.floor() as i32, fy.floor() as i32, g)
            })
    }
}

impl Drawer for Surface {
    fn target(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_keep_surface_untransformed() {
        let mut s = Surface::new(4, 4).unwrap();
        s.offset(3.0, 2.0);
        s.offset(-1.0, 5.0);
        assert!(!s.is_transformed());
        assert_eq!(s.position(), (2.0, 7.0));
    }

    #[test]
    fn scale_then_offset_scales_the_offset() {
        let mut s = Surface::new(4, 4).unwrap();
        s.scale(2.0, 2.0);
        s.offset(3.0, 0.0);
        assert!(s.is_transformed());
        // offset applies first in surface space, then the scale
        assert_eq!(s.position(), (6.0, 0.0));
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut s = Surface::new(2, 2).unwrap();
        s.rotate(1.0);
        s.reset_transformations();
        assert_eq!(*s.transform(), AffineTransform::identity());
    }

    #[test]
    fn transformed_pixels_skip_transparent_and_floor() {
        let mut s = Surface::new(3, 1).unwrap();
        s.draw_pixel(0, 0, Glyph::Red);
        s.draw_pixel(2, 0, Glyph::Blue);
        s.offset(0.5, 1.5);
        s.scale(2.0, 1.0);
        let px: Vec<_> = s.transformed_pixels().collect();
        assert_eq!(px, vec![(0, 1, Glyph::Red), (4, 1, Glyph::Blue)]);
    }

    #[test]
    fn set_position_keeps_linear_part() {
        let mut s = Surface::new(2, 2).unwrap();
        s.scale(3.0, 3.0);
        s.set_position(10.0, 20.0);
        assert!(s.is_transformed());
        assert_eq!(s.transform().a, 3.0);
        assert_eq!(s.position(), (10.0, 20.0));
    }
}
