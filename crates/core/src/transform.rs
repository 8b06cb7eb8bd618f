//! 2×3 affine transforms.
//!
//! ```text
//! x' = a·x + b·y + e
//! y' = c·x + d·y + f
//! ```

use std::ops::Mul;

/// Affine map from surface space to compositor space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// Axis scale. Negative factors are taken by magnitude (no mirroring).
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx.abs(), 0.0, 0.0, sy.abs(), 0.0, 0.0)
    }

    /// Rotation by `radians` about the origin.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, -sin, sin, cos, 0.0, 0.0)
    }

    /// `x' = x + shx·y`, `y' = shy·x + y`.
    pub const fn shear(shx: f64, shy: f64) -> Self {
        Self::new(1.0, shx, shy, 1.0, 0.0, 0.0)
    }

    /// `self ∘ other`: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            e: self.a * other.e + self.b * other.f + self.e,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            f: self.c * other.e + self.d * other.f + self.f,
        }
    }

    #[inline(always)]
    pub fn transform_x(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y + self.e
    }

    #[inline(always)]
    pub fn transform_y(&self, x: f64, y: f64) -> f64 {
        self.c * x + self.d * y + self.f
    }

    #[inline(always)]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.transform_x(x, y), self.transform_y(x, y))
    }

    /// True when the linear part is the identity (the map is a pure translation).
    pub fn is_translation_only(&self) -> bool {
        self.a == 1.0 && self.d == 1.0 && self.b == 0.0 && self.c == 0.0
    }

    /// Bounding box of the transformed rectangle `[0, w] × [0, h]` as
    /// `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self, w: f64, h: f64) -> (f64, f64, f64, f64) {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];
        corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
