pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Interpolation contract for geometric value types.
///
/// Implementations use the `a * (1 - t) + b * t` form so that `t == 0` and `t == 1`
/// reproduce the endpoints exactly.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`. `t` is not clamped.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(<f64 as Lerp>::lerp(&a.x, &b.x, t), <f64 as Lerp>::lerp(&a.y, &b.y, t))
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(<f64 as Lerp>::lerp(&a.x, &b.x, t), <f64 as Lerp>::lerp(&a.y, &b.y, t))
    }
}

impl Lerp for Rect {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rect::new(
            <f64 as Lerp>::lerp(&a.x0, &b.x0, t),
            <f64 as Lerp>::lerp(&a.y0, &b.y0, t),
            <f64 as Lerp>::lerp(&a.x1, &b.x1, t),
            <f64 as Lerp>::lerp(&a.y1, &b.y1, t),
        )
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let n = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if n >= 360.0 { 0.0 } else { n }
}
