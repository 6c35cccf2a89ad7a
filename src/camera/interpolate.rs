//! Pairwise camera interpolation.
//!
//! Progress `p` arrives already eased and is not clamped. Out-of-range progress
//! under/overshoots geometrically, which is only accepted when the caller opts in
//! or when a path or relative zoom shapes the move.

use crate::{
    camera::{state::CameraState, trajectory::Trajectory},
    foundation::core::{Lerp, Point, Rect, Vec2, normalize_degrees},
};

/// Lowest relative zoom, in percent. Anything at or below -100 % would zero the scale.
pub const MIN_RELATIVE_ZOOM: f64 = -99.0;

/// Shape of one layer's move beyond its two endpoint states.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterpolationParams<'a> {
    /// Signed zoom overshoot in percent; `0` means plain geometric zoom.
    pub relative_zoom: f64,
    /// Trajectory replacing straight-line translation.
    pub trajectory: Option<&'a Trajectory>,
    /// Traverse the trajectory from its end to its start.
    pub reverse_path: bool,
    /// Accept progress outside `[0, 1]` on straight moves (overshooting timing curves).
    pub allow_overshoot: bool,
}

/// Camera between `a` (`p = 0`) and `b` (`p = 1`).
pub fn interpolate(
    a: &CameraState,
    b: &CameraState,
    p: f64,
    params: &InterpolationParams<'_>,
) -> CameraState {
    debug_assert!(
        params.allow_overshoot
            || params.trajectory.is_some()
            || params.relative_zoom != 0.0
            || (-1e-9..=1.0 + 1e-9).contains(&p),
        "straight camera move with progress {p} outside [0, 1]"
    );

    let center = match params.trajectory {
        Some(tr) => along_trajectory(a.center, b.center, p, tr, params.reverse_path),
        None => <Point as Lerp>::lerp(&a.center, &b.center, p),
    };
    let scale = Vec2::new(
        interpolate_scale(a.scale.x, b.scale.x, p, params.relative_zoom),
        interpolate_scale(a.scale.y, b.scale.y, p, params.relative_zoom),
    );
    let clip = match (a.clip, b.clip) {
        (Some(ca), Some(cb)) => Some(<Rect as Lerp>::lerp(&ca, &cb, p)),
        _ => None,
    };

    CameraState {
        center,
        scale,
        rotation: interpolate_rotation(a.rotation, b.rotation, p),
        clip,
        reference: if p >= 1.0 { b.reference.clone() } else { None },
    }
}

/// Scale factor at progress `p`.
///
/// Without relative zoom the scale moves geometrically from `a` to `b`. With relative
/// zoom the move is split at `p = 0.5` into `a -> a * (1 + zoom / 100)` and
/// `peak -> b`, both geometric.
pub fn interpolate_scale(a: f64, b: f64, p: f64, relative_zoom: f64) -> f64 {
    if relative_zoom == 0.0 || !relative_zoom.is_finite() {
        return geometric(a, b, p);
    }
    let peak = a * (1.0 + relative_zoom.max(MIN_RELATIVE_ZOOM) / 100.0);
    if p < 0.5 {
        geometric(a, peak, 2.0 * p)
    } else {
        geometric(peak, b, 2.0 * p - 1.0)
    }
}

/// Rotation at progress `p`, turning the short way round. Result in `[0, 360)`.
pub fn interpolate_rotation(a: f64, b: f64, p: f64) -> f64 {
    let mut delta = (b - a).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    normalize_degrees(a + delta * p)
}

fn geometric(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a * (b / a).powf(t)
    }
}

// The path supplies the shape of the move; the offsets between the path ends and the
// camera endpoints are blended so the move starts at `a` and ends at `b`.
fn along_trajectory(a: Point, b: Point, p: f64, tr: &Trajectory, reverse: bool) -> Point {
    let (start, end, along) = if reverse {
        (tr.end(), tr.start(), 1.0 - p)
    } else {
        (tr.start(), tr.end(), p)
    };
    tr.point_at(along) + <Vec2 as Lerp>::lerp(&(a - start), &(b - end), p)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/interpolate.rs"]
mod tests;
