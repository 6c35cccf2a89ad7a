use super::*;
use crate::foundation::core::Size;

fn straight() -> InterpolationParams<'static> {
    InterpolationParams::default()
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn near_point(a: Point, b: Point, tol: f64) -> bool {
    (a - b).hypot() < tol
}

#[test]
fn endpoints_reproduce_the_states() {
    let a = CameraState::new(Point::new(0.0, 0.0), 1.0).with_rotation(10.0);
    let b = CameraState::new(Point::new(100.0, 40.0), 4.0).with_rotation(50.0);

    let at0 = interpolate(&a, &b, 0.0, &straight());
    assert_eq!(at0.center, a.center);
    assert_eq!(at0.scale, a.scale);
    assert!(near(at0.rotation, 10.0));

    let at1 = interpolate(&a, &b, 1.0, &straight());
    assert_eq!(at1.center, b.center);
    assert_eq!(at1.scale, b.scale);
    assert!(near(at1.rotation, 50.0));
}

#[test]
fn center_moves_linearly() {
    let a = CameraState::new(Point::new(0.0, 0.0), 1.0);
    let b = CameraState::new(Point::new(100.0, -20.0), 1.0);
    let mid = interpolate(&a, &b, 0.25, &straight());
    assert!(near_point(mid.center, Point::new(25.0, -5.0), 1e-12));
}

#[test]
fn scale_moves_geometrically() {
    assert!(near(interpolate_scale(1.0, 4.0, 0.5, 0.0), 2.0));
    assert!(near(interpolate_scale(8.0, 2.0, 0.5, 0.0), 4.0));
    assert_eq!(interpolate_scale(3.0, 3.0, 0.7, 0.0), 3.0);
}

#[test]
fn relative_zoom_peaks_at_the_midpoint() {
    assert_eq!(interpolate_scale(2.0, 2.0, 0.5, 50.0), 2.0 * 1.5);
    assert_eq!(interpolate_scale(2.0, 5.0, 0.0, 50.0), 2.0);
    assert_eq!(interpolate_scale(2.0, 5.0, 1.0, 50.0), 5.0);

    // Zooming out halfway through.
    let dip = interpolate_scale(1.0, 1.0, 0.5, -50.0);
    assert!(near(dip, 0.5));
    assert!(interpolate_scale(1.0, 1.0, 0.25, -50.0) > dip);
}

#[test]
fn relative_zoom_is_bounded_below() {
    let s = interpolate_scale(1.0, 1.0, 0.5, -250.0);
    assert!(s > 0.0);
    assert!(near(s, 1.0 + MIN_RELATIVE_ZOOM / 100.0));
}

#[test]
fn rotation_takes_the_short_way() {
    assert!(near(interpolate_rotation(350.0, 10.0, 0.5), 0.0));
    assert!(near(interpolate_rotation(10.0, 350.0, 0.5), 0.0));
    assert!(near(interpolate_rotation(0.0, 90.0, 0.5), 45.0));
    assert!(near(interpolate_rotation(20.0, 20.0, 0.3), 20.0));
    let r = interpolate_rotation(350.0, 10.0, 0.25);
    assert!(near(r, 355.0));
}

#[test]
fn clip_needs_both_ends() {
    let clip_a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let clip_b = Rect::new(10.0, 10.0, 30.0, 30.0);
    let a = CameraState::default().with_clip(clip_a);
    let b = CameraState::default().with_clip(clip_b);

    let mid = interpolate(&a, &b, 0.5, &straight());
    assert_eq!(mid.clip, Some(Rect::new(5.0, 5.0, 20.0, 20.0)));

    let unclipped = CameraState::default();
    assert_eq!(interpolate(&a, &unclipped, 0.5, &straight()).clip, None);
    assert_eq!(interpolate(&unclipped, &b, 0.5, &straight()).clip, None);
}

#[test]
fn reference_appears_only_at_the_end() {
    let a = CameraState::default();
    let mut b = CameraState::default();
    b.fit(Rect::new(0.0, 0.0, 10.0, 10.0), Size::new(10.0, 10.0), "target");

    assert!(interpolate(&a, &b, 0.99, &straight()).reference.is_none());
    assert_eq!(interpolate(&a, &b, 1.0, &straight()).reference, b.reference);
}

#[test]
fn trajectory_shapes_the_move_and_keeps_endpoints() {
    let tr = Trajectory::parse("M0 0 L0 100 L100 100").unwrap();
    let a = CameraState::new(Point::new(0.0, 0.0), 1.0);
    let b = CameraState::new(Point::new(100.0, 100.0), 1.0);
    let params = InterpolationParams {
        trajectory: Some(&tr),
        ..InterpolationParams::default()
    };

    assert!(near_point(interpolate(&a, &b, 0.0, &params).center, a.center, 1e-9));
    assert!(near_point(interpolate(&a, &b, 1.0, &params).center, b.center, 1e-9));
    // Halfway along the path is its corner, not the straight-line midpoint.
    let mid = interpolate(&a, &b, 0.5, &params).center;
    assert!(near_point(mid, Point::new(0.0, 100.0), 1e-3));
}

#[test]
fn trajectory_offsets_blend_between_ends() {
    let tr = Trajectory::parse("M0 0 L100 0").unwrap();
    let a = CameraState::new(Point::new(10.0, 10.0), 1.0);
    let b = CameraState::new(Point::new(100.0, 30.0), 1.0);
    let params = InterpolationParams {
        trajectory: Some(&tr),
        ..InterpolationParams::default()
    };

    assert!(near_point(interpolate(&a, &b, 0.0, &params).center, a.center, 1e-9));
    assert!(near_point(interpolate(&a, &b, 1.0, &params).center, b.center, 1e-9));
    let mid = interpolate(&a, &b, 0.5, &params).center;
    assert!(near_point(mid, Point::new(55.0, 20.0), 1e-3));
}

#[test]
fn reversed_trajectory_runs_end_to_start() {
    let tr = Trajectory::parse("M0 0 L0 100 L100 100").unwrap();
    // Moving from the path end back to its start.
    let a = CameraState::new(Point::new(100.0, 100.0), 1.0);
    let b = CameraState::new(Point::new(0.0, 0.0), 1.0);
    let params = InterpolationParams {
        trajectory: Some(&tr),
        reverse_path: true,
        ..InterpolationParams::default()
    };

    assert!(near_point(interpolate(&a, &b, 0.0, &params).center, a.center, 1e-9));
    assert!(near_point(interpolate(&a, &b, 1.0, &params).center, b.center, 1e-9));
    let quarter = interpolate(&a, &b, 0.25, &params).center;
    assert!(near_point(quarter, Point::new(50.0, 100.0), 1e-3));
}

#[test]
fn overshoot_is_accepted_when_allowed() {
    let a = CameraState::new(Point::new(0.0, 0.0), 1.0);
    let b = CameraState::new(Point::new(100.0, 0.0), 1.0);
    let params = InterpolationParams {
        allow_overshoot: true,
        ..InterpolationParams::default()
    };
    let over = interpolate(&a, &b, 1.1, &params);
    assert!(near_point(over.center, Point::new(110.0, 0.0), 1e-9));
}
