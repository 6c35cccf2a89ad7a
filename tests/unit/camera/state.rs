use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn center_maps_to_viewport_center() {
    let cam = CameraState::new(Point::new(40.0, -10.0), 3.0).with_rotation(30.0);
    let vp = Size::new(800.0, 600.0);
    assert!(close(cam.to_affine(vp) * cam.center, Point::new(400.0, 300.0)));
}

#[test]
fn identity_camera_only_recenters() {
    let cam = CameraState::default();
    let a = cam.to_affine(Size::new(100.0, 50.0));
    assert!(close(a * Point::new(10.0, 5.0), Point::new(60.0, 30.0)));
}

#[test]
fn rotation_turns_content_the_opposite_way() {
    let cam = CameraState::default().with_rotation(90.0);
    let a = cam.to_affine(Size::new(0.0, 0.0));
    // Camera turned clockwise by 90 degrees: +x content appears at -y on screen.
    assert!(close(a * Point::new(1.0, 0.0), Point::new(0.0, -1.0)));
}

#[test]
fn with_rotation_normalizes() {
    assert_eq!(CameraState::default().with_rotation(-30.0).rotation, 330.0);
    assert_eq!(CameraState::default().with_rotation(720.0).rotation, 0.0);
}

#[test]
fn fit_shows_the_whole_box() {
    let mut cam = CameraState::default().with_rotation(45.0);
    let bbox = Rect::new(0.0, 0.0, 200.0, 50.0);
    cam.fit(bbox, Size::new(400.0, 400.0), "title");

    assert_eq!(cam.center, Point::new(100.0, 25.0));
    assert_eq!(cam.scale, Vec2::new(2.0, 2.0));
    assert_eq!(cam.rotation, 0.0);
    assert_eq!(cam.reference.as_ref().map(|r| r.id.as_str()), Some("title"));
}

#[test]
fn fit_keeps_scale_for_degenerate_boxes() {
    let mut cam = CameraState::new(Point::ORIGIN, 1.5);
    cam.fit(Rect::new(5.0, 5.0, 5.0, 5.0), Size::new(100.0, 100.0), "dot");
    assert_eq!(cam.scale, Vec2::new(1.5, 1.5));
    assert_eq!(cam.center, Point::new(5.0, 5.0));

    cam.fit(Rect::new(0.0, 0.0, 0.0, 20.0), Size::new(100.0, 100.0), "line");
    assert_eq!(cam.scale, Vec2::new(5.0, 5.0));
}

#[test]
fn refit_tracks_viewport_size_and_keeps_rotation() {
    let mut cam = CameraState::default();
    cam.fit(Rect::new(0.0, 0.0, 100.0, 100.0), Size::new(100.0, 100.0), "r");
    cam.rotation = 90.0;

    assert!(cam.refit(Size::new(300.0, 200.0)));
    assert_eq!(cam.scale, Vec2::new(2.0, 2.0));
    assert_eq!(cam.rotation, 90.0);

    assert!(!CameraState::default().refit(Size::new(1.0, 1.0)));
}

#[test]
fn zoom_keeps_anchor_fixed_on_screen() {
    let vp = Size::new(640.0, 480.0);
    let mut cam = CameraState::new(Point::new(10.0, 20.0), 1.0).with_rotation(15.0);
    let anchor = Point::new(50.0, -30.0);
    let before = cam.to_affine(vp) * anchor;

    cam.zoom(2.5, anchor);

    assert_eq!(cam.scale, Vec2::new(2.5, 2.5));
    assert!(close(cam.to_affine(vp) * anchor, before));
}

#[test]
fn zoom_ignores_non_positive_factors() {
    let mut cam = CameraState::new(Point::new(1.0, 1.0), 2.0);
    cam.zoom(0.0, Point::ORIGIN);
    cam.zoom(-1.0, Point::ORIGIN);
    cam.zoom(f64::INFINITY, Point::ORIGIN);
    assert_eq!(cam, CameraState::new(Point::new(1.0, 1.0), 2.0));
}

#[test]
fn interactive_moves_drop_the_reference() {
    let mut cam = CameraState::default();
    cam.fit(Rect::new(0.0, 0.0, 10.0, 10.0), Size::new(10.0, 10.0), "r");
    cam.pan(Vec2::new(3.0, 4.0));
    assert!(cam.reference.is_none());
    assert_eq!(cam.center, Point::new(8.0, 9.0));

    cam.rotate(-45.0);
    assert_eq!(cam.rotation, 315.0);
}

#[test]
fn scale_validity() {
    assert!(CameraState::default().has_valid_scale());
    let mut cam = CameraState::default();
    cam.scale = Vec2::new(1.0, 0.0);
    assert!(!cam.has_valid_scale());
    cam.scale = Vec2::new(f64::NAN, 1.0);
    assert!(!cam.has_valid_scale());
}

#[test]
fn json_defaults_fill_optional_fields() {
    let cam: CameraState = serde_json::from_str(r#"{"center":{"x":1.0,"y":2.0}}"#).unwrap();
    assert_eq!(cam, CameraState::new(Point::new(1.0, 2.0), 1.0));
}
