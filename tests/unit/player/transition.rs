use super::*;
use crate::{
    foundation::core::{Point, Size},
    presentation::model::{Frame, LayerFrame, LayerInfo, TransitionParams},
};

const VIEWPORT: Size = Size::new(800.0, 600.0);

fn params(duration_ms: f64, timing: &str, path: Option<&str>) -> TransitionParams {
    TransitionParams {
        duration_ms,
        timing_function: timing.into(),
        relative_zoom: 0.0,
        path: path.map(Into::into),
    }
}

fn frame(id: &str, x: f64, layers: Vec<TransitionParams>) -> Frame {
    Frame {
        id: id.into(),
        title: String::new(),
        timeout_ms: None,
        layers: layers
            .into_iter()
            .map(|t| LayerFrame::new(CameraState::new(Point::new(x, 0.0), 1.0)).transition(t))
            .collect(),
    }
}

fn deck() -> Presentation {
    Presentation {
        layers: vec![
            LayerInfo {
                id: "a".into(),
                label: None,
            },
            LayerInfo {
                id: "b".into(),
                label: None,
            },
        ],
        frames: vec![
            frame("f0", 0.0, vec![params(500.0, "linear", None); 2]),
            frame(
                "f1",
                100.0,
                vec![
                    params(1000.0, "easeIn", Some("M0 0 L100 0")),
                    params(1000.0, "easeIn", None),
                ],
            ),
            frame(
                "f2",
                200.0,
                vec![params(300.0, "ease", None), params(700.0, "stepStart", None)],
            ),
        ],
    }
}

fn live(x: f64) -> Vec<CameraState> {
    vec![CameraState::new(Point::new(x, 0.0), 1.0); 2]
}

#[test]
fn forward_move_uses_target_frame_parameters() {
    let plan = TransitionPlan::new(&deck(), &live(0.0), 0, 1, VIEWPORT, 500.0);
    assert!(!plan.backward);
    assert_eq!(plan.layers.len(), 2);
    let l0 = &plan.layers[0];
    assert_eq!(l0.duration_ms, 1000.0);
    assert_eq!(l0.timing, TimingFunction::EaseIn);
    assert!(l0.trajectory.is_some());
    assert!(!l0.reverse_path);
    assert_eq!(l0.to.center, Point::new(100.0, 0.0));
    assert_eq!(plan.shared_duration_ms(), Some(1000.0));
}

#[test]
fn backward_move_replays_the_left_frame_in_reverse() {
    let plan = TransitionPlan::new(&deck(), &live(100.0), 1, 0, VIEWPORT, 500.0);
    assert!(plan.backward);
    let l0 = &plan.layers[0];
    assert_eq!(l0.duration_ms, 1000.0);
    assert_eq!(l0.timing, TimingFunction::EaseOut);
    assert!(l0.reverse_path);
    assert_eq!(l0.to.center, Point::ORIGIN);
}

#[test]
fn mixed_durations_have_no_shared_duration() {
    let plan = TransitionPlan::new(&deck(), &live(100.0), 1, 2, VIEWPORT, 500.0);
    assert_eq!(plan.shared_duration_ms(), None);
    assert_eq!(plan.layers[1].timing, TimingFunction::StepStart);
}

#[test]
fn invalid_duration_uses_fallback() {
    let mut p = deck();
    p.frames[1].layers[1].transition.duration_ms = f64::NAN;
    let plan = TransitionPlan::new(&p, &live(0.0), 0, 1, VIEWPORT, 250.0);
    assert_eq!(plan.layers[1].duration_ms, 250.0);
}

#[test]
fn plan_starts_from_the_live_camera() {
    let plan = TransitionPlan::new(&deck(), &live(42.0), 0, 1, VIEWPORT, 500.0);
    let cams = plan.cameras_at(|_| 0.0);
    assert!(cams.iter().all(|c| (c.center.x - 42.0).abs() < 1e-9));
    let cams = plan.cameras_at(|_| 1.0);
    assert!(cams.iter().all(|c| (c.center.x - 100.0).abs() < 1e-9));
}
