use super::*;

fn samples() -> impl Iterator<Item = f64> {
    (0..=100).map(|i| f64::from(i) / 100.0)
}

#[test]
fn continuous_curves_pin_endpoints() {
    for f in TimingFunction::NAMED.iter().filter(|f| !f.is_step()) {
        assert!(f.apply(0.0).abs() < 1e-6, "{f:?} at 0");
        assert!((f.apply(1.0) - 1.0).abs() < 1e-6, "{f:?} at 1");
    }
}

#[test]
fn step_endpoints_follow_rounding_direction() {
    for f in TimingFunction::NAMED.iter().filter(|f| f.is_step()) {
        let (n, a0, a1) = (1.0, f.apply(0.0), f.apply(1.0));
        assert!(a0 == 0.0 || a0 == 1.0 / n, "{f:?} at 0 = {a0}");
        assert!(a1 == (n - 1.0) / n || a1 == 1.0, "{f:?} at 1 = {a1}");
    }

    let up = make_steps(4, "start");
    let down = make_steps(4, "end");
    assert_eq!(up.apply(0.0), 0.0);
    assert_eq!(up.apply(0.1), 0.25);
    assert_eq!(up.apply(1.0), 1.0);
    assert_eq!(down.apply(0.0), 0.0);
    assert_eq!(down.apply(0.3), 0.25);
    assert_eq!(down.apply(0.99), 0.75);
    assert_eq!(down.apply(1.0), 1.0);
}

#[test]
fn unknown_step_direction_rounds_down() {
    assert_eq!(make_steps(2, "sideways"), make_steps(2, "end"));
    assert_eq!(make_steps(2, " START "), make_steps(2, "start"));
}

#[test]
fn zero_steps_degrade_to_one() {
    let f = make_steps(0, "end");
    assert_eq!(f.apply(0.5), 0.0);
    assert_eq!(f.apply(1.0), 1.0);
}

#[test]
fn diagonal_bezier_is_identity() {
    let f = make_bezier(0.0, 0.0, 1.0, 1.0);
    for x in samples() {
        assert!((f.apply(x) - x).abs() < 1e-9);
    }
    let g = make_bezier(0.3, 0.3, 0.6, 0.6);
    assert_eq!(g.apply(0.37), 0.37);
}

#[test]
fn ease_in_and_ease_out_are_reverse_pairs() {
    let ease_in = TimingFunction::EaseIn;
    let ease_out = TimingFunction::EaseOut;
    for x in samples() {
        assert_eq!(ease_in.reverse().apply(x), ease_out.apply(x));
        assert_eq!(ease_out.reverse().apply(x), ease_in.apply(x));
    }
}

#[test]
fn symmetric_pairs_reverse_to_themselves() {
    assert_eq!(TimingFunction::Ease.reverse(), TimingFunction::Ease);
    assert_eq!(TimingFunction::Linear.reverse(), TimingFunction::Linear);
    assert_eq!(TimingFunction::EaseInOut.reverse(), TimingFunction::EaseInOut);
    assert_eq!(TimingFunction::StepMiddle.reverse(), TimingFunction::StepMiddle);
    assert_eq!(TimingFunction::StepStart.reverse(), TimingFunction::StepEnd);
    assert_eq!(TimingFunction::StepEnd.reverse(), TimingFunction::StepStart);
}

#[test]
fn mirrored_custom_bezier_matches_time_reversal() {
    let f = make_bezier(0.42, 0.0, 1.0, 1.0);
    let r = f.reverse();
    // The mirror of ease-in is ease-out.
    let TimingFunction::Bezier(b) = r else {
        panic!("expected a bezier, got {r:?}");
    };
    assert_eq!((b.x1, b.y1, b.y2), (0.0, 0.0, 1.0));
    assert!((b.x2 - 0.58).abs() < 1e-12);
    for x in [0.2, 0.5, 0.8] {
        assert!((r.apply(x) - (1.0 - f.apply(1.0 - x))).abs() < 1e-3);
    }
}

#[test]
fn custom_steps_reverse_swaps_direction() {
    assert_eq!(make_steps(3, "start").reverse(), make_steps(3, "end"));
}

#[test]
fn bezier_curves_are_monotonic_on_samples() {
    for f in [
        TimingFunction::Ease,
        TimingFunction::EaseIn,
        TimingFunction::EaseOut,
        TimingFunction::EaseInOut,
    ] {
        let mut prev = f.apply(0.0);
        for x in samples().skip(1) {
            let y = f.apply(x);
            assert!(y >= prev - 1e-9, "{f:?} not monotonic at {x}");
            prev = y;
        }
    }
}

#[test]
fn easing_shapes_bend_the_right_way() {
    assert!(TimingFunction::EaseIn.apply(0.5) < 0.5);
    assert!(TimingFunction::EaseOut.apply(0.5) > 0.5);
    assert!((TimingFunction::EaseInOut.apply(0.5) - 0.5).abs() < 1e-3);
}

#[test]
fn names_resolve_in_several_spellings() {
    assert_eq!(TimingFunction::by_name("easeIn"), Some(TimingFunction::EaseIn));
    assert_eq!(TimingFunction::by_name("ease_in_out"), Some(TimingFunction::EaseInOut));
    assert_eq!(TimingFunction::by_name("step-start"), Some(TimingFunction::StepStart));
    assert_eq!(TimingFunction::by_name("bounce"), None);
    for f in TimingFunction::NAMED {
        assert_eq!(TimingFunction::by_name(f.name().unwrap()), Some(f));
    }
}

#[test]
fn resolve_falls_back_to_linear() {
    assert_eq!(TimingFunction::resolve(None), TimingFunction::Linear);
    assert_eq!(TimingFunction::resolve(Some("wobble")), TimingFunction::Linear);
    assert_eq!(TimingFunction::resolve(Some("ease")), TimingFunction::Ease);
}

#[test]
fn directed_selects_reverse_only_when_asked() {
    assert_eq!(TimingFunction::EaseIn.directed(false), TimingFunction::EaseIn);
    assert_eq!(TimingFunction::EaseIn.directed(true), TimingFunction::EaseOut);
}

#[test]
fn overshoot_only_for_out_of_range_handles() {
    assert!(!TimingFunction::EaseInOut.may_overshoot());
    assert!(!make_bezier(0.2, 0.0, 0.8, 1.0).may_overshoot());
    assert!(make_bezier(0.5, -0.5, 0.5, 1.5).may_overshoot());
}

#[test]
fn css_expressions_parse() {
    assert_eq!(
        TimingFunction::parse("cubic-bezier(0.5, -0.5, 0.5, 1.5)"),
        Some(make_bezier(0.5, -0.5, 0.5, 1.5))
    );
    assert_eq!(TimingFunction::parse("steps(3)"), Some(make_steps(3, "end")));
    assert_eq!(TimingFunction::parse(" steps(2, start) "), Some(make_steps(2, "start")));
    assert_eq!(TimingFunction::parse("easeOut"), Some(TimingFunction::EaseOut));

    assert_eq!(TimingFunction::parse("cubic-bezier(1.5, 0, 0.5, 1)"), None);
    assert_eq!(TimingFunction::parse("cubic-bezier(0, 0, 1)"), None);
    assert_eq!(TimingFunction::parse("steps(x)"), None);
    assert_eq!(TimingFunction::parse("wobble(1)"), None);
}
