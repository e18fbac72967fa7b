//! Integration tests for curve geometry and edits against a live animation
//!
//! These tests verify that:
//! - Path data and control points follow the tangent / sampled-midpoint rules
//! - Edits land in both the curve and the animation, by key identity
//! - Observers hear exactly one notification per completed edit

use kurv_animation::{
    share, AnimatedValue, Animation, AnimationKey, Easing, EasingFunction, SharedAnimation,
};
use kurv_core::{Color, PathCommand};
use kurv_editor::{
    curves_for_animation, ControlPoint, Curve, CurveChange, EditorConfig, TangentSide,
    ValueProjection,
};
use std::cell::RefCell;
use std::rc::Rc;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn scalar_curve(animation: &SharedAnimation) -> Curve {
    let mut curve = Curve::new(Color::WHITE, animation.clone(), ValueProjection::Scalar);
    curve.load_keys().unwrap();
    curve
}

/// Record every change a curve reports
fn record(curve: &mut Curve) -> Rc<RefCell<Vec<CurveChange>>> {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    curve.subscribe(move |change| sink.borrow_mut().push(*change));
    changes
}

/// Curves with fewer than two keys have no path
#[test]
fn test_short_curves_have_empty_path_data() {
    let empty = share(Animation::new("empty"));
    assert_eq!(scalar_curve(&empty).path_data(|x| x, |y| y), "");

    let single = share(Animation::from_keys("single", vec![AnimationKey::new(3.0, 3.0)]));
    assert_eq!(scalar_curve(&single).path_data(|x| x, |y| y), "");
}

/// Without tangents both control points sit on the sampled midpoint
#[test]
fn test_control_points_sample_the_engine_at_midpoint() {
    let animation = share(
        Animation::from_keys(
            "eased",
            vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
        )
        .with_easing(Easing::ease_in(EasingFunction::Cubic)),
    );
    let curve = scalar_curve(&animation);
    let sampled = animation.borrow().evaluate(5.0).as_scalar().unwrap();
    // Cubic ease-in at t = 0.5
    assert!(approx(sampled, 1.25));

    let path = curve.path(|x| x, |y| y);
    match path.commands() {
        [PathCommand::MoveTo(_), PathCommand::CubicTo {
            control1, control2, ..
        }] => {
            assert_eq!(control1.x, 5.0);
            assert_eq!(control2.x, 5.0);
            assert_eq!(control1.y, sampled);
            assert_eq!(control2.y, sampled);
        }
        other => panic!("unexpected path commands: {:?}", other),
    }
}

#[test]
fn test_boundary_keys_have_no_outer_handles() {
    let animation = share(Animation::from_keys(
        "a",
        vec![
            AnimationKey::new(0.0, 0.0),
            AnimationKey::new(5.0, 2.0),
            AnimationKey::new(10.0, 0.0),
        ],
    ));
    let curve = scalar_curve(&animation);

    assert_eq!(curve.in_control_point(0), None);
    assert_eq!(curve.out_control_point(2), None);
}

#[test]
fn test_out_of_range_indices_have_no_handles() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let curve = scalar_curve(&animation);

    assert_eq!(curve.out_control_point(usize::MAX), None);
    assert_eq!(curve.in_control_point(usize::MAX), None);
    assert_eq!(curve.out_control_point(2), None);
    assert_eq!(curve.in_control_point(2), None);

    let empty = share(Animation::new("empty"));
    assert_eq!(scalar_curve(&empty).out_control_point(0), None);
}

#[test]
fn test_in_control_point_from_tangent() {
    let animation = share(Animation::from_keys(
        "a",
        vec![
            AnimationKey::new(0.0, 0.0),
            AnimationKey::new(10.0, 10.0).with_in_tangent(6.0),
        ],
    ));
    let curve = scalar_curve(&animation);

    let ControlPoint { frame, value } = curve.in_control_point(1).unwrap();
    assert!(approx(frame, 6.667));
    assert!(approx(value, 8.0));
}

#[test]
fn test_out_tangent_drag_notifies_once() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let mut curve = scalar_curve(&animation);
    let changes = record(&mut curve);

    curve.update_out_tangent_from_control_point(0, 5.0).unwrap();

    assert_eq!(curve.keys()[0].out_tangent, Some(2.5));
    assert_eq!(
        *changes.borrow(),
        vec![CurveChange::Tangent {
            key: 0,
            side: TangentSide::Out
        }]
    );
}

/// An existing out-tangent is refined with 2/3 of the new slope
#[test]
fn test_out_tangent_refinement_scales_by_two_thirds() {
    let animation = share(Animation::from_keys(
        "a",
        vec![
            AnimationKey::new(0.0, 0.0).with_out_tangent(3.0),
            AnimationKey::new(10.0, 10.0),
        ],
    ));
    let mut curve = scalar_curve(&animation);

    curve.update_out_tangent_from_control_point(0, 6.0).unwrap();

    let tangent = curve.keys()[0].out_tangent.unwrap();
    assert!(approx(tangent, 4.0));
    let source = curve.keys()[0].source;
    assert_eq!(
        animation.borrow().key(source).unwrap().out_tangent,
        Some(AnimatedValue::Scalar(tangent))
    );
}

/// A first in-tangent takes 1/2 of the slope and notifies once
#[test]
fn test_first_in_tangent_scales_by_half_and_notifies_once() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let mut curve = scalar_curve(&animation);
    let changes = record(&mut curve);

    curve.update_in_tangent_from_control_point(1, 4.0).unwrap();

    assert_eq!(curve.keys()[1].in_tangent, Some(3.0));
    let source = curve.keys()[1].source;
    assert_eq!(
        animation.borrow().key(source).unwrap().in_tangent,
        Some(AnimatedValue::Scalar(3.0))
    );
    assert_eq!(
        *changes.borrow(),
        vec![CurveChange::Tangent {
            key: 1,
            side: TangentSide::In
        }]
    );
}

/// A component projection writes one field; a scalar one replaces the value
#[test]
fn test_key_value_edit_respects_projection() {
    let position = share(Animation::from_keys(
        "position",
        vec![
            AnimationKey::new(0.0, AnimatedValue::vector2(1.0, 2.0)),
            AnimationKey::new(10.0, AnimatedValue::vector2(3.0, 4.0)),
        ],
    ));
    let mut curves = curves_for_animation(&position, &EditorConfig::default()).unwrap();
    let x = &mut curves[0];
    x.update_key_value(1, 7.5).unwrap();

    assert_eq!(x.keys()[1].value, 7.5);
    let source = x.keys()[1].source;
    assert_eq!(
        position.borrow().key(source).unwrap().value,
        AnimatedValue::vector2(7.5, 4.0)
    );

    let alpha = share(Animation::from_keys(
        "alpha",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 1.0)],
    ));
    let mut curve = scalar_curve(&alpha);
    curve.update_key_value(0, 0.25).unwrap();

    assert_eq!(curve.keys()[0].value, 0.25);
    let source = curve.keys()[0].source;
    assert_eq!(
        alpha.borrow().key(source).unwrap().value,
        AnimatedValue::Scalar(0.25)
    );
}

/// Edits keep targeting the right key after the engine reorders its keys
#[test]
fn test_edits_follow_key_identity_after_resort() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let mut curve = scalar_curve(&animation);

    curve.update_key_frame(0, 20.0).unwrap();
    animation.borrow_mut().sort_keys();

    // Local index 0 still mirrors the moved key
    curve.update_key_value(0, -1.0).unwrap();

    let animation = animation.borrow();
    let (first_id, first) = animation.keys().next().unwrap();
    assert_eq!(first.frame, 10.0);
    assert_eq!(first.value, AnimatedValue::Scalar(10.0));
    assert_ne!(first_id, curve.keys()[0].source);

    let moved = animation.key(curve.keys()[0].source).unwrap();
    assert_eq!(moved.frame, 20.0);
    assert_eq!(moved.value, AnimatedValue::Scalar(-1.0));
}

#[test]
fn test_unsubscribed_observer_is_not_called() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let mut curve = scalar_curve(&animation);
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    let id = curve.subscribe(move |_| *counter.borrow_mut() += 1);

    curve.update_key_frame(1, 12.0).unwrap();
    assert!(curve.unsubscribe(id));
    curve.update_key_frame(1, 14.0).unwrap();

    assert_eq!(*calls.borrow(), 1);
}

/// Observers run after the animation borrow is released
#[test]
fn test_observer_can_read_animation() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let mut curve = scalar_curve(&animation);
    let seen = Rc::new(RefCell::new(None));

    let reader = animation.clone();
    let sink = seen.clone();
    curve.subscribe(move |_| {
        *sink.borrow_mut() = reader.borrow().evaluate(10.0).as_scalar();
    });

    curve.update_key_value(1, 42.0).unwrap();
    assert_eq!(*seen.borrow(), Some(42.0));
}

/// Dragged tangents reshape the engine's own evaluation
#[test]
fn test_tangent_edit_changes_evaluation() {
    let animation = share(Animation::from_keys(
        "a",
        vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)],
    ));
    let mut curve = scalar_curve(&animation);
    let before = animation.borrow().evaluate(2.0).as_scalar().unwrap();

    curve.update_out_tangent_from_control_point(0, 0.0).unwrap();
    curve.update_in_tangent_from_control_point(1, 10.0).unwrap();

    // Both tangents now exist, so the segment is Hermite (flat ends)
    let after = animation.borrow().evaluate(2.0).as_scalar().unwrap();
    assert!(after < before);
}
