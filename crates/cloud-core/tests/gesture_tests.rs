// Host-side tests for gesture interpretation.

use cloud_core::*;
use glam::Vec2;

/// A hand with the wrist at `wrist` and all four fingertips `spread` away,
/// straight up in image space.
fn hand(wrist: Vec2, spread: f32) -> GestureSample {
    let mut pts = [wrist; LANDMARK_COUNT];
    for i in FINGERTIPS {
        pts[i] = wrist - Vec2::new(0.0, spread);
    }
    GestureSample::Hand(HandLandmarks::from_points(&pts).unwrap())
}

#[test]
fn absent_is_neutral() {
    let out = GestureInterpreter::default().interpret(&GestureSample::Absent);
    assert_eq!(out.targets, ControlTargets::NEUTRAL);
    assert_eq!(out.status, HandStatus::NoHand);
}

#[test]
fn spread_buckets() {
    let gi = GestureInterpreter::default();
    let center = Vec2::new(0.5, 0.8);
    let open = gi.interpret(&hand(center, 0.4));
    assert_eq!(open.targets.expansion, 2.5);
    assert_eq!(open.status, HandStatus::Open);
    let closed = gi.interpret(&hand(center, 0.1));
    assert_eq!(closed.targets.expansion, 0.2);
    assert_eq!(closed.status, HandStatus::Closed);
    let mid = gi.interpret(&hand(center, 0.27));
    assert_eq!(mid.targets.expansion, 1.0);
    assert_eq!(mid.status, HandStatus::Neutral);
}

#[test]
fn interpret_is_idempotent() {
    let gi = GestureInterpreter::default();
    let s = hand(Vec2::new(0.73, 0.6), 0.31);
    assert_eq!(gi.interpret(&s), gi.interpret(&s));
    let p = GestureSample::Pointer(PointerSample::new(0.2, 0.3));
    assert_eq!(gi.interpret(&p), gi.interpret(&p));
}

#[test]
fn wrist_at_point_nine_rotates_at_0_035() {
    let out = GestureInterpreter::default().interpret(&hand(Vec2::new(0.9, 0.8), 0.3));
    assert!((out.targets.rotation_speed - 0.035).abs() < 1e-6);
}

#[test]
fn dead_zone_boundary_is_zero_and_continuous() {
    let cfg = GestureConfig::default();
    assert_eq!(rotation_for_offset(cfg.dead_zone, &cfg), 0.0);
    assert_eq!(rotation_for_offset(-cfg.dead_zone, &cfg), 0.0);
    assert_eq!(rotation_for_offset(0.049, &cfg), 0.0);
    let just_outside = rotation_for_offset(cfg.dead_zone + 1e-4, &cfg);
    assert!(just_outside > 0.0 && just_outside < 1e-4);
    let mut prev = rotation_for_offset(-0.5, &cfg);
    for i in 1..=1000 {
        let offset = -0.5 + i as f32 / 1000.0;
        let r = rotation_for_offset(offset, &cfg);
        assert!((r - prev).abs() < 1e-3, "jump at offset {offset}");
        assert!(r >= prev, "not monotonic at offset {offset}");
        prev = r;
    }
}

#[test]
fn rotation_is_odd() {
    let cfg = GestureConfig::default();
    for offset in [0.06_f32, 0.2, 0.37, 0.5] {
        assert_eq!(rotation_for_offset(-offset, &cfg), -rotation_for_offset(offset, &cfg));
    }
}

#[test]
fn rotation_is_clamped_for_any_input() {
    let cfg = GestureConfig {
        sensitivity: 50.0,
        ..GestureConfig::default()
    };
    for offset in [-1e6_f32, -3.0, -0.5, 0.0, 0.3, 7.0, 1e6, f32::INFINITY, f32::NAN] {
        let r = rotation_for_offset(offset, &cfg);
        assert!(r.abs() <= cfg.max_speed, "offset {offset} -> {r}");
    }
}

#[test]
fn pointer_and_wrist_share_rotation_mapping() {
    let gi = GestureInterpreter::default();
    for x in [0.0_f32, 0.1, 0.46, 0.55, 0.8, 1.0] {
        let by_hand = gi.interpret(&hand(Vec2::new(x, 0.9), 0.3));
        let by_pointer = gi.interpret(&GestureSample::Pointer(PointerSample::new(x, 0.5)));
        assert_eq!(by_hand.targets.rotation_speed, by_pointer.targets.rotation_speed);
    }
}

#[test]
fn pointer_vertical_buckets() {
    let gi = GestureInterpreter::default();
    let at = |v: f32| {
        gi.interpret(&GestureSample::Pointer(PointerSample::new(0.5, v)))
            .targets
            .expansion
    };
    assert_eq!(at(0.0), 2.5);
    assert_eq!(at(0.3), 2.5);
    assert_eq!(at(0.45), 1.0);
    assert_eq!(at(0.55), 1.0);
    assert_eq!(at(0.7), 0.2);
    assert_eq!(at(1.0), 0.2);
}

#[test]
fn pointer_from_pixels_normalizes() {
    let p = PointerSample::from_pixels(960.0, 270.0, 1920.0, 1080.0);
    assert_eq!(p, PointerSample::new(0.5, 0.25));
    let clamped = PointerSample::from_pixels(-10.0, 5000.0, 100.0, 100.0);
    assert_eq!(clamped, PointerSample::new(0.0, 1.0));
}

#[test]
fn custom_thresholds_are_honored() {
    let gi = GestureInterpreter::new(GestureConfig {
        open_threshold: 0.5,
        ..GestureConfig::default()
    });
    let out = gi.interpret(&hand(Vec2::new(0.5, 0.8), 0.4));
    assert_eq!(out.targets.expansion, 1.0);
}

#[test]
fn malformed_flat_snapshot_is_rejected() {
    let coords = vec![0.5_f32; 20 * 3];
    assert_eq!(
        HandLandmarks::from_flat(&coords, 3),
        Err(SampleError::WrongLandmarkCount {
            expected: 21,
            got: 20
        })
    );
}
