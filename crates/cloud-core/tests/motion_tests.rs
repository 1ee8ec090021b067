// Host-side tests for motion smoothing and the performance governor.

use cloud_core::*;

#[test]
fn smoothing_converges_monotonically_without_overshoot() {
    let cfg = MotionConfig::default();
    for target in [2.5_f32, 0.2, 1.0, -0.04] {
        let mut m = MotionState::new();
        m.set_targets(ControlTargets {
            expansion: target,
            rotation_speed: target / 10.0,
        });
        let mut prev_gap = (target - m.current_expansion).abs();
        for _ in 0..400 {
            m.step(&cfg);
            let gap = (target - m.current_expansion).abs();
            assert!(gap <= prev_gap);
            // Still on the starting side of the target.
            assert!((m.current_expansion - target) * (1.0 - target) >= 0.0);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-4);
        assert!((m.current_rotation_speed - target / 10.0).abs() < 1e-5);
    }
}

#[test]
fn approach_moves_fixed_fraction() {
    assert_eq!(approach(0.0, 1.0, 0.05), 0.05);
    assert_eq!(approach(1.0, 1.0, 0.05), 1.0);
    // Out-of-range factors are clamped into [0, 1].
    assert_eq!(approach(0.0, 1.0, 3.0), 1.0);
    assert_eq!(approach(0.0, 1.0, -1.0), 0.0);
}

#[test]
fn yaw_accumulates_current_speed() {
    let cfg = MotionConfig::default();
    let mut m = MotionState::new();
    m.current_rotation_speed = 0.02;
    m.target_rotation_speed = 0.02;
    for _ in 0..5 {
        m.step(&cfg);
    }
    assert!((m.yaw - 0.1).abs() < 1e-6);
}

#[test]
fn noise_is_bounded_by_amplitude() {
    let cfg = MotionConfig::default();
    for i in 0..100 {
        let n = noise(i as f32 * 0.37, i as f32 - 50.0, &cfg);
        assert!(n.abs() <= cfg.noise_amplitude + 1e-7);
    }
}

#[test]
fn governor_never_increases_and_respects_cooldown() {
    let mut g = PerformanceGovernor::new(3000, GovernorConfig::default());
    let mut prev = g.active_count();
    let mut reductions = Vec::new();
    // 30 seconds of alternating bad and good frame rates at 60 Hz.
    for frame in 0..1800 {
        let now = frame as f64 / 60.0;
        let fps = if (frame / 120) % 2 == 0 { 12.0 } else { 58.0 };
        if let Some(r) = g.observe(fps, now) {
            assert!(fps < 25.0);
            assert!(r.from > 500);
            reductions.push(now);
        }
        assert!(g.active_count() <= prev);
        assert!(g.active_count() >= 500);
        prev = g.active_count();
    }
    for pair in reductions.windows(2) {
        assert!(pair[1] - pair[0] >= 2.0 - 1e-9);
    }
    assert_eq!(g.active_count(), 500);
}

#[test]
fn governor_waits_out_cooldown() {
    let mut g = PerformanceGovernor::new(5000, GovernorConfig::default());
    assert!(g.observe(10.0, 1.0).is_some());
    assert!(g.observe(10.0, 2.9).is_none());
    assert!(g.observe(10.0, 3.0).is_some());
    assert_eq!(g.active_count(), 4000);
}

#[test]
fn governor_at_floor_is_inert() {
    let mut g = PerformanceGovernor::new(500, GovernorConfig::default());
    for i in 0..10 {
        assert!(g.observe(1.0, i as f64 * 10.0).is_none());
    }
    assert_eq!(g.active_count(), 500);
}
