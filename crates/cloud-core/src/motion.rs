//! First-order motion model for the whole formation.
//!
//! There is no velocity or acceleration: current values chase their targets
//! by a fixed fraction each frame. With a fraction in (0, 1) the approach is
//! monotonic and never overshoots.

use crate::constants::*;
use crate::gesture::ControlTargets;
use crate::pattern::PatternKind;

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Fraction of the remaining gap closed per frame.
    pub lerp: f32,
    pub idle_roll: f32,
    /// Weight kept from the previous frame-rate estimate.
    pub fps_smoothing: f32,
    pub pulse_speed: f32,
    pub pulse_amplitude: f32,
    pub noise_amplitude: f32,
    pub noise_spatial_freq: f32,
    /// Progress fraction per frame when morphing between formations.
    pub morph_lerp: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            lerp: MOTION_LERP,
            idle_roll: IDLE_ROLL_PER_FRAME,
            fps_smoothing: FPS_SMOOTHING,
            pulse_speed: PULSE_SPEED,
            pulse_amplitude: PULSE_AMPLITUDE,
            noise_amplitude: NOISE_AMPLITUDE,
            noise_spatial_freq: NOISE_SPATIAL_FREQ,
            morph_lerp: MORPH_LERP,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionState {
    pub current_expansion: f32,
    pub target_expansion: f32,
    pub current_rotation_speed: f32,
    pub target_rotation_speed: f32,
    pub smoothed_fps: f32,
    /// Accumulated formation yaw in radians.
    pub yaw: f32,
    /// Accumulated idle roll in radians.
    pub roll: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            current_expansion: NEUTRAL_EXPANSION,
            target_expansion: NEUTRAL_EXPANSION,
            current_rotation_speed: 0.0,
            target_rotation_speed: 0.0,
            smoothed_fps: INITIAL_FPS,
            yaw: 0.0,
            roll: 0.0,
        }
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_targets(&mut self, targets: ControlTargets) {
        self.target_expansion = targets.expansion;
        self.target_rotation_speed = targets.rotation_speed;
    }

    pub fn targets(&self) -> ControlTargets {
        ControlTargets {
            expansion: self.target_expansion,
            rotation_speed: self.target_rotation_speed,
        }
    }

    /// Fold the instantaneous frame rate into the moving average.
    /// Non-positive or non-finite deltas are ignored.
    pub fn observe_frame_time(&mut self, dt_sec: f32, cfg: &MotionConfig) {
        if dt_sec <= 0.0 || !dt_sec.is_finite() {
            return;
        }
        let keep = cfg.fps_smoothing.clamp(0.0, 1.0);
        self.smoothed_fps = keep * self.smoothed_fps + (1.0 - keep) * (1.0 / dt_sec);
    }

    /// One integration step: smooth toward targets, then advance rotation.
    pub fn step(&mut self, cfg: &MotionConfig) {
        self.current_expansion = approach(self.current_expansion, self.target_expansion, cfg.lerp);
        self.current_rotation_speed =
            approach(self.current_rotation_speed, self.target_rotation_speed, cfg.lerp);
        self.yaw += self.current_rotation_speed;
        self.roll += cfg.idle_roll;
    }
}

#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}

/// Breathing scale; only the heart pulses.
pub fn pulse(kind: PatternKind, elapsed_sec: f32, cfg: &MotionConfig) -> f32 {
    if kind.pulses() {
        1.0 + (elapsed_sec * cfg.pulse_speed).sin() * cfg.pulse_amplitude
    } else {
        1.0
    }
}

/// Scalar wiggle added to all three axes of one particle.
#[inline]
pub fn noise(elapsed_sec: f32, base_x: f32, cfg: &MotionConfig) -> f32 {
    (elapsed_sec + base_x * cfg.noise_spatial_freq).sin() * cfg.noise_amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rate_average_moves_a_tenth_of_the_way() {
        let cfg = MotionConfig::default();
        let mut m = MotionState::new();
        m.observe_frame_time(1.0 / 20.0, &cfg);
        assert!((m.smoothed_fps - (0.9 * 60.0 + 0.1 * 20.0)).abs() < 1e-3);
    }

    #[test]
    fn zero_delta_is_ignored() {
        let cfg = MotionConfig::default();
        let mut m = MotionState::new();
        m.observe_frame_time(0.0, &cfg);
        m.observe_frame_time(f32::NAN, &cfg);
        assert_eq!(m.smoothed_fps, INITIAL_FPS);
    }

    #[test]
    fn idle_roll_accumulates_without_input() {
        let cfg = MotionConfig::default();
        let mut m = MotionState::new();
        for _ in 0..10 {
            m.step(&cfg);
        }
        assert_eq!(m.yaw, 0.0);
        assert!((m.roll - 10.0 * IDLE_ROLL_PER_FRAME).abs() < 1e-6);
    }

    #[test]
    fn pulse_is_flat_for_sphere() {
        let cfg = MotionConfig::default();
        assert_eq!(pulse(PatternKind::Sphere, 1.234, &cfg), 1.0);
        let p = pulse(PatternKind::Heart, 0.5, &cfg);
        assert!((p - (1.0 + (1.5_f32).sin() * 0.1)).abs() < 1e-6);
    }
}
