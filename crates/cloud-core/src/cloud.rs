//! Per-frame orchestration of the particle cloud.
//!
//! [`ParticleCloud`] owns all mutable state. Frontends hold one instance and
//! call [`ParticleCloud::apply_input`] for each drained input event and
//! [`ParticleCloud::update`] exactly once per displayed frame.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::*;
use crate::gesture::{ControlTargets, GestureConfig, GestureInterpreter, HandStatus, StatusObserver};
use crate::governor::{GovernorConfig, PerformanceGovernor, Reduction};
use crate::input::InputEvent;
use crate::motion::{pulse, MotionConfig, MotionState};
use crate::particles::ParticleSet;
use crate::pattern::PatternKind;
use crate::render::FrameView;
use crate::state::{RenderStyle, UiEvent};

#[derive(Clone, Debug)]
pub struct CloudConfig {
    pub initial_count: usize,
    pub pattern: PatternKind,
    /// Seed for the heart z jitter.
    pub seed: u64,
    pub gesture: GestureConfig,
    pub motion: MotionConfig,
    pub governor: GovernorConfig,
    pub style: RenderStyle,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_PARTICLE_COUNT,
            pattern: PatternKind::Sphere,
            seed: 42,
            gesture: GestureConfig::default(),
            motion: MotionConfig::default(),
            governor: GovernorConfig::default(),
            style: RenderStyle::default(),
        }
    }
}

/// Summary of one update, for logging and overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub active_count: usize,
    pub smoothed_fps: f32,
    pub reduction: Option<Reduction>,
}

pub struct ParticleCloud {
    interpreter: GestureInterpreter,
    motion_config: MotionConfig,
    motion: MotionState,
    governor: PerformanceGovernor,
    particles: ParticleSet,
    rng: StdRng,
    style: RenderStyle,
    status: HandStatus,
    dirty: bool,
}

impl ParticleCloud {
    pub fn new(config: CloudConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = ParticleSet::new(config.pattern, config.initial_count, &mut rng);
        log::info!(
            "[cloud] pattern={} particles={}",
            config.pattern,
            config.initial_count
        );
        Self {
            interpreter: GestureInterpreter::new(config.gesture),
            motion_config: config.motion,
            motion: MotionState::new(),
            governor: PerformanceGovernor::new(config.initial_count, config.governor),
            particles,
            rng,
            style: config.style,
            status: HandStatus::NoHand,
            dirty: true,
        }
    }

    /// Apply one drained input event. The observer only hears about changes.
    pub fn apply_input(&mut self, event: InputEvent, observer: &mut dyn StatusObserver) {
        let (targets, status) = match event {
            InputEvent::Sample(sample) => {
                let out = self.interpreter.interpret(&sample);
                (out.targets, out.status)
            }
            InputEvent::Failed(failure) => {
                log::warn!("[input] camera unavailable: {}", failure);
                (ControlTargets::NEUTRAL, HandStatus::Unavailable(failure))
            }
            InputEvent::Stopped => {
                log::info!("[input] camera stopped");
                (ControlTargets::NEUTRAL, HandStatus::NoHand)
            }
        };
        self.motion.set_targets(targets);
        if status != self.status {
            self.status = status;
            observer.on_status(status);
        }
    }

    pub fn handle_ui(&mut self, event: UiEvent) {
        match event {
            UiEvent::SelectPattern(kind) => self.set_pattern(kind),
            UiEvent::SelectColor(rgb) => {
                self.style.color_rgb = rgb;
                self.dirty = true;
            }
        }
    }

    /// Regenerate every base position in the new formation at the current count.
    pub fn set_pattern(&mut self, kind: PatternKind) {
        let count = self.governor.active_count();
        self.particles.regenerate(kind, count, &mut self.rng);
        log::info!("[cloud] pattern={} particles={}", kind, count);
    }

    /// Advance one frame.
    ///
    /// `dt_sec` is the wall time since the previous frame and `elapsed_sec`
    /// the time since the session started.
    pub fn update(&mut self, dt_sec: f32, elapsed_sec: f64) -> FrameReport {
        let cfg = &self.motion_config;
        self.motion.observe_frame_time(dt_sec, cfg);
        self.motion.step(cfg);

        let reduction = self.governor.observe(self.motion.smoothed_fps, elapsed_sec);
        let count = self.governor.active_count();
        if reduction.is_some() || self.particles.len() != count {
            let kind = self.particles.kind();
            self.particles.regenerate(kind, count, &mut self.rng);
        }

        let t = elapsed_sec as f32;
        let scale = self.motion.current_expansion * pulse(self.particles.kind(), t, cfg);
        self.particles.update(scale, t, cfg);
        self.dirty = true;

        FrameReport {
            active_count: count,
            smoothed_fps: self.motion.smoothed_fps,
            reduction,
        }
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            positions: self.particles.derived(),
            active_count: self.particles.len(),
            yaw: self.motion.yaw,
            roll: self.motion.roll,
        }
    }

    /// True once after every change the renderer has not seen yet.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn pattern(&self) -> PatternKind {
        self.particles.kind()
    }

    pub fn active_count(&self) -> usize {
        self.governor.active_count()
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureSample, PointerSample};

    fn small() -> ParticleCloud {
        ParticleCloud::new(CloudConfig {
            initial_count: 800,
            ..CloudConfig::default()
        })
    }

    #[test]
    fn observer_hears_only_changes() {
        let mut cloud = small();
        let mut seen = Vec::new();
        let mut obs = |s: HandStatus| seen.push(s);
        let pointer = GestureSample::Pointer(PointerSample::new(0.5, 0.5));
        cloud.apply_input(InputEvent::Sample(pointer.clone()), &mut obs);
        cloud.apply_input(InputEvent::Sample(pointer), &mut obs);
        cloud.apply_input(InputEvent::Stopped, &mut obs);
        assert_eq!(seen, vec![HandStatus::Pointer, HandStatus::NoHand]);
    }

    #[test]
    fn color_event_marks_dirty() {
        let mut cloud = small();
        cloud.take_dirty();
        cloud.handle_ui(UiEvent::SelectColor([1.0, 0.0, 0.0]));
        assert!(cloud.take_dirty());
        assert!(!cloud.take_dirty());
        assert_eq!(cloud.style().color_rgb, [1.0, 0.0, 0.0]);
    }
}
