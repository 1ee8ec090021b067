//! Adaptive particle budget.
//!
//! The governor only ever lowers the active count. Once the frame rate has
//! forced a reduction the session keeps the smaller budget even if the frame
//! rate later recovers.

use crate::constants::*;

#[derive(Clone, Debug, PartialEq)]
pub struct GovernorConfig {
    pub low_fps: f32,
    pub floor: usize,
    pub step: usize,
    pub cooldown_sec: f64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            low_fps: LOW_FPS_THRESHOLD,
            floor: MIN_PARTICLE_COUNT,
            step: PARTICLE_COUNT_STEP,
            cooldown_sec: GOVERNOR_COOLDOWN_SEC,
        }
    }
}

/// Informational record of one reduction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reduction {
    pub from: usize,
    pub to: usize,
    pub fps: f32,
}

#[derive(Clone, Debug)]
pub struct PerformanceGovernor {
    config: GovernorConfig,
    active: usize,
    last_reduction_sec: Option<f64>,
}

impl PerformanceGovernor {
    /// An initial count below the floor is kept as is; it can never shrink.
    pub fn new(initial_count: usize, config: GovernorConfig) -> Self {
        Self {
            config,
            active: initial_count,
            last_reduction_sec: None,
        }
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Observe one frame. Returns the reduction when the count dropped.
    pub fn observe(&mut self, smoothed_fps: f32, now_sec: f64) -> Option<Reduction> {
        if smoothed_fps >= self.config.low_fps || self.active <= self.config.floor {
            return None;
        }
        if let Some(last) = self.last_reduction_sec {
            if now_sec - last < self.config.cooldown_sec {
                return None;
            }
        }
        let from = self.active;
        self.active = from.saturating_sub(self.config.step).max(self.config.floor);
        self.last_reduction_sec = Some(now_sec);
        log::info!(
            "[governor] fps={:.1} particles {} -> {}",
            smoothed_fps,
            from,
            self.active
        );
        Some(Reduction {
            from,
            to: self.active,
            fps: smoothed_fps,
        })
    }
}
