//! Maps hand landmarks or pointer positions to control targets.
//!
//! Both input paths share [`rotation_for_offset`] so a pointer and a wrist at
//! the same horizontal position always ask for the same rotation speed.

use glam::Vec2;

use crate::constants::*;
use crate::error::SampleError;
use crate::input::InputFailure;

/// Number of points in a hand-landmark snapshot.
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
/// Index, middle, ring and pinky tips.
pub const FINGERTIPS: [usize; 4] = [8, 12, 16, 20];

/// One hand-landmark snapshot in normalized image space (`0..=1` on both axes).
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec2; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn from_points(points: &[Vec2]) -> Result<Self, SampleError> {
        let points: [Vec2; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| SampleError::wrong_count(points.len()))?;
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(SampleError::NonFinite { index });
        }
        Ok(Self { points })
    }

    /// Build from a flat coordinate array with `stride` floats per landmark.
    /// Only the first two components (x, y) of each landmark are kept.
    pub fn from_flat(coords: &[f32], stride: usize) -> Result<Self, SampleError> {
        let stride = stride.max(2);
        if coords.len() % stride != 0 {
            return Err(SampleError::wrong_count(coords.len() / stride));
        }
        let points: Vec<Vec2> = coords
            .chunks_exact(stride)
            .map(|c| Vec2::new(c[0], c[1]))
            .collect();
        Self::from_points(&points)
    }

    #[inline]
    pub fn wrist(&self) -> Vec2 {
        self.points[WRIST]
    }

    #[inline]
    pub fn point(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Mean wrist-to-fingertip distance; large for an open palm, small for a fist.
    pub fn average_fingertip_distance(&self) -> f32 {
        let wrist = self.wrist();
        let sum: f32 = FINGERTIPS
            .iter()
            .map(|&i| self.points[i].distance(wrist))
            .sum();
        sum / FINGERTIPS.len() as f32
    }
}

/// Pointer position normalized to the viewport, `v = 0` at the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub u: f32,
    pub v: f32,
}

impl PointerSample {
    pub fn new(u: f32, v: f32) -> Self {
        Self {
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Convert pixel coordinates using the viewport size. A degenerate
    /// viewport maps to the center.
    pub fn from_pixels(x: f32, y: f32, width: f32, height: f32) -> Self {
        if width > 0.0 && height > 0.0 {
            Self::new(x / width, y / height)
        } else {
            Self::new(0.5, 0.5)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureSample {
    Hand(HandLandmarks),
    Pointer(PointerSample),
    #[default]
    Absent,
}

/// What the cloud is currently being asked to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlTargets {
    pub expansion: f32,
    pub rotation_speed: f32,
}

impl ControlTargets {
    pub const NEUTRAL: ControlTargets = ControlTargets {
        expansion: NEUTRAL_EXPANSION,
        rotation_speed: 0.0,
    };
}

impl Default for ControlTargets {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandStatus {
    NoHand,
    Open,
    Closed,
    Neutral,
    Pointer,
    Unavailable(InputFailure),
}

impl HandStatus {
    /// Short text for a status line.
    pub fn label(self) -> &'static str {
        match self {
            HandStatus::NoHand => "No hand detected",
            HandStatus::Open => "Hand open: expanding",
            HandStatus::Closed => "Hand closed: contracting",
            HandStatus::Neutral => "Hand detected",
            HandStatus::Pointer => "Mouse control",
            HandStatus::Unavailable(failure) => failure.guidance(),
        }
    }
}

/// Receives status changes. Presentation lives with the implementor.
pub trait StatusObserver {
    fn on_status(&mut self, status: HandStatus);
}

impl<F: FnMut(HandStatus)> StatusObserver for F {
    fn on_status(&mut self, status: HandStatus) {
        self(status)
    }
}

/// Calibration for both gesture sources.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    pub open_threshold: f32,
    pub closed_threshold: f32,
    pub open_expansion: f32,
    pub closed_expansion: f32,
    pub neutral_expansion: f32,
    pub dead_zone: f32,
    pub sensitivity: f32,
    pub max_speed: f32,
    pub pointer_neutral_band: f32,
    pub pointer_open_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            open_threshold: OPEN_HAND_THRESHOLD,
            closed_threshold: CLOSED_HAND_THRESHOLD,
            open_expansion: OPEN_EXPANSION,
            closed_expansion: CLOSED_EXPANSION,
            neutral_expansion: NEUTRAL_EXPANSION,
            dead_zone: ROTATION_DEAD_ZONE,
            sensitivity: ROTATION_SENSITIVITY,
            max_speed: MAX_ROTATION_SPEED,
            pointer_neutral_band: POINTER_NEUTRAL_BAND,
            pointer_open_threshold: POINTER_OPEN_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interpretation {
    pub targets: ControlTargets,
    pub status: HandStatus,
}

#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    pub config: GestureConfig,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Pure mapping from one sample to targets; repeated calls agree.
    pub fn interpret(&self, sample: &GestureSample) -> Interpretation {
        let cfg = &self.config;
        match sample {
            GestureSample::Absent => Interpretation {
                targets: ControlTargets {
                    expansion: cfg.neutral_expansion,
                    rotation_speed: 0.0,
                },
                status: HandStatus::NoHand,
            },
            GestureSample::Hand(hand) => {
                let spread = hand.average_fingertip_distance();
                let (expansion, status) = if spread > cfg.open_threshold {
                    (cfg.open_expansion, HandStatus::Open)
                } else if spread < cfg.closed_threshold {
                    (cfg.closed_expansion, HandStatus::Closed)
                } else {
                    (cfg.neutral_expansion, HandStatus::Neutral)
                };
                Interpretation {
                    targets: ControlTargets {
                        expansion,
                        rotation_speed: rotation_for_offset(hand.wrist().x - 0.5, cfg),
                    },
                    status,
                }
            }
            GestureSample::Pointer(p) => Interpretation {
                targets: ControlTargets {
                    expansion: pointer_expansion(p.v, cfg),
                    rotation_speed: rotation_for_offset(p.u - 0.5, cfg),
                },
                status: HandStatus::Pointer,
            },
        }
    }
}

/// Signed horizontal offset from center to rotation speed.
///
/// Inside the dead zone the result is zero; outside it the dead-zone width is
/// subtracted first so the response starts at zero on the boundary.
pub fn rotation_for_offset(offset: f32, cfg: &GestureConfig) -> f32 {
    let magnitude = offset.abs();
    if !magnitude.is_finite() || magnitude < cfg.dead_zone {
        return 0.0;
    }
    let adjusted = (magnitude - cfg.dead_zone).copysign(offset);
    (adjusted * cfg.sensitivity * cfg.max_speed).clamp(-cfg.max_speed, cfg.max_speed)
}

/// Vertical pointer position to one of the three expansion buckets.
pub fn pointer_expansion(v: f32, cfg: &GestureConfig) -> f32 {
    let height = 1.0 - v;
    if height > cfg.pointer_open_threshold {
        cfg.open_expansion
    } else if (height - 0.5).abs() <= cfg.pointer_neutral_band {
        cfg.neutral_expansion
    } else {
        cfg.closed_expansion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_accepts_xyz_triples() {
        let coords = vec![0.5_f32; LANDMARK_COUNT * 3];
        let hand = HandLandmarks::from_flat(&coords, 3).unwrap();
        assert_eq!(hand.wrist(), Vec2::splat(0.5));
    }

    #[test]
    fn from_points_rejects_short_snapshots() {
        let err = HandLandmarks::from_points(&[Vec2::ZERO; 5]).unwrap_err();
        assert_eq!(
            err,
            SampleError::WrongLandmarkCount {
                expected: LANDMARK_COUNT,
                got: 5
            }
        );
    }

    #[test]
    fn from_points_rejects_nan() {
        let mut pts = [Vec2::ZERO; LANDMARK_COUNT];
        pts[8].x = f32::NAN;
        assert_eq!(
            HandLandmarks::from_points(&pts).unwrap_err(),
            SampleError::NonFinite { index: 8 }
        );
    }

    #[test]
    fn pointer_from_degenerate_viewport_is_centered() {
        assert_eq!(
            PointerSample::from_pixels(10.0, 10.0, 0.0, 100.0),
            PointerSample::new(0.5, 0.5)
        );
    }

    #[test]
    fn pointer_buckets() {
        let cfg = GestureConfig::default();
        assert_eq!(pointer_expansion(0.1, &cfg), OPEN_EXPANSION);
        assert_eq!(pointer_expansion(0.5, &cfg), NEUTRAL_EXPANSION);
        assert_eq!(pointer_expansion(0.9, &cfg), CLOSED_EXPANSION);
    }

    #[test]
    fn closure_observer_receives_status() {
        let mut seen = Vec::new();
        {
            let mut obs = |s: HandStatus| seen.push(s);
            obs.on_status(HandStatus::Open);
        }
        assert_eq!(seen, vec![HandStatus::Open]);
    }
}
