//! Base formations for the particle cloud.
//!
//! Every generator maps a particle index in `0..count` to a point in world
//! space. Sphere and spiral are pure functions of `(index, count)`. The heart
//! is pure in x/y and draws its z thickness from the caller's RNG, which is the
//! only non-deterministic field in the whole pattern set.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use rand::Rng;

use crate::constants::*;
use crate::error::ParseError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PatternKind {
    #[default]
    Sphere,
    Spiral,
    Heart,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [PatternKind::Sphere, PatternKind::Spiral, PatternKind::Heart];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Sphere => "sphere",
            PatternKind::Spiral => "spiral",
            PatternKind::Heart => "heart",
        }
    }

    /// Whether this formation breathes with the heart pulse.
    #[inline]
    pub fn pulses(self) -> bool {
        matches!(self, PatternKind::Heart)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(PatternKind::Sphere),
            "spiral" => Ok(PatternKind::Spiral),
            "heart" => Ok(PatternKind::Heart),
            _ => Err(ParseError::UnknownPattern(s.to_string())),
        }
    }
}

/// Build `count` base positions for `kind`.
///
/// The returned buffer is complete; callers swap it in as a whole so a
/// half-written formation is never observable.
pub fn generate<R: Rng + ?Sized>(kind: PatternKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|i| match kind {
            PatternKind::Sphere => sphere_point(i, count),
            PatternKind::Spiral => spiral_point(i),
            PatternKind::Heart => {
                let (x, y) = heart_point(i, count);
                let z = rng.gen_range(-HEART_Z_JITTER..=HEART_Z_JITTER);
                Vec3::new(x, y, z)
            }
        })
        .collect()
}

/// Fibonacci-lattice point on a sphere of radius [`SPHERE_RADIUS`].
pub fn sphere_point(index: usize, count: usize) -> Vec3 {
    let n = count.max(1) as f64;
    let phi = (-1.0 + 2.0 * index as f64 / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    let r = SPHERE_RADIUS as f64;
    Vec3::new(
        (r * theta.cos() * phi.sin()) as f32,
        (r * theta.sin() * phi.sin()) as f32,
        (r * phi.cos()) as f32,
    )
}

/// Expanding helix. Radius grows linearly with the index and is not capped.
pub fn spiral_point(index: usize) -> Vec3 {
    let i = index as f32;
    let radius = SPIRAL_RADIUS_PER_INDEX * i;
    let angle = SPIRAL_ANGLE_PER_INDEX * i;
    Vec3::new(
        radius * angle.cos(),
        SPIRAL_RISE_PER_INDEX * i + SPIRAL_Y_OFFSET,
        radius * angle.sin(),
    )
}

/// Planar heart curve at `t = 2π·index/count`, scaled and shifted.
pub fn heart_point(index: usize, count: usize) -> (f32, f32) {
    let t = TAU * index as f64 / count.max(1) as f64;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let s = HEART_SCALE as f64;
    ((x * s) as f32, (y * s + HEART_Y_OFFSET as f64) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Heart".parse::<PatternKind>(), Ok(PatternKind::Heart));
        assert_eq!(" spiral ".parse::<PatternKind>(), Ok(PatternKind::Spiral));
        assert!("cube".parse::<PatternKind>().is_err());
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in PatternKind::ALL {
            assert!(generate(kind, 0, &mut rng).is_empty());
        }
    }

    #[test]
    fn spiral_starts_below_origin() {
        let p = spiral_point(0);
        assert_eq!(p, Vec3::new(0.0, SPIRAL_Y_OFFSET, 0.0));
    }

    #[test]
    fn only_heart_pulses() {
        assert!(PatternKind::Heart.pulses());
        assert!(!PatternKind::Sphere.pulses());
        assert!(!PatternKind::Spiral.pulses());
    }
}
