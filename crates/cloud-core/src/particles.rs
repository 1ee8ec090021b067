//! Base and derived position buffers for the active particles.
//!
//! Base positions come straight from [`crate::pattern::generate`] and only
//! change when the formation or the active count changes. Derived positions
//! are rebuilt in full on every update. After a regeneration the previous
//! derived positions become a morph source, so particles glide into the new
//! formation instead of jumping.

use glam::Vec3;
use rand::Rng;

use crate::motion::{approach, noise, MotionConfig};
use crate::pattern::{self, PatternKind};

const MORPH_DONE: f32 = 0.999;

#[derive(Clone, Debug)]
struct Morph {
    from: Vec<Vec3>,
    progress: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleSet {
    kind: PatternKind,
    base: Vec<Vec3>,
    derived: Vec<Vec3>,
    morph: Option<Morph>,
}

impl ParticleSet {
    pub fn new<R: Rng + ?Sized>(kind: PatternKind, count: usize, rng: &mut R) -> Self {
        let base = pattern::generate(kind, count, rng);
        let derived = base.clone();
        Self {
            kind,
            base,
            derived,
            morph: None,
        }
    }

    /// Replace every base position with a fresh `kind` formation of `count`
    /// particles. The new buffer is fully built before it is swapped in.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, kind: PatternKind, count: usize, rng: &mut R) {
        let fresh = pattern::generate(kind, count, rng);
        let mut from = std::mem::replace(&mut self.derived, fresh.clone());
        from.truncate(count);
        // Newly added slots have no history and start on their target.
        for (slot, src) in self.derived.iter_mut().zip(&from) {
            *slot = *src;
        }
        self.base = fresh;
        self.kind = kind;
        self.morph = Some(Morph { from, progress: 0.0 });
    }

    #[inline]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    #[inline]
    pub fn is_morphing(&self) -> bool {
        self.morph.is_some()
    }

    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    pub fn derived(&self) -> &[Vec3] {
        &self.derived
    }

    /// Base positions as `x, y, z` triples.
    pub fn base_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.base)
    }

    /// Derived positions as `x, y, z` triples, ready for upload.
    pub fn derived_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.derived)
    }

    /// Rebuild every derived position for this frame.
    ///
    /// `scale` is the combined expansion and pulse factor. The same noise
    /// scalar is added to all three axes of a particle.
    pub fn update(&mut self, scale: f32, elapsed_sec: f32, cfg: &MotionConfig) {
        if let Some(m) = &mut self.morph {
            m.progress = approach(m.progress, 1.0, cfg.morph_lerp);
        }
        let morph = self.morph.as_ref();
        for (i, (out, base)) in self.derived.iter_mut().zip(&self.base).enumerate() {
            let n = noise(elapsed_sec, base.x, cfg);
            let target = *base * scale + Vec3::splat(n);
            *out = match morph.and_then(|m| m.from.get(i).map(|src| (src, m.progress))) {
                Some((src, t)) => src.lerp(target, t),
                None => target,
            };
        }
        if self.morph.as_ref().is_some_and(|m| m.progress > MORPH_DONE) {
            self.morph = None;
        }
    }
}
