//! Randomized particle spawning.
//!
//! `SpawnContext` wraps the field's RNG with helpers for the spawn patterns
//! the scatter effect needs: uniform angles, ranged values and palette
//! picks. It also builds whole particles from the configured per-kind
//! parameters, so the field's spread loop stays declarative:
//!
//! ```ignore
//! for _ in 0..config.kumkum.count {
//!     active.push(ctx.powder(origin, &config.kumkum));
//! }
//! ```

use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{GrainParams, PowderParams};
use crate::particle::{Kind, Particle};
use crate::visuals::{Color, Palette};

/// RNG wrapper used by the field to build spread batches.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a context with a pinned seed, for reproducible spreads.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    ///
    /// An empty range (start >= end) returns its start value, so pinned
    /// configs like `gravity: 0.0..0.0` work in tests.
    #[inline]
    pub fn random_range(&mut self, range: &Range<f32>) -> f32 {
        if range.start >= range.end {
            return range.start;
        }
        self.rng.gen_range(range.clone())
    }

    /// Random angle in [0, 2π).
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Unit vector for an angle in radians.
    #[inline]
    pub fn direction(angle: f32) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Uniformly pick a color from a palette.
    pub fn pick(&mut self, palette: &Palette) -> Color {
        let colors = palette.colors();
        colors[self.rng.gen_range(0..colors.len())]
    }

    /// Velocity for a tossed particle: a random direction scaled by a
    /// random speed, with the vertical component biased upward.
    fn toss(&mut self, speed: &Range<f32>, upward_bias: f32) -> Vec2 {
        let angle = self.random_angle();
        let speed = self.random_range(speed);
        let mut velocity = Self::direction(angle) * speed;
        velocity.y -= upward_bias;
        velocity
    }

    /// Build one kumkum particle at `origin`.
    pub fn powder(&mut self, origin: Vec2, params: &PowderParams) -> Particle {
        Particle {
            position: origin,
            velocity: self.toss(&params.speed, params.upward_bias),
            gravity: self.random_range(&params.gravity),
            friction: params.friction,
            rotation: self.rng.gen_range(0.0..360.0),
            color: self.pick(&params.palette),
            kind: Kind::Kumkum {
                radius: self.random_range(&params.radius),
            },
        }
    }

    /// Build one chawal particle at `origin`.
    pub fn grain(&mut self, origin: Vec2, params: &GrainParams) -> Particle {
        Particle {
            position: origin,
            velocity: self.toss(&params.speed, params.upward_bias),
            gravity: self.random_range(&params.gravity),
            friction: params.friction,
            rotation: self.rng.gen_range(0.0..360.0),
            color: self.pick(&params.palette),
            kind: Kind::Chawal {
                width: self.random_range(&params.width),
                height: self.random_range(&params.height),
                spin: self.random_range(&params.spin),
            },
        }
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::KUMKUM_REDS;

    #[test]
    fn test_seeded_context_is_deterministic() {
        let mut a = SpawnContext::seeded(11);
        let mut b = SpawnContext::seeded(11);
        let params = PowderParams::default();
        let origin = Vec2::new(10.0, 20.0);
        for _ in 0..20 {
            assert_eq!(a.powder(origin, &params), b.powder(origin, &params));
        }
    }

    #[test]
    fn test_powder_ranges() {
        let mut ctx = SpawnContext::seeded(3);
        let params = PowderParams::default();
        for _ in 0..500 {
            let p = ctx.powder(Vec2::ZERO, &params);
            match p.kind {
                Kind::Kumkum { radius } => assert!((2.0..6.0).contains(&radius)),
                _ => unreachable!(),
            }
            assert!((0.15..0.25).contains(&p.gravity));
            assert!(KUMKUM_REDS.contains(&p.color));
            assert!((0.0..360.0).contains(&p.rotation));
        }
    }

    #[test]
    fn test_grain_ranges() {
        let mut ctx = SpawnContext::seeded(4);
        let params = GrainParams::default();
        for _ in 0..500 {
            let p = ctx.grain(Vec2::ZERO, &params);
            match p.kind {
                Kind::Chawal { width, height, spin } => {
                    assert!((2.0..5.0).contains(&width));
                    assert!((4.0..12.0).contains(&height));
                    assert!((-5.0..5.0).contains(&spin));
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_upward_bias_shifts_velocity() {
        let mut ctx = SpawnContext::seeded(5);
        let params = PowderParams {
            speed: 0.0..0.0,
            upward_bias: 2.0,
            ..Default::default()
        };
        let p = ctx.powder(Vec2::ZERO, &params);
        assert!((p.velocity.y + 2.0).abs() < 1e-6);
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn test_empty_range_returns_start() {
        let mut ctx = SpawnContext::seeded(6);
        assert_eq!(ctx.random_range(&(1.5..1.5)), 1.5);
    }
}
