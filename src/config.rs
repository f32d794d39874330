//! Field configuration: spawn parameters, palettes and capacity.
//!
//! Every constant of the scatter behavior lives here so the engine can be
//! tuned (or pinned, for tests) without touching the physics code. The
//! defaults reproduce the traditional effect: 25 powder + 15 grain
//! particles per spread, tossed upward with randomized speed, size, gravity
//! and color.
//!
//! # Example
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .capacity(Capacity::Bounded {
//!         limit: 2_000,
//!         policy: EvictionPolicy::RejectNew,
//!     })
//!     .seed(7);
//! ```

use std::ops::Range;

use crate::visuals::Palette;

/// Spawn parameters for kumkum (powder) particles.
#[derive(Debug, Clone)]
pub struct PowderParams {
    /// Particles of this kind added per spread.
    pub count: usize,
    /// Initial speed range in pixels per tick.
    pub speed: Range<f32>,
    /// Upward bias subtracted from the initial vertical velocity,
    /// simulating a toss.
    pub upward_bias: f32,
    /// Disc radius range in pixels.
    pub radius: Range<f32>,
    /// Per-particle gravity coefficient range.
    pub gravity: Range<f32>,
    /// Per-tick velocity decay, in (0, 1).
    pub friction: f32,
    /// Colors to draw from.
    pub palette: Palette,
}

impl Default for PowderParams {
    fn default() -> Self {
        Self {
            count: 25,
            speed: 3.0..11.0,
            upward_bias: 2.0,
            radius: 2.0..6.0,
            gravity: 0.15..0.25,
            friction: 0.98,
            palette: Palette::KumkumReds,
        }
    }
}

/// Spawn parameters for chawal (grain) particles.
#[derive(Debug, Clone)]
pub struct GrainParams {
    /// Particles of this kind added per spread.
    pub count: usize,
    /// Initial speed range in pixels per tick.
    pub speed: Range<f32>,
    /// Upward bias subtracted from the initial vertical velocity.
    pub upward_bias: f32,
    /// Grain half-width range in pixels.
    pub width: Range<f32>,
    /// Grain half-height range in pixels.
    pub height: Range<f32>,
    /// Per-particle gravity coefficient range.
    pub gravity: Range<f32>,
    /// Per-tick velocity decay, in (0, 1).
    pub friction: f32,
    /// Initial spin range in degrees per tick.
    pub spin: Range<f32>,
    /// Colors to draw from.
    pub palette: Palette,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            count: 15,
            speed: 2.0..8.0,
            upward_bias: 3.0,
            width: 2.0..5.0,
            height: 4.0..12.0,
            gravity: 0.2..0.3,
            friction: 0.97,
            spin: -5.0..5.0,
            palette: Palette::ChawalCreams,
        }
    }
}

/// What to do when a spread would push the field past its particle ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Evict the oldest active particles to make room (default). Settled
    /// particles are never evicted; they are already on a fixed fade clock.
    #[default]
    DropOldest,

    /// Silently drop the incoming batch instead.
    RejectNew,
}

/// Ceiling on the total particle count (active + settled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// No ceiling. Sustained rapid spawning grows memory and render cost
    /// without bound; prefer a `Bounded` ceiling outside of tests.
    Unbounded,

    /// Hard ceiling with an eviction policy.
    Bounded {
        /// Maximum total particle count.
        limit: usize,
        /// How to make room when the limit is hit.
        policy: EvictionPolicy,
    },
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::Bounded {
            limit: 10_000,
            policy: EvictionPolicy::DropOldest,
        }
    }
}

/// Complete spawn-side configuration of a [`ParticleField`].
///
/// [`ParticleField`]: crate::ParticleField
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    /// Powder spawn parameters.
    pub kumkum: PowderParams,
    /// Grain spawn parameters.
    pub chawal: GrainParams,
    /// Particle ceiling and eviction policy.
    pub capacity: Capacity,
    /// RNG seed for deterministic spawns. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl FieldConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Particles added by one spread (both kinds).
    pub fn batch_size(&self) -> usize {
        self.kumkum.count + self.chawal.count
    }

    /// Set the particle ceiling.
    pub fn capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Pin the spawn RNG for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the powder palette.
    pub fn kumkum_palette(mut self, palette: Palette) -> Self {
        self.kumkum.palette = palette;
        self
    }

    /// Replace the grain palette.
    pub fn chawal_palette(mut self, palette: Palette) -> Self {
        self.chawal.palette = palette;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_size() {
        assert_eq!(FieldConfig::default().batch_size(), 40);
    }

    #[test]
    fn test_default_capacity_is_bounded() {
        match FieldConfig::default().capacity {
            Capacity::Bounded { limit, policy } => {
                assert_eq!(limit, 10_000);
                assert_eq!(policy, EvictionPolicy::DropOldest);
            }
            Capacity::Unbounded => panic!("default capacity must be bounded"),
        }
    }

    #[test]
    fn test_builder_chain() {
        let config = FieldConfig::new()
            .seed(42)
            .capacity(Capacity::Unbounded)
            .chawal_palette(Palette::KumkumReds);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.capacity, Capacity::Unbounded);
        assert_eq!(config.chawal.palette, Palette::KumkumReds);
    }
}
