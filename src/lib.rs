//! # Kumkum - decorative 2D particle blessings
//!
//! A scatter engine for the traditional kumkum-and-chawal effect: every
//! click tosses a handful of red powder and rice grains that fly, slow
//! down, settle in place and fade away. Physics runs on the CPU with a
//! fixed per-frame step; rendering is a software canvas blitted to the
//! screen.
//!
//! ## Quick Start
//!
//! ```ignore
//! use kumkum::prelude::*;
//!
//! fn main() -> Result<(), kumkum::SimulationError> {
//!     Simulation::new()
//!         .with_size(1280, 720)
//!         .with_emitter(Emitter::entrance(1280.0, 720.0))
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] owns everything: the active particles, the settled
//! (fading) particles and the canvas. It exposes four operations
//! (`spread`, `tick`, `render`, `resize`) and never schedules itself, so
//! it embeds anywhere a host can drive it once per frame:
//!
//! ```ignore
//! let mut field = ParticleField::headless(800, 600);
//! let mut time = Time::new();
//! time.set_fixed_delta(Some(Duration::from_millis(16)));
//!
//! field.spread(400.0, 300.0);
//! for _ in 0..600 {
//!     time.update();
//!     field.tick(&time);
//! }
//! ```
//!
//! ### Lifecycle
//!
//! A particle is **active** while it flies, **settled** once its speed
//! drops below the threshold past the settle floor, and gone once its
//! fade completes (or it leaves the field). Settling is one-way, and the
//! fade depends only on clock time; see [`Lifecycle`].
//!
//! ### Configuration
//!
//! Every behavior constant is data: [`FieldConfig`] holds per-kind spawn
//! ranges, palettes and the capacity ceiling; [`Lifecycle`] holds the
//! settle/fade/discard thresholds. Defaults give the traditional effect
//! (25 powder + 15 grains per spread, 3 s fade).
//!
//! ### Hosting
//!
//! [`Simulation`] is the batteries-included host: a winit window, clicks
//! wired to `spread`, resize wired to `resize`, and an optional [`Chime`]
//! gated by a shared [`AudioSettings`] mute flag. If the GPU is missing
//! it degrades to a headless field rather than failing.

pub mod audio;
pub mod canvas;
pub mod config;
mod emitter;
pub mod error;
mod field;
pub mod input;
pub mod lifecycle;
mod particle;
mod simulation;
mod spawn;
pub mod time;
pub mod visuals;
mod window;

pub use audio::{AudioSettings, Chime, NullChime};
pub use canvas::{Canvas, Pixel};
pub use config::{Capacity, EvictionPolicy, FieldConfig, GrainParams, PowderParams};
pub use emitter::{Emitter, TimedSpread};
pub use error::{GpuError, SimulationError, SnapshotError};
pub use field::{ParticleField, Settled};
pub use glam::Vec2;
pub use lifecycle::Lifecycle;
pub use particle::{Kind, Particle};
pub use simulation::Simulation;
pub use spawn::SpawnContext;
pub use time::Time;
pub use visuals::{Color, Palette};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use kumkum::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audio::{AudioSettings, Chime, NullChime};
    pub use crate::canvas::Canvas;
    pub use crate::config::{Capacity, EvictionPolicy, FieldConfig};
    pub use crate::emitter::{Emitter, TimedSpread};
    pub use crate::field::{ParticleField, Settled};
    pub use crate::lifecycle::Lifecycle;
    pub use crate::particle::{Kind, Particle};
    pub use crate::simulation::Simulation;
    pub use crate::time::Time;
    pub use crate::visuals::{Color, Palette};
    pub use crate::Vec2;
}
