//! The particle field: state, physics and rendering.
//!
//! `ParticleField` owns everything the scatter effect needs: the active
//! list (particles still flying), the settled list (particles that stopped
//! and are fading out), the software canvas, and the spawn RNG. Nothing
//! here self-schedules; the host calls [`tick`](ParticleField::tick) and
//! [`render`](ParticleField::render) once per frame, in that order.
//!
//! A particle lives in exactly one of the two lists. The move from active
//! to settled happens inside a single `tick` pass and is one-way; the
//! settled list holds a different record type with no route back.
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::new(1280, 720);
//! let mut time = Time::new();
//!
//! field.spread(640.0, 360.0);
//! loop {
//!     time.update();
//!     field.tick(&time);
//!     field.render();
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use glam::Vec2;

use crate::canvas::Canvas;
use crate::config::{Capacity, EvictionPolicy, FieldConfig};
use crate::error::SnapshotError;
use crate::lifecycle::Lifecycle;
use crate::particle::{Kind, Particle};
use crate::spawn::SpawnContext;
use crate::time::Time;

/// A particle that has stopped and is fading out in place.
///
/// Opacity depends only on the clock time since settling, never on how
/// many ticks have run in between.
#[derive(Debug, Clone)]
pub struct Settled {
    particle: Particle,
    settled_at: Duration,
    opacity: f32,
}

impl Settled {
    /// The frozen particle.
    #[inline]
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    /// Current fade opacity in [0, 1].
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Clock value at the moment of settling.
    #[inline]
    pub fn settled_at(&self) -> Duration {
        self.settled_at
    }
}

/// A bounded set of independently-animated scatter particles.
pub struct ParticleField {
    extent: Vec2,
    canvas: Option<Canvas>,
    active: Vec<Particle>,
    settled: Vec<Settled>,
    config: FieldConfig,
    lifecycle: Lifecycle,
    spawner: SpawnContext,
}

impl ParticleField {
    /// Create a field with an owned canvas of the given pixel extents.
    pub fn new(width: u32, height: u32) -> Self {
        Self::build(width, height, Some(Canvas::new(width, height)))
    }

    /// Create a field with no render surface.
    ///
    /// Spawn bookkeeping and physics run normally; `render` and `snapshot`
    /// are no-ops. This is the degraded mode the windowed driver falls
    /// back to when the GPU is unavailable, and the natural mode for
    /// simulation tests.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::build(width, height, None)
    }

    fn build(width: u32, height: u32, canvas: Option<Canvas>) -> Self {
        Self {
            extent: Vec2::new(width as f32, height as f32),
            canvas,
            active: Vec::new(),
            settled: Vec::new(),
            config: FieldConfig::default(),
            lifecycle: Lifecycle::default(),
            spawner: SpawnContext::new(),
        }
    }

    /// Replace the spawn configuration. Reseeds the spawn RNG if the
    /// config pins a seed.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.spawner = match config.seed {
            Some(seed) => SpawnContext::seeded(seed),
            None => SpawnContext::new(),
        };
        self.config = config;
        self
    }

    /// Replace the lifecycle thresholds.
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Field extents in pixels.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// Particles still undergoing physics.
    #[inline]
    pub fn active(&self) -> &[Particle] {
        &self.active
    }

    /// Particles that have settled and are fading.
    #[inline]
    pub fn settled(&self) -> &[Settled] {
        &self.settled
    }

    /// Total particle count across both lists.
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len() + self.settled.len()
    }

    /// Whether the field holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.settled.is_empty()
    }

    /// The render surface, if this field has one.
    #[inline]
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Update the render surface extents.
    ///
    /// Particle coordinates are absolute and are not remapped; settled
    /// particles are redrawn immediately at their stored positions so the
    /// surface never presents blank between a resize and the next frame.
    /// Always succeeds; on a headless field only the extents change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.extent = Vec2::new(width as f32, height as f32);
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(width, height);
            for settled in &self.settled {
                draw_particle(canvas, &settled.particle, settled.opacity);
            }
        }
    }

    /// Scatter a batch of particles from the given point.
    ///
    /// Appends the configured counts (25 kumkum + 15 chawal by default)
    /// to the active list, each with randomized direction, speed, size,
    /// gravity and color. If the batch would exceed a bounded capacity the
    /// eviction policy applies: `DropOldest` evicts from the front of the
    /// active list (and truncates the batch if the limit is smaller than
    /// the batch itself); `RejectNew` drops the batch silently.
    pub fn spread(&mut self, x: f32, y: f32) {
        let origin = Vec2::new(x, y);
        let mut batch = self.config.batch_size();

        if let Capacity::Bounded { limit, policy } = self.config.capacity {
            if self.len() + batch > limit {
                match policy {
                    EvictionPolicy::RejectNew => return,
                    EvictionPolicy::DropOldest => {
                        let overflow = self.len() + batch - limit;
                        let evict = overflow.min(self.active.len());
                        self.active.drain(..evict);
                        batch = batch.min(limit.saturating_sub(self.len()));
                    }
                }
            }
        }

        let kumkum = batch.min(self.config.kumkum.count);
        let chawal = batch - kumkum;
        for _ in 0..kumkum {
            let p = self.spawner.powder(origin, &self.config.kumkum);
            self.active.push(p);
        }
        for _ in 0..chawal {
            let p = self.spawner.grain(origin, &self.config.chawal);
            self.active.push(p);
        }
    }

    /// Advance the field by one tick.
    ///
    /// For every active particle: integrate physics, then either settle it
    /// (speed below threshold while past the settle floor), discard it
    /// (left the field extents), or keep it active. Then refresh every
    /// settled particle's opacity from the clock and drop the fully faded.
    pub fn tick(&mut self, time: &Time) {
        let now = time.elapsed_duration();

        let mut i = 0;
        while i < self.active.len() {
            let (position, speed) = {
                let p = &mut self.active[i];
                p.integrate();
                (p.position, p.speed())
            };

            if speed < self.lifecycle.settle_speed && position.y > self.lifecycle.settle_floor {
                let particle = self.active.remove(i);
                self.settled.push(Settled {
                    particle,
                    settled_at: now,
                    opacity: 1.0,
                });
                continue;
            }

            if self.off_field(position) {
                self.active.remove(i);
                continue;
            }

            i += 1;
        }

        let lifecycle = &self.lifecycle;
        self.settled.retain_mut(|settled| {
            settled.opacity = lifecycle.opacity(now.saturating_sub(settled.settled_at));
            settled.opacity > 0.0
        });
    }

    /// Whether an active particle at `position` has left the field.
    fn off_field(&self, position: Vec2) -> bool {
        let margin = self.lifecycle.discard_margin;
        if position.y > self.extent.y + margin {
            return true;
        }
        self.lifecycle.horizontal_bound
            && (position.x < -margin || position.x > self.extent.x + margin)
    }

    /// Redraw the whole field: clear, settled particles at their fade
    /// opacity, then active particles at full opacity. No-op without a
    /// canvas.
    pub fn render(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.clear();
        for settled in &self.settled {
            draw_particle(canvas, &settled.particle, settled.opacity);
        }
        for particle in &self.active {
            draw_particle(canvas, particle, 1.0);
        }
    }

    /// Export the current canvas to a PNG file. No-op without a canvas.
    pub fn snapshot<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        match &self.canvas {
            Some(canvas) => canvas.save_png(path),
            None => Ok(()),
        }
    }
}

fn draw_particle(canvas: &mut Canvas, particle: &Particle, opacity: f32) {
    match particle.kind {
        Kind::Kumkum { radius } => {
            canvas.fill_powder(particle.position, radius, particle.color, opacity);
        }
        Kind::Chawal { width, height, .. } => {
            canvas.fill_grain(
                particle.position,
                Vec2::new(width, height),
                particle.rotation,
                particle.color,
                opacity,
            );
        }
    }
}
