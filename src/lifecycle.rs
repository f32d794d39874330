//! Particle lifecycle thresholds.
//!
//! A particle moves through three states:
//!
//! | State | Meaning |
//! |-------|---------|
//! | active | integrated every tick, rendered at full opacity |
//! | settled | stopped; fades linearly over a fixed duration |
//! | removed | fully faded, or left the field while still active |
//!
//! A particle settles once its speed drops below [`settle_speed`] while its
//! vertical position is past the [`settle_floor`] guard (so powder never
//! freezes right at the top of the screen). Once settled it never becomes
//! active again. Active particles that leave the field extents by more than
//! [`discard_margin`] are dropped.
//!
//! [`settle_speed`]: Lifecycle::settle_speed
//! [`settle_floor`]: Lifecycle::settle_floor
//! [`discard_margin`]: Lifecycle::discard_margin
//!
//! # Example
//!
//! ```ignore
//! let lifecycle = Lifecycle::new()
//!     .fade_duration(Duration::from_secs(5))
//!     .horizontal_bound(false); // let grains drift off-screen sideways
//! ```

use std::time::Duration;

/// Lifecycle thresholds for settling, fading and discarding.
#[derive(Debug, Clone, PartialEq)]
pub struct Lifecycle {
    /// Speed below which a particle is considered stopped, in pixels per
    /// tick.
    pub settle_speed: f32,
    /// Minimum vertical position (pixels from the top) before a particle
    /// may settle.
    pub settle_floor: f32,
    /// How long a settled particle takes to fade to nothing.
    pub fade_duration: Duration,
    /// Distance past the field extents at which an active particle is
    /// discarded, in pixels.
    pub discard_margin: f32,
    /// Also discard particles that drift past the left or right edge.
    ///
    /// With this off only the bottom edge bounds the field, and sideways
    /// drifters live until they slow down enough to settle.
    pub horizontal_bound: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            settle_speed: 0.5,
            settle_floor: 100.0,
            fade_duration: Duration::from_millis(3000),
            discard_margin: 50.0,
            horizontal_bound: true,
        }
    }
}

impl Lifecycle {
    /// Create the default lifecycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settle speed threshold.
    pub fn settle_speed(mut self, speed: f32) -> Self {
        self.settle_speed = speed;
        self
    }

    /// Set the settle floor guard.
    pub fn settle_floor(mut self, floor: f32) -> Self {
        self.settle_floor = floor;
        self
    }

    /// Set the settled fade-out duration.
    pub fn fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Set the off-field discard margin.
    pub fn discard_margin(mut self, margin: f32) -> Self {
        self.discard_margin = margin;
        self
    }

    /// Enable or disable the horizontal discard bound.
    pub fn horizontal_bound(mut self, bound: bool) -> Self {
        self.horizontal_bound = bound;
        self
    }

    /// Opacity of a particle that settled `elapsed` ago.
    ///
    /// Linear from 1 at the moment of settling to 0 at `fade_duration`,
    /// clamped below. Depends only on elapsed clock time, never on tick
    /// count.
    pub fn opacity(&self, elapsed: Duration) -> f32 {
        let fade = self.fade_duration.as_secs_f32();
        if fade <= 0.0 {
            return 0.0;
        }
        (1.0 - elapsed.as_secs_f32() / fade).max(0.0)
    }
}
