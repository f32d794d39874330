//! Programmatic spawn triggers.
//!
//! An `Emitter` schedules spreads without user interaction. Two shapes
//! cover what the scatter effect needs:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Emitter::Burst`] | One spread at a point, fired immediately |
//! | [`Emitter::Staggered`] | A timed sequence of spreads |
//!
//! The four-corner entrance flourish is available as a preset:
//!
//! ```ignore
//! Simulation::new()
//!     .with_size(1280, 720)
//!     .with_emitter(Emitter::entrance(1280.0, 720.0))
//!     .run()?;
//! ```

use std::time::Duration;

use glam::Vec2;

/// Delay between the left and right corner pairs of the entrance preset.
const ENTRANCE_STAGGER: Duration = Duration::from_millis(100);

/// One scheduled spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSpread {
    /// Clock time at which to fire, relative to simulation start.
    pub at: Duration,
    /// Spawn point in canvas pixel coordinates.
    pub position: Vec2,
}

/// A programmatic spawn trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Emitter {
    /// A single spread at a point, fired on the first frame.
    Burst {
        /// Spawn point in canvas pixel coordinates.
        position: Vec2,
    },

    /// A sequence of spreads fired as the clock passes each entry.
    Staggered {
        /// The scheduled spreads. Order does not matter.
        spreads: Vec<TimedSpread>,
    },
}

impl Emitter {
    /// The four-corner entrance flourish: both left corners immediately,
    /// both right corners 100 ms later. Corner heights sit at 15 % and
    /// 85 % of the field height.
    pub fn entrance(width: f32, height: f32) -> Self {
        Emitter::Staggered {
            spreads: vec![
                TimedSpread {
                    at: Duration::ZERO,
                    position: Vec2::new(0.0, height * 0.15),
                },
                TimedSpread {
                    at: Duration::ZERO,
                    position: Vec2::new(0.0, height * 0.85),
                },
                TimedSpread {
                    at: ENTRANCE_STAGGER,
                    position: Vec2::new(width, height * 0.15),
                },
                TimedSpread {
                    at: ENTRANCE_STAGGER,
                    position: Vec2::new(width, height * 0.85),
                },
            ],
        }
    }

    fn into_spreads(self) -> Vec<TimedSpread> {
        match self {
            Emitter::Burst { position } => vec![TimedSpread {
                at: Duration::ZERO,
                position,
            }],
            Emitter::Staggered { spreads } => spreads,
        }
    }
}

/// Pending scheduled spreads, drained as the clock advances.
pub(crate) struct EmitterQueue {
    /// Sorted by firing time, soonest last (so firing pops from the end).
    pending: Vec<TimedSpread>,
}

impl EmitterQueue {
    pub(crate) fn new(emitters: Vec<Emitter>) -> Self {
        let mut pending: Vec<TimedSpread> = emitters
            .into_iter()
            .flat_map(Emitter::into_spreads)
            .collect();
        pending.sort_by_key(|spread| std::cmp::Reverse(spread.at));
        Self { pending }
    }

    /// Spawn points whose firing time has passed.
    pub(crate) fn drain_due(&mut self, elapsed: Duration) -> Vec<Vec2> {
        let mut due = Vec::new();
        while self.pending.last().is_some_and(|spread| spread.at <= elapsed) {
            if let Some(spread) = self.pending.pop() {
                due.push(spread.position);
            }
        }
        due
    }

    /// Whether any spreads are still scheduled.
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
