//! Simulation timing.
//!
//! `Time` is a virtual clock: elapsed time is the sum of the deltas it has
//! been stepped by, not a reading of the system clock. Stepping comes in
//! three flavors:
//!
//! - [`update`](Time::update) with no fixed delta measures real frame time,
//!   for windowed hosts;
//! - [`set_fixed_delta`](Time::set_fixed_delta) plus `update` gives
//!   deterministic fixed-step timelines, for headless runs;
//! - [`advance`](Time::advance) jumps the clock by an explicit amount, for
//!   tests that exercise wall-clock-dependent behavior (settled-particle
//!   fade) without sleeping.
//!
//! Settled-particle opacity is a pure function of this clock, so a clock
//! jump fades particles exactly as real elapsed time would.

use std::time::{Duration, Instant};

/// How much virtual time must pass between fps recalculations.
const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Virtual clock driving the simulation.
#[derive(Debug)]
pub struct Time {
    /// Accumulated virtual time.
    elapsed: Duration,
    /// Delta applied by the most recent step.
    delta: Duration,
    /// Real-time anchor of the previous `update`, when not fixed-stepped.
    last_instant: Option<Instant>,
    /// Fixed step size, if any.
    fixed_delta: Option<Duration>,
    /// Steps taken so far.
    frame_count: u64,
    /// Whether `update` is currently a no-op.
    paused: bool,
    /// Frames per second over the last window.
    fps: f32,
    /// Frame count at the last fps update.
    fps_frame_count: u64,
    /// Elapsed value at the last fps update.
    fps_mark: Duration,
}

impl Time {
    /// Create a clock at zero.
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            last_instant: None,
            fixed_delta: None,
            frame_count: 0,
            paused: false,
            fps: 0.0,
            fps_frame_count: 0,
            fps_mark: Duration::ZERO,
        }
    }

    /// Step the clock by one frame. Call once per frame.
    ///
    /// Uses the fixed delta if one is set, otherwise the real time since
    /// the previous call. Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        if self.paused {
            self.delta = Duration::ZERO;
            return (self.elapsed.as_secs_f32(), 0.0);
        }

        let delta = match self.fixed_delta {
            Some(fixed) => fixed,
            None => {
                let now = Instant::now();
                let delta = self
                    .last_instant
                    .map(|last| now.duration_since(last))
                    .unwrap_or(Duration::ZERO);
                self.last_instant = Some(now);
                delta
            }
        };

        self.step(delta);
        (self.elapsed.as_secs_f32(), self.delta.as_secs_f32())
    }

    /// Jump the clock forward by an explicit amount, as one frame.
    ///
    /// Works regardless of pause state or fixed delta.
    pub fn advance(&mut self, delta: Duration) {
        self.step(delta);
    }

    fn step(&mut self, delta: Duration) {
        self.elapsed += delta;
        self.delta = delta;
        self.frame_count += 1;

        let window = self.elapsed.saturating_sub(self.fps_mark);
        if window >= FPS_WINDOW {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_mark = self.elapsed;
        }
    }

    /// Total virtual time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Total virtual time as a `Duration`.
    #[inline]
    pub fn elapsed_duration(&self) -> Duration {
        self.elapsed
    }

    /// Delta of the most recent step, in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Steps taken so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop `update` from advancing the clock.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The pause gap does not count as elapsed time.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_instant = Some(Instant::now());
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Set a fixed step size for deterministic updates, or `None` to use
    /// real frame timing again.
    pub fn set_fixed_delta(&mut self, delta: Option<Duration>) {
        self.fixed_delta = delta;
        if delta.is_none() {
            self.last_instant = Some(Instant::now());
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_zero() {
        let time = Time::new();
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
    }

    #[test]
    fn test_fixed_delta_is_deterministic() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(Duration::from_millis(16)));
        for _ in 0..100 {
            time.update();
        }
        assert_eq!(time.elapsed_duration(), Duration::from_millis(1600));
        assert_eq!(time.frame(), 100);
    }

    #[test]
    fn test_advance_jumps_clock() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(3001));
        assert_eq!(time.elapsed_duration(), Duration::from_millis(3001));
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_pause_freezes_update() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(Duration::from_millis(10)));
        time.update();
        time.pause();
        time.update();
        time.update();
        assert_eq!(time.elapsed_duration(), Duration::from_millis(10));
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_advance_works_while_paused() {
        let mut time = Time::new();
        time.pause();
        time.advance(Duration::from_secs(2));
        assert_eq!(time.elapsed_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_first_realtime_update_has_zero_delta() {
        let mut time = Time::new();
        let (_, delta) = time.update();
        assert_eq!(delta, 0.0);
    }
}
