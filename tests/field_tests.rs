//! Integration tests for the scatter field lifecycle.
//!
//! These drive `ParticleField` through whole scenarios with a virtual
//! clock: spread, settle, fade, resize. Physics is per-tick, so the clock
//! delta only matters to the settled fade - which is exactly what the
//! clock-jump tests exploit.

use std::time::Duration;

use kumkum::prelude::*;

/// Small fixed step so long settling runs stay well inside the 3 s fade
/// window of early settlers.
const TINY_STEP: Duration = Duration::from_micros(100);

/// Default physics, but with gravity pinned low enough that terminal fall
/// speed sits below the settle threshold: every particle eventually slows
/// under 0.5 px/tick while sinking, instead of accelerating off-screen.
fn settling_config() -> FieldConfig {
    let mut config = FieldConfig::default().seed(9);
    config.kumkum.gravity = 0.008..0.009;
    config.chawal.gravity = 0.008..0.009;
    config
}

/// Gravity-free physics with a gentle toss: speed decay comes from
/// friction alone, and no particle drifts far enough to reach a discard
/// bound or dip back above the settle floor.
fn coasting_config() -> FieldConfig {
    let mut config = FieldConfig::default().seed(5);
    for speed in [&mut config.kumkum.speed, &mut config.chawal.speed] {
        *speed = 1.0..2.0;
    }
    config.kumkum.upward_bias = 0.0;
    config.chawal.upward_bias = 0.0;
    config.kumkum.gravity = 0.0..0.0;
    config.chawal.gravity = 0.0..0.0;
    config
}

// ============================================================================
// Spawn properties
// ============================================================================

#[test]
fn spread_adds_exactly_forty_particles() {
    let mut field = ParticleField::headless(800, 600);

    field.spread(100.0, 100.0);
    assert_eq!(field.active().len(), 40);
    assert_eq!(field.settled().len(), 0);

    // Regardless of prior state.
    field.spread(700.0, 500.0);
    assert_eq!(field.active().len(), 80);
}

#[test]
fn spawned_sizes_stay_in_range() {
    let mut field = ParticleField::headless(800, 600);
    for i in 0..20 {
        field.spread(40.0 * i as f32, 300.0);
    }

    let mut kumkum = 0;
    let mut chawal = 0;
    for particle in field.active() {
        match particle.kind {
            Kind::Kumkum { radius } => {
                kumkum += 1;
                assert!((2.0..6.0).contains(&radius), "radius {radius} out of range");
            }
            Kind::Chawal { width, height, .. } => {
                chawal += 1;
                assert!((2.0..5.0).contains(&width), "width {width} out of range");
                assert!((4.0..12.0).contains(&height), "height {height} out of range");
            }
        }
    }
    assert_eq!(kumkum, 20 * 25);
    assert_eq!(chawal, 20 * 15);
}

// ============================================================================
// Physics invariants
// ============================================================================

#[test]
fn speed_decays_monotonically_without_gravity() {
    let mut field = ParticleField::headless(800, 600)
        .with_config(coasting_config())
        // Push the settle floor out of reach so particles stay active.
        .with_lifecycle(Lifecycle::new().settle_floor(1.0e9));
    let mut time = Time::new();

    field.spread(400.0, 300.0);
    let mut speeds: Vec<f32> = field.active().iter().map(|p| p.speed()).collect();

    for _ in 0..200 {
        time.advance(TINY_STEP);
        field.tick(&time);
        assert_eq!(field.active().len(), 40, "nothing settles or leaves");

        for (particle, last) in field.active().iter().zip(&speeds) {
            let speed = particle.speed();
            assert!(speed <= *last, "speed rose from {last} to {speed}");
            if *last > 1e-6 {
                assert!(speed < *last, "speed failed to strictly decay at {last}");
            }
        }
        speeds = field.active().iter().map(|p| p.speed()).collect();
    }
}

#[test]
fn settling_is_mutually_exclusive_and_one_way() {
    let mut field = ParticleField::headless(800, 600).with_config(coasting_config());
    let mut time = Time::new();
    field.spread(400.0, 300.0);

    let mut settled_high_water = 0;
    for _ in 0..1000 {
        time.advance(TINY_STEP);
        field.tick(&time);

        // Every particle is in exactly one list.
        assert_eq!(field.active().len() + field.settled().len(), 40);
        // Settled membership never shrinks inside the fade window.
        assert!(field.settled().len() >= settled_high_water);
        settled_high_water = field.settled().len();
    }
    assert_eq!(settled_high_water, 40);
}

// ============================================================================
// Fade timing
// ============================================================================

#[test]
fn fade_follows_the_clock_not_the_tick_count() {
    let mut field = ParticleField::headless(800, 600).with_config(coasting_config());
    let mut time = Time::new();
    field.spread(400.0, 300.0);

    // Settle everything within a negligible slice of clock time.
    for _ in 0..100 {
        time.advance(Duration::from_micros(1));
        field.tick(&time);
    }
    assert_eq!(field.settled().len(), 40);

    // A thousand more ticks worth 0.1 ms total: opacity barely moves.
    for _ in 0..1000 {
        time.advance(Duration::from_nanos(100));
        field.tick(&time);
    }
    assert!(field.settled().iter().all(|s| s.opacity() > 0.99));

    // One tick after a 3001 ms jump: everything is gone.
    time.advance(Duration::from_millis(3001));
    field.tick(&time);
    assert_eq!(field.settled().len(), 0);
}

#[test]
fn fade_boundary_is_exact() {
    let mut field = ParticleField::headless(800, 600).with_config(coasting_config());
    let mut time = Time::new();
    field.spread(400.0, 300.0);

    // All settling happens at effectively t=0.
    for _ in 0..100 {
        time.advance(Duration::from_nanos(1));
        field.tick(&time);
    }
    assert_eq!(field.settled().len(), 40);

    // Just shy of the fade duration: still present, nearly invisible.
    time.advance(Duration::from_millis(2999));
    field.tick(&time);
    assert_eq!(field.settled().len(), 40);
    assert!(field.settled().iter().all(|s| s.opacity() < 0.01));

    // Past it: removed.
    time.advance(Duration::from_millis(2));
    field.tick(&time);
    assert_eq!(field.settled().len(), 0);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_changes_extents_without_touching_particles() {
    let mut field = ParticleField::new(800, 600).with_config(coasting_config());
    let mut time = Time::new();
    field.spread(400.0, 300.0);

    // Enough ticks that the slow tosses have settled while the fast ones
    // are still coasting.
    for _ in 0..50 {
        time.advance(TINY_STEP);
        field.tick(&time);
    }

    let active_before: Vec<Vec2> = field.active().iter().map(|p| p.position).collect();
    let settled_before: Vec<Vec2> = field.settled().iter().map(|s| s.particle().position).collect();

    field.resize(1000, 800);

    let active_after: Vec<Vec2> = field.active().iter().map(|p| p.position).collect();
    let settled_after: Vec<Vec2> = field.settled().iter().map(|s| s.particle().position).collect();

    assert_eq!(active_before, active_after);
    assert_eq!(settled_before, settled_after);
    assert_eq!(field.extent(), Vec2::new(1000.0, 800.0));
    assert_eq!(field.canvas().unwrap().width(), 1000);
}

#[test]
fn resize_redraws_settled_particles_immediately() {
    let mut field = ParticleField::new(800, 600).with_config(coasting_config());
    let mut time = Time::new();
    field.spread(400.0, 300.0);

    for _ in 0..100 {
        time.advance(TINY_STEP);
        field.tick(&time);
    }
    assert_eq!(field.settled().len(), 40);

    // No render() call after this resize - the settled layer alone must
    // already be on the fresh canvas.
    field.resize(1000, 800);
    let canvas = field.canvas().unwrap();
    assert!(canvas.bytes().iter().any(|&b| b != 0));
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[test]
fn full_lifecycle_spread_settle_fade() {
    let mut field = ParticleField::headless(800, 600)
        .with_config(settling_config())
        // Keep wide sideways drifters alive so all 40 account for
        // themselves in the settled list.
        .with_lifecycle(Lifecycle::new().horizontal_bound(false));
    let mut time = Time::new();

    field.spread(100.0, 100.0);
    assert_eq!(field.active().len(), 40);
    assert_eq!(field.settled().len(), 0);

    // Tick under simulated gravity until everything has sunk past the
    // settle floor and slowed below the settle threshold.
    let mut ticks = 0;
    while !field.active().is_empty() {
        time.advance(TINY_STEP);
        field.tick(&time);
        ticks += 1;
        assert!(ticks < 10_000, "particles failed to settle");
    }

    for settled in field.settled() {
        assert!(settled.particle().position.y > 100.0);
        assert!(settled.particle().speed() < 0.5);
    }
    assert_eq!(field.settled().len(), 40);

    // Advance past the fade duration; one update pass clears the field.
    time.advance(Duration::from_millis(3001));
    field.tick(&time);
    assert_eq!(field.settled().len(), 0);
    assert!(field.is_empty());
}
