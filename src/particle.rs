//! The particle data model and its per-tick physics step.
//!
//! Two kinds of particle exist: kumkum (a soft powder disc) and chawal (an
//! elongated rice grain that tumbles as it flies). Both share position,
//! velocity, gravity and friction; the grain additionally carries a spin
//! that winds down over time.
//!
//! Physics is fixed-step: gravity and friction are per-tick coefficients,
//! tuned for one tick per display frame (~60 Hz). A tick applies, in order:
//!
//! 1. gravity into vertical velocity,
//! 2. friction into both velocity components,
//! 3. velocity into position,
//! 4. spin into rotation, then spin decay (chawal only).

use glam::Vec2;

use crate::visuals::Color;

/// Per-tick multiplicative decay applied to a grain's spin.
pub const SPIN_DECAY: f32 = 0.98;

/// The shape-specific half of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    /// Powder: a soft-edged disc.
    Kumkum {
        /// Disc radius in pixels.
        radius: f32,
    },

    /// Rice grain: a rotated ellipse with a sheen highlight.
    Chawal {
        /// Half-width of the grain in pixels.
        width: f32,
        /// Half-height of the grain in pixels.
        height: f32,
        /// Rotation speed in degrees per tick. Decays by [`SPIN_DECAY`]
        /// every tick.
        spin: f32,
    },
}

/// A single airborne particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in canvas pixel coordinates.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Downward acceleration added to `velocity.y` each tick.
    pub gravity: f32,
    /// Multiplicative velocity decay per tick, in (0, 1).
    pub friction: f32,
    /// Rotation angle in degrees.
    pub rotation: f32,
    /// Fill color, chosen from a palette at spawn.
    pub color: Color,
    /// Shape-specific data.
    pub kind: Kind,
}

impl Particle {
    /// Current speed (velocity magnitude) in pixels per tick.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether this is a kumkum (powder) particle.
    #[inline]
    pub fn is_kumkum(&self) -> bool {
        matches!(self.kind, Kind::Kumkum { .. })
    }

    /// Advance this particle by one tick.
    pub(crate) fn integrate(&mut self) {
        self.velocity.y += self.gravity;
        self.velocity *= self.friction;
        self.position += self.velocity;

        if let Kind::Chawal { spin, .. } = &mut self.kind {
            self.rotation += *spin;
            *spin *= SPIN_DECAY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grain(velocity: Vec2, gravity: f32, friction: f32) -> Particle {
        Particle {
            position: Vec2::new(100.0, 200.0),
            velocity,
            gravity,
            friction,
            rotation: 0.0,
            color: Color::rgb(255, 255, 240),
            kind: Kind::Chawal {
                width: 3.0,
                height: 8.0,
                spin: 4.0,
            },
        }
    }

    #[test]
    fn test_integrate_applies_gravity_before_friction() {
        let mut p = grain(Vec2::new(0.0, 0.0), 0.2, 0.5);
        p.integrate();
        // vy = (0 + 0.2) * 0.5
        assert!((p.velocity.y - 0.1).abs() < 1e-6);
        assert!((p.position.y - 200.1).abs() < 1e-6);
    }

    #[test]
    fn test_speed_decays_without_gravity() {
        let mut p = grain(Vec2::new(6.0, -3.0), 0.0, 0.97);
        let mut last = p.speed();
        for _ in 0..100 {
            p.integrate();
            let speed = p.speed();
            assert!(speed < last);
            last = speed;
        }
        assert!(last < 0.5);
    }

    #[test]
    fn test_spin_decays_and_rotation_accumulates() {
        let mut p = grain(Vec2::ZERO, 0.0, 0.98);
        p.integrate();
        match p.kind {
            Kind::Chawal { spin, .. } => assert!((spin - 4.0 * SPIN_DECAY).abs() < 1e-6),
            _ => unreachable!(),
        }
        assert!((p.rotation - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_kumkum_rotation_is_static() {
        let mut p = grain(Vec2::ZERO, 0.0, 0.98);
        p.kind = Kind::Kumkum { radius: 4.0 };
        p.rotation = 45.0;
        p.integrate();
        assert_eq!(p.rotation, 45.0);
    }
}
