//! Single-bolt state and motion integration.
//!
//! ## Integration
//!
//! Forces accumulate into `acceleration` between steps (scaled by the impulse
//! multiplier) and are consumed by [`Projectile::integrate`], which runs
//! semi-implicit Euler:
//!
//! | Step | Update                                  |
//! |------|-----------------------------------------|
//! | 1    | `a = acceleration / mass`               |
//! | 2    | `velocity += a · dt`                    |
//! | 3    | clamp speed to `max_speed` (optional)   |
//! | 4    | `position += velocity · dt`             |
//! | 5    | `acceleration = 0`                      |
//!
//! Forces never persist across steps.

use bevy::prelude::*;

use crate::element::ElementalType;
use crate::error::{validate_mass, BoltResult};

/// One elemental bolt: kinematic state plus its pool flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    element: ElementalType,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Accumulated (already multiplied) force for the current step.
    pub acceleration: Vec3,
    mass: f32,
    /// Seconds integrated since spawn.
    pub age: f32,
    active: bool,
}

impl Projectile {
    /// Create an active bolt at rest.  Rejects non-positive or non-finite mass.
    pub fn new(element: ElementalType, position: Vec3, mass: f32) -> BoltResult<Self> {
        validate_mass(mass)?;
        Ok(Self {
            element,
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            age: 0.0,
            active: true,
        })
    }

    #[inline]
    pub fn element(&self) -> ElementalType {
        self.element
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Clear the active flag.  Returns `true` only on the active → inactive edge,
    /// so repeated calls are harmless.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Add `force × multiplier` to this step's accumulated acceleration.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3, multiplier: f32) {
        self.acceleration += force * multiplier;
    }

    /// Advance one step of `dt` seconds.  `max_speed <= 0` disables the clamp.
    pub fn integrate(&mut self, dt: f32, max_speed: f32) {
        let scaled_accel = self.acceleration / self.mass;
        self.velocity += scaled_accel * dt;
        if max_speed > 0.0 {
            self.velocity = self.velocity.clamp_length_max(max_speed);
        }
        self.position += self.velocity * dt;
        self.acceleration = Vec3::ZERO;
        self.age += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_bolt() -> Projectile {
        Projectile::new(ElementalType::Fire, Vec3::ZERO, 1.0).unwrap()
    }

    #[test]
    fn construction_rejects_non_positive_mass() {
        assert!(Projectile::new(ElementalType::Earth, Vec3::ZERO, 0.0).is_err());
        assert!(Projectile::new(ElementalType::Earth, Vec3::ZERO, -1.0).is_err());
        assert!(Projectile::new(ElementalType::Earth, Vec3::ZERO, f32::INFINITY).is_err());
    }

    #[test]
    fn forces_within_a_step_sum() {
        let mut bolt = fire_bolt();
        bolt.apply_force(Vec3::new(1.0, 0.0, 0.0), 5.0);
        bolt.apply_force(Vec3::new(0.0, 2.0, 0.0), 5.0);
        assert_eq!(bolt.acceleration, Vec3::new(5.0, 10.0, 0.0));
    }

    #[test]
    fn integrate_is_semi_implicit_euler_and_clears_acceleration() {
        let mut bolt = Projectile::new(ElementalType::Water, Vec3::ZERO, 2.0).unwrap();
        bolt.apply_force(Vec3::new(4.0, 0.0, 0.0), 5.0);
        bolt.integrate(0.5, 0.0);

        // a = 20 / 2 = 10; v = 5; x = 2.5
        assert_eq!(bolt.velocity, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(bolt.position, Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(bolt.acceleration, Vec3::ZERO);
        assert_eq!(bolt.age, 0.5);

        // No force on the next step: constant velocity.
        bolt.integrate(0.5, 0.0);
        assert_eq!(bolt.velocity, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(bolt.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn integrate_is_bit_reproducible() {
        let run = || {
            let mut bolt = fire_bolt();
            bolt.apply_force(Vec3::new(-4.0, 0.3, 0.0), 5.0);
            for _ in 0..10 {
                bolt.integrate(1.0 / 60.0, 0.0);
            }
            (bolt.position.to_array(), bolt.velocity.to_array())
        };
        let (p1, v1) = run();
        let (p2, v2) = run();
        assert_eq!(p1.map(f32::to_bits), p2.map(f32::to_bits));
        assert_eq!(v1.map(f32::to_bits), v2.map(f32::to_bits));
    }

    #[test]
    fn max_speed_clamp_limits_velocity_when_enabled() {
        let mut bolt = fire_bolt();
        bolt.apply_force(Vec3::new(100.0, 0.0, 0.0), 5.0);
        bolt.integrate(1.0, 10.0);
        assert!((bolt.velocity.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn deactivate_reports_only_the_first_transition() {
        let mut bolt = fire_bolt();
        assert!(bolt.deactivate());
        assert!(!bolt.deactivate());
        assert!(!bolt.is_active());
    }
}
