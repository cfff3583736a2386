//! Bolt creation: facing, trigger priority, and launch kinematics.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::BoltConfig;
use crate::element::ElementalType;
use crate::error::BoltResult;
use crate::pool::{Insertion, TypeBucketStore};
use crate::projectile::Projectile;

/// Horizontal facing of the caster.  Bolts launch along ±x.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Negative values face left; zero and positive values face right.
    #[inline]
    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Trigger state for one caster on one frame.
///
/// Several triggers may be held at once; [`FireTriggers::selected`] picks a
/// single element so a caster launches at most one bolt per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FireTriggers {
    pub fire: bool,
    pub water: bool,
    pub earth: bool,
}

impl FireTriggers {
    pub fn only(element: ElementalType) -> Self {
        Self {
            fire: element == ElementalType::Fire,
            water: element == ElementalType::Water,
            earth: element == ElementalType::Earth,
        }
    }

    /// First pressed trigger in priority order Fire > Water > Earth.
    pub fn selected(self) -> Option<ElementalType> {
        if self.fire {
            Some(ElementalType::Fire)
        } else if self.water {
            Some(ElementalType::Water)
        } else if self.earth {
            Some(ElementalType::Earth)
        } else {
            None
        }
    }
}

/// One-off force that seeds a bolt's forward motion.
#[inline]
pub fn launch_force(config: &BoltConfig, facing: Facing) -> Vec3 {
    Vec3::new(config.launch_force * facing.sign(), 0.0, 0.0)
}

/// Build a bolt at `position`, apply its launch force, and store it.
///
/// Nothing is inserted unless construction succeeds.
pub fn spawn_bolt(
    store: &mut TypeBucketStore,
    config: &BoltConfig,
    position: Vec3,
    facing: Facing,
    element: ElementalType,
) -> BoltResult<Insertion> {
    let mut bolt = Projectile::new(element, position, config.bolt_mass)?;
    bolt.apply_force(launch_force(config, facing), config.impulse_multiplier);
    Ok(store.insert(bolt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_priority_is_fire_then_water_then_earth() {
        let all = FireTriggers {
            fire: true,
            water: true,
            earth: true,
        };
        assert_eq!(all.selected(), Some(ElementalType::Fire));

        let water_earth = FireTriggers {
            fire: false,
            water: true,
            earth: true,
        };
        assert_eq!(water_earth.selected(), Some(ElementalType::Water));

        assert_eq!(
            FireTriggers::only(ElementalType::Earth).selected(),
            Some(ElementalType::Earth)
        );
        assert_eq!(FireTriggers::default().selected(), None);
    }

    #[test]
    fn facing_sign_round_trips() {
        assert_eq!(Facing::from_sign(-1.0), Facing::Left);
        assert_eq!(Facing::from_sign(1.0), Facing::Right);
        assert_eq!(Facing::from_sign(0.0), Facing::Right);
        assert_eq!(Facing::Left.sign(), -1.0);
    }

    #[test]
    fn spawned_bolt_carries_scaled_launch_force() {
        let config = BoltConfig::default();
        let mut store = TypeBucketStore::new();
        let insertion = spawn_bolt(
            &mut store,
            &config,
            Vec3::new(2.0, 1.0, 0.0),
            Facing::Left,
            ElementalType::Water,
        )
        .unwrap();

        let bolt = store.get(insertion.handle).unwrap();
        assert_eq!(bolt.element(), ElementalType::Water);
        assert_eq!(bolt.position, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(bolt.velocity, Vec3::ZERO);
        assert_eq!(
            bolt.acceleration,
            Vec3::new(-config.launch_force * config.impulse_multiplier, 0.0, 0.0)
        );
    }

    #[test]
    fn bad_mass_inserts_nothing() {
        let config = BoltConfig {
            bolt_mass: 0.0,
            ..Default::default()
        };
        let mut store = TypeBucketStore::new();
        let result = spawn_bolt(
            &mut store,
            &config,
            Vec3::ZERO,
            Facing::Right,
            ElementalType::Fire,
        );
        assert!(result.is_err());
        assert_eq!(store.total_count(), 0);
    }
}
