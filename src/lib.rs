//! Elemental bolt simulation library
//!
//! Fire, Water and Earth bolts fly in a plane, collide through a coarse
//! box test, and knock each other out by rock-paper-scissors rules: Fire beats
//! Water, Water beats Earth, Earth beats Fire, and equal elements cancel.
//!
//! [`simulation::BoltSimulation`] is the owned core; [`plugin::BoltsPlugin`]
//! hosts it inside a Bevy app.

pub mod collision;
pub mod config;
pub mod constants;
pub mod element;
pub mod error;
pub mod interaction;
pub mod plugin;
pub mod pool;
pub mod projectile;
pub mod simulation;
pub mod spawner;

pub use element::ElementalType;
pub use error::{BoltError, BoltResult};
pub use plugin::{BoltBody, BoltDeactivated, BoltsPlugin, FireCommand, RetireBolt};
pub use pool::ProjectileHandle;
pub use simulation::{BoltSimulation, DeactivationReason, TickReport};
pub use spawner::{Facing, FireTriggers};
