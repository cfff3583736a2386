//! Bevy integration for the bolt simulation.
//!
//! ## Design
//!
//! [`BoltSimulation`] lives in the world as a resource.  The host talks to it
//! through messages and one component:
//!
//! | Item                | Direction | Purpose                                        |
//! |---------------------|-----------|------------------------------------------------|
//! | [`FireCommand`]     | in        | A caster pressed one or more element triggers   |
//! | [`RetireBolt`]      | in        | Game rule removing a bolt (shield, pickup, ...) |
//! | [`BoltBody`]        | both      | Entity mirroring one bolt's position            |
//! | [`BoltDeactivated`] | out       | A bolt lost a collision, expired or left bounds |
//!
//! All simulation systems run in `Update` as one chain, so spawns, the step,
//! the cull pass and the transform sync never interleave:
//!
//! | System                    | Purpose                                         |
//! |---------------------------|-------------------------------------------------|
//! | `fire_command_system`     | Pick one element per command, spawn bolt entity |
//! | `retire_bolt_system`      | External removals, report them as `External`    |
//! | `bolt_step_system`        | `tick(dt)`, report collision losses             |
//! | `bolt_cull_system`        | Lifetime / arena rule, report retirements       |
//! | `sync_bolt_bodies_system` | Copy positions to `Transform`, despawn the dead |

use bevy::prelude::*;

use crate::config::BoltConfig;
use crate::element::ElementalType;
use crate::pool::ProjectileHandle;
use crate::simulation::{BoltSimulation, DeactivationReason};
use crate::spawner::{Facing, FireTriggers};

/// A caster's fire input for one frame.
#[derive(Message, Debug, Clone, Copy)]
pub struct FireCommand {
    pub position: Vec3,
    pub facing: Facing,
    pub triggers: FireTriggers,
}

/// Ask the simulation to remove a bolt outside the collision rules.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetireBolt(pub ProjectileHandle);

/// Emitted once per bolt when it stops being active.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct BoltDeactivated {
    pub handle: ProjectileHandle,
    pub element: ElementalType,
    pub reason: DeactivationReason,
    /// Last simulated position.
    pub position: Vec3,
}

/// Host entity standing in for one bolt.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoltBody(pub ProjectileHandle);

/// Registers the simulation resource, its messages and systems.
///
/// Uses the `BoltConfig` resource if one is present when the plugin is added,
/// otherwise the compiled defaults.
pub struct BoltsPlugin;

impl Plugin for BoltsPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<BoltConfig>()
            .cloned()
            .unwrap_or_default();

        let simulation = match BoltSimulation::new(config) {
            Ok(sim) => sim,
            Err(e) => {
                error!("Invalid bolt config: {e}; using defaults");
                BoltSimulation::default()
            }
        };
        let config = simulation.config().clone();

        app.insert_resource(config)
            .insert_resource(simulation)
            .add_message::<FireCommand>()
            .add_message::<RetireBolt>()
            .add_message::<BoltDeactivated>()
            .add_systems(
                Update,
                (
                    fire_command_system,
                    retire_bolt_system,
                    bolt_step_system,
                    bolt_cull_system,
                    sync_bolt_bodies_system,
                )
                    .chain(),
            );
    }
}

/// Spawn at most one bolt per command, choosing the element by trigger priority.
pub fn fire_command_system(
    mut commands: Commands,
    mut sim: ResMut<BoltSimulation>,
    mut fires: MessageReader<FireCommand>,
) {
    for fire in fires.read() {
        let Some(element) = fire.triggers.selected() else {
            continue;
        };
        // Rejections are logged by the simulation itself.
        if let Ok(handle) = sim.spawn(fire.position, fire.facing, element) {
            commands.spawn((
                BoltBody(handle),
                Transform::from_translation(fire.position),
            ));
        }
    }
}

/// Deactivate bolts named by [`RetireBolt`].  Repeats and stale handles are
/// ignored, so each bolt is reported at most once.
pub fn retire_bolt_system(
    mut sim: ResMut<BoltSimulation>,
    mut retires: MessageReader<RetireBolt>,
    mut deactivated: MessageWriter<BoltDeactivated>,
) {
    for RetireBolt(handle) in retires.read().copied() {
        match sim.deactivate(handle) {
            Ok(true) => {
                let position = sim.position(handle).unwrap_or_default();
                deactivated.write(BoltDeactivated {
                    handle,
                    element: handle.element,
                    reason: DeactivationReason::External,
                    position,
                });
            }
            Ok(false) => {}
            Err(e) => debug!("[bolts] retire ignored: {e}"),
        }
    }
}

/// Advance the simulation by this frame's delta.  A zero delta (the first
/// frame of an app) still resolves overlaps but keeps launch forces pending.
pub fn bolt_step_system(
    time: Res<Time>,
    mut sim: ResMut<BoltSimulation>,
    mut deactivated: MessageWriter<BoltDeactivated>,
) {
    let report = match sim.tick(time.delta_secs()) {
        Ok(report) => report,
        Err(e) => {
            error!("[bolts] tick skipped: {e}");
            return;
        }
    };

    for handle in report.deactivated {
        let position = sim.position(handle).unwrap_or_default();
        deactivated.write(BoltDeactivated {
            handle,
            element: handle.element,
            reason: DeactivationReason::Collision,
            position,
        });
    }
}

/// Apply the lifetime / arena rule.
pub fn bolt_cull_system(
    mut sim: ResMut<BoltSimulation>,
    mut deactivated: MessageWriter<BoltDeactivated>,
) {
    for (handle, reason) in sim.cull() {
        let position = sim.position(handle).unwrap_or_default();
        deactivated.write(BoltDeactivated {
            handle,
            element: handle.element,
            reason,
            position,
        });
    }
}

/// Mirror live bolts onto their entities and despawn entities whose bolt is gone.
pub fn sync_bolt_bodies_system(
    mut commands: Commands,
    sim: Res<BoltSimulation>,
    mut bodies: Query<(Entity, &BoltBody, &mut Transform)>,
) {
    for (entity, body, mut transform) in bodies.iter_mut() {
        match sim.projectile(body.0) {
            Ok(bolt) if bolt.is_active() => transform.translation = bolt.position,
            _ => commands.entity(entity).despawn(),
        }
    }
}
