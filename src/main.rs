//! Headless bolt skirmish.
//!
//! Two scripted casters face each other and fire random element combinations;
//! the run reports how the bolts fared.  No window or renderer is created.
//!
//! `BOLTS_SEED` and `BOLTS_FRAMES` override the RNG seed and run length.

use std::env;
use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use elemental_bolts::config::{BoltConfig, BOLT_CONFIG_PATH};
use elemental_bolts::constants::*;
use elemental_bolts::plugin::fire_command_system;
use elemental_bolts::{
    BoltDeactivated, BoltSimulation, BoltsPlugin, DeactivationReason, ElementalType, Facing,
    FireCommand, FireTriggers,
};

/// A scripted bolt thrower.
#[derive(Component)]
struct Caster {
    facing: Facing,
}

#[derive(Resource)]
struct CasterRng(StdRng);

/// How bolts left play during the run.
#[derive(Resource, Default, Debug)]
struct Tally {
    collision_losses: [u32; 3],
    expired: u32,
    out_of_bounds: u32,
    retired: u32,
}

fn spawn_casters(mut commands: Commands) {
    let half_gap = RUNNER_CASTER_GAP / 2.0;
    commands.spawn((
        Caster {
            facing: Facing::Right,
        },
        Transform::from_xyz(-half_gap, 0.0, 0.0),
    ));
    commands.spawn((
        Caster {
            facing: Facing::Left,
        },
        Transform::from_xyz(half_gap, 0.0, 0.0),
    ));
}

/// Random trigger presses; several triggers may be held at once.
fn caster_input_system(
    casters: Query<(&Caster, &Transform)>,
    mut rng: ResMut<CasterRng>,
    mut fires: MessageWriter<FireCommand>,
) {
    for (caster, transform) in casters.iter() {
        if !rng.0.gen_bool(RUNNER_FIRE_CHANCE) {
            continue;
        }
        let triggers = FireTriggers {
            fire: rng.0.gen_bool(0.4),
            water: rng.0.gen_bool(0.4),
            earth: rng.0.gen_bool(0.4),
        };
        fires.write(FireCommand {
            position: transform.translation,
            facing: caster.facing,
            triggers,
        });
    }
}

fn tally_system(mut tally: ResMut<Tally>, mut deactivated: MessageReader<BoltDeactivated>) {
    for event in deactivated.read() {
        match event.reason {
            DeactivationReason::Collision => {
                tally.collision_losses[event.element.id() as usize] += 1
            }
            DeactivationReason::Expired => tally.expired += 1,
            DeactivationReason::OutOfBounds => tally.out_of_bounds += 1,
            DeactivationReason::External => tally.retired += 1,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() {
    let seed: u64 = env_or("BOLTS_SEED", 42);
    let frames: u32 = env_or("BOLTS_FRAMES", RUNNER_DEFAULT_FRAMES);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            RUNNER_FRAME_SECS,
        )))
        // Config must be in place before BoltsPlugin builds the simulation.
        .insert_resource(BoltConfig::load_or_default(BOLT_CONFIG_PATH))
        .add_plugins(BoltsPlugin)
        .insert_resource(CasterRng(StdRng::seed_from_u64(seed)))
        .init_resource::<Tally>()
        .add_systems(Startup, spawn_casters)
        .add_systems(Update, caster_input_system.before(fire_command_system))
        .add_systems(PostUpdate, tally_system);

    app.finish();
    app.cleanup();

    info!("Starting bolt skirmish (seed: {seed}, frames: {frames})");
    for frame in 0..frames {
        app.update();

        if frame % 120 == 0 {
            let sim = app.world().resource::<BoltSimulation>();
            let store = sim.store();
            info!(
                "Frame {}: {} bolts in flight (fire {}, water {}, earth {}), {} slots allocated",
                frame,
                sim.active_count(),
                store.active_in(ElementalType::Fire),
                store.active_in(ElementalType::Water),
                store.active_in(ElementalType::Earth),
                sim.total_count()
            );
        }
    }

    let stats = app.world().resource::<BoltSimulation>().stats();
    let tally = app.world().resource::<Tally>();
    info!(
        "Skirmish complete: {} spawned ({} pooled), {} collisions resolved",
        stats.spawned, stats.recycled, stats.collisions_resolved
    );
    for element in ElementalType::ALL {
        info!(
            "  {:<5} lost {} bolts in collisions",
            element.label(),
            tally.collision_losses[element.id() as usize]
        );
    }
    info!(
        "  expired: {}, out of bounds: {}, retired: {}",
        tally.expired, tally.out_of_bounds, tally.retired
    );
}
