//! The bolt simulation context and its per-frame step.
//!
//! [`BoltSimulation`] owns the projectile pool and the configuration.  Hosts
//! drive it with two calls:
//!
//! - [`BoltSimulation::spawn`] when a caster fires,
//! - [`BoltSimulation::tick`] once per frame.
//!
//! A tick runs two phases in strict order:
//!
//! 1. **Integrate-All**: every active bolt, in store order.
//! 2. **Collide-and-Resolve**: broad-phase on the post-integration positions,
//!    then the interaction table on each reported pair.  A bolt removed by an
//!    earlier pair is skipped by later pairs of the same pass.
//!
//! Retirement by lifetime or leaving the arena is a separate rule,
//! [`BoltSimulation::cull`], which the host runs after the step.

use bevy::prelude::*;

use crate::collision::detect_collisions;
use crate::config::BoltConfig;
use crate::element::ElementalType;
use crate::error::{BoltError, BoltResult};
use crate::interaction::resolve_pair;
use crate::pool::{ProjectileHandle, TypeBucketStore};
use crate::projectile::Projectile;
use crate::spawner::{spawn_bolt, Facing};

/// Why a bolt stopped being active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeactivationReason {
    /// Lost an elemental collision.
    Collision,
    /// Flew longer than `bolt_lifetime`.
    Expired,
    /// Left the arena.
    OutOfBounds,
    /// Removed through [`BoltSimulation::deactivate`].
    External,
}

/// Summary of one [`BoltSimulation::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Bolts integrated in phase one.
    pub integrated: usize,
    /// Overlapping pairs found by the broad-phase.
    pub pairs_detected: usize,
    /// Pairs that actually resolved (both members still active).
    pub pairs_resolved: usize,
    /// Bolts removed by collisions this tick, in resolution order.
    pub deactivated: Vec<ProjectileHandle>,
}

/// Running counters since the simulation was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoltStats {
    pub ticks: u64,
    pub spawned: u64,
    /// Spawns that reused a pooled slot.
    pub recycled: u64,
    pub rejected_spawns: u64,
    pub collisions_resolved: u64,
    /// Collision losses per element, indexed by `ElementalType::id`.
    pub destroyed_by_collision: [u64; 3],
    pub culled: u64,
}

/// Owned simulation context: pool, configuration and counters.
#[derive(Resource, Debug, Clone, Default)]
pub struct BoltSimulation {
    store: TypeBucketStore,
    config: BoltConfig,
    stats: BoltStats,
}

impl BoltSimulation {
    /// Build a simulation.  The configuration is validated up front so that
    /// spawns cannot fail on bad constants later.
    pub fn new(config: BoltConfig) -> BoltResult<Self> {
        config.validate()?;
        Ok(Self {
            store: TypeBucketStore::new(),
            config,
            stats: BoltStats::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &BoltConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &TypeBucketStore {
        &self.store
    }

    #[inline]
    pub fn stats(&self) -> BoltStats {
        self.stats
    }

    /// Launch one bolt of `element` from `position` along `facing`.
    pub fn spawn(
        &mut self,
        position: Vec3,
        facing: Facing,
        element: ElementalType,
    ) -> BoltResult<ProjectileHandle> {
        match spawn_bolt(&mut self.store, &self.config, position, facing, element) {
            Ok(insertion) => {
                self.stats.spawned += 1;
                if insertion.recycled {
                    self.stats.recycled += 1;
                }
                Ok(insertion.handle)
            }
            Err(e) => {
                self.stats.rejected_spawns += 1;
                warn!("[bolts] spawn rejected: {e}");
                Err(e)
            }
        }
    }

    /// [`BoltSimulation::spawn`] with an unchecked element id and facing sign,
    /// as delivered by input bindings.  An unknown id is rejected before the
    /// store is touched.
    pub fn spawn_by_id(
        &mut self,
        position: Vec3,
        facing_sign: f32,
        element_id: u8,
    ) -> BoltResult<ProjectileHandle> {
        let element = ElementalType::try_from(element_id).inspect_err(|e| {
            self.stats.rejected_spawns += 1;
            warn!("[bolts] spawn rejected: {e}");
        })?;
        self.spawn(position, Facing::from_sign(facing_sign), element)
    }

    /// Run one simulation step of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> BoltResult<TickReport> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(BoltError::InvalidDelta { dt });
        }

        let mut report = TickReport::default();
        // A zero step keeps pending forces, so a launch on a paused frame is
        // not lost before the first real step.
        if dt > 0.0 {
            let max_speed = self.config.max_speed;
            for bolt in self.store.active_mut() {
                bolt.integrate(dt, max_speed);
                report.integrated += 1;
            }
        }

        let pairs = detect_collisions(&self.store, self.config.collision_distance);
        report.pairs_detected = pairs.len();
        for (a, b) in pairs {
            if let Some(resolution) = resolve_pair(&mut self.store, a, b)? {
                report.pairs_resolved += 1;
                for handle in &resolution.removed {
                    self.stats.destroyed_by_collision[handle.element.id() as usize] += 1;
                }
                report.deactivated.extend(resolution.removed);
            }
        }

        self.stats.ticks += 1;
        self.stats.collisions_resolved += report.pairs_resolved as u64;
        Ok(report)
    }

    /// Retire bolts that outlived `bolt_lifetime` or left the arena.
    pub fn cull(&mut self) -> Vec<(ProjectileHandle, DeactivationReason)> {
        let lifetime = self.config.bolt_lifetime;
        let half_extent = self.config.arena_half_extent;
        let doomed: Vec<(ProjectileHandle, DeactivationReason)> = self
            .store
            .iter_active()
            .filter_map(|(handle, bolt)| {
                if bolt.position.x.abs() > half_extent || bolt.position.y.abs() > half_extent {
                    Some((handle, DeactivationReason::OutOfBounds))
                } else if bolt.age > lifetime {
                    Some((handle, DeactivationReason::Expired))
                } else {
                    None
                }
            })
            .collect();

        for (handle, _) in &doomed {
            let retired = self.store.deactivate(*handle);
            debug_assert_eq!(retired, Ok(true), "cull handle {handle:?} was not live");
        }
        self.stats.culled += doomed.len() as u64;
        doomed
    }

    /// Deactivate a bolt on behalf of an external rule.  Idempotent: only the
    /// call that actually retires the bolt returns `Ok(true)`.
    pub fn deactivate(&mut self, handle: ProjectileHandle) -> BoltResult<bool> {
        self.store.deactivate(handle)
    }

    /// Whether the bolt is still flying.  Stale handles report `StaleHandle`.
    pub fn is_active(&self, handle: ProjectileHandle) -> BoltResult<bool> {
        self.store.get(handle).map(Projectile::is_active)
    }

    /// Last simulated position, also for bolts that are no longer active.
    pub fn position(&self, handle: ProjectileHandle) -> BoltResult<Vec3> {
        self.store.get(handle).map(|bolt| bolt.position)
    }

    pub fn projectile(&self, handle: ProjectileHandle) -> BoltResult<&Projectile> {
        self.store.get(handle)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> + '_ {
        self.store.iter_active()
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }

    pub fn total_count(&self) -> usize {
        self.store.total_count()
    }
}
