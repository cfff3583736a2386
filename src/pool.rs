//! Type-bucketed projectile pool.
//!
//! The store keeps one ordered slot sequence per [`ElementalType`].  A slot is
//! never removed: deactivated bolts stay where they are until a later spawn of
//! the same element recycles the slot, which bumps the slot's generation.
//! Handles carry the generation they were issued with, so a handle to a
//! recycled slot is detected as stale instead of silently aliasing the new
//! occupant.
//!
//! Iteration order is Fire bucket, Water bucket, Earth bucket, and slot order
//! within each bucket.  Collision detection relies on that order for
//! deterministic pair reporting.

use crate::element::ElementalType;
use crate::error::{BoltError, BoltResult};
use crate::projectile::Projectile;

/// Stable reference to one pool slot occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle {
    pub element: ElementalType,
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    projectile: Projectile,
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    slots: Vec<Slot>,
}

/// Outcome of [`TypeBucketStore::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub handle: ProjectileHandle,
    /// `true` when an inactive slot was reused rather than a new one appended.
    pub recycled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TypeBucketStore {
    buckets: [Bucket; 3],
}

impl TypeBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn bucket(&self, element: ElementalType) -> &Bucket {
        &self.buckets[element.id() as usize]
    }

    #[inline]
    fn bucket_mut(&mut self, element: ElementalType) -> &mut Bucket {
        &mut self.buckets[element.id() as usize]
    }

    /// Place `projectile` in its element's bucket, reusing the first inactive
    /// slot when one exists.
    pub fn insert(&mut self, projectile: Projectile) -> Insertion {
        let element = projectile.element();
        let bucket = self.bucket_mut(element);

        if let Some(index) = bucket
            .slots
            .iter()
            .position(|slot| !slot.projectile.is_active())
        {
            let slot = &mut bucket.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.projectile = projectile;
            return Insertion {
                handle: ProjectileHandle {
                    element,
                    index: index as u32,
                    generation: slot.generation,
                },
                recycled: true,
            };
        }

        let index = bucket.slots.len() as u32;
        bucket.slots.push(Slot {
            generation: 0,
            projectile,
        });
        Insertion {
            handle: ProjectileHandle {
                element,
                index,
                generation: 0,
            },
            recycled: false,
        }
    }

    /// Resolve a handle, failing with `StaleHandle` on a recycled or unknown slot.
    pub fn get(&self, handle: ProjectileHandle) -> BoltResult<&Projectile> {
        self.bucket(handle.element)
            .slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .map(|slot| &slot.projectile)
            .ok_or(BoltError::StaleHandle { handle })
    }

    /// Deactivate the bolt behind `handle`.  Returns `Ok(true)` on the active →
    /// inactive edge and `Ok(false)` if it was already inactive.
    pub fn deactivate(&mut self, handle: ProjectileHandle) -> BoltResult<bool> {
        let slot = self
            .bucket_mut(handle.element)
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or(BoltError::StaleHandle { handle })?;
        Ok(slot.projectile.deactivate())
    }

    /// Every slot of one bucket, active or not, in slot order.
    pub fn bucket_iter(
        &self,
        element: ElementalType,
    ) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> + '_ {
        self.bucket(element)
            .slots
            .iter()
            .enumerate()
            .map(move |(index, slot)| {
                (
                    ProjectileHandle {
                        element,
                        index: index as u32,
                        generation: slot.generation,
                    },
                    &slot.projectile,
                )
            })
    }

    /// Every slot of every bucket in store order.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> + '_ {
        ElementalType::ALL
            .into_iter()
            .flat_map(move |element| self.bucket_iter(element))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ProjectileHandle, &Projectile)> + '_ {
        self.iter().filter(|(_, p)| p.is_active())
    }

    /// Mutable access to active bolts only.  Deactivation stays with the store.
    pub(crate) fn active_mut(&mut self) -> impl Iterator<Item = &mut Projectile> + '_ {
        self.buckets
            .iter_mut()
            .flat_map(|bucket| bucket.slots.iter_mut())
            .map(|slot| &mut slot.projectile)
            .filter(|p| p.is_active())
    }

    /// Number of slots in one bucket, active or not.
    pub fn bucket_len(&self, element: ElementalType) -> usize {
        self.bucket(element).slots.len()
    }

    /// Number of allocated slots across all buckets.
    pub fn total_count(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.len()).sum()
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Active bolts of one element.
    pub fn active_in(&self, element: ElementalType) -> usize {
        self.bucket_iter(element)
            .filter(|(_, p)| p.is_active())
            .count()
    }
}
