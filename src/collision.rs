//! Broad-phase collision detection.
//!
//! Each bolt is a square box of half-extent `R` centred on its position.  Two
//! boxes overlap when the centres are strictly closer than `2R` on both the x
//! and y axes; z is ignored because bolts fly in a plane.
//!
//! The test is an O(N²) sweep over every active bolt in every bucket.  N stays
//! at a handful of bolts, so a spatial grid would cost more than it saves.

use bevy::prelude::*;

use crate::pool::{ProjectileHandle, TypeBucketStore};

/// Box-overlap predicate for two bolt centres.  The `2R` boundary is exclusive.
#[inline]
pub fn boxes_overlap(a: Vec3, b: Vec3, half_extent: f32) -> bool {
    let reach = 2.0 * half_extent;
    (a.x - b.x).abs() < reach && (a.y - b.y).abs() < reach
}

/// All overlapping pairs of active bolts, each unordered pair once.
///
/// Pairs come out in store order: the first member is the one visited earlier
/// (Fire bucket, then Water, then Earth, slot order within each).
pub fn detect_collisions(
    store: &TypeBucketStore,
    half_extent: f32,
) -> Vec<(ProjectileHandle, ProjectileHandle)> {
    let active: Vec<(ProjectileHandle, Vec3)> = store
        .iter_active()
        .map(|(handle, bolt)| (handle, bolt.position))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..active.len() {
        let (handle_i, pos_i) = active[i];
        for &(handle_j, pos_j) in &active[i + 1..] {
            if boxes_overlap(pos_i, pos_j, half_extent) {
                pairs.push((handle_i, handle_j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementalType;
    use crate::projectile::Projectile;

    fn store_with(bolts: &[(ElementalType, Vec3)]) -> (TypeBucketStore, Vec<ProjectileHandle>) {
        let mut store = TypeBucketStore::new();
        let handles = bolts
            .iter()
            .map(|&(element, pos)| {
                store
                    .insert(Projectile::new(element, pos, 1.0).unwrap())
                    .handle
            })
            .collect();
        (store, handles)
    }

    #[test]
    fn boundary_at_two_r_is_exclusive() {
        let r = 1.0;
        assert!(boxes_overlap(Vec3::ZERO, Vec3::new(1.999, 0.0, 0.0), r));
        assert!(!boxes_overlap(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), r));
        assert!(!boxes_overlap(Vec3::ZERO, Vec3::new(0.0, -2.0, 0.0), r));
    }

    #[test]
    fn overlap_needs_both_axes_and_ignores_z() {
        let r = 0.5;
        assert!(!boxes_overlap(Vec3::ZERO, Vec3::new(0.5, 1.5, 0.0), r));
        assert!(boxes_overlap(Vec3::ZERO, Vec3::new(0.5, 0.5, 100.0), r));
    }

    #[test]
    fn every_bucket_takes_part_including_last_entries() {
        // Two earth bolts overlapping, plus the final entry of the water bucket
        // overlapping a fire bolt.
        let (store, h) = store_with(&[
            (ElementalType::Earth, Vec3::new(10.0, 0.0, 0.0)),
            (ElementalType::Earth, Vec3::new(10.5, 0.0, 0.0)),
            (ElementalType::Fire, Vec3::new(-10.0, 0.0, 0.0)),
            (ElementalType::Water, Vec3::new(50.0, 0.0, 0.0)),
            (ElementalType::Water, Vec3::new(-9.5, 0.0, 0.0)),
        ]);

        let pairs = detect_collisions(&store, 1.0);
        assert_eq!(pairs, vec![(h[2], h[4]), (h[0], h[1])]);
    }

    #[test]
    fn inactive_bolts_are_not_reported() {
        let (mut store, h) = store_with(&[
            (ElementalType::Fire, Vec3::ZERO),
            (ElementalType::Fire, Vec3::new(0.1, 0.0, 0.0)),
        ]);
        assert_eq!(detect_collisions(&store, 1.0).len(), 1);

        store.deactivate(h[1]).unwrap();
        assert!(detect_collisions(&store, 1.0).is_empty());
    }

    #[test]
    fn lone_bolt_never_collides_with_itself() {
        let (store, _) = store_with(&[(ElementalType::Water, Vec3::ZERO)]);
        assert!(detect_collisions(&store, 1.0).is_empty());
    }
}
