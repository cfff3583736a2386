//! Rock-paper-scissors resolution of colliding bolts.
//!
//! ## Interaction table
//!
//! The cycle is Fire beats Water, Water beats Earth, Earth beats Fire.  Rows
//! are the first bolt (`self`), columns the second (`other`):
//!
//! |           | Fire          | Water         | Earth         |
//! |-----------|---------------|---------------|---------------|
//! | **Fire**  | DestroyBoth   | DestroyOther  | DestroySelf   |
//! | **Water** | DestroySelf   | DestroyBoth   | DestroyOther  |
//! | **Earth** | DestroyOther  | DestroySelf   | DestroyBoth   |
//!
//! Every cell is defined; there is no "nothing happens" outcome for two live
//! bolts.  Swapping the arguments swaps `DestroySelf` and `DestroyOther`, so
//! each bolt ends up with the same fate either way.
//!
//! Resolution only clears the active flag.  Storage is left untouched so the
//! slot can be pooled.

use bevy::prelude::*;

use crate::element::ElementalType;
use crate::error::BoltResult;
use crate::pool::{ProjectileHandle, TypeBucketStore};
use crate::projectile::Projectile;

/// What a collision does to the pair `(self, other)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Same element: both bolts are removed.
    DestroyBoth,
    /// `self` wins: `other` is removed.
    DestroyOther,
    /// `other` wins: `self` is removed.
    DestroySelf,
}

impl Outcome {
    /// `(self_removed, other_removed)`.
    #[inline]
    pub fn losers(self) -> (bool, bool) {
        match self {
            Outcome::DestroyBoth => (true, true),
            Outcome::DestroyOther => (false, true),
            Outcome::DestroySelf => (true, false),
        }
    }

    /// The same collision seen from the other bolt.
    #[inline]
    pub fn mirrored(self) -> Outcome {
        match self {
            Outcome::DestroyBoth => Outcome::DestroyBoth,
            Outcome::DestroyOther => Outcome::DestroySelf,
            Outcome::DestroySelf => Outcome::DestroyOther,
        }
    }
}

/// Total interaction table over the nine element pairs.
pub fn outcome(this: ElementalType, other: ElementalType) -> Outcome {
    use ElementalType::*;
    match (this, other) {
        (Fire, Fire) => Outcome::DestroyBoth,
        (Fire, Water) => Outcome::DestroyOther,
        (Fire, Earth) => Outcome::DestroySelf,
        (Water, Fire) => Outcome::DestroySelf,
        (Water, Water) => Outcome::DestroyBoth,
        (Water, Earth) => Outcome::DestroyOther,
        (Earth, Fire) => Outcome::DestroyOther,
        (Earth, Water) => Outcome::DestroySelf,
        (Earth, Earth) => Outcome::DestroyBoth,
    }
}

/// Resolve a collision between two standalone bolts.
///
/// Returns `None` without touching either bolt if one of them is already
/// inactive.
pub fn resolve(a: &mut Projectile, b: &mut Projectile) -> Option<Outcome> {
    if !a.is_active() || !b.is_active() {
        return None;
    }
    let result = outcome(a.element(), b.element());
    let (a_lost, b_lost) = result.losers();
    if a_lost {
        a.deactivate();
    }
    if b_lost {
        b.deactivate();
    }
    Some(result)
}

/// A pair resolution applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Handles deactivated by this resolution, in `(a, b)` order.
    pub removed: Vec<ProjectileHandle>,
}

/// Resolve a detected pair in place.
///
/// A pair whose member was deactivated earlier in the same pass resolves to
/// `Ok(None)` and changes nothing.
pub fn resolve_pair(
    store: &mut TypeBucketStore,
    a: ProjectileHandle,
    b: ProjectileHandle,
) -> BoltResult<Option<Resolution>> {
    let (a_element, a_active) = {
        let bolt = store.get(a)?;
        (bolt.element(), bolt.is_active())
    };
    let (b_element, b_active) = {
        let bolt = store.get(b)?;
        (bolt.element(), bolt.is_active())
    };
    if !a_active || !b_active || a == b {
        return Ok(None);
    }

    let result = outcome(a_element, b_element);
    let (a_lost, b_lost) = result.losers();
    let mut removed = Vec::with_capacity(2);
    if a_lost && store.deactivate(a)? {
        removed.push(a);
    }
    if b_lost && store.deactivate(b)? {
        removed.push(b);
    }

    debug!(
        "[bolts] {} vs {} -> {:?}",
        a_element.label(),
        b_element.label(),
        result
    );

    Ok(Some(Resolution {
        outcome: result,
        removed,
    }))
}
