//! Simulation error types.
//!
//! Every fallible operation in the crate reports through [`BoltError`].  All
//! failures are detected before the simulation is mutated, so an `Err` always
//! means "nothing happened".
//!
//! ## Usage
//!
//! ```rust
//! use elemental_bolts::error::{BoltError, BoltResult};
//! use elemental_bolts::element::ElementalType;
//!
//! fn pick(raw: u8) -> BoltResult<ElementalType> {
//!     ElementalType::try_from(raw)
//! }
//!
//! assert!(matches!(pick(7), Err(BoltError::InvalidType { .. })));
//! ```

use std::fmt;

use crate::pool::ProjectileHandle;

/// Top-level error enum for the bolt simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum BoltError {
    /// A spawn request named an element outside {Fire, Water, Earth}.
    InvalidType {
        /// The rejected id or name, as text.
        raw: String,
    },

    /// A projectile was constructed with a non-positive or non-finite mass.
    InvalidMass {
        /// The rejected mass.
        mass: f32,
    },

    /// A query named a slot that was never created or has since been recycled.
    StaleHandle {
        /// The handle that no longer resolves.
        handle: ProjectileHandle,
    },

    /// `tick` was called with a negative or non-finite delta.
    InvalidDelta {
        /// The rejected delta (s).
        dt: f32,
    },

    /// Config constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for BoltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoltError::InvalidType { raw } => {
                write!(f, "unknown elemental type '{}' (expected fire, water or earth)", raw)
            }
            BoltError::InvalidMass { mass } => {
                write!(f, "projectile mass must be positive and finite, got {}", mass)
            }
            BoltError::StaleHandle { handle } => write!(
                f,
                "stale handle: {:?} slot {} generation {} no longer resolves",
                handle.element, handle.index, handle.generation
            ),
            BoltError::InvalidDelta { dt } => {
                write!(f, "tick delta must be finite and non-negative, got {}", dt)
            }
            BoltError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for BoltError {}

/// Convenience alias: a `Result` using `BoltError` as the error type.
pub type BoltResult<T> = Result<T, BoltError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `mass` is finite and strictly positive.
pub fn validate_mass(mass: f32) -> BoltResult<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(BoltError::InvalidMass { mass })
    }
}

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> BoltResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BoltError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> BoltResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BoltError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_validation_rejects_zero_negative_and_nan() {
        assert!(validate_mass(1.0).is_ok());
        assert_eq!(validate_mass(0.0), Err(BoltError::InvalidMass { mass: 0.0 }));
        assert!(validate_mass(-2.0).is_err());
        assert!(validate_mass(f32::NAN).is_err());
    }

    #[test]
    fn unsafe_constant_message_names_the_key() {
        let err = validate_positive("collision_distance", 0.0).unwrap_err();
        assert!(err.to_string().contains("collision_distance"));
    }
}
