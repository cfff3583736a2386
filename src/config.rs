//! Runtime bolt configuration loaded from `assets/bolts.toml`.
//!
//! [`BoltConfig`] mirrors every constant in [`crate::constants`].  At startup
//! the runner calls [`BoltConfig::load_or_default`] on [`BOLT_CONFIG_PATH`],
//! which overwrites the defaults with any values present in the file.  Missing
//! keys fall back to the compile-time defaults, so a minimal TOML can override
//! just the constants you care about:
//!
//! ```toml
//! collision_distance = 0.75
//! max_speed = 30.0
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the authoritative default
//! source used by `BoltConfig::default()`.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::constants::*;
use crate::error::{validate_mass, validate_non_negative, validate_positive, BoltResult};

/// Default location of the config file, relative to the working directory.
pub const BOLT_CONFIG_PATH: &str = "assets/bolts.toml";

/// Runtime-tunable simulation configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoltConfig {
    // ── Motion ───────────────────────────────────────────────────────────────
    pub impulse_multiplier: f32,
    pub launch_force: f32,
    pub bolt_mass: f32,
    /// `0.0` disables the clamp.
    pub max_speed: f32,

    // ── Collision ────────────────────────────────────────────────────────────
    pub collision_distance: f32,

    // ── Lifetime / bounds ────────────────────────────────────────────────────
    pub bolt_lifetime: f32,
    pub arena_half_extent: f32,
}

impl Default for BoltConfig {
    fn default() -> Self {
        Self {
            impulse_multiplier: IMPULSE_MULTIPLIER,
            launch_force: LAUNCH_FORCE,
            bolt_mass: BOLT_MASS,
            max_speed: MAX_SPEED,
            collision_distance: COLLISION_DISTANCE,
            bolt_lifetime: BOLT_LIFETIME,
            arena_half_extent: ARENA_HALF_EXTENT,
        }
    }
}

impl BoltConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: BoltConfig = toml::from_str(contents).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Reject values that would make the simulation misbehave.
    pub fn validate(&self) -> BoltResult<()> {
        validate_positive("impulse_multiplier", self.impulse_multiplier)?;
        validate_non_negative("launch_force", self.launch_force)?;
        validate_mass(self.bolt_mass)?;
        validate_non_negative("max_speed", self.max_speed)?;
        validate_positive("collision_distance", self.collision_distance)?;
        validate_positive("bolt_lifetime", self.bolt_lifetime)?;
        validate_positive("arena_half_extent", self.arena_half_extent)?;
        Ok(())
    }

    /// Load `path`, falling back to defaults.
    ///
    /// A missing file is not an error.  Parse or validation errors are logged
    /// and the defaults are returned instead.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(loaded) => {
                    info!("Loaded bolt config from {}", path.display());
                    loaded
                }
                Err(e) => {
                    warn!("Failed to parse {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                info!("No {} found; using compiled defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants_and_validate() {
        let config = BoltConfig::default();
        assert_eq!(config.impulse_multiplier, 5.0);
        assert_eq!(config.launch_force, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = BoltConfig::from_toml_str("collision_distance = 0.25\nmax_speed = 12.0\n")
            .expect("partial config must parse");
        assert_eq!(config.collision_distance, 0.25);
        assert_eq!(config.max_speed, 12.0);
        assert_eq!(config.bolt_mass, BOLT_MASS);
        assert_eq!(config.bolt_lifetime, BOLT_LIFETIME);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(BoltConfig::from_toml_str("bolt_mass = 0.0").is_err());
        assert!(BoltConfig::from_toml_str("collision_distance = -1.0").is_err());
        assert!(BoltConfig::from_toml_str("launch_force = \"fast\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = BoltConfig::load_or_default("does/not/exist.toml");
        assert_eq!(config, BoltConfig::default());
    }
}
