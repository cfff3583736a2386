//! Centralised simulation constants.
//!
//! Every tuneable value lives here and is mirrored by a field of
//! [`crate::config::BoltConfig`], which uses these as its defaults.  Override
//! them at runtime through `assets/bolts.toml` rather than editing this file.

// ── Motion ────────────────────────────────────────────────────────────────────

/// Multiplier applied to every force passed to `Projectile::apply_force`.
///
/// Forces are impulses in practice: the launch force is applied once, so this
/// constant directly sets how fast a bolt leaves the caster.
pub const IMPULSE_MULTIPLIER: f32 = 5.0;

/// Magnitude of the one-off launch force along the caster's facing (x axis).
///
/// The force only lasts one step, so launch speed is `4.0 × 5.0 × dt / mass`:
/// about 0.33 u/s at 60 Hz with the default mass.
pub const LAUNCH_FORCE: f32 = 4.0;

/// Mass given to every spawned bolt.  Must be strictly positive.
pub const BOLT_MASS: f32 = 1.0;

/// Optional speed ceiling (u/s).  `0.0` disables the clamp.
///
/// Bolts never receive thrust after launch, so with the defaults the clamp has
/// nothing to do; it exists for configs that raise the launch force.
pub const MAX_SPEED: f32 = 0.0;

// ── Collision ─────────────────────────────────────────────────────────────────

/// Half-extent `R` of the square box around each bolt.
///
/// Two bolts collide while both `|Δx|` and `|Δy|` are strictly below `2R`.
pub const COLLISION_DISTANCE: f32 = 1.0;

// ── Lifetime / bounds ─────────────────────────────────────────────────────────

/// Seconds a bolt may fly before the cull pass retires it.
pub const BOLT_LIFETIME: f32 = 10.0;

/// Bolts whose |x| or |y| exceeds this are retired by the cull pass.
pub const ARENA_HALF_EXTENT: f32 = 20.0;

// ── Runner ────────────────────────────────────────────────────────────────────

/// Fixed frame delta used by the headless runner (s).
pub const RUNNER_FRAME_SECS: f32 = 1.0 / 60.0;

/// Number of frames the headless runner simulates by default.
pub const RUNNER_DEFAULT_FRAMES: u32 = 1800;

/// Distance between the two scripted casters in the headless runner.
pub const RUNNER_CASTER_GAP: f32 = 6.0;

/// Per-frame probability that a scripted caster presses at least one trigger.
pub const RUNNER_FIRE_CHANCE: f64 = 0.01;
