//! Tag Chase - simulation core for a monster/player game of tag
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, steering, tag rules, entity lifecycles)
//! - `tuning`: Data-driven game balance
//! - `hints`: Presentation hints derived from snapshots (colors, audio cues)

pub mod hints;
pub mod sim;
pub mod tuning;

pub use hints::{AudioCue, PresentationHints, presentation_hints};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (16ms, ~60 Hz)
    pub const SIM_DT: f64 = 0.016;
    /// Round length in seconds
    pub const ROUND_SECONDS: f64 = 60.0;

    /// Actors closer than this swap the "IT" status
    pub const TAG_DISTANCE: f64 = 1.5;
    /// Seconds after a tag during which no further tag can happen
    pub const TAG_COOLDOWN_SECS: f64 = 1.0;

    /// Player goal-follow bounds (X and Z independently)
    pub const PLAYER_BOUND: f64 = 10.0;
    /// Monster bounds (X and Z independently)
    pub const MONSTER_BOUND: f64 = 12.0;
    /// Player XZ smoothing per tick toward its goal
    pub const PLAYER_SMOOTHING: f64 = 0.04;
    /// Monster smoothing per tick toward its look-ahead point
    pub const MONSTER_SMOOTHING: f64 = 0.1;
    /// Base monster speed (world units per tick)
    pub const MONSTER_BASE_SPEED: f64 = 0.035;
    /// Fleeing look-ahead scale (flees slightly slower than it chases)
    pub const FLEE_SCALE: f64 = 0.8;
    /// Past this distance from the origin a fleeing monster is pulled home
    pub const HOME_RADIUS: f64 = 12.0;
    /// Per-tick pull toward the origin when outside `HOME_RADIUS`
    pub const HOME_BIAS: f64 = 0.05;

    /// Vertical offsets above the terrain
    pub const PLAYER_Y_OFFSET: f64 = 0.75;
    pub const MONSTER_Y_OFFSET: f64 = 1.0;
    /// Player bobbing
    pub const BOB_AMPLITUDE: f64 = 0.15;
    pub const BOB_FREQUENCY: f64 = 2.5;

    /// Power-ups
    pub const POWER_UP_LIFETIME_SECS: f64 = 10.0;
    pub const POWER_UP_EFFECT_SECS: f64 = 5.0;
    pub const POWER_UP_BONUS: u64 = 50;
    pub const POWER_UP_COLLECT_RADIUS: f64 = 1.0;
    pub const POWER_UP_SPAWN_HALF_EXTENT: f64 = 6.0;
    pub const POWER_UP_HOVER: f64 = 1.0;
    pub const POWER_UP_BOB_AMPLITUDE: f64 = 0.3;
    pub const POWER_UP_BOB_FREQUENCY: f64 = 3.0;
    pub const POWER_UP_SPAWN_INTERVAL_SECS: f64 = 8.0;
    pub const MAX_POWER_UPS: usize = 3;

    /// Particles
    pub const PARTICLE_GRAVITY: f64 = -0.01;
    pub const MAX_PARTICLES: usize = 512;

    /// Seconds a ground selection keeps the player under user control
    pub const SELECTION_GRACE_SECS: f64 = 3.0;

    /// Arena flattening radius used by the height field
    pub const ARENA_FLAT_RADIUS: f64 = 8.0;
}

/// Cubic Hermite interpolation of `x` over `[min, max]`, clamped to [0, 1]
#[inline]
pub fn smoothstep(x: f64, min: f64, max: f64) -> f64 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    let t = (x - min) / (max - min);
    t * t * (3.0 - 2.0 * t)
}

/// Convert a duration in seconds to a whole number of ticks.
///
/// Rounds rather than truncates so `60.0 / 0.016` lands on 3750 despite
/// binary representation error.
#[inline]
pub fn secs_to_ticks(secs: f64, dt: f64) -> u32 {
    if dt <= 0.0 || secs <= 0.0 {
        return 0;
    }
    (secs / dt).round() as u32
}
