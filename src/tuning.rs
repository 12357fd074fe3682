//! Game balance tuning
//!
//! Every constant the simulation reads lives here so balance can be changed
//! from a JSON file without recompiling. `Tuning::default()` matches `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven balance for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for noise permutation and spawn randomness
    pub seed: u64,
    /// Fixed tick duration in seconds
    pub tick_secs: f64,
    /// Round length in seconds
    pub round_secs: f64,

    // === Tagging ===
    pub tag_distance: f64,
    pub tag_cooldown_secs: f64,

    // === Steering ===
    pub player_bound: f64,
    pub monster_bound: f64,
    pub player_smoothing: f64,
    pub monster_smoothing: f64,
    pub monster_base_speed: f64,
    /// Difficulty scalar; monster speed is scaled by `1 + excitement / 200`
    pub excitement: f64,
    pub flee_scale: f64,
    pub home_radius: f64,
    pub home_bias: f64,
    pub player_y_offset: f64,
    pub monster_y_offset: f64,
    pub bob_amplitude: f64,
    pub bob_frequency: f64,

    // === Power-ups ===
    pub power_up_lifetime_secs: f64,
    pub power_up_effect_secs: f64,
    pub power_up_bonus: u64,
    pub power_up_collect_radius: f64,
    pub power_up_spawn_interval_secs: f64,
    pub max_power_ups: usize,

    // === Particles ===
    pub max_particles: usize,

    // === Input ===
    pub selection_grace_secs: f64,
    /// Let the player actor steer itself when nobody is pointing
    pub autopilot: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x7a6_c4a5e,
            tick_secs: SIM_DT,
            round_secs: ROUND_SECONDS,

            tag_distance: TAG_DISTANCE,
            tag_cooldown_secs: TAG_COOLDOWN_SECS,

            player_bound: PLAYER_BOUND,
            monster_bound: MONSTER_BOUND,
            player_smoothing: PLAYER_SMOOTHING,
            monster_smoothing: MONSTER_SMOOTHING,
            monster_base_speed: MONSTER_BASE_SPEED,
            excitement: 0.0,
            flee_scale: FLEE_SCALE,
            home_radius: HOME_RADIUS,
            home_bias: HOME_BIAS,
            player_y_offset: PLAYER_Y_OFFSET,
            monster_y_offset: MONSTER_Y_OFFSET,
            bob_amplitude: BOB_AMPLITUDE,
            bob_frequency: BOB_FREQUENCY,

            power_up_lifetime_secs: POWER_UP_LIFETIME_SECS,
            power_up_effect_secs: POWER_UP_EFFECT_SECS,
            power_up_bonus: POWER_UP_BONUS,
            power_up_collect_radius: POWER_UP_COLLECT_RADIUS,
            power_up_spawn_interval_secs: POWER_UP_SPAWN_INTERVAL_SECS,
            max_power_ups: MAX_POWER_UPS,

            max_particles: MAX_PARTICLES,

            selection_grace_secs: SELECTION_GRACE_SECS,
            autopilot: true,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite positive number",
                })
            }
        }
        fn fraction(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be in (0, 1]",
                })
            }
        }

        positive("tick_secs", self.tick_secs)?;
        positive("round_secs", self.round_secs)?;
        positive("tag_distance", self.tag_distance)?;
        positive("player_bound", self.player_bound)?;
        positive("monster_bound", self.monster_bound)?;
        positive("power_up_lifetime_secs", self.power_up_lifetime_secs)?;
        positive("power_up_effect_secs", self.power_up_effect_secs)?;
        positive("power_up_spawn_interval_secs", self.power_up_spawn_interval_secs)?;
        fraction("player_smoothing", self.player_smoothing)?;
        fraction("monster_smoothing", self.monster_smoothing)?;
        if self.tag_cooldown_secs < 0.0 || self.selection_grace_secs < 0.0 {
            return Err(TuningError::Invalid {
                field: "tag_cooldown_secs",
                reason: "durations cannot be negative",
            });
        }
        if !self.excitement.is_finite() || self.excitement < 0.0 {
            return Err(TuningError::Invalid {
                field: "excitement",
                reason: "must be a finite non-negative number",
            });
        }
        Ok(())
    }

    /// Monster speed per tick at the given excitement
    pub fn monster_speed(&self, excitement: f64) -> f64 {
        self.monster_base_speed * (1.0 + excitement / 200.0)
    }
}
