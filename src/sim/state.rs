//! Round state and the tag rules
//!
//! `RoundState` is the tag state machine: it owns the round timer, who is
//! "IT", score, combo, the tag cooldown and the power-up effect window.
//! All timers are tick counters so a round ends on an exact tick.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// The two actors of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// AI-driven chaser/evader
    Monster,
    /// Human-controlled actor (or autopilot when idle)
    Player,
}

impl ActorKind {
    pub fn other(self) -> Self {
        match self {
            ActorKind::Monster => ActorKind::Player,
            ActorKind::Player => ActorKind::Monster,
        }
    }
}

/// A steerable actor standing on the terrain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub pos: DVec3,
    /// Goal point in the XZ plane
    pub goal: DVec2,
    /// Height above terrain
    pub y_offset: f64,
    /// Steering runs each tick only while set
    pub seeking: bool,
}

impl Actor {
    pub fn new(kind: ActorKind, pos: DVec3, y_offset: f64) -> Self {
        Self {
            kind,
            pos,
            goal: DVec2::new(pos.x, pos.z),
            y_offset,
            seeking: false,
        }
    }
}

/// Phase of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Before the first round or after the timer ran out
    Idle,
    /// Timer running, tags and score active
    Active,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    RoundStarted,
    /// The player picked a ground point (already clamped to bounds)
    GoalSelected { x: f64, z: f64 },
    /// "IT" changed hands; `it` is the new holder
    Tagged { it: ActorKind },
    PowerUpSpawned { id: u32 },
    PowerUpCollected { id: u32 },
    PowerUpExpired { id: u32 },
    PowerUpEffectEnded,
    RoundOver { score: u64 },
}

/// What a single round tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTick {
    /// The timer hit zero on this tick
    pub ended: bool,
    /// The power-up effect window closed on this tick
    pub power_up_ended: bool,
}

/// Tag state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// Who currently holds "IT"
    pub it: ActorKind,
    pub score: u64,
    pub combo: u32,
    /// Difficulty scalar, reset each round
    pub excitement: f64,
    /// Round timer in ticks
    pub ticks_remaining: u32,
    /// Simulation time (seconds) before which no tag can happen
    pub tag_cooldown_until: f64,
    /// Remaining ticks of the power-up effect (0 = inactive)
    pub power_up_ticks: u32,
    /// Rounds started since the simulation was created
    pub rounds_played: u32,
    dt: f64,
    round_ticks: u32,
    tag_distance: f64,
    tag_cooldown_secs: f64,
    power_up_bonus: u64,
    power_up_effect_ticks: u32,
}

impl RoundState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: RoundPhase::Idle,
            it: ActorKind::Monster,
            score: 0,
            combo: 0,
            excitement: 0.0,
            ticks_remaining: 0,
            tag_cooldown_until: 0.0,
            power_up_ticks: 0,
            rounds_played: 0,
            dt: tuning.tick_secs,
            round_ticks: secs_to_ticks(tuning.round_secs, tuning.tick_secs),
            tag_distance: tuning.tag_distance,
            tag_cooldown_secs: tuning.tag_cooldown_secs,
            power_up_bonus: tuning.power_up_bonus,
            power_up_effect_ticks: secs_to_ticks(tuning.power_up_effect_secs, tuning.tick_secs),
        }
    }

    /// Enter (or re-enter) `Active` with a fresh round
    pub fn start(&mut self, excitement: f64) {
        self.phase = RoundPhase::Active;
        self.it = ActorKind::Monster;
        self.score = 0;
        self.combo = 0;
        self.excitement = excitement;
        self.ticks_remaining = self.round_ticks;
        self.tag_cooldown_until = 0.0;
        self.power_up_ticks = 0;
        self.rounds_played += 1;
        log::info!(
            "Round {} started ({} ticks)",
            self.rounds_played,
            self.round_ticks
        );
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    /// Seconds left on the round clock, never negative
    pub fn time_remaining(&self) -> f64 {
        self.ticks_remaining as f64 * self.dt
    }

    pub fn power_up_active(&self) -> bool {
        self.power_up_ticks > 0
    }

    /// Advance timers by one tick
    pub fn tick(&mut self) -> RoundTick {
        let mut out = RoundTick::default();

        if self.power_up_ticks > 0 {
            self.power_up_ticks -= 1;
            if self.power_up_ticks == 0 {
                self.combo = 0;
                out.power_up_ended = true;
            }
        }

        if self.phase != RoundPhase::Active {
            return out;
        }

        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.it != ActorKind::Player {
            self.score += 1;
        }

        if self.ticks_remaining == 0 {
            self.phase = RoundPhase::Idle;
            out.ended = true;
            log::info!("Round over, final score {}", self.score);
        }
        out
    }

    /// Apply the tag rule for the current actor separation.
    ///
    /// Returns the new "IT" holder if a tag happened. At most one flip per
    /// call, and none while the cooldown runs.
    pub fn try_tag(&mut self, distance: f64, now: f64) -> Option<ActorKind> {
        if self.phase != RoundPhase::Active {
            return None;
        }
        if !(distance < self.tag_distance) || now < self.tag_cooldown_until {
            return None;
        }
        self.it = self.it.other();
        self.tag_cooldown_until = now + self.tag_cooldown_secs;
        log::debug!("Tag! {:?} is now IT (t={:.3})", self.it, now);
        Some(self.it)
    }

    /// Score a collected power-up and (re)open the effect window
    pub fn on_power_up_collected(&mut self) {
        self.combo = if self.power_up_active() {
            self.combo + 1
        } else {
            1
        };
        self.score += self.power_up_bonus;
        self.power_up_ticks = self.power_up_effect_ticks;
        log::debug!("Power-up collected, combo {}", self.combo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn active_round() -> RoundState {
        let mut round = RoundState::new(&Tuning::default());
        round.start(0.0);
        round
    }

    #[test]
    fn test_start_resets_round() {
        let mut round = active_round();
        round.score = 999;
        round.combo = 4;
        round.it = ActorKind::Player;
        round.tag_cooldown_until = 55.0;
        round.start(0.0);
        assert_eq!(round.phase, RoundPhase::Active);
        assert_eq!(round.it, ActorKind::Monster);
        assert_eq!(round.score, 0);
        assert_eq!(round.combo, 0);
        assert_eq!(round.tag_cooldown_until, 0.0);
        assert_eq!(round.time_remaining(), 3750.0 * SIM_DT);
        assert_eq!(round.rounds_played, 2);
    }

    #[test]
    fn test_score_accrues_while_player_not_it() {
        let mut round = active_round();
        for _ in 0..60 {
            round.tick();
        }
        assert_eq!(round.score, 60);

        round.it = ActorKind::Player;
        for _ in 0..60 {
            round.tick();
        }
        assert_eq!(round.score, 60);
    }

    #[test]
    fn test_round_ends_exactly_at_zero() {
        let mut round = active_round();
        for i in 1..=3750 {
            let out = round.tick();
            assert!(round.time_remaining() >= 0.0);
            if i < 3750 {
                assert!(!out.ended);
                assert!(round.is_active());
            } else {
                assert!(out.ended);
            }
        }
        assert_eq!(round.time_remaining(), 0.0);
        assert_eq!(round.phase, RoundPhase::Idle);

        let score = round.score;
        for _ in 0..100 {
            assert!(!round.tick().ended);
        }
        assert_eq!(round.phase, RoundPhase::Idle);
        assert_eq!(round.score, score);
        assert_eq!(round.time_remaining(), 0.0);
    }

    #[test]
    fn test_tag_flips_once_then_cools_down() {
        let mut round = active_round();
        assert_eq!(round.try_tag(1.0, 2.0), Some(ActorKind::Player));
        assert_eq!(round.it, ActorKind::Player);
        assert_eq!(round.try_tag(1.0, 2.0), None);
        assert_eq!(round.try_tag(0.5, 2.999), None);
        assert_eq!(round.it, ActorKind::Player);
        assert_eq!(round.try_tag(1.0, 3.0), Some(ActorKind::Monster));
    }

    #[test]
    fn test_tag_requires_proximity_and_active_round() {
        let mut round = active_round();
        assert_eq!(round.try_tag(1.5, 10.0), None);
        assert_eq!(round.try_tag(f64::NAN, 10.0), None);

        let mut idle = RoundState::new(&Tuning::default());
        assert_eq!(idle.try_tag(0.1, 10.0), None);
    }

    #[test]
    fn test_power_up_window_and_combo() {
        let mut round = active_round();
        round.on_power_up_collected();
        assert_eq!(round.score, 50);
        assert_eq!(round.combo, 1);
        assert!(round.power_up_active());

        round.on_power_up_collected();
        assert_eq!(round.combo, 2);
        assert_eq!(round.score, 100);

        let window = secs_to_ticks(5.0, SIM_DT);
        let mut ended_at = None;
        for i in 1..=window {
            if round.tick().power_up_ended {
                ended_at = Some(i);
            }
        }
        assert_eq!(ended_at, Some(window));
        assert!(!round.power_up_active());
        assert_eq!(round.combo, 0);
    }
}
