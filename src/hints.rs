//! Presentation hints
//!
//! Colors, banners and sound cues are a function of the snapshot alone; the
//! simulation never picks them.

use serde::{Deserialize, Serialize};

use crate::sim::{ActorKind, SimEvent, Snapshot};

/// Sound cues the audio layer should play for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Round started
    ChaseStart,
    /// "IT" changed hands
    Tag,
    /// Power-up collected
    PowerUp,
    /// Timer ran out
    GameOver,
}

/// Ring glow under an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    pub color: u32,
    /// Fast pulse marks the current "IT" holder
    pub pulsing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationHints {
    pub monster_ring: Ring,
    pub player_ring: Ring,
    pub spotlight: u32,
    pub audio: Vec<AudioCue>,
    /// Floating message text for this tick, if any
    pub banner: Option<&'static str>,
}

const ORANGE_RED: u32 = 0xFF4500;
const ALERT_RED: u32 = 0xFF0000;
const CALM_BLUE: u32 = 0x00AAFF;
const SAFE_GREEN: u32 = 0x00FF80;

/// Derive what the presentation layer should show for a snapshot
pub fn presentation_hints(snapshot: &Snapshot) -> PresentationHints {
    let (monster_ring, player_ring, spotlight) = match snapshot.it {
        ActorKind::Monster => (
            Ring {
                color: ORANGE_RED,
                pulsing: true,
            },
            Ring {
                color: CALM_BLUE,
                pulsing: false,
            },
            CALM_BLUE,
        ),
        ActorKind::Player => (
            Ring {
                color: SAFE_GREEN,
                pulsing: false,
            },
            Ring {
                color: ALERT_RED,
                pulsing: true,
            },
            ALERT_RED,
        ),
    };

    let mut audio = Vec::new();
    let mut banner = None;
    for event in &snapshot.events {
        match *event {
            SimEvent::RoundStarted => audio.push(AudioCue::ChaseStart),
            SimEvent::Tagged { it } => {
                audio.push(AudioCue::Tag);
                banner = Some(match it {
                    ActorKind::Player => "YOU ARE IT!",
                    ActorKind::Monster => "RUN!",
                });
            }
            SimEvent::PowerUpCollected { .. } => {
                audio.push(AudioCue::PowerUp);
                banner = Some("POWER UP!");
            }
            SimEvent::RoundOver { .. } => {
                audio.push(AudioCue::GameOver);
                banner = Some("GAME OVER!");
            }
            _ => {}
        }
    }

    PresentationHints {
        monster_ring,
        player_ring,
        spotlight,
        audio,
        banner,
    }
}
