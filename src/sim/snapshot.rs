//! Outbound per-tick snapshot
//!
//! Presentation only ever sees complete ticks: a finished `Snapshot` is
//! wrapped in an `Arc` and swapped into a `SnapshotCell` in one step.

use std::sync::{Arc, RwLock};

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::pool::{EntityId, Entry, Particle, PowerUp};
use super::state::{ActorKind, RoundPhase, SimEvent};

/// Read-only view of one completed tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tick: u64,
    /// Simulation seconds since start
    pub elapsed: f64,
    pub phase: RoundPhase,
    pub monster_pos: DVec3,
    pub player_pos: DVec3,
    pub player_goal: DVec2,
    /// Current "IT" holder
    pub it: ActorKind,
    /// The player holds "IT"
    pub is_it: bool,
    pub score: u64,
    pub combo: u32,
    pub time_remaining: f64,
    pub power_up_active: bool,
    pub active_power_ups: Vec<Entry<PowerUp>>,
    pub active_particles: Vec<Entry<Particle>>,
    /// Power-ups that disappeared this tick (expired or collected)
    pub removed_power_ups: Vec<EntityId>,
    /// Particles that burned out this tick
    pub removed_particles: Vec<EntityId>,
    pub just_tagged: bool,
    pub events: Vec<SimEvent>,
}

impl Default for Snapshot {
    /// Idle round with both actors at the origin
    fn default() -> Self {
        Self {
            tick: 0,
            elapsed: 0.0,
            phase: RoundPhase::Idle,
            monster_pos: DVec3::ZERO,
            player_pos: DVec3::ZERO,
            player_goal: DVec2::ZERO,
            it: ActorKind::Monster,
            is_it: false,
            score: 0,
            combo: 0,
            time_remaining: 0.0,
            power_up_active: false,
            active_power_ups: Vec::new(),
            active_particles: Vec::new(),
            removed_power_ups: Vec::new(),
            removed_particles: Vec::new(),
            just_tagged: false,
            events: Vec::new(),
        }
    }
}

impl Snapshot {
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }
}

/// Latest published snapshot, shareable with other threads
#[derive(Debug, Clone)]
pub struct SnapshotCell {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotCell {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Replace the published snapshot
    pub fn publish(&self, snapshot: Arc<Snapshot>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = snapshot;
    }

    /// The most recent complete snapshot
    pub fn latest(&self) -> Arc<Snapshot> {
        let slot = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&slot)
    }
}
