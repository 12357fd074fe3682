//! Short-lived entities
//!
//! `EntityPool` owns power-ups and particles. Lifetimes are counted per tick
//! inside the pool; nothing expires on wall-clock timers. Entries stay sorted
//! by id so iteration order is stable.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_GRAVITY, POWER_UP_BOB_AMPLITUDE, POWER_UP_BOB_FREQUENCY};

pub type EntityId = u32;

/// Something the pool can age
pub trait Ephemeral {
    /// Advance one tick. Returns `false` once the entity is spent.
    fn advance(&mut self, dt: f64) -> bool;
}

/// A pooled entity with its id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry<T> {
    pub id: EntityId,
    pub entity: T,
}

/// Spawn/update/expire manager
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    entries: Vec<Entry<T>>,
    capacity: usize,
    next_id: EntityId,
    expired: Vec<EntityId>,
    collected: Vec<EntityId>,
    /// Removed outside `tick`, reported by the next `tick`
    pending_expired: Vec<EntityId>,
}

impl<T: Ephemeral> EntityPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            next_id: 1,
            expired: Vec::new(),
            collected: Vec::new(),
            pending_expired: Vec::new(),
        }
    }

    /// Add an entity. Returns `None` when the pool is at capacity.
    pub fn spawn(&mut self, entity: T) -> Option<EntityId> {
        if self.entries.len() >= self.capacity {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        // Ids only grow, so pushing keeps the vector sorted
        self.entries.push(Entry { id, entity });
        Some(id)
    }

    /// Age every entity by one tick and drop the spent ones
    pub fn tick(&mut self, dt: f64) {
        self.expired = std::mem::take(&mut self.pending_expired);
        self.collected.clear();

        let expired = &mut self.expired;
        self.entries.retain_mut(|e| {
            let alive = e.entity.advance(dt);
            if !alive {
                expired.push(e.id);
            }
            alive
        });
    }

    /// Remove a live entity as collected. `false` if it is unknown, already
    /// collected or already expired.
    pub fn collect(&mut self, id: EntityId) -> bool {
        match self.entries.binary_search_by_key(&id, |e| e.id) {
            Ok(index) => {
                self.entries.remove(index);
                self.collected.push(id);
                true
            }
            Err(_) => false,
        }
    }

    /// Ids that ran out of life during the last `tick`
    pub fn expired(&self) -> &[EntityId] {
        &self.expired
    }

    /// Ids collected since the last `tick`
    pub fn collected(&self) -> &[EntityId] {
        &self.collected
    }

    /// Everything removed since the last `tick` began
    pub fn removed(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.expired.iter().chain(self.collected.iter()).copied()
    }

    /// Drop every live entity; the ids show up in the next `expired()`
    pub fn expire_all(&mut self) {
        self.pending_expired
            .extend(self.entries.drain(..).map(|e| e.id));
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entries[i].entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Ephemeral + Clone> EntityPool<T> {
    /// Copy of the live entries for a snapshot
    pub fn to_vec(&self) -> Vec<Entry<T>> {
        self.entries.clone()
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
}

/// A collectible hovering above the terrain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: DVec3,
    /// Resting height the power-up bobs around
    pub base_y: f64,
    /// Bobbing phase offset
    pub phase: f64,
    pub age_ticks: u32,
    pub ttl_ticks: u32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: DVec3, phase: f64, ttl_ticks: u32) -> Self {
        Self {
            kind,
            pos,
            base_y: pos.y,
            phase,
            age_ticks: 0,
            ttl_ticks,
        }
    }
}

impl Ephemeral for PowerUp {
    fn advance(&mut self, dt: f64) -> bool {
        self.age_ticks += 1;
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
        let t = self.age_ticks as f64 * dt;
        self.pos.y =
            self.base_y + (t * POWER_UP_BOB_FREQUENCY + self.phase).sin() * POWER_UP_BOB_AMPLITUDE;
        self.ttl_ticks > 0
    }
}

/// Visual burst presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    /// Actors tagged each other
    Tag,
    /// A power-up was collected
    PowerUp,
    /// The player picked a ground point
    Sparkle,
}

/// Parameters for a burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstParams {
    pub count: usize,
    pub color: u32,
    /// Half-extents of the random spawn offset (y is upward-only)
    pub offset: DVec3,
    /// Half-extents of horizontal velocity
    pub spread: f64,
    /// Upward velocity range
    pub rise: (f64, f64),
    /// Life lost per tick
    pub decay: f64,
}

impl BurstKind {
    pub fn params(self) -> BurstParams {
        match self {
            BurstKind::Tag => BurstParams {
                count: 20,
                color: 0xFFFFFF,
                offset: DVec3::new(1.5, 2.0, 1.5),
                spread: 0.15,
                rise: (0.1, 0.4),
                decay: 0.02,
            },
            BurstKind::PowerUp => BurstParams {
                count: 30,
                color: 0xFFD700,
                offset: DVec3::new(1.5, 2.0, 1.5),
                spread: 0.15,
                rise: (0.1, 0.4),
                decay: 0.02,
            },
            BurstKind::Sparkle => BurstParams {
                count: 10,
                color: 0xCCFFFF,
                offset: DVec3::new(1.0, 1.0, 1.0),
                spread: 0.1,
                rise: (0.0, 0.2),
                decay: 0.04,
            },
        }
    }
}

/// A single particle of a burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub burst: u32,
    pub kind: BurstKind,
    pub color: u32,
    pub pos: DVec3,
    pub vel: DVec3,
    /// 1 at spawn, spent at 0
    pub life: f64,
    pub decay: f64,
    pub gravity: f64,
}

impl Ephemeral for Particle {
    fn advance(&mut self, _dt: f64) -> bool {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.life = (self.life - self.decay).max(0.0);
        self.life > 0.0
    }
}

/// Spawn one burst of particles around `origin`.
///
/// Returns how many particles fit in the pool.
pub fn spawn_burst<R: Rng>(
    pool: &mut EntityPool<Particle>,
    rng: &mut R,
    kind: BurstKind,
    burst: u32,
    origin: DVec3,
) -> usize {
    let params = kind.params();
    let mut spawned = 0;
    for _ in 0..params.count {
        let offset = DVec3::new(
            rng.random_range(-params.offset.x..params.offset.x),
            rng.random_range(0.0..params.offset.y),
            rng.random_range(-params.offset.z..params.offset.z),
        );
        let vel = DVec3::new(
            rng.random_range(-params.spread..params.spread),
            rng.random_range(params.rise.0..params.rise.1),
            rng.random_range(-params.spread..params.spread),
        );
        let particle = Particle {
            burst,
            kind,
            color: params.color,
            pos: origin + offset,
            vel,
            life: 1.0,
            decay: params.decay,
            gravity: PARTICLE_GRAVITY,
        };
        if pool.spawn(particle).is_none() {
            log::debug!("Particle cap reached, dropped rest of {:?} burst", kind);
            break;
        }
        spawned += 1;
    }
    spawned
}
