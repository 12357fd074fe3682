//! Fixed timestep simulation tick
//!
//! `Simulation::step` advances everything by exactly one tick in a fixed
//! order: inputs, round timers, movement, entity bookkeeping, then the tag
//! check on the freshly moved actors. `SimulationClock` turns variable frame
//! times into whole steps.

use std::sync::Arc;

use glam::{DVec2, DVec3, Vec3Swizzles};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::height::HeightField;
use super::input::{self, InputBridge, InputEvent, InputQueue};
use super::pool::{BurstKind, EntityPool, Particle, PowerUp, PowerUpKind, spawn_burst};
use super::snapshot::{Snapshot, SnapshotCell};
use super::state::{Actor, ActorKind, RoundState, SimEvent};
use super::steering::{Pursuit, SteeringController, clamp_square};
use crate::consts::{POWER_UP_HOVER, POWER_UP_SPAWN_HALF_EXTENT};
use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// Maximum steps per `SimulationClock::advance` to prevent spiral of death
pub const MAX_SUBSTEPS: u32 = 8;
/// Longest frame the clock will try to catch up on
pub const MAX_FRAME_SECS: f64 = 0.25;

/// Autopilot keeps this much room between itself and the monster
const AUTOPILOT_EVADE_DISTANCE: f64 = 4.0;

/// Starting spots (XZ) for a fresh simulation
const MONSTER_START: DVec2 = DVec2::new(4.0, 0.0);
const PLAYER_START: DVec2 = DVec2::new(0.0, 2.0);

/// The whole simulation: actors, round, pools and the input queue
pub struct Simulation {
    tuning: Tuning,
    height: Arc<HeightField>,
    steering: SteeringController,
    pub round: RoundState,
    pub monster: Actor,
    pub player: Actor,
    pub power_ups: EntityPool<PowerUp>,
    pub particles: EntityPool<Particle>,
    rng: Pcg32,
    bridge: InputBridge,
    inputs: InputQueue,
    /// Ticks since creation
    tick: u64,
    /// Tick of the last ground selection
    last_selection: Option<u64>,
    /// Ticks until the next timed power-up spawn
    spawn_countdown: u32,
    /// A round just started and its first power-up is still owed
    opening_spawn: bool,
    next_burst: u32,
    latest: Arc<Snapshot>,
    published: SnapshotCell,
}

impl Simulation {
    pub fn new(tuning: Tuning) -> Self {
        let height = Arc::new(HeightField::new(tuning.seed));
        let steering = SteeringController::from_tuning(&tuning);
        let (bridge, inputs) = input::channel();

        let monster = Actor::new(
            ActorKind::Monster,
            place(&height, MONSTER_START, tuning.monster_y_offset),
            tuning.monster_y_offset,
        );
        let mut player = Actor::new(
            ActorKind::Player,
            place(&height, PLAYER_START, tuning.player_y_offset),
            tuning.player_y_offset,
        );
        // The player follows its goal even between rounds
        player.seeking = true;

        let mut sim = Self {
            round: RoundState::new(&tuning),
            monster,
            player,
            power_ups: EntityPool::with_capacity(tuning.max_power_ups.max(1)),
            particles: EntityPool::with_capacity(tuning.max_particles),
            // Offset stream so spawns don't mirror the noise permutation
            rng: Pcg32::seed_from_u64(tuning.seed.wrapping_add(0x9E37_79B9_7F4A_7C15)),
            bridge,
            inputs,
            tick: 0,
            last_selection: None,
            spawn_countdown: 0,
            opening_spawn: false,
            next_burst: 1,
            latest: Arc::new(Snapshot::default()),
            published: SnapshotCell::new(Snapshot::default()),
            height,
            steering,
            tuning,
        };
        let first = Arc::new(sim.build_snapshot(Vec::new(), false));
        sim.latest = Arc::clone(&first);
        sim.published.publish(first);
        sim
    }

    /// Handle for queueing inputs from the presentation side
    pub fn input_bridge(&self) -> InputBridge {
        self.bridge.clone()
    }

    /// Handle for reading snapshots from another thread
    pub fn snapshot_cell(&self) -> SnapshotCell {
        self.published.clone()
    }

    /// Shared terrain, usable outside the simulation thread
    pub fn height_field(&self) -> Arc<HeightField> {
        Arc::clone(&self.height)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Most recent complete snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.latest)
    }

    /// Ticks since creation
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Simulation seconds since creation
    pub fn elapsed(&self) -> f64 {
        self.tick as f64 * self.tuning.tick_secs
    }

    /// The player is steering by hand (selection within the grace window)
    pub fn user_controlled(&self) -> bool {
        match self.last_selection {
            Some(at) => {
                (self.tick - at) as f64 * self.tuning.tick_secs < self.tuning.selection_grace_secs
            }
            None => false,
        }
    }

    /// Advance exactly one fixed tick
    pub fn step(&mut self) -> Arc<Snapshot> {
        let dt = self.tuning.tick_secs;
        let mut events = Vec::new();

        // Inputs are applied before anything else moves
        for event in self.inputs.drain() {
            self.apply_input(event, &mut events);
        }

        self.tick += 1;
        let now = self.elapsed();

        // Round timers
        let timers = self.round.tick();
        if timers.power_up_ended {
            events.push(SimEvent::PowerUpEffectEnded);
        }
        if timers.ended {
            self.monster.seeking = false;
            self.power_ups.expire_all();
            events.push(SimEvent::RoundOver {
                score: self.round.score,
            });
        }

        // Movement
        if self.player.seeking {
            self.move_player(now);
        }
        if self.monster.seeking {
            self.move_monster();
        }

        // Entity bookkeeping
        self.power_ups.tick(dt);
        self.particles.tick(dt);
        for &id in self.power_ups.expired() {
            log::debug!("Power-up {} expired", id);
            events.push(SimEvent::PowerUpExpired { id });
        }
        // Spawns land after the pool tick so every power-up gets its full lifetime
        if self.round.is_active() {
            self.collect_power_ups(&mut events);
            if std::mem::take(&mut self.opening_spawn) {
                self.spawn_power_up(&mut events);
            }
            self.spawn_timed_power_up(&mut events);
        }

        // Tag check against this tick's positions
        let mut just_tagged = false;
        let distance = self.player.pos.distance(self.monster.pos);
        if let Some(it) = self.round.try_tag(distance, now) {
            just_tagged = true;
            let at = self.player.pos;
            self.burst(BurstKind::Tag, at);
            events.push(SimEvent::Tagged { it });
        }

        let snapshot = Arc::new(self.build_snapshot(events, just_tagged));
        self.latest = Arc::clone(&snapshot);
        self.published.publish(Arc::clone(&snapshot));
        snapshot
    }

    fn apply_input(&mut self, event: InputEvent, events: &mut Vec<SimEvent>) {
        match event {
            InputEvent::StartRound => {
                self.round.start(self.tuning.excitement);
                self.monster.seeking = true;
                self.power_ups.expire_all();
                self.spawn_countdown =
                    secs_to_ticks(self.tuning.power_up_spawn_interval_secs, self.tuning.tick_secs);
                self.opening_spawn = true;
                events.push(SimEvent::RoundStarted);
            }
            InputEvent::SelectGroundPoint { x, z } => {
                let fallback = self.player.goal;
                let picked = DVec2::new(x, z);
                let picked = if picked.is_finite() { picked } else { fallback };
                let goal = clamp_square(picked, self.tuning.player_bound);
                self.player.goal = goal;
                self.last_selection = Some(self.tick);
                let at = DVec3::new(goal.x, self.height.sample(goal.x, goal.y), goal.y);
                self.burst(BurstKind::Sparkle, at);
                events.push(SimEvent::GoalSelected {
                    x: goal.x,
                    z: goal.y,
                });
            }
        }
    }

    fn move_player(&mut self, now: f64) {
        if self.tuning.autopilot && self.round.is_active() && !self.user_controlled() {
            self.player.goal = self.autopilot_goal();
        }
        let xz = self.steering.seek(self.player.pos, self.player.goal);
        let bob = (now * self.tuning.bob_frequency).sin() * self.tuning.bob_amplitude;
        self.player.pos = place(&self.height, xz, self.player.y_offset + bob);
    }

    fn move_monster(&mut self) {
        let mode = match self.round.it {
            ActorKind::Monster => Pursuit::Chase,
            ActorKind::Player => Pursuit::Flee,
        };
        let speed = self.tuning.monster_speed(self.round.excitement);
        let xz = self
            .steering
            .pursue(self.monster.pos, self.player.pos, mode, speed);
        self.monster.goal = xz;
        self.monster.pos = place(&self.height, xz, self.monster.y_offset);
    }

    /// Where the player heads when nobody is pointing
    fn autopilot_goal(&self) -> DVec2 {
        let me = self.player.pos.xz();
        let them = self.monster.pos.xz();
        if self.round.it == ActorKind::Player {
            return them;
        }

        if me.distance(them) > AUTOPILOT_EVADE_DISTANCE {
            let nearest = self
                .power_ups
                .iter()
                .map(|e| e.entity.pos.xz())
                .min_by(|a, b| {
                    a.distance_squared(me)
                        .partial_cmp(&b.distance_squared(me))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(target) = nearest {
                return target;
            }
        }

        let away = (me - them).try_normalize().unwrap_or(DVec2::X);
        clamp_square(
            me + away * AUTOPILOT_EVADE_DISTANCE,
            self.tuning.player_bound,
        )
    }

    fn collect_power_ups(&mut self, events: &mut Vec<SimEvent>) {
        let radius = self.tuning.power_up_collect_radius;
        let reached: Vec<_> = self
            .power_ups
            .iter()
            .filter(|e| e.entity.pos.distance(self.player.pos) < radius)
            .map(|e| (e.id, e.entity.pos))
            .collect();

        for (id, at) in reached {
            if self.power_ups.collect(id) {
                log::info!("Power-up {} collected", id);
                self.round.on_power_up_collected();
                self.burst(BurstKind::PowerUp, at);
                events.push(SimEvent::PowerUpCollected { id });
            }
        }
    }

    fn spawn_timed_power_up(&mut self, events: &mut Vec<SimEvent>) {
        self.spawn_countdown = self.spawn_countdown.saturating_sub(1);
        if self.spawn_countdown > 0 {
            return;
        }
        self.spawn_countdown =
            secs_to_ticks(self.tuning.power_up_spawn_interval_secs, self.tuning.tick_secs);
        if self.power_ups.len() < self.tuning.max_power_ups {
            self.spawn_power_up(events);
        }
    }

    fn spawn_power_up(&mut self, events: &mut Vec<SimEvent>) {
        let half = POWER_UP_SPAWN_HALF_EXTENT;
        let x = self.rng.random_range(-half..half);
        let z = self.rng.random_range(-half..half);
        let phase = self.rng.random_range(0.0..std::f64::consts::TAU);
        let pos = DVec3::new(x, self.height.sample(x, z) + POWER_UP_HOVER, z);
        let ttl = secs_to_ticks(self.tuning.power_up_lifetime_secs, self.tuning.tick_secs);

        match self
            .power_ups
            .spawn(PowerUp::new(PowerUpKind::Speed, pos, phase, ttl))
        {
            Some(id) => {
                log::info!("Power-up {} spawned at ({:.2}, {:.2})", id, x, z);
                events.push(SimEvent::PowerUpSpawned { id });
            }
            None => log::debug!("Power-up cap reached, spawn skipped"),
        }
    }

    fn burst(&mut self, kind: BurstKind, at: DVec3) {
        let burst = self.next_burst;
        self.next_burst = self.next_burst.wrapping_add(1);
        spawn_burst(&mut self.particles, &mut self.rng, kind, burst, at);
    }

    fn build_snapshot(&self, events: Vec<SimEvent>, just_tagged: bool) -> Snapshot {
        Snapshot {
            tick: self.tick,
            elapsed: self.elapsed(),
            phase: self.round.phase,
            monster_pos: self.monster.pos,
            player_pos: self.player.pos,
            player_goal: self.player.goal,
            it: self.round.it,
            is_it: self.round.it == ActorKind::Player,
            score: self.round.score,
            combo: self.round.combo,
            time_remaining: self.round.time_remaining(),
            power_up_active: self.round.power_up_active(),
            active_power_ups: self.power_ups.to_vec(),
            active_particles: self.particles.to_vec(),
            removed_power_ups: self.power_ups.removed().collect(),
            removed_particles: self.particles.expired().to_vec(),
            just_tagged,
            events,
        }
    }
}

/// Put an XZ point on the terrain, `lift` units above the surface
fn place(height: &HeightField, xz: DVec2, lift: f64) -> DVec3 {
    DVec3::new(xz.x, height.sample(xz.x, xz.y) + lift, xz.y)
}

/// Turns variable frame durations into fixed simulation steps
#[derive(Debug, Clone)]
pub struct SimulationClock {
    dt: f64,
    accumulator: f64,
}

impl SimulationClock {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Feed `frame_secs` of wall time; runs as many whole ticks as fit
    /// (capped at `MAX_SUBSTEPS`) and returns how many ran.
    pub fn advance(&mut self, sim: &mut Simulation, frame_secs: f64) -> u32 {
        if frame_secs.is_nan() || frame_secs <= 0.0 || self.dt.is_nan() || self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_secs.min(MAX_FRAME_SECS);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            sim.step();
            self.accumulator -= self.dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than fall further behind
            self.accumulator = self.accumulator.min(self.dt);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::consts::SIM_DT;
    use crate::sim::pool::EntityId;
    use crate::sim::state::RoundPhase;

    /// Deterministic setup: no autopilot, no power-up pickups
    fn quiet_tuning() -> Tuning {
        Tuning {
            autopilot: false,
            power_up_collect_radius: 0.0,
            ..Tuning::default()
        }
    }

    fn started(tuning: Tuning) -> Simulation {
        let mut sim = Simulation::new(tuning);
        sim.input_bridge().start_round();
        sim.step();
        assert!(sim.round.is_active());
        sim
    }

    fn put(actor: &mut Actor, x: f64, z: f64) {
        actor.pos = DVec3::new(x, actor.pos.y, z);
        actor.goal = DVec2::new(x, z);
    }

    #[test]
    fn test_start_round_applies_on_next_tick() {
        let mut sim = Simulation::new(quiet_tuning());
        sim.input_bridge().start_round();
        assert_eq!(sim.round.phase, RoundPhase::Idle);

        let snap = sim.step();
        assert!(snap.is_active());
        assert!(snap.events.contains(&SimEvent::RoundStarted));
        assert_eq!(snap.it, ActorKind::Monster);
        assert_eq!(snap.active_power_ups.len(), 1);
        assert_eq!(snap.score, 1);
    }

    #[test]
    fn test_tag_flips_once_when_close() {
        let mut sim = started(quiet_tuning());
        put(&mut sim.player, 0.0, 0.0);
        put(&mut sim.monster, 1.0, 0.0);

        let snap = sim.step();
        assert!(snap.just_tagged);
        assert_eq!(snap.it, ActorKind::Player);
        assert!(snap.is_it);
        assert_eq!(
            snap.events
                .iter()
                .filter(|e| matches!(e, SimEvent::Tagged { .. }))
                .count(),
            1
        );
        assert!(snap.active_particles.len() >= 20);
    }

    #[test]
    fn test_tag_suppressed_during_cooldown() {
        let mut sim = started(quiet_tuning());
        put(&mut sim.player, 0.0, 0.0);
        put(&mut sim.monster, 1.0, 0.0);
        sim.round.tag_cooldown_until = sim.elapsed() + 100.0;

        let snap = sim.step();
        assert!(!snap.just_tagged);
        assert_eq!(snap.it, ActorKind::Monster);
    }

    #[test]
    fn test_overlapping_actors_do_not_retag_every_tick() {
        let mut sim = started(quiet_tuning());
        put(&mut sim.player, 0.0, 0.0);
        put(&mut sim.monster, 0.5, 0.0);

        let mut tags = 0;
        // 1s cooldown at 16ms is 62.5 ticks
        for _ in 0..60 {
            if sim.step().just_tagged {
                tags += 1;
            }
        }
        assert_eq!(tags, 1);
    }

    #[test]
    fn test_score_accrues_per_tick() {
        let mut sim = Simulation::new(quiet_tuning());
        put(&mut sim.player, -9.0, -9.0);
        sim.input_bridge().start_round();
        let mut score = 0;
        for _ in 0..60 {
            score = sim.step().score;
        }
        assert_eq!(score, 60);
    }

    #[test]
    fn test_round_ends_after_exact_tick_count() {
        let mut sim = Simulation::new(quiet_tuning());
        sim.input_bridge().start_round();
        for i in 1..=3750 {
            let snap = sim.step();
            assert!(snap.time_remaining >= 0.0);
            if i < 3750 {
                assert!(snap.is_active(), "round ended early at tick {}", i);
            } else {
                assert!(!snap.is_active());
                assert_eq!(snap.time_remaining, 0.0);
                assert!(
                    snap.events
                        .iter()
                        .any(|e| matches!(e, SimEvent::RoundOver { .. }))
                );
            }
        }
        for _ in 0..50 {
            let snap = sim.step();
            assert!(!snap.is_active());
            assert_eq!(snap.time_remaining, 0.0);
            assert!(snap.active_power_ups.is_empty());
        }

        sim.input_bridge().start_round();
        let snap = sim.step();
        assert!(snap.is_active());
        assert_eq!(snap.score, 1);
    }

    #[test]
    fn test_uncollected_power_up_expires_once() {
        let tuning = Tuning {
            power_up_spawn_interval_secs: 1000.0,
            ..quiet_tuning()
        };
        let mut sim = started(tuning);
        let id = sim.snapshot().active_power_ups[0].id;

        let mut seen = 0;
        for _ in 0..700 {
            let snap = sim.step();
            seen += snap.removed_power_ups.iter().filter(|&&r| r == id).count();
            let expired = snap
                .events
                .iter()
                .filter(|e| **e == SimEvent::PowerUpExpired { id })
                .count();
            assert_eq!(expired, snap.removed_power_ups.iter().filter(|&&r| r == id).count());
        }
        assert_eq!(seen, 1);
        assert!(sim.snapshot().active_power_ups.iter().all(|e| e.id != id));
    }

    #[test]
    fn test_opening_and_timed_power_ups_live_full_lifetime() {
        let tuning = Tuning {
            power_up_spawn_interval_secs: 2.0,
            ..quiet_tuning()
        };
        let lifetime = secs_to_ticks(tuning.power_up_lifetime_secs, tuning.tick_secs) as usize;
        let mut sim = Simulation::new(tuning);
        sim.input_bridge().start_round();

        let mut visible: BTreeMap<EntityId, usize> = BTreeMap::new();
        for _ in 0..1500 {
            for entry in &sim.step().active_power_ups {
                *visible.entry(entry.id).or_default() += 1;
            }
        }
        // Id 1 is the opening spawn, id 2 the first timed one
        assert_eq!(visible.get(&1), Some(&lifetime));
        assert_eq!(visible.get(&2), Some(&lifetime));
    }

    #[test]
    fn test_burnt_out_particles_reported_once() {
        let mut sim = started(quiet_tuning());
        put(&mut sim.player, -9.0, -9.0);
        sim.input_bridge().select_ground_point(-9.0, -9.0);
        let burst: Vec<EntityId> = sim.step().active_particles.iter().map(|e| e.id).collect();
        assert_eq!(burst.len(), 10);

        let mut removed = Vec::new();
        for _ in 0..100 {
            let snap = sim.step();
            for id in &snap.removed_particles {
                assert!(snap.active_particles.iter().all(|e| e.id != *id));
            }
            removed.extend_from_slice(&snap.removed_particles);
        }
        for id in &burst {
            assert_eq!(removed.iter().filter(|&r| r == id).count(), 1);
        }
        assert!(sim.particles.is_empty());
    }

    #[test]
    fn test_monster_only_steers_during_round() {
        let mut sim = Simulation::new(quiet_tuning());
        let rest = sim.monster.pos;
        for _ in 0..50 {
            sim.step();
        }
        assert!(!sim.monster.seeking);
        assert_eq!(sim.monster.pos, rest);

        sim.input_bridge().start_round();
        sim.step();
        assert!(sim.monster.seeking);
        assert_ne!(sim.monster.pos, rest);
    }

    #[test]
    fn test_walking_onto_power_up_scores_bonus() {
        let tuning = Tuning {
            autopilot: false,
            power_up_spawn_interval_secs: 1000.0,
            ..Tuning::default()
        };
        let mut sim = started(tuning);
        let entry = sim.snapshot().active_power_ups[0].clone();
        let target = entry.entity.pos;
        put(&mut sim.player, target.x, target.z);
        // Keep the monster out of the way
        put(&mut sim.monster, -target.x.signum() * 11.0, -target.z.signum() * 11.0);
        let before = sim.round.score;

        let mut collected = false;
        for _ in 0..30 {
            let snap = sim.step();
            if snap.events.contains(&SimEvent::PowerUpCollected { id: entry.id }) {
                collected = true;
                assert!(snap.power_up_active);
                assert!(snap.removed_power_ups.contains(&entry.id));
                break;
            }
        }
        assert!(collected);
        assert!(sim.round.score >= before + 50);
        assert!(sim.power_ups.get(entry.id).is_none());
    }

    #[test]
    fn test_selection_is_clamped_and_marks_user_control() {
        let mut sim = started(Tuning::default());
        sim.input_bridge().select_ground_point(50.0, -50.0);
        let snap = sim.step();
        assert_eq!(snap.player_goal, DVec2::new(10.0, -10.0));
        assert!(sim.user_controlled());
        assert!(
            snap.events
                .contains(&SimEvent::GoalSelected { x: 10.0, z: -10.0 })
        );

        // Autopilot resumes after the grace window
        for _ in 0..secs_to_ticks(3.0, SIM_DT) {
            sim.step();
        }
        assert!(!sim.user_controlled());
    }

    #[test]
    fn test_actors_stay_in_bounds() {
        for seed in [1u64, 2, 3, 99] {
            let tuning = Tuning {
                seed,
                ..Tuning::default()
            };
            let mut sim = started(tuning);
            sim.input_bridge().select_ground_point(-30.0, 30.0);
            for _ in 0..2500 {
                let snap = sim.step();
                assert!(snap.player_pos.x.abs() <= 10.0 && snap.player_pos.z.abs() <= 10.0);
                assert!(snap.monster_pos.x.abs() <= 12.0 && snap.monster_pos.z.abs() <= 12.0);
                assert!(snap.player_pos.is_finite() && snap.monster_pos.is_finite());
            }
        }
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut sim = started(Tuning::default());
            let bridge = sim.input_bridge();
            for i in 0..600 {
                if i == 100 {
                    bridge.select_ground_point(3.0, -4.0);
                }
                sim.step();
            }
            sim.snapshot()
        };
        let a = run();
        let b = run();
        assert_eq!(a.score, b.score);
        assert_eq!(a.it, b.it);
        assert_eq!(a.player_pos, b.player_pos);
        assert_eq!(a.monster_pos, b.monster_pos);
        assert_eq!(a.active_particles.len(), b.active_particles.len());
    }

    #[test]
    fn test_published_snapshot_matches_latest() {
        let mut sim = started(quiet_tuning());
        let cell = sim.snapshot_cell();
        let snap = sim.step();
        assert_eq!(cell.latest().tick, snap.tick);
        assert_eq!(snap.tick, sim.ticks());
    }

    #[test]
    fn test_clock_runs_fixed_steps() {
        let mut sim = Simulation::new(quiet_tuning());
        let mut clock = SimulationClock::new(SIM_DT);
        assert_eq!(clock.advance(&mut sim, 0.010), 0);
        assert_eq!(clock.advance(&mut sim, 0.010), 1);
        assert_eq!(clock.advance(&mut sim, 0.040), 2);
        assert_eq!(sim.ticks(), 3);
        // A long stall is capped
        assert_eq!(clock.advance(&mut sim, 5.0), MAX_SUBSTEPS);
        assert_eq!(clock.advance(&mut sim, -1.0), 0);
    }
}
