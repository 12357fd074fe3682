//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod height;
pub mod input;
pub mod pool;
pub mod snapshot;
pub mod state;
pub mod steering;
pub mod tick;

pub use height::{HeightField, SimplexNoise};
pub use input::{InputBridge, InputEvent, InputQueue};
pub use pool::{
    BurstKind, Entry, EntityId, EntityPool, Ephemeral, Particle, PowerUp, PowerUpKind,
    spawn_burst,
};
pub use snapshot::{Snapshot, SnapshotCell};
pub use state::{Actor, ActorKind, RoundPhase, RoundState, SimEvent};
pub use steering::{Pursuit, SteeringController};
pub use tick::{MAX_SUBSTEPS, Simulation, SimulationClock};
