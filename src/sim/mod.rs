//! Deterministic simulation module
//!
//! Level objects of the runner: spawning, motion, collisions and the pool
//! lifecycle. Given the same seed, world responses and inputs, a run plays
//! out identically:
//! - Clamped timestep
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod events;
pub mod motion;
pub mod run;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod words;
pub mod world;

pub use entity::{BossKind, Entity, EntityKind, Payload, ProjectileVariant};
pub use events::{EventQueue, GameEvent, SoundEffect};
pub use run::{RunState, ShopItem};
pub use spawn::WeightedTable;
pub use state::RunnerState;
pub use tick::{TickInput, is_boss_entity, tick};
pub use world::{GameStatus, PlayerAnchor, World};
