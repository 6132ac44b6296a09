//! Simulation state owned by the runner core
//!
//! The entity pool plus everything the core tracks between ticks: distance,
//! letter pacing, timers, the seeded RNG and the id allocator.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind};
use super::events::{EventQueue, GameEvent};
use super::world::GameStatus;
use crate::tuning::Tuning;

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct RunnerState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Entity pool; only active entities survive a tick
    pub(crate) entities: Vec<Entity>,
    pub(crate) events: EventQueue,
    /// World distance travelled this run
    pub(crate) distance: f32,
    /// Distance at which the next letter becomes due
    pub(crate) next_letter_distance: f32,
    /// Seconds of Playing since the last automatic speed boost
    pub(crate) speed_timer: f32,
    /// Seconds since the boss last fired
    pub(crate) boss_timer: f32,
    /// Shots fired this encounter (rotates projectile variants)
    pub(crate) boss_shots: u32,
    /// Status and level seen at the end of the previous tick
    pub(crate) prev_status: GameStatus,
    pub(crate) prev_level: u32,
    next_id: u32,
}

impl RunnerState {
    /// Create a state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            entities: Vec::new(),
            events: EventQueue::new(),
            distance: 0.0,
            next_letter_distance: 0.0,
            speed_timer: 0.0,
            boss_timer: 0.0,
            boss_shots: 0,
            prev_status: GameStatus::Menu,
            prev_level: 1,
            next_id: 1,
        };
        state.next_letter_distance = state.letter_interval();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Read-only snapshot for rendering
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn next_letter_distance(&self) -> f32 {
        self.next_letter_distance
    }

    /// Take the notifications produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// The boss entity, if one is in the pool
    pub fn boss(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == EntityKind::Boss)
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Insert an entity directly, bypassing the spawn director
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Word indices carried by letters still on the track
    pub fn active_letter_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entities
            .iter()
            .filter(|e| e.active)
            .filter_map(Entity::letter_index)
    }

    /// Random distance until the next letter
    pub(crate) fn letter_interval(&mut self) -> f32 {
        let min = self.tuning.letter_interval_min;
        let max = self.tuning.letter_interval_max.max(min);
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Empty the pool and restart distance bookkeeping
    pub(crate) fn reset_run(&mut self) {
        self.entities.clear();
        self.distance = 0.0;
        self.next_letter_distance = self.letter_interval();
        self.speed_timer = 0.0;
        self.boss_timer = 0.0;
        self.boss_shots = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_ids_are_unique() {
        let mut state = RunnerState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_first_letter_within_interval() {
        let state = RunnerState::new(7);
        assert!((100.0..250.0).contains(&state.next_letter_distance()));
    }

    #[test]
    fn test_same_seed_same_intervals() {
        let mut a = RunnerState::new(42);
        let mut b = RunnerState::new(42);
        for _ in 0..5 {
            assert_eq!(a.letter_interval(), b.letter_interval());
        }
    }

    #[test]
    fn test_reset_run_clears_pool() {
        let mut state = RunnerState::new(1);
        let id = state.next_entity_id();
        state.insert(Entity::gem(id, Vec3::ZERO, 50));
        state.distance = 500.0;
        state.reset_run();
        assert!(state.entities().is_empty());
        assert_eq!(state.distance(), 0.0);
    }
}
