//! Procedural spawning ahead of the player
//!
//! Each tick the director checks how far ahead the nearest tracked entity
//! sits. When that frontier has come within the spawn distance it emits one
//! batch further out: a letter when one is due by distance, otherwise an
//! obstacle archetype or a gem drawn from level-scaled weighted tables.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::entity::{Entity, EntityKind, OBSTACLE_COLOR};
use super::state::RunnerState;
use super::world::World;
use crate::consts::{EMPTY_FRONTIER, LANE_WIDTH, SPAWN_DISTANCE};
use crate::{lane_x, max_lane};

/// Chance that a non-letter batch spawns anything at all
pub const SPAWN_CHANCE: f32 = 0.9;
/// Gem value for plain and fallback gems
pub const GEM_VALUE: u32 = 50;
/// Gem value for gems floating above zombies
pub const BONUS_GEM_VALUE: u32 = 100;
/// Chance of a bonus gem above each zombie
pub const BONUS_GEM_CHANCE: f32 = 0.3;
/// Lateral start of crossing cats
pub const CAT_START_X: f32 = 6.0;

/// Weighted random choice by cumulative sum
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(T, f32)>,
    total: f32,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table, dropping entries with non-positive weight
    pub fn new(entries: impl IntoIterator<Item = (T, f32)>) -> Self {
        let entries: Vec<_> = entries.into_iter().filter(|(_, w)| *w > 0.0).collect();
        let total = entries.iter().map(|(_, w)| w).sum();
        Self { entries, total }
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick with a roll in [0, 1)
    pub fn pick_with(&self, roll: f32) -> Option<T> {
        let mut target = roll.clamp(0.0, 1.0) * self.total;
        for &(item, weight) in &self.entries {
            if target < weight {
                return Some(item);
            }
            target -= weight;
        }
        self.entries.last().map(|&(item, _)| item)
    }

    pub fn pick(&self, rng: &mut impl Rng) -> Option<T> {
        self.pick_with(rng.random::<f32>())
    }
}

/// What a non-letter batch contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Obstacle,
    Gem,
}

/// Obstacle families a batch can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    RollingTire,
    Barrel,
    Cat,
    ZigzagCrate,
    Pothole,
    HayBale,
    OldCar,
    AlienGroup,
    ZombieGroup,
}

/// (archetype, first level it appears, weight)
const ARCHETYPES: [(Archetype, u32, f32); 9] = [
    (Archetype::RollingTire, 5, 15.0),
    (Archetype::Barrel, 1, 10.0),
    (Archetype::Cat, 1, 10.0),
    (Archetype::ZigzagCrate, 2, 10.0),
    (Archetype::Pothole, 1, 10.0),
    (Archetype::HayBale, 1, 10.0),
    (Archetype::OldCar, 3, 10.0),
    (Archetype::AlienGroup, 4, 10.0),
    (Archetype::ZombieGroup, 1, 15.0),
];

/// Obstacle-versus-gem weights; obstacles grow more likely with level
pub fn content_table(level: u32) -> WeightedTable<Content> {
    let gem = (0.3 - level as f32 * 0.02).max(0.1);
    WeightedTable::new([(Content::Obstacle, 1.0 - gem), (Content::Gem, gem)])
}

/// Archetypes unlocked at a level
pub fn archetype_table(level: u32) -> WeightedTable<Archetype> {
    WeightedTable::new(
        ARCHETYPES
            .iter()
            .map(|&(kind, min_level, weight)| (kind, if level >= min_level { weight } else { 0.0 })),
    )
}

/// Zombies in one group at a level
fn zombie_count(level: u32, rng: &mut impl Rng) -> usize {
    let mut count = 1;
    if level > 5 && rng.random::<f32>() > 0.5 {
        count = 2;
    }
    if level > 10 && rng.random::<f32>() > 0.7 {
        count = 3;
    }
    count
}

/// Uniform lane index in [-floor(n/2), floor(n/2)]
pub fn random_lane(rng: &mut impl Rng, lane_count: u32) -> i32 {
    let max = max_lane(lane_count);
    rng.random_range(-max..=max)
}

/// Every lane index in random order
pub fn shuffled_lanes(rng: &mut impl Rng, lane_count: u32) -> Vec<i32> {
    let max = max_lane(lane_count);
    let mut lanes: Vec<i32> = (-max..=max).collect();
    lanes.shuffle(rng);
    lanes
}

/// Forward position of the most distant tracked entity
pub fn frontier(entities: &[Entity]) -> f32 {
    entities
        .iter()
        .filter(|e| e.active && e.kind.tracks_frontier())
        .map(|e| e.pos.z)
        .reduce(f32::min)
        .unwrap_or(EMPTY_FRONTIER)
}

/// Emit a batch if the frontier is close enough. Returns the number of entities spawned.
pub(crate) fn direct(state: &mut RunnerState, world: &dyn World) -> usize {
    let frontier = frontier(&state.entities);
    if frontier <= -SPAWN_DISTANCE {
        return 0;
    }

    let level = world.level();
    let gap = state.tuning.spawn_gap(level, world.scroll_speed());
    let z = (frontier - gap).min(-SPAWN_DISTANCE);
    let before = state.entities.len();

    if state.distance >= state.next_letter_distance {
        spawn_letter(state, world, z);
    } else if state.rng.random::<f32>() < SPAWN_CHANCE {
        match content_table(level).pick(&mut state.rng) {
            Some(Content::Obstacle) => {
                if let Some(archetype) = archetype_table(level).pick(&mut state.rng) {
                    spawn_archetype(state, archetype, level, world.lane_count(), z);
                }
            }
            Some(Content::Gem) => {
                let lane = random_lane(&mut state.rng, world.lane_count());
                spawn_gem(state, lane, z);
            }
            None => {}
        }
    }

    let spawned = state.entities.len() - before;
    if spawned > 0 {
        log::trace!("Spawned {spawned} at z={z:.1} (frontier {frontier:.1})");
    }
    spawned
}

fn spawn_gem(state: &mut RunnerState, lane: i32, z: f32) {
    let id = state.next_entity_id();
    state
        .entities
        .push(Entity::gem(id, Vec3::new(lane_x(lane), 1.2, z), GEM_VALUE));
}

/// Spawn one outstanding letter, or a gem when no index can be issued
fn spawn_letter(state: &mut RunnerState, world: &dyn World, z: f32) {
    let lane = random_lane(&mut state.rng, world.lane_count());
    let word = world.target_word();
    let collected = world.collected_letters();
    let on_track: Vec<usize> = state.active_letter_indices().collect();

    let available: Vec<usize> = (0..word.len())
        .filter(|i| !collected.contains(i) && !on_track.contains(i))
        .collect();

    let Some(&index) = available.choose(&mut state.rng) else {
        spawn_gem(state, lane, z);
        return;
    };

    let id = state.next_entity_id();
    let glyph = word[index];
    state
        .entities
        .push(Entity::letter(id, Vec3::new(lane_x(lane), 1.0, z), glyph, index));
    state.next_letter_distance += state.letter_interval();
    log::debug!(
        "Letter {glyph} (index {index}) at z={z:.1}, next due at {:.0}",
        state.next_letter_distance
    );
}

fn spawn_archetype(state: &mut RunnerState, archetype: Archetype, level: u32, lane_count: u32, z: f32) {
    let rng = &mut state.rng;
    let mut batch = Vec::new();

    match archetype {
        Archetype::RollingTire | Archetype::ZigzagCrate => {
            let (kind, y) = match archetype {
                Archetype::RollingTire => (EntityKind::RollingTire, 0.4),
                _ => (EntityKind::ZigzagCrate, 0.3),
            };
            let x = lane_x(random_lane(rng, lane_count));
            let phase = rng.random_range(0.0..TAU);
            batch.push(Entity::sine(0, kind, Vec3::new(x, y, z), phase));
        }
        Archetype::Barrel => {
            let x = lane_count as f32 * LANE_WIDTH / 2.0 + 4.0;
            batch.push(Entity::crossing(0, EntityKind::Barrel, Vec3::new(x, 0.5, z), -1.0));
        }
        Archetype::Cat => {
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let x = -direction * CAT_START_X;
            batch.push(Entity::crossing(0, EntityKind::Cat, Vec3::new(x, 0.2, z), direction));
        }
        Archetype::Pothole | Archetype::HayBale | Archetype::OldCar => {
            let (kind, y) = match archetype {
                Archetype::Pothole => (EntityKind::Pothole, 0.05),
                Archetype::HayBale => (EntityKind::HayBale, 0.6),
                _ => (EntityKind::OldCar, 0.6),
            };
            let x = lane_x(random_lane(rng, lane_count));
            batch.push(Entity::new(0, kind, Vec3::new(x, y, z)));
        }
        Archetype::AlienGroup => {
            for lane in shuffled_lanes(rng, lane_count).into_iter().take(2) {
                batch.push(Entity::alien(0, Vec3::new(lane_x(lane), 1.5, z)));
            }
        }
        Archetype::ZombieGroup => {
            let count = zombie_count(level, rng);
            for lane in shuffled_lanes(rng, lane_count).into_iter().take(count) {
                let x = lane_x(lane);
                let mut zombie = Entity::new(0, EntityKind::Obstacle, Vec3::new(x, 0.8, z));
                zombie.color = OBSTACLE_COLOR;
                batch.push(zombie);
                if rng.random::<f32>() < BONUS_GEM_CHANCE {
                    batch.push(Entity::gem(0, Vec3::new(x, 2.5, z), BONUS_GEM_VALUE));
                }
            }
        }
    }

    for mut entity in batch {
        entity.id = state.next_entity_id();
        state.entities.push(entity);
    }
}
