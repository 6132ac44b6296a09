//! Interfaces to the collaborators outside the simulation core
//!
//! The core never owns score, lives or level progression. It reads them and
//! reports side effects through [`World`], and it learns where the player is
//! through [`PlayerAnchor`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::BossKind;

/// High-level game status owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Shop,
    BossFight,
    GameOver,
    Victory,
}

impl GameStatus {
    /// Whether entities move during this status
    pub fn is_running(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::BossFight)
    }

    /// Whether this status ends a run
    pub fn is_final(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Victory)
    }
}

/// External game state: read access plus fire-and-forget mutations
pub trait World {
    // === Reads ===
    fn status(&self) -> GameStatus;
    /// Forward speed of the world (units/s)
    fn scroll_speed(&self) -> f32;
    fn level(&self) -> u32;
    fn lane_count(&self) -> u32;
    /// Glyphs of the word being spelled
    fn target_word(&self) -> &[char];
    /// Word indices already collected
    fn collected_letters(&self) -> &[usize];
    /// Boss of the current encounter, if any
    fn boss_kind(&self) -> Option<BossKind>;
    /// Player cannot be hurt right now
    fn invulnerable(&self) -> bool {
        false
    }

    // === Mutations ===
    fn collect_gem(&mut self, value: u32);
    fn collect_letter(&mut self, index: usize);
    fn player_hit(&mut self);
    fn damage_boss(&mut self, amount: u32);
    fn open_shop(&mut self);
    fn increase_speed(&mut self, amount: f32);
    /// Final distance when a run ends
    fn report_distance(&mut self, distance: u32);
}

/// Source of the player's world position, read once per tick
pub trait PlayerAnchor {
    /// None until the player is registered
    fn position(&self) -> Option<Vec3>;
}

impl PlayerAnchor for Vec3 {
    fn position(&self) -> Option<Vec3> {
        Some(*self)
    }
}

impl PlayerAnchor for Option<Vec3> {
    fn position(&self) -> Option<Vec3> {
        *self
    }
}

/// World double that records every mutation
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct RecordingWorld {
        pub status: GameStatus,
        pub speed: f32,
        pub level: u32,
        pub lane_count: u32,
        pub word: Vec<char>,
        pub collected: Vec<usize>,
        pub boss: Option<BossKind>,
        pub invulnerable: bool,

        pub score: u64,
        pub gems: u32,
        pub hits: u32,
        pub boss_damage: Vec<u32>,
        pub shop_opened: u32,
        pub speed_boosts: Vec<f32>,
        pub distances: Vec<u32>,
    }

    impl RecordingWorld {
        pub fn playing() -> Self {
            Self {
                status: GameStatus::Playing,
                speed: crate::consts::RUN_SPEED_BASE,
                level: 1,
                lane_count: 3,
                word: "RUNNER".chars().collect(),
                collected: Vec::new(),
                boss: None,
                invulnerable: false,
                score: 0,
                gems: 0,
                hits: 0,
                boss_damage: Vec::new(),
                shop_opened: 0,
                speed_boosts: Vec::new(),
                distances: Vec::new(),
            }
        }

        pub fn boss_fight(boss: BossKind) -> Self {
            Self {
                status: GameStatus::BossFight,
                boss: Some(boss),
                word: Vec::new(),
                ..Self::playing()
            }
        }
    }

    impl World for RecordingWorld {
        fn status(&self) -> GameStatus {
            self.status
        }
        fn scroll_speed(&self) -> f32 {
            self.speed
        }
        fn level(&self) -> u32 {
            self.level
        }
        fn lane_count(&self) -> u32 {
            self.lane_count
        }
        fn target_word(&self) -> &[char] {
            &self.word
        }
        fn collected_letters(&self) -> &[usize] {
            &self.collected
        }
        fn boss_kind(&self) -> Option<BossKind> {
            self.boss
        }
        fn invulnerable(&self) -> bool {
            self.invulnerable
        }

        fn collect_gem(&mut self, value: u32) {
            self.score += value as u64;
            self.gems += 1;
        }
        fn collect_letter(&mut self, index: usize) {
            if !self.collected.contains(&index) {
                self.collected.push(index);
            }
        }
        fn player_hit(&mut self) {
            self.hits += 1;
        }
        fn damage_boss(&mut self, amount: u32) {
            self.boss_damage.push(amount);
        }
        fn open_shop(&mut self) {
            self.shop_opened += 1;
        }
        fn increase_speed(&mut self, amount: f32) {
            self.speed_boosts.push(amount);
            self.speed += amount;
        }
        fn report_distance(&mut self, distance: u32) {
            self.distances.push(distance);
        }
    }
}
