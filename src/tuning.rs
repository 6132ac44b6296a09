//! Game balance knobs
//!
//! Everything here has a sensible default so a partial JSON file only needs
//! to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Data-driven balance for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movers ===
    /// Extra forward speed of alien missiles on top of the world scroll
    pub missile_speed: f32,
    /// Lateral roll speed of barrels at level 0
    pub barrel_speed: f32,
    /// Barrel speed multiplier added per level
    pub barrel_level_scale: f32,
    /// Lateral speed of crossing cats
    pub cat_speed: f32,
    /// Aliens fire once their forward position passes this line
    pub alien_fire_z: f32,

    // === Boss fight ===
    /// Forward distance the boss holds in front of the player
    pub boss_standoff: f32,
    /// Boss strafing speed at level 0
    pub boss_strafe_speed: f32,
    /// Strafing speed added per level
    pub boss_strafe_per_level: f32,
    /// Extra lateral room the boss gets beyond the outer lanes
    pub boss_strafe_margin: f32,
    /// Seconds between boss shots at level 0
    pub boss_fire_interval: f32,
    /// Fire interval reduction per level
    pub boss_fire_per_level: f32,
    /// Shortest allowed fire interval
    pub boss_fire_floor: f32,
    /// Speed of boss projectiles along their heading
    pub boss_projectile_speed: f32,
    /// Speed of player projectiles
    pub player_projectile_speed: f32,
    /// Boss HP removed by one player projectile
    pub boss_damage: u32,
    /// Player projectiles are discarded past this forward position
    pub projectile_cutoff_z: f32,

    // === Pacing ===
    /// Shortest distance between two letters
    pub letter_interval_min: f32,
    /// Longest distance between two letters
    pub letter_interval_max: f32,
    /// Distance before the first letter after a boss is defeated
    pub letter_resume_offset: f32,
    /// Seconds of Playing between automatic speed boosts
    pub speed_boost_interval: f32,
    /// Scroll speed added by each automatic boost
    pub speed_boost_amount: f32,

    // === Spawn gap ===
    /// Gap between batches at level 0 before speed adjustment
    pub spawn_gap_base: f32,
    /// Gap removed per level
    pub spawn_gap_per_level: f32,
    /// Gap added per unit of scroll speed
    pub spawn_gap_per_speed: f32,
    /// Smallest allowed gap
    pub spawn_gap_floor: f32,

    // === Level transitions ===
    /// On level-up, entities nearer than this line survive
    pub level_up_keep_z: f32,
    /// Where the shop portal appears after a level-up
    pub portal_z: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            missile_speed: 12.0,
            barrel_speed: 5.0,
            barrel_level_scale: 0.1,
            cat_speed: 4.0,
            alien_fire_z: -90.0,

            boss_standoff: 25.0,
            boss_strafe_speed: 4.0,
            boss_strafe_per_level: 0.2,
            boss_strafe_margin: 2.0,
            boss_fire_interval: 1.2,
            boss_fire_per_level: 0.1,
            boss_fire_floor: 0.6,
            boss_projectile_speed: 20.0,
            player_projectile_speed: 30.0,
            boss_damage: 25,
            projectile_cutoff_z: -100.0,

            letter_interval_min: 100.0,
            letter_interval_max: 250.0,
            letter_resume_offset: 50.0,
            speed_boost_interval: 45.0,
            speed_boost_amount: 5.0,

            spawn_gap_base: 14.0,
            spawn_gap_per_level: 0.4,
            spawn_gap_per_speed: 0.4,
            spawn_gap_floor: 7.0,

            level_up_keep_z: -80.0,
            portal_z: -100.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Tuning file {} unreadable ({e}), using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Tuning file {} invalid ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Seconds between boss shots at a level
    pub fn boss_fire_cooldown(&self, level: u32) -> f32 {
        (self.boss_fire_interval - level as f32 * self.boss_fire_per_level)
            .max(self.boss_fire_floor)
    }

    /// Boss strafing speed at a level
    pub fn boss_strafe(&self, level: u32) -> f32 {
        self.boss_strafe_speed + level as f32 * self.boss_strafe_per_level
    }

    /// Barrel lateral speed at a level
    pub fn barrel_lateral_speed(&self, level: u32) -> f32 {
        self.barrel_speed * (1.0 + level as f32 * self.barrel_level_scale)
    }

    /// Minimum forward gap between the frontier and the next batch
    pub fn spawn_gap(&self, level: u32, speed: f32) -> f32 {
        (self.spawn_gap_base - level as f32 * self.spawn_gap_per_level
            + speed * self.spawn_gap_per_speed)
            .max(self.spawn_gap_floor)
    }
}
