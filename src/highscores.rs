//! Personal-best records
//!
//! Persisted as a small JSON file. Tracks the best score, distance, level and
//! gem count across runs, plus the furthest level reached for continuing.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Best results across all runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub max_score: u64,
    pub max_distance: u32,
    pub max_level: u32,
    pub max_gems: u32,
    /// Furthest level reached, where a continued run starts
    pub last_played_level: u32,
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            max_score: 0,
            max_distance: 0,
            max_level: 1,
            max_gems: 0,
            last_played_level: 1,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub score: u64,
    pub distance: u32,
    pub level: u32,
    pub gems: u32,
}

impl HighScores {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the records
    /// Returns true if any record was beaten
    pub fn record(&mut self, run: RunResult) -> bool {
        let mut beaten = false;
        if run.score > self.max_score {
            self.max_score = run.score;
            beaten = true;
        }
        if run.distance > self.max_distance {
            self.max_distance = run.distance;
            beaten = true;
        }
        if run.level > self.max_level {
            self.max_level = run.level;
            beaten = true;
        }
        if run.gems > self.max_gems {
            self.max_gems = run.gems;
            beaten = true;
        }
        self.advance_last_level(run.level);
        beaten
    }

    /// Remember a level as reached (never moves backwards)
    pub fn advance_last_level(&mut self, level: u32) -> bool {
        if level > self.last_played_level {
            self.last_played_level = level;
            true
        } else {
            false
        }
    }

    /// Level a continued run starts at
    pub fn continue_level(&self) -> u32 {
        self.last_played_level.max(1)
    }

    /// Load records from a JSON file, starting fresh on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = std::fs::read_to_string(path) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                log::info!(
                    "Loaded high scores (best {} points, level {})",
                    scores.max_score,
                    scores.max_level
                );
                scores
            }
            Err(e) => {
                log::warn!("High scores in {} unreadable: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Save records as JSON, logging instead of failing
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize high scores: {e}");
                return;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => log::info!("High scores saved to {}", path.display()),
            Err(e) => log::warn!("Could not save high scores to {}: {e}", path.display()),
        }
    }
}
