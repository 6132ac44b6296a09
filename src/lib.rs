//! Word Runner - simulation core for a lane-based endless runner
//!
//! Core modules:
//! - `sim`: Deterministic entity simulation (motion, collisions, spawning, lifecycle)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Personal-best records persisted as JSON

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Fixed world geometry
pub mod consts {
    /// Largest tick step fed to any integration formula (seconds)
    pub const MAX_DT: f32 = 0.05;

    /// Distance between lane centers
    pub const LANE_WIDTH: f32 = 2.2;
    /// Lane count at the start of every level
    pub const DEFAULT_LANE_COUNT: u32 = 3;

    /// Base forward speed of the world (units/s)
    pub const RUN_SPEED_BASE: f32 = 22.5;

    /// New batches are placed at least this far ahead of the player
    pub const SPAWN_DISTANCE: f32 = 25.0;
    /// Entities this far behind the player are retired
    pub const REMOVE_DISTANCE: f32 = 20.0;
    /// Frontier assumed when nothing is tracked yet
    pub const EMPTY_FRONTIER: f32 = -20.0;

    /// Half-depth of the forward band around the player where hitboxes are tested
    pub const COLLISION_ZONE: f32 = 2.0;
    /// Player vertical band: feet at position.y, head this far above
    pub const PLAYER_HEIGHT: f32 = 1.8;
}

/// Lateral position of a lane index
#[inline]
pub fn lane_x(lane: i32) -> f32 {
    lane as f32 * consts::LANE_WIDTH
}

/// Largest lane index reachable on either side of the center lane
#[inline]
pub fn max_lane(lane_count: u32) -> i32 {
    (lane_count / 2) as i32
}
