//! Run progression: score, lives, level, target word, boss and shop
//!
//! [`RunState`] is the stock [`World`] the simulation core talks to. It owns
//! everything the core only reads or reports into, and decides status changes
//! (boss fights, shop, game over, victory).

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::BossKind;
use super::words;
use super::world::{GameStatus, World};
use crate::consts::{DEFAULT_LANE_COUNT, RUN_SPEED_BASE};
use crate::highscores::{HighScores, RunResult};

pub const STARTING_LIVES: u32 = 3;
pub const LIFE_CAP: u32 = 5;
/// Score awarded for beating a boss
pub const BOSS_BONUS: u64 = 5000;
/// Seconds an activated immortality lasts
pub const IMMORTALITY_SECS: f32 = 25.0;
/// Every third level is a boss fight
pub const BOSS_LEVEL_EVERY: u32 = 3;
/// Share of base speed added per new letter
const LETTER_SPEEDUP: f32 = 0.1;

/// Things the shop sells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    DoubleJump,
    MaxLife,
    Heal,
    Immortality,
}

impl ShopItem {
    pub const ALL: [ShopItem; 4] = [
        ShopItem::DoubleJump,
        ShopItem::MaxLife,
        ShopItem::Heal,
        ShopItem::Immortality,
    ];

    pub fn cost(self) -> u64 {
        match self {
            ShopItem::DoubleJump => 1000,
            ShopItem::MaxLife => 1500,
            ShopItem::Heal => 1000,
            ShopItem::Immortality => 3000,
        }
    }
}

/// Progression state of the current run
#[derive(Debug, Clone)]
pub struct RunState {
    status: GameStatus,
    score: u64,
    lives: u32,
    max_lives: u32,
    speed: f32,
    level: u32,
    lane_count: u32,
    word: Vec<char>,
    collected: Vec<usize>,
    gems: u32,

    has_double_jump: bool,
    has_immortality: bool,
    /// Seconds of immortality left, when active
    immortal_for: Option<f32>,

    boss: Option<BossKind>,
    boss_hp: u32,
    max_boss_hp: u32,

    high_scores: HighScores,
    new_record: bool,
    rng: Pcg32,
}

impl RunState {
    pub fn new(seed: u64) -> Self {
        Self::with_high_scores(seed, HighScores::new())
    }

    /// Start at the menu with previously saved records
    pub fn with_high_scores(seed: u64, high_scores: HighScores) -> Self {
        Self {
            status: GameStatus::Menu,
            score: 0,
            lives: STARTING_LIVES,
            max_lives: STARTING_LIVES,
            speed: 0.0,
            level: 1,
            lane_count: DEFAULT_LANE_COUNT,
            word: Vec::new(),
            collected: Vec::new(),
            gems: 0,
            has_double_jump: false,
            has_immortality: false,
            immortal_for: None,
            boss: None,
            boss_hp: 0,
            max_boss_hp: 0,
            high_scores,
            new_record: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    // === Accessors ===

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn gems(&self) -> u32 {
        self.gems
    }

    pub fn has_double_jump(&self) -> bool {
        self.has_double_jump
    }

    pub fn has_immortality(&self) -> bool {
        self.has_immortality
    }

    pub fn immortality_active(&self) -> bool {
        self.immortal_for.is_some()
    }

    /// Remaining and maximum boss HP
    pub fn boss_hp(&self) -> (u32, u32) {
        (self.boss_hp, self.max_boss_hp)
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Whether the last finished run beat a record
    pub fn new_record(&self) -> bool {
        self.new_record
    }

    // === Run lifecycle ===

    /// Fresh run from level 1
    pub fn start_game(&mut self) {
        self.begin(1);
    }

    /// Fresh run from the furthest level reached
    pub fn continue_game(&mut self) {
        self.begin(self.high_scores.continue_level());
    }

    pub fn restart_game(&mut self) {
        self.begin(1);
    }

    fn begin(&mut self, level: u32) {
        self.status = GameStatus::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.max_lives = STARTING_LIVES;
        self.speed = RUN_SPEED_BASE;
        self.level = level;
        self.lane_count = DEFAULT_LANE_COUNT;
        self.word = words::random_word(&mut self.rng);
        self.collected.clear();
        self.gems = 0;
        self.has_double_jump = false;
        self.has_immortality = false;
        self.immortal_for = None;
        self.boss = None;
        self.boss_hp = 0;
        self.max_boss_hp = 0;
        self.new_record = false;
        log::info!("New run at level {level}, word has {} letters", self.word.len());
    }

    /// Lose a life unless immortal; the last one ends the run
    pub fn take_damage(&mut self) {
        if self.immortality_active() {
            return;
        }
        self.has_double_jump = false;
        if self.lives > 1 {
            self.lives -= 1;
            log::debug!("Hit, {} lives left", self.lives);
        } else {
            self.lives = 0;
            self.speed = 0.0;
            self.status = GameStatus::GameOver;
            log::info!("Game over at level {} with {} points", self.level, self.score);
        }
    }

    /// Move to the next level: a new word, a boss fight, or victory
    pub fn advance_level(&mut self) {
        let next = self.level + 1;
        if self.high_scores.advance_last_level(next) {
            log::debug!("Furthest level now {next}");
        }

        if next > words::level_count() {
            self.level = next;
            self.speed = 0.0;
            self.status = GameStatus::Victory;
            log::info!("Victory! Every word spelled");
            return;
        }

        self.level = next;
        self.collected.clear();

        if next % BOSS_LEVEL_EVERY == 0 {
            let boss = BossKind::for_encounter(next / BOSS_LEVEL_EVERY);
            let hp = (500 + 50 * next) * 2;
            self.boss = Some(boss);
            self.boss_hp = hp;
            self.max_boss_hp = hp;
            self.word.clear();
            self.status = GameStatus::BossFight;
            log::info!("Level {next}: {boss:?} appears with {hp} HP");
            return;
        }

        self.word = words::random_word(&mut self.rng);
        self.lane_count = DEFAULT_LANE_COUNT;
        self.speed = RUN_SPEED_BASE;
        self.boss = None;
        self.status = GameStatus::Playing;
    }

    /// Boss beaten: bonus, next level, back to running
    pub fn defeat_boss(&mut self) {
        self.score += BOSS_BONUS;
        self.level += 1;
        self.high_scores.advance_last_level(self.level);
        self.word = words::random_word(&mut self.rng);
        self.collected.clear();
        self.boss = None;
        self.boss_hp = 0;
        self.speed = RUN_SPEED_BASE;
        self.status = GameStatus::Playing;
        log::info!("Boss defeated, on to level {}", self.level);
    }

    pub fn close_shop(&mut self) {
        if self.status == GameStatus::Shop {
            self.status = GameStatus::Playing;
        }
    }

    /// Spend score on an item; false if it cannot be afforded
    pub fn buy_item(&mut self, item: ShopItem) -> bool {
        let cost = item.cost();
        if self.score < cost {
            return false;
        }
        self.score -= cost;
        match item {
            ShopItem::DoubleJump => self.has_double_jump = true,
            ShopItem::MaxLife => {
                self.max_lives = (self.max_lives + 1).min(LIFE_CAP);
                self.lives = (self.lives + 1).min(self.max_lives);
            }
            ShopItem::Heal => self.lives = (self.lives + 1).min(self.max_lives),
            ShopItem::Immortality => self.has_immortality = true,
        }
        log::debug!("Bought {item:?} for {cost}");
        true
    }

    /// Use an owned immortality; returns whether it started
    pub fn activate_immortality(&mut self) -> bool {
        if !self.has_immortality || self.immortality_active() {
            return false;
        }
        self.has_immortality = false;
        self.immortal_for = Some(IMMORTALITY_SECS);
        log::info!("Immortality active for {IMMORTALITY_SECS}s");
        true
    }

    /// Advance real-time timers
    pub fn update(&mut self, dt: f32) {
        if let Some(left) = self.immortal_for {
            let left = left - dt;
            if left <= 0.0 {
                self.immortal_for = None;
                log::info!("Immortality wore off");
            } else {
                self.immortal_for = Some(left);
            }
        }
    }

    /// Fold the finished run into the personal bests
    pub fn check_high_scores(&mut self, distance: u32) {
        self.new_record = self.high_scores.record(RunResult {
            score: self.score,
            distance,
            level: self.level,
            gems: self.gems,
        });
        if self.new_record {
            log::info!("New personal best");
        }
    }
}

impl World for RunState {
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
        self.immortality_active()
    }

    fn collect_gem(&mut self, value: u32) {
        self.score += u64::from(value);
        self.gems += 1;
    }

    fn collect_letter(&mut self, index: usize) {
        if self.word.is_empty() || self.collected.contains(&index) {
            return;
        }
        self.collected.push(index);
        self.speed += RUN_SPEED_BASE * LETTER_SPEEDUP;
        if self.collected.len() == self.word.len() {
            self.advance_level();
        }
    }

    fn player_hit(&mut self) {
        self.take_damage();
    }

    fn damage_boss(&mut self, amount: u32) {
        if self.status != GameStatus::BossFight {
            return;
        }
        self.boss_hp = self.boss_hp.saturating_sub(amount);
        if self.boss_hp == 0 {
            self.defeat_boss();
        }
    }

    fn open_shop(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Shop;
        }
    }

    fn increase_speed(&mut self, amount: f32) {
        self.speed += amount;
    }

    fn report_distance(&mut self, distance: u32) {
        self.check_high_scores(distance);
    }
}
