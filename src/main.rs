//! Word Runner headless entry point
//!
//! Plays one seeded session with a simple autopilot and logs the outcome.
//!
//! Usage: `word-runner [seed] [seconds] [tuning.json]`

use std::collections::HashMap;

use glam::Vec3;

use word_runner::consts::MAX_DT;
use word_runner::sim::run::LIFE_CAP;
use word_runner::sim::{
    EntityKind, GameEvent, GameStatus, RunState, RunnerState, ShopItem, TickInput, World, tick,
};
use word_runner::{HighScores, Tuning, lane_x, max_lane};

/// Simulated frame length
const FRAME_DT: f32 = 1.0 / 60.0;
/// Max simulation steps per frame
const MAX_SUBSTEPS: u32 = 4;
/// Seconds between autopilot throws during a boss fight
const THROW_EVERY: f32 = 0.3;
/// How far ahead the autopilot looks for hazards
const LOOKAHEAD: f32 = 18.0;

const HIGH_SCORES_PATH: &str = "word_runner_scores.json";

/// One headless session
struct Session {
    run: RunState,
    state: RunnerState,
    player: Vec3,
    accumulator: f32,
    throw_timer: f32,
    elapsed: f32,
    tally: HashMap<&'static str, u32>,
}

impl Session {
    fn new(seed: u64, tuning: Tuning, high_scores: HighScores) -> Self {
        Self {
            run: RunState::with_high_scores(seed, high_scores),
            state: RunnerState::with_tuning(seed, tuning),
            player: Vec3::ZERO,
            accumulator: 0.0,
            throw_timer: 0.0,
            elapsed: 0.0,
            tally: HashMap::new(),
        }
    }

    /// Advance one rendered frame
    fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);
        self.elapsed += dt;

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.steer();
            let input = self.autopilot_input(FRAME_DT);
            tick(&mut self.state, &mut self.run, &self.player, &input, FRAME_DT.min(MAX_DT));
            self.run.update(FRAME_DT);
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }

        for event in self.state.drain_events() {
            let key = match event {
                GameEvent::Burst { .. } => "bursts",
                GameEvent::BossAttack { .. } => "boss attacks",
                GameEvent::PlayerHit => "hits taken",
                GameEvent::Sound(_) => "sounds",
            };
            *self.tally.entry(key).or_default() += 1;
        }

        if self.run.status() == GameStatus::Shop {
            self.shop();
        }
        if self.run.lives() == 1 && self.run.has_immortality() {
            self.run.activate_immortality();
        }
    }

    /// Move to the lane with the fewest hazards ahead
    fn steer(&mut self) {
        let reach = max_lane(self.run.lane_count());
        let danger = |lane: i32| {
            let x = lane_x(lane);
            self.state
                .entities()
                .iter()
                .filter(|e| e.kind.is_damage_source())
                .filter(|e| e.pos.z < self.player.z + 2.0 && e.pos.z > self.player.z - LOOKAHEAD)
                .filter(|e| (e.pos.x - x).abs() < 1.5)
                .count()
        };
        let letters = |lane: i32| {
            let x = lane_x(lane);
            self.state
                .entities()
                .iter()
                .filter(|e| e.kind == EntityKind::Letter && (e.pos.x - x).abs() < 1.0)
                .count()
        };

        let best = (-reach..=reach)
            .min_by_key(|&lane| (danger(lane), usize::MAX - letters(lane)))
            .unwrap_or(0);
        self.player.x = lane_x(best);
    }

    fn autopilot_input(&mut self, dt: f32) -> TickInput {
        if self.run.status() != GameStatus::BossFight {
            self.throw_timer = 0.0;
            return TickInput::default();
        }
        self.throw_timer += dt;
        if self.throw_timer >= THROW_EVERY {
            self.throw_timer = 0.0;
            TickInput { shoot: true }
        } else {
            TickInput::default()
        }
    }

    fn shop(&mut self) {
        for item in ShopItem::ALL {
            let wanted = match item {
                ShopItem::Heal => self.run.lives() < self.run.max_lives(),
                ShopItem::MaxLife => self.run.max_lives() < LIFE_CAP,
                ShopItem::Immortality => !self.run.has_immortality(),
                ShopItem::DoubleJump => !self.run.has_double_jump(),
            };
            if wanted && self.run.buy_item(item) {
                log::info!("Autopilot bought {item:?}, {} points left", self.run.score());
            }
        }
        self.run.close_shop();
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let seconds = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0f32);
    let tuning = args.next().map(Tuning::load).unwrap_or_default();

    log::info!("Word Runner (headless) starting with seed {seed} for {seconds}s");

    let mut session = Session::new(seed, tuning, HighScores::load(HIGH_SCORES_PATH));
    session.run.start_game();

    while session.elapsed < seconds && !session.run.status().is_final() {
        session.update(FRAME_DT);
    }

    // Runs that end in play report their distance from the tick; flush the rest
    if !session.run.status().is_final() {
        let distance = session.state.distance().floor() as u32;
        session.run.report_distance(distance);
    }

    log::info!(
        "Finished {:?} at level {} with {} points, {} gems, distance {:.0}",
        session.run.status(),
        session.run.level(),
        session.run.score(),
        session.run.gems(),
        session.state.distance()
    );
    let mut tally: Vec<_> = session.tally.iter().collect();
    tally.sort();
    for (name, count) in tally {
        log::info!("  {name}: {count}");
    }
    if session.run.new_record() {
        log::info!("New personal best!");
    }
    session.run.high_scores().save(HIGH_SCORES_PATH);
}
