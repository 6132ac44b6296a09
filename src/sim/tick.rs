//! Per-frame simulation tick
//!
//! Drives one frame of the runner: status transitions, motion, collisions,
//! spawning and pool cleanup, in that order. Motion completes for every
//! entity before any collision is tested.

use glam::Vec3;

use super::collision;
use super::entity::{BossKind, Entity, EntityKind};
use super::events::SoundEffect;
use super::motion::{self, MotionContext};
use super::spawn;
use super::state::RunnerState;
use super::world::{GameStatus, PlayerAnchor, World};
use crate::consts::{MAX_DT, SPAWN_DISTANCE};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Throw a projectile at the boss
    pub shoot: bool,
}

/// Height player projectiles fly at
const SHOT_Y: f32 = 1.5;

/// Whether an entity belongs to a boss encounter
pub fn is_boss_entity(kind: EntityKind) -> bool {
    matches!(kind, EntityKind::Boss | EntityKind::BossProjectile)
}

/// Advance the simulation by one frame
pub fn tick(
    state: &mut RunnerState,
    world: &mut dyn World,
    player: &dyn PlayerAnchor,
    input: &TickInput,
    dt: f32,
) {
    apply_transitions(state, world);

    let status = world.status();
    if !status.is_running() {
        return;
    }

    let dt = dt.clamp(0.0, MAX_DT);
    let player = player.position().unwrap_or(Vec3::ZERO);
    let level = world.level();

    if status == GameStatus::Playing {
        state.speed_timer += dt;
        if state.speed_timer >= state.tuning.speed_boost_interval {
            world.increase_speed(state.tuning.speed_boost_amount);
            state.speed_timer = 0.0;
            log::debug!("Speed boost at distance {:.0}", state.distance);
        }
    }

    if input.shoot && status == GameStatus::BossFight {
        let id = state.next_entity_id();
        let pos = Vec3::new(player.x, SHOT_Y, player.z - 1.0);
        state.entities.push(Entity::new(id, EntityKind::PlayerProjectile, pos));
        state.events.sound(SoundEffect::Throw);
    }

    let scroll = world.scroll_speed() * dt;
    state.distance += scroll;

    let ctx = MotionContext {
        dt,
        scroll,
        level,
        lane_count: world.lane_count(),
        player,
    };
    let spawned = motion::integrate(state, &ctx, status == GameStatus::BossFight);

    collision::resolve(state, world, player);
    collision::retire_trailing(&mut state.entities, player.z);
    state.entities.extend(spawned);

    if status == GameStatus::Playing {
        spawn::direct(state, world);
    }

    state.entities.retain(|e| e.active);

    apply_transitions(state, world);
}

/// React to status and level changes since the last observation
fn apply_transitions(state: &mut RunnerState, world: &mut dyn World) {
    let status = world.status();
    let level = world.level();
    let prev = state.prev_status;
    let entered = status != prev;

    if entered && status == GameStatus::Menu {
        log::info!("Back to menu, clearing track");
        state.reset_run();
    } else if entered
        && status == GameStatus::Playing
        && matches!(prev, GameStatus::Menu | GameStatus::GameOver | GameStatus::Victory)
    {
        log::info!("Run started at level {level}");
        state.reset_run();
    } else if entered && status == GameStatus::BossFight {
        start_boss(state, world, level);
    } else if entered && prev == GameStatus::BossFight && status == GameStatus::Playing {
        state.entities.retain(|e| !is_boss_entity(e.kind));
        state.next_letter_distance = state.distance + state.tuning.letter_resume_offset;
        state.speed_timer = 0.0;
        log::info!("Boss defeated, resuming at level {level}");
    } else if entered && status.is_final() {
        let distance = state.distance.floor() as u32;
        log::info!("Run ended ({status:?}) at distance {distance}");
        world.report_distance(distance);
    } else if status == GameStatus::Playing && level > state.prev_level {
        level_up(state, level);
    }

    if status != GameStatus::BossFight {
        let before = state.entities.len();
        state.entities.retain(|e| e.kind != EntityKind::Boss);
        if state.entities.len() != before {
            log::trace!("Stripped stray boss outside boss fight");
        }
    }

    state.prev_status = status;
    // A level gained while shopping is applied once play resumes
    if status != GameStatus::Shop {
        state.prev_level = level;
    }
}

fn start_boss(state: &mut RunnerState, world: &dyn World, level: u32) {
    state.entities.clear();
    state.boss_timer = 0.0;
    state.boss_shots = 0;

    let boss = world
        .boss_kind()
        .unwrap_or_else(|| BossKind::for_encounter(level / 3));
    let id = state.next_entity_id();
    let pos = Vec3::new(0.0, 0.0, -state.tuning.boss_standoff);
    state.entities.push(Entity::boss(id, pos, boss));
    log::info!("Boss fight against {boss:?} at level {level}");
}

fn level_up(state: &mut RunnerState, level: u32) {
    let keep = state.tuning.level_up_keep_z;
    state.entities.retain(|e| e.pos.z > keep);

    let id = state.next_entity_id();
    let portal = Vec3::new(0.0, 0.0, state.tuning.portal_z);
    state.entities.push(Entity::new(id, EntityKind::ShopPortal, portal));

    state.next_letter_distance = state.distance - SPAWN_DISTANCE + state.letter_interval();
    state.speed_timer = 0.0;
    log::info!("Level {level} reached at distance {:.0}", state.distance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::GameEvent;
    use crate::sim::run::RunState;
    use crate::sim::world::recording::RecordingWorld;

    const DT: f32 = 1.0 / 60.0;

    fn running(world: &mut RecordingWorld, seed: u64) -> RunnerState {
        let mut state = RunnerState::new(seed);
        tick(&mut state, world, &Vec3::ZERO, &TickInput::default(), 0.0);
        state
    }

    #[test]
    fn test_gem_collected_in_one_tick() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 1);
        state.entities.clear();
        state.drain_events();
        let id = state.next_entity_id();
        state.insert(Entity::gem(id, Vec3::new(0.0, 1.2, 0.0), 50));

        tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);

        assert!(state.entities().iter().all(|e| e.id != id));
        assert_eq!(world.score, 50);
        let events = state.drain_events();
        let gem_sounds = events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundEffect::GemCollect))
            .count();
        assert_eq!(gem_sounds, 1);
    }

    #[test]
    fn test_scroll_linear_with_clamped_dt() {
        let mut world = RecordingWorld::playing();
        world.speed = 20.0;
        let mut state = running(&mut world, 2);
        let id = state.next_entity_id();
        state.insert(Entity::new(id, EntityKind::Obstacle, Vec3::new(0.0, 0.8, -100.0)));

        let n = 10;
        for _ in 0..n {
            // Frame hitch: clamped to MAX_DT
            tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), 0.5);
        }
        let obstacle = state.entities().iter().find(|e| e.id == id).unwrap();
        let expected = -100.0 + 20.0 * MAX_DT * n as f32;
        assert!((obstacle.pos.z - expected).abs() < 1e-3);
        assert!((state.distance() - 20.0 * MAX_DT * n as f32).abs() < 1e-3);
    }

    #[test]
    fn test_boss_start_clears_pool() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 3);
        for _ in 0..30 {
            tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);
        }
        assert!(!state.entities().is_empty());

        world.status = GameStatus::BossFight;
        world.boss = Some(BossKind::Stilyan);
        tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);

        assert_eq!(state.count_kind(EntityKind::Boss), 1);
        assert!(state
            .entities()
            .iter()
            .all(|e| is_boss_entity(e.kind)));
        assert_eq!(state.boss().and_then(Entity::boss_kind), Some(BossKind::Stilyan));
    }

    #[test]
    fn test_boss_defeat_removes_only_boss_entities() {
        let mut world = RecordingWorld::boss_fight(BossKind::Kalin);
        let mut state = running(&mut world, 4);
        assert_eq!(state.count_kind(EntityKind::Boss), 1);

        let obstacle_id = state.next_entity_id();
        state.insert(Entity::new(obstacle_id, EntityKind::Obstacle, Vec3::new(2.2, 0.8, -60.0)));
        let shot_id = state.next_entity_id();
        state.insert(Entity::boss_projectile(
            shot_id,
            Vec3::new(0.0, 2.0, -20.0),
            Vec3::Z,
            crate::sim::entity::ProjectileVariant::Potato,
        ));

        world.status = GameStatus::Playing;
        world.boss = None;
        apply_transitions(&mut state, &mut world);

        assert_eq!(state.count_kind(EntityKind::Boss), 0);
        assert_eq!(state.count_kind(EntityKind::BossProjectile), 0);
        assert!(state.entities().iter().any(|e| e.id == obstacle_id));
        assert!((state.next_letter_distance() - (state.distance() + 50.0)).abs() < 1e-4);
    }

    #[test]
    fn test_boss_filter_predicate() {
        assert!(is_boss_entity(EntityKind::Boss));
        assert!(is_boss_entity(EntityKind::BossProjectile));
        assert!(!is_boss_entity(EntityKind::PlayerProjectile));
        assert!(!is_boss_entity(EntityKind::Obstacle));
    }

    #[test]
    fn test_stray_boss_stripped_while_playing() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 5);
        let id = state.next_entity_id();
        state.insert(Entity::boss(id, Vec3::new(0.0, 0.0, -25.0), BossKind::Nikolai));
        tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);
        assert_eq!(state.count_kind(EntityKind::Boss), 0);
    }

    #[test]
    fn test_player_shot_damages_boss_once() {
        let mut world = RecordingWorld::boss_fight(BossKind::Nikolai);
        let mut state = running(&mut world, 6);
        let shoot = TickInput { shoot: true };
        tick(&mut state, &mut world, &Vec3::ZERO, &shoot, DT);

        for _ in 0..120 {
            tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);
        }
        assert_eq!(world.boss_damage, vec![25]);
        assert_eq!(state.count_kind(EntityKind::PlayerProjectile), 0);
    }

    #[test]
    fn test_shoot_ignored_outside_boss_fight() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 7);
        tick(&mut state, &mut world, &Vec3::ZERO, &TickInput { shoot: true }, DT);
        assert_eq!(state.count_kind(EntityKind::PlayerProjectile), 0);
    }

    #[test]
    fn test_level_up_filters_and_injects_portal() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 8);
        state.entities.clear();
        let near = state.next_entity_id();
        state.insert(Entity::new(near, EntityKind::Obstacle, Vec3::new(0.0, 0.8, -50.0)));
        let far = state.next_entity_id();
        state.insert(Entity::new(far, EntityKind::Obstacle, Vec3::new(0.0, 0.8, -90.0)));

        state.distance = 400.0;
        world.level = 2;
        apply_transitions(&mut state, &mut world);

        assert!(state.entities().iter().any(|e| e.id == near));
        assert!(state.entities().iter().all(|e| e.id != far));
        let portal = state
            .entities()
            .iter()
            .find(|e| e.kind == EntityKind::ShopPortal)
            .unwrap();
        assert_eq!(portal.pos.z, -100.0);

        let base = 400.0 - SPAWN_DISTANCE;
        assert!((base + 100.0..base + 250.0).contains(&state.next_letter_distance()));
    }

    #[test]
    fn test_level_gained_while_shopping_applies_on_resume() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 12);
        state.entities.clear();
        state.distance = 300.0;
        state.next_letter_distance = 1000.0;

        // Word completed and portal entered in the same tick
        world.level = 2;
        world.status = GameStatus::Shop;
        apply_transitions(&mut state, &mut world);
        assert_eq!(state.count_kind(EntityKind::ShopPortal), 0);

        world.status = GameStatus::Playing;
        apply_transitions(&mut state, &mut world);
        assert_eq!(state.count_kind(EntityKind::ShopPortal), 1);
        let base = 300.0 - SPAWN_DISTANCE;
        assert!((base + 100.0..base + 250.0).contains(&state.next_letter_distance()));

        // Applied once only
        apply_transitions(&mut state, &mut world);
        assert_eq!(state.count_kind(EntityKind::ShopPortal), 1);
    }

    #[test]
    fn test_restart_clears_pool_and_distance() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 9);
        for _ in 0..60 {
            tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);
        }
        world.status = GameStatus::GameOver;
        tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), DT);
        assert_eq!(world.distances.len(), 1);
        assert_eq!(world.distances[0], state.distance().floor() as u32);

        world.status = GameStatus::Playing;
        tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), 0.0);
        assert_eq!(state.distance(), 0.0);
        assert!(state.entities().iter().all(|e| e.pos.z < -20.0));
    }

    #[test]
    fn test_speed_boost_timer() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 10);
        // 50 seconds of play: one boost at 45
        for _ in 0..1000 {
            tick(&mut state, &mut world, &Vec3::ZERO, &TickInput::default(), MAX_DT);
        }
        assert_eq!(world.speed_boosts, vec![5.0]);
    }

    #[test]
    fn test_missing_player_defaults_to_origin() {
        let mut world = RecordingWorld::playing();
        let mut state = running(&mut world, 11);
        state.entities.clear();
        let id = state.next_entity_id();
        state.insert(Entity::gem(id, Vec3::new(0.0, 1.2, 0.0), 50));
        let anchor: Option<Vec3> = None;
        tick(&mut state, &mut world, &anchor, &TickInput::default(), DT);
        assert_eq!(world.score, 50);
    }

    #[test]
    fn test_same_seed_same_track() {
        let mut world_a = RecordingWorld::playing();
        let mut world_b = RecordingWorld::playing();
        let mut a = running(&mut world_a, 99);
        let mut b = running(&mut world_b, 99);
        // Player hovers out of reach so nothing is collected
        let player = Vec3::new(40.0, 0.0, 0.0);
        for _ in 0..600 {
            tick(&mut a, &mut world_a, &player, &TickInput::default(), DT);
            tick(&mut b, &mut world_b, &player, &TickInput::default(), DT);
        }
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn test_invariants_over_long_session() {
        let mut run = RunState::new(2024);
        run.start_game();
        let mut state = RunnerState::new(2024);
        let mut lane = 0i32;

        for frame in 0..20_000u32 {
            // Wander between lanes and shoot now and then
            if frame % 90 == 0 {
                lane = if lane >= 1 { -1 } else { lane + 1 };
            }
            let player = Vec3::new(crate::lane_x(lane), 0.0, 0.0);
            let input = TickInput {
                shoot: frame % 20 == 0,
            };
            tick(&mut state, &mut run, &player, &input, DT);
            run.update(DT);
            if run.status() == GameStatus::Shop {
                run.close_shop();
            }
            if run.status().is_final() {
                run.start_game();
            }

            let bosses = state.count_kind(EntityKind::Boss);
            assert!(bosses <= 1);
            if run.status() != GameStatus::BossFight {
                assert_eq!(bosses, 0, "boss outside boss fight at frame {frame}");
            }
            assert!(state.entities().iter().all(|e| e.active));

            let mut indices: Vec<usize> = state.active_letter_indices().collect();
            let total = indices.len();
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), total, "duplicate letter index at frame {frame}");
        }
    }
}
