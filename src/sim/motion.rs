//! Per-frame motion
//!
//! Every active entity advances by the rule its kind profile names. Entities
//! created by other entities (alien missiles, boss shots) are returned to the
//! caller instead of being pushed into the pool mid-pass.

use glam::Vec3;

use super::entity::{Entity, EntityKind, MotionRule, Payload};
use super::events::{GameEvent, SoundEffect};
use super::state::RunnerState;
use crate::consts::LANE_WIDTH;
use crate::tuning::Tuning;

/// Inputs shared by every entity during one integration pass
#[derive(Debug, Clone, Copy)]
pub struct MotionContext {
    /// Clamped tick duration (seconds)
    pub dt: f32,
    /// World scroll this tick (speed * dt)
    pub scroll: f32,
    pub level: u32,
    pub lane_count: u32,
    pub player: Vec3,
}

impl MotionContext {
    /// Lateral limit of boss strafing
    pub fn boss_bound(&self, tuning: &Tuning) -> f32 {
        self.lane_count as f32 * LANE_WIDTH / 2.0 + tuning.boss_strafe_margin
    }
}

/// Height boss projectiles leave from
const BOSS_MUZZLE_Y: f32 = 2.0;
/// Height boss projectiles aim at
const BOSS_AIM_Y: f32 = 1.0;
/// Height alien missiles fly at
const MISSILE_Y: f32 = 1.5;

/// Lateral position on a sine path; a pure function of forward position
#[inline]
pub fn sine_lateral(origin_x: f32, amplitude: f32, frequency: f32, z: f32, phase: f32) -> f32 {
    origin_x + (z * frequency + phase).sin() * amplitude
}

/// Advance one entity. Returns the position of a missile an alien wants to fire.
pub fn step_entity(entity: &mut Entity, ctx: &MotionContext, tuning: &Tuning) -> Option<Vec3> {
    let dt = ctx.dt;
    match entity.kind.profile().motion {
        MotionRule::Scroll => entity.pos.z += ctx.scroll,
        MotionRule::Chaser => entity.pos.z += ctx.scroll + tuning.missile_speed * dt,
        MotionRule::Roll => {
            entity.pos.z += ctx.scroll;
            let direction = match entity.payload {
                Payload::Crossing { direction } => direction,
                _ => -1.0,
            };
            entity.pos.x += direction * tuning.barrel_lateral_speed(ctx.level) * dt;
        }
        MotionRule::Cross => {
            entity.pos.z += ctx.scroll;
            let direction = match entity.payload {
                Payload::Crossing { direction } => direction,
                _ => 1.0,
            };
            entity.pos.x += direction * tuning.cat_speed * dt;
        }
        MotionRule::Sine {
            amplitude,
            frequency,
        } => {
            entity.pos.z += ctx.scroll;
            if let Payload::Sine { origin_x, phase } = entity.payload {
                entity.pos.x = sine_lateral(origin_x, amplitude, frequency, entity.pos.z, phase);
            }
        }
        MotionRule::PlayerShot => entity.pos.z -= tuning.player_projectile_speed * dt,
        MotionRule::Ballistic => {
            if let Payload::Ballistic { vel, .. } = entity.payload {
                entity.pos += vel * dt;
            }
            entity.pos.z += ctx.scroll;
        }
        MotionRule::Boss => {
            entity.pos.z = ctx.player.z - tuning.boss_standoff;
            let bound = ctx.boss_bound(tuning);
            if let Payload::Boss { direction, .. } = &mut entity.payload {
                entity.pos.x += *direction * tuning.boss_strafe(ctx.level) * dt;
                if entity.pos.x > bound {
                    *direction = -1.0;
                } else if entity.pos.x < -bound {
                    *direction = 1.0;
                }
            }
        }
    }

    // One-shot alien throw once it is close enough
    if let Payload::Alien { fired } = &mut entity.payload {
        if !*fired && entity.pos.z > tuning.alien_fire_z {
            *fired = true;
            return Some(entity.pos);
        }
    }
    None
}

/// Advance every active entity and run boss fire.
///
/// Returns entities created this pass; the caller appends them after
/// collision resolution so nothing spawned here is tested in the same tick.
pub(crate) fn integrate(state: &mut RunnerState, ctx: &MotionContext, boss_fight: bool) -> Vec<Entity> {
    let mut throws = Vec::new();
    for entity in state.entities.iter_mut().filter(|e| e.active) {
        if let Some(at) = step_entity(entity, ctx, &state.tuning) {
            throws.push(at);
        }
    }

    let mut spawned = Vec::with_capacity(throws.len() + 1);
    for at in throws {
        let id = state.next_entity_id();
        let mut missile = Entity::new(id, EntityKind::Missile, Vec3::new(at.x, MISSILE_Y, at.z + 2.0));
        missile.color = super::entity::ALIEN_COLOR;
        spawned.push(missile);
        state.events.burst(at, super::entity::ALIEN_COLOR);
        log::trace!("Alien at z={:.1} threw missile {}", at.z, id);
    }

    if boss_fight {
        if let Some(shot) = boss_fire(state, ctx) {
            spawned.push(shot);
        }
    }

    spawned
}

/// Tick the boss cooldown and fire at the player when it elapses
fn boss_fire(state: &mut RunnerState, ctx: &MotionContext) -> Option<Entity> {
    let (boss_id, boss_pos, boss) = state
        .entities
        .iter()
        .find(|e| e.kind == EntityKind::Boss && e.active)
        .and_then(|e| e.boss_kind().map(|kind| (e.id, e.pos, kind)))?;

    state.boss_timer += ctx.dt;
    if state.boss_timer <= state.tuning.boss_fire_cooldown(ctx.level) {
        return None;
    }
    state.boss_timer = 0.0;

    let muzzle = Vec3::new(boss_pos.x, BOSS_MUZZLE_Y, boss_pos.z);
    let target = Vec3::new(ctx.player.x, BOSS_AIM_Y, ctx.player.z);
    let vel = (target - muzzle).normalize_or_zero() * state.tuning.boss_projectile_speed;

    let variants = boss.projectiles();
    let variant = variants[state.boss_shots as usize % variants.len()];
    state.boss_shots += 1;

    let id = state.next_entity_id();
    state.events.push(GameEvent::BossAttack { boss_id, boss });
    state.events.sound(SoundEffect::boss_voice(boss));
    log::debug!("{boss:?} fired {variant:?} (shot {})", state.boss_shots);

    Some(Entity::boss_projectile(
        id,
        muzzle + Vec3::new(0.0, 0.0, 2.0),
        vel,
        variant,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{BossKind, ProjectileVariant};
    use proptest::prelude::*;

    fn ctx(dt: f32, speed: f32) -> MotionContext {
        MotionContext {
            dt,
            scroll: speed * dt,
            level: 1,
            lane_count: 3,
            player: Vec3::ZERO,
        }
    }

    #[test]
    fn test_scroll_is_linear() {
        let tuning = Tuning::default();
        let mut obstacle = Entity::new(1, EntityKind::Obstacle, Vec3::new(0.0, 0.8, -100.0));
        let c = ctx(0.05, 20.0);
        for _ in 0..10 {
            step_entity(&mut obstacle, &c, &tuning);
        }
        assert!((obstacle.pos.z - (-100.0 + 20.0 * 0.05 * 10.0)).abs() < 1e-3);
        assert_eq!(obstacle.pos.x, 0.0);
    }

    #[test]
    fn test_missile_outruns_scroll() {
        let tuning = Tuning::default();
        let mut missile = Entity::new(1, EntityKind::Missile, Vec3::new(0.0, 1.5, -50.0));
        step_entity(&mut missile, &ctx(0.05, 20.0), &tuning);
        assert!((missile.pos.z - (-50.0 + (20.0 + 12.0) * 0.05)).abs() < 1e-4);
    }

    #[test]
    fn test_player_shot_ignores_scroll() {
        let tuning = Tuning::default();
        let mut shot = Entity::new(1, EntityKind::PlayerProjectile, Vec3::new(0.0, 1.5, -1.0));
        step_entity(&mut shot, &ctx(0.05, 100.0), &tuning);
        assert!((shot.pos.z - (-1.0 - 30.0 * 0.05)).abs() < 1e-4);
    }

    #[test]
    fn test_barrel_rolls_with_level_scaling() {
        let tuning = Tuning::default();
        let mut barrel = Entity::crossing(1, EntityKind::Barrel, Vec3::new(7.3, 0.5, -40.0), -1.0);
        let mut c = ctx(0.05, 20.0);
        c.level = 5;
        step_entity(&mut barrel, &c, &tuning);
        assert!((barrel.pos.x - (7.3 - 5.0 * 1.5 * 0.05)).abs() < 1e-4);
    }

    #[test]
    fn test_cat_crosses() {
        let tuning = Tuning::default();
        let mut cat = Entity::crossing(1, EntityKind::Cat, Vec3::new(-6.0, 0.2, -40.0), 1.0);
        step_entity(&mut cat, &ctx(0.05, 20.0), &tuning);
        assert!((cat.pos.x - (-6.0 + 4.0 * 0.05)).abs() < 1e-4);
    }

    #[test]
    fn test_ballistic_adds_scroll_on_forward_only() {
        let tuning = Tuning::default();
        let vel = Vec3::new(1.0, -1.0, 10.0);
        let mut shot = Entity::boss_projectile(1, Vec3::new(0.0, 2.0, -23.0), vel, ProjectileVariant::Bottle);
        step_entity(&mut shot, &ctx(0.1, 20.0), &tuning);
        assert!((shot.pos - Vec3::new(0.1, 1.9, -23.0 + 1.0 + 2.0)).length() < 1e-4);
    }

    #[test]
    fn test_boss_pinned_and_bounces() {
        let tuning = Tuning::default();
        let mut boss = Entity::boss(1, Vec3::new(0.0, 0.0, -25.0), BossKind::Kalin);
        let mut c = ctx(0.05, 20.0);
        c.player = Vec3::new(0.0, 0.0, 3.0);
        let bound = c.boss_bound(&tuning);

        let mut saw_reverse = false;
        for _ in 0..200 {
            step_entity(&mut boss, &c, &tuning);
            assert_eq!(boss.pos.z, 3.0 - 25.0);
            assert!(boss.pos.x.abs() <= bound + 1.0);
            if let Payload::Boss { direction, .. } = boss.payload {
                saw_reverse |= direction < 0.0;
            }
        }
        assert!(saw_reverse);
    }

    #[test]
    fn test_alien_fires_once() {
        let tuning = Tuning::default();
        let mut alien = Entity::alien(1, Vec3::new(2.2, 1.5, -90.5));
        let c = ctx(0.05, 20.0);
        let first = step_entity(&mut alien, &c, &tuning);
        assert!(first.is_some());
        for _ in 0..20 {
            assert!(step_entity(&mut alien, &c, &tuning).is_none());
        }
    }

    #[test]
    fn test_alien_holds_fire_on_the_line() {
        let tuning = Tuning::default();
        let mut alien = Entity::alien(1, Vec3::new(0.0, 1.5, -91.0));
        let c = ctx(0.05, 20.0);
        // Lands exactly on the fire line
        assert!(step_entity(&mut alien, &c, &tuning).is_none());
        assert_eq!(alien.pos.z, tuning.alien_fire_z);
        assert_eq!(alien.payload, Payload::Alien { fired: false });

        assert!(step_entity(&mut alien, &c, &tuning).is_some());
    }

    #[test]
    fn test_boss_fire_rotates_variants() {
        let mut state = RunnerState::new(3);
        let id = state.next_entity_id();
        state.insert(Entity::boss(id, Vec3::new(0.0, 0.0, -25.0), BossKind::Kalin));
        let c = ctx(0.05, 20.0);

        let mut variants = Vec::new();
        for _ in 0..200 {
            for shot in integrate(&mut state, &c, true) {
                if let Payload::Ballistic { variant, vel } = shot.payload {
                    assert!((vel.length() - 20.0).abs() < 1e-3);
                    assert!(vel.z > 0.0);
                    variants.push(variant);
                }
            }
        }
        assert!(variants.len() >= 2);
        assert_eq!(variants[0], ProjectileVariant::Steak);
        assert_eq!(variants[1], ProjectileVariant::Potato);
        assert!(state.events().iter().any(|e| matches!(e, GameEvent::BossAttack { boss_id, .. } if *boss_id == id)));
    }

    proptest! {
        #[test]
        fn prop_sine_path_is_pure(
            origin in -3.0f32..3.0,
            phase in 0.0f32..std::f32::consts::TAU,
            zs in proptest::collection::vec(-150.0f32..20.0, 1..40),
        ) {
            let first: Vec<f32> = zs.iter().map(|&z| sine_lateral(origin, 2.0, 0.1, z, phase)).collect();
            let second: Vec<f32> = zs.iter().map(|&z| sine_lateral(origin, 2.0, 0.1, z, phase)).collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_zigzag_independent_of_step_history(
            phase in 0.0f32..std::f32::consts::TAU,
            steps in proptest::collection::vec(0.001f32..0.05, 1..30),
        ) {
            let tuning = Tuning::default();
            let mut crate_ = Entity::sine(1, EntityKind::ZigzagCrate, Vec3::new(2.2, 0.3, -60.0), phase);
            for dt in steps {
                step_entity(&mut crate_, &ctx(dt, 20.0), &tuning);
            }
            let expected = sine_lateral(2.2, 2.0, 0.1, crate_.pos.z, phase);
            prop_assert!((crate_.pos.x - expected).abs() < 1e-5);
        }
    }
}
