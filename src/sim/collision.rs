//! Proximity tests between the player and the entity pool
//!
//! Hitboxes are fixed per kind (see [`EntityKind::profile`]). A coarse
//! forward band around the player gates the lateral and vertical tests for
//! hazards and collectibles; portals and projectiles use their own gates.

use glam::Vec3;

use super::entity::{COLLECT_HEIGHT, Contact, Entity, EntityKind, Payload};
use super::events::{EventQueue, GameEvent, SoundEffect};
use super::state::RunnerState;
use super::world::World;
use crate::consts::{COLLISION_ZONE, PLAYER_HEIGHT, REMOVE_DISTANCE};

/// Forward distance at which the player enters the shop portal
pub const PORTAL_REACH: f32 = 2.0;
/// Half-extents of the box a player projectile must reach around the boss (x, z)
pub const BOSS_HITBOX: (f32, f32) = (5.0, 5.0);
/// Half-extents of the player box boss projectiles test against
pub const PLAYER_HITBOX: Vec3 = Vec3::new(1.0, 2.0, 1.5);

/// Whether an entity is inside the forward band around the player
#[inline]
pub fn in_collision_zone(z: f32, player_z: f32) -> bool {
    z < player_z + COLLISION_ZONE && z > player_z - COLLISION_ZONE
}

/// Overlap between the player's vertical band and an object band
#[inline]
pub fn vertical_overlap(player_y: f32, (bottom, top): (f32, f32)) -> bool {
    player_y < top && player_y + PLAYER_HEIGHT > bottom
}

/// Whether an entity has fallen far enough behind the player to retire
#[inline]
pub fn is_behind(entity: &Entity, player_z: f32) -> bool {
    entity.pos.z >= player_z + REMOVE_DISTANCE
}

fn signal_hit(world: &mut dyn World, events: &mut EventQueue) {
    if world.invulnerable() {
        return;
    }
    world.player_hit();
    events.push(GameEvent::PlayerHit);
    events.sound(SoundEffect::Damage);
}

/// Resolve every active entity against the player (and player shots against the boss)
pub(crate) fn resolve(state: &mut RunnerState, world: &mut dyn World, player: Vec3) {
    let boss = state
        .entities
        .iter()
        .find(|e| e.kind == EntityKind::Boss && e.active)
        .map(|e| e.pos);
    let tuning = &state.tuning;
    let events = &mut state.events;

    for entity in state.entities.iter_mut().filter(|e| e.active) {
        let profile = entity.kind.profile();
        let delta = (entity.pos - player).abs();

        match profile.contact {
            Contact::Portal => {
                if delta.z < PORTAL_REACH {
                    entity.deactivate();
                    world.open_shop();
                    log::info!("Shop portal reached at distance {:.0}", state.distance);
                }
            }

            Contact::PlayerShot => {
                if let Some(boss_pos) = boss {
                    let dx = (entity.pos.x - boss_pos.x).abs();
                    let dz = (entity.pos.z - boss_pos.z).abs();
                    if dx < BOSS_HITBOX.0 && dz < BOSS_HITBOX.1 {
                        entity.deactivate();
                        world.damage_boss(tuning.boss_damage);
                        events.burst(boss_pos, profile.burst_color);
                        log::debug!("Projectile {} hit boss for {}", entity.id, tuning.boss_damage);
                        continue;
                    }
                }
                if entity.pos.z < tuning.projectile_cutoff_z {
                    entity.deactivate();
                }
            }

            Contact::BossShot => {
                if delta.x < PLAYER_HITBOX.x && delta.y < PLAYER_HITBOX.y && delta.z < PLAYER_HITBOX.z {
                    entity.deactivate();
                    signal_hit(world, events);
                    events.burst(entity.pos, profile.burst_color);
                }
            }

            Contact::Hazard { half_width, band } => {
                if !in_collision_zone(entity.pos.z, player.z) || delta.x >= half_width {
                    continue;
                }
                if vertical_overlap(player.y, band.span(entity.pos.y)) {
                    entity.deactivate();
                    signal_hit(world, events);
                    events.burst(entity.pos, profile.burst_color);
                    log::debug!("Player hit by {:?} {}", entity.kind, entity.id);
                }
            }

            Contact::Collectible { half_width } => {
                if !in_collision_zone(entity.pos.z, player.z)
                    || delta.x >= half_width
                    || delta.y >= COLLECT_HEIGHT
                {
                    continue;
                }
                entity.deactivate();
                match entity.payload {
                    Payload::Gem { value } => {
                        world.collect_gem(value);
                        events.sound(SoundEffect::GemCollect);
                    }
                    Payload::Letter { index, glyph } => {
                        if !world.collected_letters().contains(&index) {
                            world.collect_letter(index);
                            log::debug!("Collected letter {glyph} (index {index})");
                        }
                        events.sound(SoundEffect::LetterCollect);
                    }
                    _ => {}
                }
                events.burst(entity.pos, entity.color);
            }

            Contact::Inert => {}
        }
    }
}

/// Deactivate every non-boss entity that has scrolled past the trailing line
pub(crate) fn retire_trailing(entities: &mut [Entity], player_z: f32) {
    for entity in entities
        .iter_mut()
        .filter(|e| e.kind != EntityKind::Boss && is_behind(e, player_z))
    {
        entity.active = false;
    }
}
