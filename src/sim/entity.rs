//! World entities and the per-kind behaviour table
//!
//! Every transient object on the track is an [`Entity`]. Behaviour is not
//! branched on inline; the integrator and resolver look up a [`KindProfile`]
//! by tag and stay generic.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Entity type tag. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Standard zombie
    Obstacle,
    Gem,
    Letter,
    ShopPortal,
    /// Zombie that throws one missile as it approaches
    Alien,
    Missile,
    Barrel,
    ZigzagCrate,
    Cat,
    Pothole,
    OldCar,
    HayBale,
    RollingTire,
    Boss,
    BossProjectile,
    PlayerProjectile,
}

/// Which boss holds the current encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    Kalin,
    Stilyan,
    Nikolai,
}

/// Cosmetic tag for boss projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileVariant {
    Bottle,
    Steak,
    Potato,
    Tire,
}

impl BossKind {
    /// Signature projectiles this boss rotates through
    pub fn projectiles(self) -> &'static [ProjectileVariant] {
        match self {
            BossKind::Kalin => &[ProjectileVariant::Steak, ProjectileVariant::Potato],
            BossKind::Stilyan => &[ProjectileVariant::Tire],
            BossKind::Nikolai => &[ProjectileVariant::Bottle],
        }
    }

    /// Boss for the n-th encounter (1-based), rotating Kalin, Stilyan, Nikolai
    pub fn for_encounter(encounter: u32) -> Self {
        match encounter % 3 {
            1 => BossKind::Kalin,
            2 => BossKind::Stilyan,
            _ => BossKind::Nikolai,
        }
    }
}

/// Per-kind data that only some entities carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    None,
    Gem { value: u32 },
    Letter { glyph: char, index: usize },
    /// Straight lateral travel (Barrel, Cat)
    Crossing { direction: f32 },
    /// Sine path around a spawn lane (ZigzagCrate, RollingTire)
    Sine { origin_x: f32, phase: f32 },
    Alien { fired: bool },
    Ballistic { vel: Vec3, variant: ProjectileVariant },
    Boss { boss: BossKind, direction: f32 },
}

/// Motion rule applied by the integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionRule {
    /// Forward by world scroll
    Scroll,
    /// Scroll plus a fixed extra forward speed
    Chaser,
    /// Scroll plus level-scaled lateral roll
    Roll,
    /// Scroll plus constant lateral crossing
    Cross,
    /// Scroll; lateral recomputed from forward position
    Sine { amplitude: f32, frequency: f32 },
    /// Away from the player at projectile speed, no scroll
    PlayerShot,
    /// Own velocity plus scroll on the forward axis
    Ballistic,
    /// Pinned at standoff, strafes between bounds
    Boss,
}

/// Vertical extent of a hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    /// Absolute bottom/top, independent of the entity's height
    Fixed { bottom: f32, top: f32 },
    /// Half-height around the entity's own y
    Around { half: f32 },
}

impl Band {
    /// (bottom, top) for an entity at height `y`
    pub fn span(self, y: f32) -> (f32, f32) {
        match self {
            Band::Fixed { bottom, top } => (bottom, top),
            Band::Around { half } => (y - half, y + half),
        }
    }
}

/// How an entity interacts with the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Hurts on lateral + vertical overlap
    Hazard { half_width: f32, band: Band },
    /// Rewards on lateral + loose vertical proximity
    Collectible { half_width: f32 },
    /// Opens the shop when the player reaches it
    Portal,
    /// Damages the boss
    PlayerShot,
    /// Hits the player from a generous box
    BossShot,
    /// Never collides
    Inert,
}

/// Declarative behaviour of one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub motion: MotionRule,
    pub contact: Contact,
    /// Burst colour on a hit, for kinds that don't carry their own colour
    pub burst_color: u32,
}

/// Vertical tolerance for picking up collectibles
pub const COLLECT_HEIGHT: f32 = 2.5;

const DEFAULT_HALF_WIDTH: f32 = 0.9;

const fn hazard(half_width: f32, bottom: f32, top: f32, burst_color: u32) -> KindProfile {
    KindProfile {
        motion: MotionRule::Scroll,
        contact: Contact::Hazard {
            half_width,
            band: Band::Fixed { bottom, top },
        },
        burst_color,
    }
}

impl EntityKind {
    /// Behaviour table lookup
    pub const fn profile(self) -> KindProfile {
        match self {
            EntityKind::Obstacle => hazard(DEFAULT_HALF_WIDTH, 0.0, 1.6, 0xffffff),
            EntityKind::Alien => KindProfile {
                motion: MotionRule::Scroll,
                contact: Contact::Hazard {
                    half_width: DEFAULT_HALF_WIDTH,
                    band: Band::Around { half: 0.5 },
                },
                burst_color: 0xffffff,
            },
            EntityKind::Missile => KindProfile {
                motion: MotionRule::Chaser,
                ..hazard(DEFAULT_HALF_WIDTH, 0.5, 1.5, 0xaaffaa)
            },
            EntityKind::Barrel => KindProfile {
                motion: MotionRule::Roll,
                ..hazard(1.2, 0.0, 1.0, 0x8b4513)
            },
            EntityKind::ZigzagCrate => KindProfile {
                motion: MotionRule::Sine {
                    amplitude: 2.0,
                    frequency: 0.1,
                },
                ..hazard(1.0, 0.0, 0.8, 0xffd700)
            },
            EntityKind::Cat => KindProfile {
                motion: MotionRule::Cross,
                ..hazard(0.8, 0.0, 0.5, 0x000000)
            },
            // Near-ground hazard, must be jumped over
            EntityKind::Pothole => hazard(DEFAULT_HALF_WIDTH, -0.1, 0.2, 0x333333),
            // Too tall to jump, must be dodged
            EntityKind::OldCar => hazard(2.0, 0.0, 2.0, 0xcc0000),
            EntityKind::HayBale => hazard(1.1, 0.0, 1.2, 0xeebb00),
            EntityKind::RollingTire => KindProfile {
                motion: MotionRule::Sine {
                    amplitude: 1.5,
                    frequency: 0.2,
                },
                ..hazard(1.0, 0.0, 1.0, 0x111111)
            },
            EntityKind::Gem | EntityKind::Letter => KindProfile {
                motion: MotionRule::Scroll,
                contact: Contact::Collectible {
                    half_width: DEFAULT_HALF_WIDTH,
                },
                burst_color: 0xffffff,
            },
            EntityKind::ShopPortal => KindProfile {
                motion: MotionRule::Scroll,
                contact: Contact::Portal,
                burst_color: 0xffffff,
            },
            EntityKind::Boss => KindProfile {
                motion: MotionRule::Boss,
                contact: Contact::Inert,
                burst_color: 0xff0000,
            },
            EntityKind::BossProjectile => KindProfile {
                motion: MotionRule::Ballistic,
                contact: Contact::BossShot,
                burst_color: 0x00ff00,
            },
            EntityKind::PlayerProjectile => KindProfile {
                motion: MotionRule::PlayerShot,
                contact: Contact::PlayerShot,
                burst_color: 0xff0000,
            },
        }
    }

    /// Whether touching this kind hurts the player
    pub fn is_damage_source(self) -> bool {
        matches!(self.profile().contact, Contact::Hazard { .. })
    }

    /// Whether this kind counts toward the spawn frontier
    pub fn tracks_frontier(self) -> bool {
        !matches!(
            self,
            EntityKind::Missile | EntityKind::PlayerProjectile | EntityKind::BossProjectile
        )
    }
}

/// Letter display colours, assigned by word index
pub const LETTER_COLORS: [u32; 7] = [
    0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff, 0x00ffff, 0xff8800,
];

pub const GEM_COLOR: u32 = 0xffaa00;
pub const ALIEN_COLOR: u32 = 0x00aa00;
pub const OBSTACLE_COLOR: u32 = 0x556655;

/// One simulated world object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// x lateral, y vertical, z forward (negative is ahead of the player)
    pub pos: Vec3,
    /// False once hit, collected or expired; never set back to true
    pub active: bool,
    /// Display colour
    pub color: u32,
    pub payload: Payload,
}

impl Entity {
    /// Entity with no per-kind data
    pub fn new(id: u32, kind: EntityKind, pos: Vec3) -> Self {
        Self {
            id,
            kind,
            pos,
            active: true,
            color: 0xffffff,
            payload: Payload::None,
        }
    }

    pub fn gem(id: u32, pos: Vec3, value: u32) -> Self {
        Self {
            color: GEM_COLOR,
            payload: Payload::Gem { value },
            ..Self::new(id, EntityKind::Gem, pos)
        }
    }

    pub fn letter(id: u32, pos: Vec3, glyph: char, index: usize) -> Self {
        Self {
            color: LETTER_COLORS[index % LETTER_COLORS.len()],
            payload: Payload::Letter { glyph, index },
            ..Self::new(id, EntityKind::Letter, pos)
        }
    }

    pub fn crossing(id: u32, kind: EntityKind, pos: Vec3, direction: f32) -> Self {
        Self {
            payload: Payload::Crossing { direction },
            ..Self::new(id, kind, pos)
        }
    }

    pub fn sine(id: u32, kind: EntityKind, pos: Vec3, phase: f32) -> Self {
        Self {
            payload: Payload::Sine {
                origin_x: pos.x,
                phase,
            },
            ..Self::new(id, kind, pos)
        }
    }

    pub fn alien(id: u32, pos: Vec3) -> Self {
        Self {
            color: ALIEN_COLOR,
            payload: Payload::Alien { fired: false },
            ..Self::new(id, EntityKind::Alien, pos)
        }
    }

    pub fn boss_projectile(id: u32, pos: Vec3, vel: Vec3, variant: ProjectileVariant) -> Self {
        Self {
            payload: Payload::Ballistic { vel, variant },
            ..Self::new(id, EntityKind::BossProjectile, pos)
        }
    }

    pub fn boss(id: u32, pos: Vec3, boss: BossKind) -> Self {
        Self {
            payload: Payload::Boss {
                boss,
                direction: 1.0,
            },
            ..Self::new(id, EntityKind::Boss, pos)
        }
    }

    /// Word index carried by a letter
    pub fn letter_index(&self) -> Option<usize> {
        match self.payload {
            Payload::Letter { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Boss variant carried by a boss entity
    pub fn boss_kind(&self) -> Option<BossKind> {
        match self.payload {
            Payload::Boss { boss, .. } => Some(boss),
            _ => None,
        }
    }

    /// Deactivate, reporting whether this call changed anything
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
