//! Notifications emitted by the simulation
//!
//! The core appends typed records during a tick; the caller drains them
//! afterwards and forwards them to particles, audio and HUD.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::BossKind;

/// Fire-and-forget sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    GemCollect,
    LetterCollect,
    /// Player throws a projectile
    Throw,
    /// Player takes a hit
    Damage,
    /// Kalin attacks
    Bark,
    /// Stilyan attacks
    Horse,
    /// Nikolai attacks
    Meow,
}

impl SoundEffect {
    /// Voice played alongside a boss attack
    pub fn boss_voice(boss: BossKind) -> Self {
        match boss {
            BossKind::Kalin => SoundEffect::Bark,
            BossKind::Stilyan => SoundEffect::Horse,
            BossKind::Nikolai => SoundEffect::Meow,
        }
    }
}

/// One notification record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Particle burst at a position
    Burst { pos: Vec3, color: u32 },
    /// The boss fired; `boss_id` keys the attack flash on the boss entity
    BossAttack { boss_id: u32, boss: BossKind },
    /// Something hit the player
    PlayerHit,
    Sound(SoundEffect),
}

/// Ordered queue of notifications produced during ticks
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn burst(&mut self, pos: Vec3, color: u32) {
        self.push(GameEvent::Burst { pos, color });
    }

    pub fn sound(&mut self, effect: SoundEffect) {
        self.push(GameEvent::Sound(effect));
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain_preserves_order() {
        let mut q = EventQueue::new();
        q.push(GameEvent::PlayerHit);
        q.sound(SoundEffect::Damage);
        q.burst(Vec3::ONE, 0xff0000);
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert_eq!(events[0], GameEvent::PlayerHit);
        assert_eq!(events[1], GameEvent::Sound(SoundEffect::Damage));
        assert!(matches!(events[2], GameEvent::Burst { color: 0xff0000, .. }));
        assert!(q.is_empty());
    }

    #[test]
    fn test_boss_voices() {
        assert_eq!(SoundEffect::boss_voice(BossKind::Kalin), SoundEffect::Bark);
        assert_eq!(SoundEffect::boss_voice(BossKind::Stilyan), SoundEffect::Horse);
        assert_eq!(SoundEffect::boss_voice(BossKind::Nikolai), SoundEffect::Meow);
    }
}
