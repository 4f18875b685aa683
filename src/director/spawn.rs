//! Spawn pacing
//!
//! One timer gates spawns: while the live population is under the wave's cap
//! and the spawn cooldown has elapsed, a single enemy is added. The cooldown
//! itself shortens as waves advance.

use crate::core::rng::GameRng;
use crate::core::types::{EnemyId, Vec2};
use crate::entity::enemy::{Enemy, EnemyKind};

pub const POPULATION_BASE: usize = 7;
pub const POPULATION_PER_WAVE: usize = 2;
pub const INITIAL_SPAWN_COOLDOWN: f32 = 1.0;
pub const SPAWN_COOLDOWN_BASE: f32 = 1.05;
pub const SPAWN_COOLDOWN_PER_WAVE: f32 = 0.08;
pub const SPAWN_COOLDOWN_FLOOR: f32 = 0.24;
pub const SPAWN_RING_MIN: f32 = 18.0;
pub const SPAWN_RING_MAX: f32 = 35.0;

/// Live enemies allowed at once during `wave`
pub fn population_cap(wave: u32) -> usize {
    POPULATION_BASE + wave as usize * POPULATION_PER_WAVE
}

/// Delay between spawns once `wave` is reached
pub fn spawn_cooldown(wave: u32) -> f32 {
    (SPAWN_COOLDOWN_BASE - wave as f32 * SPAWN_COOLDOWN_PER_WAVE).max(SPAWN_COOLDOWN_FLOOR)
}

#[derive(Debug, Clone)]
pub struct SpawnDirector {
    pub last_spawn_at: f32,
    pub cooldown: f32,
    next_id: u32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self {
            last_spawn_at: 0.0,
            cooldown: INITIAL_SPAWN_COOLDOWN,
            next_id: 0,
        }
    }

    /// Whether a spawn is due at time `now`
    pub fn is_due(&self, alive: usize, wave: u32, now: f32) -> bool {
        alive < population_cap(wave) && now - self.last_spawn_at > self.cooldown
    }

    /// Build one enemy of a rolled kind at a random point on the spawn ring
    pub fn spawn(&mut self, wave: u32, rng: &mut GameRng) -> Enemy {
        let kind = EnemyKind::from_roll(rng.roll());
        let position = rng.point_in_ring(SPAWN_RING_MIN, SPAWN_RING_MAX);
        self.spawn_kind(kind, wave, position)
    }

    /// Build one enemy of a fixed kind
    pub fn spawn_kind(&mut self, kind: EnemyKind, wave: u32, position: Vec2) -> Enemy {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        Enemy::from_profile(id, kind.profile(wave), position)
    }

    /// Spawn into `enemies` if one is due; returns the new enemy's id
    pub fn update(
        &mut self,
        now: f32,
        wave: u32,
        enemies: &mut Vec<Enemy>,
        rng: &mut GameRng,
    ) -> Option<EnemyId> {
        let alive = enemies.iter().filter(|e| !e.dead).count();
        if !self.is_due(alive, wave, now) {
            return None;
        }

        let enemy = self.spawn(wave, rng);
        let id = enemy.id;
        tracing::debug!(kind = enemy.kind.name(), ?id, life = enemy.life, "Spawned enemy");
        enemies.push(enemy);

        self.last_spawn_at = now;
        self.cooldown = spawn_cooldown(wave);
        Some(id)
    }
}
