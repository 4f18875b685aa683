//! Projectile movement, expiry and hit resolution

use crate::combat::abilities::AbilitySpec;
use crate::combat::constants::{ENEMY_HIT_RADIUS, PROJECTILE_HIT_SHRINK};
use crate::core::types::{Color, Vec2};
use crate::entity::enemy::{Enemy, EnemyDeath};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectileKind {
    /// Spent on its first hit
    Bolt,
    /// Survives `pierce` extra hits
    Lance,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub ttl: f32,
    pub radius: f32,
    pub pierce: Option<i32>,
    pub color: Color,
    /// Visual scale, shrinks a little on every tick the projectile connects
    pub scale: f32,
}

impl Projectile {
    pub fn new(
        kind: ProjectileKind,
        origin: Vec2,
        direction: Vec2,
        damage: f32,
        spec: &AbilitySpec,
    ) -> Self {
        Self {
            kind,
            damage,
            position: origin,
            velocity: direction * spec.speed,
            ttl: spec.ttl,
            radius: spec.radius,
            pierce: spec.pierce,
            color: spec.color,
            scale: 1.0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }

    /// Advance one tick and damage every live enemy in reach
    ///
    /// Overlapping enemies are all struck in the same tick, even by a bolt.
    /// Deaths are appended to `deaths`. Returns the number of hits.
    pub fn step(&mut self, dt: f32, enemies: &mut [Enemy], deaths: &mut Vec<EnemyDeath>) -> u32 {
        self.ttl -= dt;
        self.position += self.velocity * dt;

        let reach = ENEMY_HIT_RADIUS + self.radius;
        let mut hits = 0;
        for enemy in enemies.iter_mut().filter(|e| !e.dead) {
            if enemy.position.distance(self.position) >= reach {
                continue;
            }

            if let Some(death) = enemy.hit(self.damage) {
                deaths.push(death);
            }
            hits += 1;

            match self.kind {
                ProjectileKind::Bolt => self.ttl = -1.0,
                ProjectileKind::Lance => {
                    let pierce = self.pierce.get_or_insert(0);
                    *pierce -= 1;
                    if *pierce < 0 {
                        self.ttl = -1.0;
                    }
                }
            }
        }

        if hits > 0 {
            self.scale *= PROJECTILE_HIT_SHRINK;
        }
        hits
    }
}

/// Step every projectile and drop the expired ones
///
/// Returns the enemies killed this pass, in the order they died.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut [Enemy],
    dt: f32,
) -> Vec<EnemyDeath> {
    let mut deaths = Vec::new();
    for projectile in projectiles.iter_mut() {
        projectile.step(dt, enemies, &mut deaths);
    }
    projectiles.retain(|p| !p.is_expired());
    deaths
}
