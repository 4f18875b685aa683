//! Area effects: the damaging whirl field and short-lived visuals
//!
//! Damaging areas are continuous fields. Every tick they are alive they
//! apply `dps * dt * AREA_DAMAGE_SCALE` to each live enemy inside
//! `radius + AREA_HIT_PADDING`.

use crate::combat::abilities::AbilitySpec;
use crate::combat::constants::*;
use crate::core::types::{Color, Vec2};
use crate::entity::enemy::{Enemy, EnemyDeath};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AreaKind {
    Whirl,
    DeathBurst,
    LootBeam,
}

#[derive(Debug, Clone)]
pub struct AreaEffect {
    pub kind: AreaKind,
    pub origin: Vec2,
    pub radius: f32,
    pub growth: f32,
    pub ttl: f32,
    /// Damage per second; zero for visuals
    pub dps: f32,
    pub visual_only: bool,
    pub color: Color,
}

impl AreaEffect {
    pub fn whirl(origin: Vec2, dps: f32, spec: &AbilitySpec) -> Self {
        Self {
            kind: AreaKind::Whirl,
            origin,
            radius: spec.radius,
            growth: spec.speed,
            ttl: spec.ttl,
            dps,
            visual_only: false,
            color: spec.color,
        }
    }

    pub fn death_burst(origin: Vec2, color: Color) -> Self {
        Self {
            kind: AreaKind::DeathBurst,
            origin,
            radius: 0.0,
            growth: DEATH_BURST_GROWTH,
            ttl: DEATH_BURST_TTL,
            dps: 0.0,
            visual_only: true,
            color,
        }
    }

    pub fn loot_beam(origin: Vec2, color: Color) -> Self {
        Self {
            kind: AreaKind::LootBeam,
            origin,
            radius: 0.0,
            growth: 0.0,
            ttl: LOOT_BEAM_TTL,
            dps: 0.0,
            visual_only: true,
            color,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }

    pub fn opacity(&self) -> f32 {
        (self.ttl * AREA_FADE_RATE).max(0.0)
    }

    pub fn damages(&self) -> bool {
        !self.visual_only && self.dps > 0.0
    }

    /// Advance one tick, applying field damage if this effect deals any
    pub fn step(&mut self, dt: f32, enemies: &mut [Enemy], deaths: &mut Vec<EnemyDeath>) {
        self.ttl -= dt;
        if self.growth != 0.0 {
            self.radius += self.growth * dt;
        }

        if !self.damages() {
            return;
        }

        let reach = self.radius + AREA_HIT_PADDING;
        let damage = self.dps * dt * AREA_DAMAGE_SCALE;
        for enemy in enemies.iter_mut().filter(|e| !e.dead) {
            if enemy.position.distance(self.origin) < reach {
                if let Some(death) = enemy.hit(damage) {
                    deaths.push(death);
                }
            }
        }
    }
}

/// Step every area effect and drop the expired ones
pub fn resolve_areas(
    areas: &mut Vec<AreaEffect>,
    enemies: &mut [Enemy],
    dt: f32,
) -> Vec<EnemyDeath> {
    let mut deaths = Vec::new();
    for area in areas.iter_mut() {
        area.step(dt, enemies, &mut deaths);
    }
    areas.retain(|a| !a.is_expired());
    deaths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::abilities::AbilityKind;
    use crate::core::types::EnemyId;
    use crate::entity::enemy::EnemyKind;

    fn ghoul_at(x: f32) -> Enemy {
        let mut enemy = Enemy::from_profile(
            EnemyId(7),
            EnemyKind::Ghoul.profile(1),
            Vec2::new(x, 0.0),
        );
        enemy.life = 1000.0;
        enemy
    }

    fn whirl() -> AreaEffect {
        AreaEffect::whirl(Vec2::ZERO, 50.0, &AbilityKind::Whirl.spec())
    }

    #[test]
    fn test_whirl_applies_scaled_continuous_damage() {
        let mut enemies = vec![ghoul_at(1.5)];
        let mut areas = vec![whirl()];
        resolve_areas(&mut areas, &mut enemies, 0.04);
        // 50 * 0.04 * 2.2 = 4.4
        assert!((enemies[0].life - 995.6).abs() < 1e-3);

        resolve_areas(&mut areas, &mut enemies, 0.04);
        assert!((enemies[0].life - 991.2).abs() < 1e-3);
    }

    #[test]
    fn test_whirl_grows_and_reaches_further() {
        let mut enemies = vec![ghoul_at(4.0)];
        let mut areas = vec![whirl()];

        resolve_areas(&mut areas, &mut enemies, 0.04);
        // radius 1.2 + 0.46 = 1.66, reach 2.66
        assert_eq!(enemies[0].life, 1000.0);

        for _ in 0..3 {
            resolve_areas(&mut areas, &mut enemies, 0.04);
        }
        // radius 1.2 + 4 * 0.46 = 3.04, reach 4.04
        assert!(enemies[0].life < 1000.0);
    }

    #[test]
    fn test_visual_effects_never_damage() {
        let mut enemies = vec![ghoul_at(0.0)];
        let mut areas = vec![
            AreaEffect::death_burst(Vec2::ZERO, Color::rgb(0xffffff)),
            AreaEffect::loot_beam(Vec2::ZERO, Color::rgb(0xffffff)),
        ];
        for _ in 0..8 {
            resolve_areas(&mut areas, &mut enemies, 0.04);
        }
        assert_eq!(enemies[0].life, 1000.0);
        assert_eq!(areas.len(), 1, "burst expired, beam still alive");
        assert_eq!(areas[0].kind, AreaKind::LootBeam);
        assert_eq!(areas[0].radius, 0.0);
    }

    #[test]
    fn test_whirl_expires() {
        let mut enemies: Vec<Enemy> = Vec::new();
        let mut areas = vec![whirl()];
        for _ in 0..17 {
            resolve_areas(&mut areas, &mut enemies, 0.04);
        }
        assert!(areas.is_empty());
    }

    #[test]
    fn test_field_kill_reported_once() {
        // One whirl tick at 0.04 deals 50 * 0.04 * 2.2 = 4.4
        let mut enemies = vec![ghoul_at(0.5)];
        enemies[0].life = 4.0;
        let mut areas = vec![whirl()];
        let first = resolve_areas(&mut areas, &mut enemies, 0.04);
        let second = resolve_areas(&mut areas, &mut enemies, 0.04);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_opacity_fades_with_ttl() {
        let mut burst = AreaEffect::death_burst(Vec2::ZERO, Color::rgb(0));
        assert!((burst.opacity() - 0.54).abs() < 1e-5);
        burst.ttl = -0.1;
        assert_eq!(burst.opacity(), 0.0);
    }
}
