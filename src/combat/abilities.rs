//! Hero abilities and the cast pipeline
//!
//! A cast is gated twice: the ability's own cooldown, then the mana cost.
//! Running short on mana is not an error. The request is dropped without
//! touching the cooldown or the log.

use crate::combat::area::AreaEffect;
use crate::combat::constants::*;
use crate::combat::projectile::{Projectile, ProjectileKind};
use crate::core::log::CombatLog;
use crate::core::types::{Color, Vec2};
use crate::entity::hero::Hero;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AbilityKind {
    /// Fast single-target bolt
    FireBolt,
    /// Slower bolt that pierces through several enemies
    SpiritLance,
    /// Expanding ring centred on the hero
    Whirl,
}

/// Fixed parameters for one ability
#[derive(Debug, Clone, Copy)]
pub struct AbilitySpec {
    pub name: &'static str,
    pub mana_cost: f32,
    pub base_damage: f32,
    pub damage_per_level: f32,
    /// Projectile speed, or ring growth rate for area abilities
    pub speed: f32,
    pub ttl: f32,
    /// Projectile hit radius, or starting ring radius
    pub radius: f32,
    pub cooldown: f32,
    pub pierce: Option<i32>,
    pub color: Color,
    pub cast_text: &'static str,
    pub log_color: Color,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 3] = [
        AbilityKind::FireBolt,
        AbilityKind::SpiritLance,
        AbilityKind::Whirl,
    ];

    pub fn index(self) -> usize {
        match self {
            AbilityKind::FireBolt => 0,
            AbilityKind::SpiritLance => 1,
            AbilityKind::Whirl => 2,
        }
    }

    pub const fn spec(self) -> AbilitySpec {
        match self {
            AbilityKind::FireBolt => AbilitySpec {
                name: "Fire Bolt",
                mana_cost: BOLT_MANA_COST,
                base_damage: BOLT_BASE_DAMAGE,
                damage_per_level: BOLT_DAMAGE_PER_LEVEL,
                speed: BOLT_SPEED,
                ttl: BOLT_TTL,
                radius: BOLT_RADIUS,
                cooldown: BOLT_COOLDOWN,
                pierce: None,
                color: Color::rgb(0xff8c30),
                cast_text: "Cast Fire Bolt",
                log_color: Color::rgb(0xffc27f),
            },
            AbilityKind::SpiritLance => AbilitySpec {
                name: "Spirit Lance",
                mana_cost: LANCE_MANA_COST,
                base_damage: LANCE_BASE_DAMAGE,
                damage_per_level: LANCE_DAMAGE_PER_LEVEL,
                speed: LANCE_SPEED,
                ttl: LANCE_TTL,
                radius: LANCE_RADIUS,
                cooldown: LANCE_COOLDOWN,
                pierce: Some(LANCE_PIERCE),
                color: Color::rgb(0x72b8ff),
                cast_text: "Unleash Spirit Lance",
                log_color: Color::rgb(0x9fc4ff),
            },
            AbilityKind::Whirl => AbilitySpec {
                name: "Whirl",
                mana_cost: WHIRL_MANA_COST,
                base_damage: WHIRL_BASE_DAMAGE,
                damage_per_level: WHIRL_DAMAGE_PER_LEVEL,
                speed: WHIRL_GROWTH,
                ttl: WHIRL_TTL,
                radius: WHIRL_START_RADIUS,
                cooldown: WHIRL_COOLDOWN,
                pierce: None,
                color: Color::rgb(0xfef7e7),
                cast_text: "Whirl of steel",
                log_color: Color::rgb(0xfff1cd),
            },
        }
    }

    /// Damage (per hit, or per second for the ring) at a hero level
    pub fn damage_at(self, level: u32) -> f32 {
        let spec = self.spec();
        spec.base_damage + level as f32 * spec.damage_per_level
    }
}

/// Remaining cooldown per ability, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldowns {
    remaining: [f32; 3],
}

impl Cooldowns {
    pub fn get(&self, kind: AbilityKind) -> f32 {
        self.remaining[kind.index()]
    }

    pub fn set(&mut self, kind: AbilityKind, seconds: f32) {
        self.remaining[kind.index()] = seconds;
    }

    pub fn is_ready(&self, kind: AbilityKind) -> bool {
        self.get(kind) <= 0.0
    }

    /// Count every timer down toward zero
    pub fn tick(&mut self, dt: f32) {
        for remaining in &mut self.remaining {
            *remaining = (*remaining - dt).max(0.0);
        }
    }

    /// "Ready", or the remaining seconds to one decimal
    pub fn label(&self, kind: AbilityKind) -> String {
        let remaining = self.get(kind);
        if remaining <= 0.0 {
            "Ready".to_string()
        } else {
            format!("{:.1}s", remaining)
        }
    }
}

/// Planar unit vector from the hero toward `aim`
///
/// When the aim point sits on the hero, the current facing is used instead.
pub fn aim_direction(hero: &Hero, aim: Vec2) -> Vec2 {
    let dir = (aim - hero.position).normalize_or_zero();
    if dir == Vec2::ZERO {
        Vec2::new(hero.facing.sin(), hero.facing.cos())
    } else {
        dir
    }
}

/// Attempt to cast `kind` toward `aim`
///
/// Returns true when the ability fired. A cast on cooldown or without enough
/// mana changes nothing.
pub fn try_cast(
    kind: AbilityKind,
    hero: &mut Hero,
    aim: Vec2,
    projectiles: &mut Vec<Projectile>,
    areas: &mut Vec<AreaEffect>,
    log: &mut CombatLog,
) -> bool {
    if !hero.cooldowns.is_ready(kind) {
        return false;
    }

    let spec = kind.spec();
    if !hero.spend_mana(spec.mana_cost) {
        return false;
    }

    let damage = kind.damage_at(hero.level);
    match kind {
        AbilityKind::FireBolt => {
            let dir = aim_direction(hero, aim);
            projectiles.push(Projectile::new(
                ProjectileKind::Bolt,
                hero.position,
                dir,
                damage,
                &spec,
            ));
        }
        AbilityKind::SpiritLance => {
            let dir = aim_direction(hero, aim);
            projectiles.push(Projectile::new(
                ProjectileKind::Lance,
                hero.position,
                dir,
                damage,
                &spec,
            ));
        }
        AbilityKind::Whirl => {
            areas.push(AreaEffect::whirl(hero.position, damage, &spec));
        }
    }

    hero.cooldowns.set(kind, spec.cooldown);
    log.push(spec.cast_text, spec.log_color);
    tracing::debug!(ability = spec.name, damage, mana = hero.mana, "Cast");
    true
}
