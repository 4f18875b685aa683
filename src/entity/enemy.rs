//! Enemies: kind table, chase AI and the death transition
//!
//! A kind is rolled once at spawn and resolved into an [`EnemyProfile`]
//! scaled by the current wave. After that the enemy only carries plain
//! numbers.

use crate::combat::constants::*;
use crate::core::log::CombatLog;
use crate::core::types::{Color, EnemyId, Vec2};
use crate::entity::hero::Hero;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnemyKind {
    Imp,
    Ghoul,
    Brute,
}

/// Stats for one enemy at a given wave
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProfile {
    pub kind: EnemyKind,
    pub life: f32,
    pub speed: f32,
    pub xp: u32,
    pub damage: f32,
    pub color: Color,
    pub scale: f32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Imp, EnemyKind::Ghoul, EnemyKind::Brute];

    /// Map a uniform roll in `[0, 1)` to a kind
    ///
    /// Brutes take the top 12%, ghouls the next 33%, imps the rest.
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.88 {
            EnemyKind::Brute
        } else if roll > 0.55 {
            EnemyKind::Ghoul
        } else {
            EnemyKind::Imp
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Imp => "Imp",
            EnemyKind::Ghoul => "Ghoul",
            EnemyKind::Brute => "Brute",
        }
    }

    /// Stats for this kind, growing linearly with `wave`
    pub fn profile(self, wave: u32) -> EnemyProfile {
        let t = wave as f32;
        match self {
            EnemyKind::Imp => EnemyProfile {
                kind: self,
                life: 34.0 + t * 8.0,
                speed: 4.8 + t * 0.26,
                xp: 10 + wave * 3,
                damage: 7.0 + t,
                color: Color::rgb(0x6e4f84),
                scale: 0.84,
            },
            EnemyKind::Ghoul => EnemyProfile {
                kind: self,
                life: 52.0 + t * 10.0,
                speed: 3.8 + t * 0.22,
                xp: 16 + wave * 4,
                damage: 10.0 + t,
                color: Color::rgb(0x516b4e),
                scale: 1.0,
            },
            EnemyKind::Brute => EnemyProfile {
                kind: self,
                life: 80.0 + t * 20.0,
                speed: 2.1 + t * 0.15,
                xp: 24 + wave * 5,
                damage: 15.0 + t * 2.0,
                color: Color::rgb(0x7e3b2f),
                scale: 1.2,
            },
        }
    }
}

/// Everything the session needs to settle a kill
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDeath {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub xp: u32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub facing: f32,
    pub life: f32,
    pub max_life: f32,
    pub speed: f32,
    pub xp: u32,
    pub damage: f32,
    pub attack_cooldown: f32,
    pub color: Color,
    pub scale: f32,
    pub dead: bool,
}

impl Enemy {
    pub fn from_profile(id: EnemyId, profile: EnemyProfile, position: Vec2) -> Self {
        Self {
            id,
            kind: profile.kind,
            position,
            facing: 0.0,
            life: profile.life,
            max_life: profile.life,
            speed: profile.speed,
            xp: profile.xp,
            damage: profile.damage,
            attack_cooldown: 0.0,
            color: profile.color,
            scale: profile.scale,
            dead: false,
        }
    }

    /// Chase the hero and strike when in melee range
    ///
    /// Does nothing once this enemy is dead or the hero has fallen. Returns
    /// true if this call's strike left the hero with no life.
    pub fn update(&mut self, dt: f32, hero: &mut Hero, wave: u32, log: &mut CombatLog) -> bool {
        if self.dead || hero.is_dead() {
            return false;
        }

        let to_hero = hero.position - self.position;
        let dist = to_hero.length();
        if dist > CHASE_MIN_DISTANCE {
            self.position += to_hero / dist * self.speed * dt;
            self.facing = to_hero.x.atan2(to_hero.y);
        }

        self.attack_cooldown -= dt;
        if dist < MELEE_RANGE && self.attack_cooldown <= 0.0 {
            self.attack_cooldown = MELEE_COOLDOWN;
            let fatal = hero.take_damage(self.damage + wave as f32 * MELEE_WAVE_BONUS, log);
            return fatal;
        }
        false
    }

    /// Apply damage; yields the death record exactly once
    ///
    /// Life may go further negative on later hits, but only the hit that first
    /// takes it to zero or below returns `Some`.
    pub fn hit(&mut self, damage: f32) -> Option<EnemyDeath> {
        self.life -= damage;
        if self.life <= 0.0 && !self.dead {
            self.dead = true;
            return Some(EnemyDeath {
                id: self.id,
                kind: self.kind,
                position: self.position,
                xp: self.xp,
                color: self.color,
            });
        }
        None
    }

    pub fn life_fraction(&self) -> f32 {
        (self.life / self.max_life).max(0.0)
    }
}
