//! The player-controlled hero
//!
//! Owns vitals, progression and ability cooldowns. Movement input and aim are
//! supplied by the session each tick; casting lives in `combat::abilities`.

use crate::combat::abilities::Cooldowns;
use crate::combat::constants::*;
use crate::core::log::{CombatLog, TONE_HERO_HIT, TONE_LEVEL_UP};
use crate::core::types::{damp, Vec2};

#[derive(Debug, Clone)]
pub struct Hero {
    pub position: Vec2,
    /// Yaw in radians, 0 facing +y
    pub facing: f32,
    pub speed: f32,
    pub life: f32,
    pub max_life: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub cooldowns: Cooldowns,
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}

impl Hero {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            facing: 0.0,
            speed: HERO_BASE_SPEED,
            life: HERO_BASE_LIFE,
            max_life: HERO_BASE_LIFE,
            mana: HERO_BASE_MANA,
            max_mana: HERO_BASE_MANA,
            level: 1,
            xp: 0,
            next_level_xp: HERO_FIRST_LEVEL_XP,
            cooldowns: Cooldowns::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Deduct mana if the pool covers `amount`
    ///
    /// Returns false and leaves mana untouched otherwise. Every ability cast is
    /// gated on this.
    pub fn spend_mana(&mut self, amount: f32) -> bool {
        if self.mana < amount {
            return false;
        }
        self.mana -= amount;
        true
    }

    /// Apply incoming damage, clamping life at zero
    ///
    /// Returns true when the hero is left with no life.
    pub fn take_damage(&mut self, amount: f32, log: &mut CombatLog) -> bool {
        self.life = (self.life - amount).max(0.0);
        log.push(
            format!("Hero takes {} damage", amount.round()),
            TONE_HERO_HIT,
        );
        self.is_dead()
    }

    /// Add experience, levelling up as many times as it covers
    ///
    /// Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u32, log: &mut CombatLog) -> u32 {
        self.xp += amount;
        let mut levels = 0;
        while self.xp >= self.next_level_xp {
            self.xp -= self.next_level_xp;
            self.level += 1;
            self.next_level_xp = (self.next_level_xp as f32 * LEVEL_XP_GROWTH).floor() as u32;
            self.max_life += LEVEL_LIFE_GAIN;
            self.max_mana += LEVEL_MANA_GAIN;
            self.life = self.max_life;
            self.mana = self.max_mana;
            self.speed += LEVEL_SPEED_GAIN;
            levels += 1;
            log.push(
                format!("Level up! Reached level {}", self.level),
                TONE_LEVEL_UP,
            );
            tracing::info!(
                level = self.level,
                next = self.next_level_xp,
                "Hero levelled up"
            );
        }
        levels
    }

    /// Restore life without exceeding the maximum
    pub fn heal(&mut self, amount: f32) {
        self.life = (self.life + amount).min(self.max_life);
    }

    /// Restore mana without exceeding the maximum
    pub fn restore_mana(&mut self, amount: f32) {
        self.mana = (self.mana + amount).min(self.max_mana);
    }

    /// Per-tick movement, facing, regeneration and cooldown decay
    ///
    /// `move_axis` is the raw strafe/forward input and is normalized here so
    /// diagonals are not faster.
    pub fn advance(&mut self, dt: f32, move_axis: Vec2, aim: Vec2) {
        if move_axis.length_squared() > 0.0 {
            self.position += move_axis.normalize() * self.speed * dt;
        }

        let to_aim = aim - self.position;
        let desired_yaw = to_aim.x.atan2(to_aim.y);
        self.facing = damp(self.facing, desired_yaw, HERO_TURN_RATE, dt);

        let regen = dt * (MANA_REGEN_BASE + self.level as f32 * MANA_REGEN_PER_LEVEL);
        self.restore_mana(regen);
        self.cooldowns.tick(dt);
    }

    pub fn life_fraction(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn mana_fraction(&self) -> f32 {
        (self.mana / self.max_mana).clamp(0.0, 1.0)
    }

    pub fn xp_fraction(&self) -> f32 {
        self.xp as f32 / self.next_level_xp as f32
    }
}
