//! Combat constants - all tunable values in one place
//!
//! Distances are world units on the arena floor, times are seconds.

// Hit detection
pub const ENEMY_HIT_RADIUS: f32 = 0.8;
pub const AREA_HIT_PADDING: f32 = 1.0;
/// Continuous area damage multiplier, applied as `dps * dt * AREA_DAMAGE_SCALE`
pub const AREA_DAMAGE_SCALE: f32 = 2.2;
/// Visual shrink applied to a projectile on any tick it connects
pub const PROJECTILE_HIT_SHRINK: f32 = 0.94;

// Enemy melee
pub const MELEE_RANGE: f32 = 1.7;
pub const MELEE_COOLDOWN: f32 = 1.1;
pub const MELEE_WAVE_BONUS: f32 = 0.8;
pub const CHASE_MIN_DISTANCE: f32 = 0.001;

// Hero progression
pub const HERO_BASE_SPEED: f32 = 8.0;
pub const HERO_BASE_LIFE: f32 = 140.0;
pub const HERO_BASE_MANA: f32 = 120.0;
pub const HERO_FIRST_LEVEL_XP: u32 = 140;
pub const HERO_TURN_RATE: f32 = 11.0;
pub const LEVEL_XP_GROWTH: f32 = 1.38;
pub const LEVEL_LIFE_GAIN: f32 = 22.0;
pub const LEVEL_MANA_GAIN: f32 = 16.0;
pub const LEVEL_SPEED_GAIN: f32 = 0.35;
pub const MANA_REGEN_BASE: f32 = 8.0;
pub const MANA_REGEN_PER_LEVEL: f32 = 0.7;

// Fire Bolt
pub const BOLT_MANA_COST: f32 = 8.0;
pub const BOLT_BASE_DAMAGE: f32 = 22.0;
pub const BOLT_DAMAGE_PER_LEVEL: f32 = 6.0;
pub const BOLT_SPEED: f32 = 20.0;
pub const BOLT_TTL: f32 = 1.2;
pub const BOLT_RADIUS: f32 = 0.28;
pub const BOLT_COOLDOWN: f32 = 0.2;

// Spirit Lance
pub const LANCE_MANA_COST: f32 = 22.0;
pub const LANCE_BASE_DAMAGE: f32 = 48.0;
pub const LANCE_DAMAGE_PER_LEVEL: f32 = 9.0;
pub const LANCE_SPEED: f32 = 30.0;
pub const LANCE_TTL: f32 = 0.95;
pub const LANCE_RADIUS: f32 = 0.4;
pub const LANCE_PIERCE: i32 = 2;
pub const LANCE_COOLDOWN: f32 = 0.65;

// Whirl
pub const WHIRL_MANA_COST: f32 = 35.0;
pub const WHIRL_BASE_DAMAGE: f32 = 42.0;
pub const WHIRL_DAMAGE_PER_LEVEL: f32 = 8.0;
pub const WHIRL_START_RADIUS: f32 = 1.2;
pub const WHIRL_GROWTH: f32 = 11.5;
pub const WHIRL_TTL: f32 = 0.64;
pub const WHIRL_COOLDOWN: f32 = 9.0;

// Visual-only effects
pub const DEATH_BURST_GROWTH: f32 = 9.0;
pub const DEATH_BURST_TTL: f32 = 0.3;
pub const LOOT_BEAM_TTL: f32 = 1.5;
/// Area effect opacity is `ttl * AREA_FADE_RATE`, floored at zero
pub const AREA_FADE_RATE: f32 = 1.8;

// Loot orbs
pub const LOOT_ORB_TTL: f32 = 10.0;
pub const LOOT_PICKUP_RANGE: f32 = 2.1;
pub const LOOT_ORB_GOLD_MIN: u32 = 4;
pub const LOOT_ORB_GOLD_MAX: u32 = 12;

// Kill rewards: gold in `[KILL_GOLD_MIN, KILL_GOLD_BASE_MAX + wave * KILL_GOLD_PER_WAVE]`
pub const KILL_GOLD_MIN: u32 = 8;
pub const KILL_GOLD_BASE_MAX: u32 = 17;
pub const KILL_GOLD_PER_WAVE: u32 = 2;
