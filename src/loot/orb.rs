//! Gold orbs left behind by kills

use crate::combat::constants::{
    LOOT_ORB_GOLD_MAX, LOOT_ORB_GOLD_MIN, LOOT_ORB_TTL, LOOT_PICKUP_RANGE,
};
use crate::core::rng::GameRng;
use crate::core::types::Vec2;

#[derive(Debug, Clone)]
pub struct LootOrb {
    pub position: Vec2,
    pub ttl: f32,
    /// Spin angle for the renderer
    pub spin: f32,
}

impl LootOrb {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ttl: LOOT_ORB_TTL,
            spin: 0.0,
        }
    }
}

/// Age orbs, collect those within pickup range of the hero
///
/// Returns the gold picked up this tick. Expired orbs vanish without paying.
pub fn update_orbs(
    orbs: &mut Vec<LootOrb>,
    hero_position: Vec2,
    dt: f32,
    rng: &mut GameRng,
) -> u32 {
    let mut gold = 0;
    orbs.retain_mut(|orb| {
        orb.ttl -= dt;
        orb.spin += dt * 2.0;

        if orb.position.distance(hero_position) < LOOT_PICKUP_RANGE {
            gold += rng.rand_int(LOOT_ORB_GOLD_MIN, LOOT_ORB_GOLD_MAX);
            return false;
        }
        orb.ttl > 0.0
    });
    gold
}
