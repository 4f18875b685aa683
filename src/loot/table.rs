//! Item table and rarity rolls

use crate::core::rng::GameRng;
use crate::core::types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item rarity, ordered from least to most rare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemTier {
    Magic,
    Rare,
    Legendary,
}

impl ItemTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemTier::Magic => "magic",
            ItemTier::Rare => "rare",
            ItemTier::Legendary => "legendary",
        }
    }

    /// Color of the light beam marking a drop of this tier
    pub fn beam_color(self) -> Color {
        match self {
            ItemTier::Magic => Color::rgb(0x87dbc5),
            ItemTier::Rare => Color::rgb(0x6ca7ff),
            ItemTier::Legendary => Color::rgb(0xf9b34d),
        }
    }
}

impl fmt::Display for ItemTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub tier: ItemTier,
    /// Drives the stat reward granted on pickup
    pub score: u32,
}

pub const MAGIC_ITEMS: [ItemTemplate; 2] = [
    ItemTemplate {
        name: "Crude Hatchet",
        tier: ItemTier::Magic,
        score: 4,
    },
    ItemTemplate {
        name: "Cathedral Seal",
        tier: ItemTier::Magic,
        score: 4,
    },
];

pub const RARE_ITEMS: [ItemTemplate; 2] = [
    ItemTemplate {
        name: "Hellforged Band",
        tier: ItemTier::Rare,
        score: 7,
    },
    ItemTemplate {
        name: "Bonewoven Mantle",
        tier: ItemTier::Rare,
        score: 7,
    },
];

pub const LEGENDARY_ITEM: ItemTemplate = ItemTemplate {
    name: "The Searing Oath",
    tier: ItemTier::Legendary,
    score: 13,
};

const LEGENDARY_ROLL: f32 = 0.95;
const RARE_ROLL: f32 = 0.75;

/// Pick an item for a rarity roll in `[0, 1)`
///
/// The top 5% is the single legendary, the next 20% a rare, the rest magic.
pub fn item_for_roll(roll: f32, rng: &mut GameRng) -> ItemTemplate {
    if roll > LEGENDARY_ROLL {
        return LEGENDARY_ITEM;
    }
    let band: &[ItemTemplate] = if roll > RARE_ROLL {
        &RARE_ITEMS
    } else {
        &MAGIC_ITEMS
    };
    rng.pick(band).copied().unwrap_or(LEGENDARY_ITEM)
}

/// Roll whether a kill drops an item, and which one
pub fn roll_drop(rng: &mut GameRng, drop_chance: f32) -> Option<ItemTemplate> {
    if rng.roll() > drop_chance {
        return None;
    }
    let rarity = rng.roll();
    Some(item_for_roll(rarity, rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(ItemTier::Magic < ItemTier::Rare);
        assert!(ItemTier::Rare < ItemTier::Legendary);
    }

    #[test]
    fn test_roll_bands() {
        let mut rng = GameRng::from_seed(9);
        assert_eq!(item_for_roll(0.99, &mut rng), LEGENDARY_ITEM);
        assert_eq!(item_for_roll(0.8, &mut rng).tier, ItemTier::Rare);
        assert_eq!(item_for_roll(0.75, &mut rng).tier, ItemTier::Magic);
        assert_eq!(item_for_roll(0.1, &mut rng).tier, ItemTier::Magic);
    }

    #[test]
    fn test_multi_item_tiers_pick_both() {
        let mut rng = GameRng::from_seed(4);
        let names: std::collections::HashSet<_> =
            (0..200).map(|_| item_for_roll(0.5, &mut rng).name).collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_drop_chance_extremes() {
        let mut rng = GameRng::from_seed(4);
        assert!((0..50).all(|_| roll_drop(&mut rng, 1.0).is_some()));
        assert!((0..50).all(|_| roll_drop(&mut rng, -1.0).is_none()));
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&ItemTier::Legendary).expect("serialize");
        assert_eq!(json, "\"legendary\"");
    }
}
