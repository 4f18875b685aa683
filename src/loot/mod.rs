//! Loot: gold orbs, the item table and dropped items

pub mod drops;
pub mod orb;
pub mod table;

pub use drops::{apply_rewards, DropItem, RecentDrops};
pub use orb::{update_orbs, LootOrb};
pub use table::{roll_drop, ItemTemplate, ItemTier};
