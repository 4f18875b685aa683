//! Dropped items, their stat rewards and the recent-drops list

use crate::core::types::DropId;
use crate::entity::hero::Hero;
use crate::imagegen::{Icon, IconRequest, Provenance};
use crate::loot::table::{ItemTemplate, ItemTier};
use std::collections::VecDeque;

/// Fraction of an item's score added to max mana
const MANA_SCORE_FACTOR: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct DropItem {
    pub id: DropId,
    pub name: String,
    pub tier: ItemTier,
    pub score: u32,
    /// Unset until the icon pipeline resolves this drop
    pub icon: Option<Icon>,
    pub provenance: Option<Provenance>,
}

impl DropItem {
    pub fn from_template(template: ItemTemplate) -> Self {
        Self {
            id: DropId::new(),
            name: template.name.to_string(),
            tier: template.tier,
            score: template.score,
            icon: None,
            provenance: None,
        }
    }

    pub fn icon_request(&self) -> IconRequest {
        IconRequest {
            drop_id: self.id,
            tier: self.tier,
            name: self.name.clone(),
        }
    }

    /// Provenance tag for display; "queued" while the icon is pending
    pub fn source_label(&self) -> &'static str {
        self.provenance.map(Provenance::as_str).unwrap_or("queued")
    }
}

/// Grant an item's permanent stat bonus and top up current resources
pub fn apply_rewards(hero: &mut Hero, item: &DropItem) {
    let score = item.score as f32;
    hero.max_life += score;
    hero.max_mana += (score * MANA_SCORE_FACTOR).floor();
    hero.heal(score);
    hero.restore_mana(score);
}

/// Bounded list of the most recent drops, oldest evicted first
#[derive(Debug, Clone)]
pub struct RecentDrops {
    items: VecDeque<DropItem>,
    capacity: usize,
}

impl RecentDrops {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a drop; returns the evicted drop if the list was full
    pub fn push(&mut self, item: DropItem) -> Option<DropItem> {
        self.items.push_back(item);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    /// Attach a resolved icon to a drop that is still listed
    ///
    /// Returns false if the drop has already been evicted.
    pub fn resolve_icon(&mut self, id: DropId, icon: Icon, provenance: Provenance) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.icon = Some(icon);
                item.provenance = Some(provenance);
                true
            }
            None => false,
        }
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DropItem> {
        self.items.iter()
    }

    pub fn get(&self, id: DropId) -> Option<&DropItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
