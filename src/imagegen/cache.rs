//! Session-lifetime icon cache
//!
//! Keyed by `(tier, name)`, so every drop of the same item shares one payload.
//! Entries are never evicted.

use crate::imagegen::icon::{Icon, IconKey};
use ahash::AHashMap;

#[derive(Debug, Default)]
pub struct IconCache {
    entries: AHashMap<IconKey, Icon>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &IconKey) -> Option<Icon> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: IconKey, icon: Icon) {
        self.entries.insert(key, icon);
    }

    pub fn contains(&self, key: &IconKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
