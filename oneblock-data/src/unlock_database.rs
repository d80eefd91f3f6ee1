use std::collections::{hash_map::Iter, HashMap};

use crate::BucketId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockDefinition {
    pub bucket: BucketId,
    pub drop_id: String,
    pub weight: u32,
}

impl UnlockDefinition {
    pub fn new(bucket: BucketId, drop_id: impl Into<String>, weight: u32) -> Self {
        Self {
            bucket,
            drop_id: drop_id.into(),
            weight: weight.max(1),
        }
    }
}

/// Unlock definitions keyed by the consumable item id that triggers them.
#[derive(Default)]
pub struct UnlockDatabase {
    unlocks: HashMap<String, UnlockDefinition>,
}

impl UnlockDatabase {
    pub fn new(unlocks: HashMap<String, UnlockDefinition>) -> Self {
        Self { unlocks }
    }

    pub fn len(&self) -> usize {
        self.unlocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocks.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, UnlockDefinition> {
        self.unlocks.iter()
    }

    pub fn get_unlock(&self, consumable_item_id: &str) -> Option<&UnlockDefinition> {
        self.unlocks
            .get(consumable_item_id)
            .filter(|definition| !definition.drop_id.is_empty())
    }
}
