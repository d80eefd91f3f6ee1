use std::collections::{hash_map::Iter, HashMap};

use crate::{BucketId, DropId};

/// Item handed out whenever nothing better can be chosen.
pub const DEFAULT_ITEM_ID: &str = "Ingredient_Fibre";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropDefinition {
    pub drop_id: String,
    pub weight: u32,
}

impl DropDefinition {
    pub fn new(drop_id: impl Into<String>, weight: u32) -> Self {
        Self {
            drop_id: drop_id.into(),
            weight: weight.max(1),
        }
    }
}

/// Drops every player has in a bucket without unlocking anything.
pub struct DropDefaultsDatabase {
    defaults: HashMap<BucketId, Vec<DropDefinition>>,
}

impl DropDefaultsDatabase {
    pub fn new(defaults: HashMap<BucketId, Vec<DropDefinition>>) -> Self {
        let defaults = defaults
            .into_iter()
            .map(|(bucket, definitions)| (bucket, dedup_definitions(definitions)))
            .collect();
        Self { defaults }
    }

    pub fn builtin() -> Self {
        let entity = |id: &str, weight: u32| {
            DropDefinition::new(DropId::entity_drop_id(id).unwrap_or_default(), weight)
        };
        let item = DropDefinition::new;

        let mut defaults = HashMap::new();
        defaults.insert(
            BucketId::new("Meadow"),
            vec![
                item("Ingredient_Fibre", 20),
                item("Rock_Stone", 10),
                item("Rubble_Stone", 20),
            ],
        );
        defaults.insert(
            BucketId::new("FarmLand"),
            vec![
                item("Ingredient_Fibre", 30),
                item("Ingredient_Life_Essence", 5),
            ],
        );
        defaults.insert(
            BucketId::new("Forest"),
            vec![
                item("Wood_Ash_Trunk", 20),
                entity("Boar", 2),
                entity("Boar_Piglet", 2),
            ],
        );
        defaults.insert(
            BucketId::new("Cave"),
            vec![
                item("Rock_Stone", 30),
                item("Rubble_Stone", 15),
                item("OneBlock_Recipe_Rock_Stone_Mossy", 1),
                entity("Goblin_Miner", 2),
                entity("Goblin_Thief", 2),
                entity("Goblin_Scrapper", 2),
            ],
        );
        defaults.insert(
            BucketId::new("Deep Cave"),
            vec![
                item("Rock_Basalt", 30),
                item("Rubble_Basalt", 15),
                item("Ore_Iron", 10),
                item("OneBlock_Recipe_Cracked_Basalt", 1),
                item("OneBlock_Recipe_Rock_Basalt_Cobble", 1),
                entity("Goblin_Miner", 2),
                entity("Spider", 3),
                entity("Goblin_Thief", 2),
                entity("Goblin_Scrapper", 2),
                entity("Void_Crawler", 4),
            ],
        );
        defaults.insert(
            BucketId::new("The Abyss"),
            vec![
                item("Rock_Slate", 30),
                item("Rubble_Slate", 15),
                item("Ore_Cobalt", 10),
                item("OneBlock_Recipe_Rock_Slate_Cobble", 1),
                entity("Spider", 6),
                entity("Zombie", 6),
                entity("Earth_Elemental", 2),
                entity("Earth_Elemental", 2),
            ],
        );

        Self::new(defaults)
    }

    pub fn iter(&self) -> Iter<'_, BucketId, Vec<DropDefinition>> {
        self.defaults.iter()
    }

    pub fn get_defaults(&self, bucket: &BucketId) -> &[DropDefinition] {
        self.defaults
            .get(bucket)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Never empty: buckets without a catalog entry fall back to
    /// [`DEFAULT_ITEM_ID`].
    pub fn default_drop_ids(&self, bucket: &BucketId) -> Vec<String> {
        let ids: Vec<String> = self
            .get_defaults(bucket)
            .iter()
            .map(|definition| definition.drop_id.clone())
            .collect();

        if ids.is_empty() {
            vec![String::from(DEFAULT_ITEM_ID)]
        } else {
            ids
        }
    }

    pub fn is_default_drop(&self, bucket: &BucketId, drop_id: &str) -> bool {
        if drop_id.is_empty() {
            return false;
        }

        let definitions = self.get_defaults(bucket);
        if definitions.is_empty() {
            drop_id == DEFAULT_ITEM_ID
        } else {
            definitions
                .iter()
                .any(|definition| definition.drop_id == drop_id)
        }
    }
}

// Repeated ids keep their first position and their last weight.
fn dedup_definitions(definitions: Vec<DropDefinition>) -> Vec<DropDefinition> {
    let mut result: Vec<DropDefinition> = Vec::with_capacity(definitions.len());
    for definition in definitions {
        if definition.drop_id.trim().is_empty() {
            continue;
        }

        match result
            .iter_mut()
            .find(|existing| existing.drop_id == definition.drop_id)
        {
            Some(existing) => existing.weight = definition.weight,
            None => result.push(definition),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_meadow_defaults() {
        let database = DropDefaultsDatabase::builtin();
        let meadow = BucketId::new("Meadow");

        assert_eq!(
            database.default_drop_ids(&meadow),
            vec!["Ingredient_Fibre", "Rock_Stone", "Rubble_Stone"]
        );
        assert!(database.is_default_drop(&meadow, "Rock_Stone"));
        assert!(!database.is_default_drop(&meadow, "Soil_Sand"));
        assert!(!database.is_default_drop(&meadow, ""));
    }

    #[test]
    fn test_every_builtin_bucket_has_defaults() {
        let database = DropDefaultsDatabase::builtin();
        for (bucket, definitions) in database.iter() {
            assert!(!definitions.is_empty(), "{} has no defaults", bucket);
            assert!(definitions.iter().all(|definition| definition.weight >= 1));
        }
    }

    #[test]
    fn test_duplicate_default_is_collapsed() {
        let database = DropDefaultsDatabase::builtin();
        let abyss = database.default_drop_ids(&BucketId::new("The Abyss"));
        assert_eq!(
            abyss
                .iter()
                .filter(|id| id.as_str() == "entity:Earth_Elemental")
                .count(),
            1
        );
    }

    #[test]
    fn test_unknown_bucket_falls_back_to_default_item() {
        let database = DropDefaultsDatabase::builtin();
        let unknown = BucketId::new("Nowhere");

        assert!(database.get_defaults(&unknown).is_empty());
        assert_eq!(database.default_drop_ids(&unknown), vec![DEFAULT_ITEM_ID]);
        assert!(database.is_default_drop(&unknown, DEFAULT_ITEM_ID));
    }

    #[test]
    fn test_weight_is_clamped() {
        let mut defaults = HashMap::new();
        defaults.insert(BucketId::new("Test"), vec![DropDefinition::new("A", 0)]);
        let database = DropDefaultsDatabase::new(defaults);

        assert_eq!(database.get_defaults(&BucketId::new("Test"))[0].weight, 1);
    }
}
