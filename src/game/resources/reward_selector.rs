use log::debug;
use rand::Rng;
use std::collections::HashMap;

use oneblock_data::{BucketId, DropDefaultsDatabase, UnlockDatabase, DEFAULT_ITEM_ID};
use oneblock_game_common::data::RewardTable;

/// Weighted pick over a player's enabled drops.
///
/// Weights are registered once at startup: bucket defaults first, then
/// unlock definitions, so a configured unlock overrides a builtin weight
/// for the same drop.
#[derive(Default)]
pub struct RewardSelector {
    weights: HashMap<BucketId, HashMap<String, u32>>,
}

impl RewardSelector {
    pub fn new(drop_defaults: &DropDefaultsDatabase, unlocks: &UnlockDatabase) -> Self {
        let mut selector = Self::default();
        selector.register_default_weights(drop_defaults);
        selector.register_unlock_weights(unlocks);
        selector
    }

    pub fn register_default_weights(&mut self, drop_defaults: &DropDefaultsDatabase) {
        for (bucket, definitions) in drop_defaults.iter() {
            for definition in definitions {
                self.register_weight(bucket, &definition.drop_id, definition.weight);
            }
        }
    }

    pub fn register_unlock_weights(&mut self, unlocks: &UnlockDatabase) {
        for (_, definition) in unlocks.iter() {
            self.register_weight(&definition.bucket, &definition.drop_id, definition.weight);
        }
    }

    pub fn register_weight(&mut self, bucket: &BucketId, drop_id: &str, weight: u32) {
        if drop_id.trim().is_empty() {
            return;
        }

        self.weights
            .entry(bucket.clone())
            .or_default()
            .insert(drop_id.to_string(), weight.max(1));
    }

    pub fn get_weight(&self, bucket: &BucketId, drop_id: &str) -> u32 {
        if drop_id.trim().is_empty() {
            return 0;
        }

        self.weights
            .get(bucket)
            .and_then(|weights| weights.get(drop_id))
            .copied()
            .unwrap_or(1)
    }

    pub fn pick_reward_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bucket: &BucketId,
        candidates: &[String],
    ) -> String {
        let total_weight: u64 = candidates
            .iter()
            .map(|drop_id| self.get_weight(bucket, drop_id) as u64)
            .sum();
        if total_weight == 0 {
            return String::from(DEFAULT_ITEM_ID);
        }

        let roll = rng.gen_range(0..total_weight);
        let mut cumulative = 0;
        for drop_id in candidates {
            let weight = self.get_weight(bucket, drop_id) as u64;
            if weight == 0 {
                continue;
            }

            cumulative += weight;
            if roll < cumulative {
                return drop_id.clone();
            }
        }

        debug!(
            "Weighted roll {} of {} fell through in bucket {}",
            roll, total_weight, bucket
        );
        String::from(DEFAULT_ITEM_ID)
    }
}

impl RewardTable for RewardSelector {
    fn pick_reward(&self, bucket: &BucketId, candidates: &[String]) -> String {
        self.pick_reward_with_rng(&mut rand::thread_rng(), bucket, candidates)
    }

    fn known_drops(&self, bucket: &BucketId) -> Vec<String> {
        let mut drops: Vec<String> = self
            .weights
            .get(bucket)
            .map(|weights| weights.keys().cloned().collect())
            .unwrap_or_default();
        drops.sort_by_key(|drop_id| drop_id.to_lowercase());
        drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneblock_data::UnlockDefinition;
    use rand::{rngs::StdRng, SeedableRng};

    fn meadow() -> BucketId {
        BucketId::new("Meadow")
    }

    fn builtin_selector() -> RewardSelector {
        RewardSelector::new(&DropDefaultsDatabase::builtin(), &UnlockDatabase::default())
    }

    #[test]
    fn test_empty_candidates_pick_default_item() {
        let selector = builtin_selector();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            selector.pick_reward_with_rng(&mut rng, &meadow(), &[]),
            DEFAULT_ITEM_ID
        );
        assert_eq!(selector.pick_reward(&meadow(), &[]), DEFAULT_ITEM_ID);
    }

    #[test]
    fn test_single_candidate_always_wins() {
        let selector = builtin_selector();
        let mut rng = StdRng::seed_from_u64(11);
        let candidates = vec![String::from("Soil_Sand")];

        for _ in 0..100 {
            assert_eq!(
                selector.pick_reward_with_rng(&mut rng, &meadow(), &candidates),
                "Soil_Sand"
            );
        }
    }

    #[test]
    fn test_blank_candidates_are_never_picked() {
        let selector = builtin_selector();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            selector.pick_reward_with_rng(&mut rng, &meadow(), &[String::new()]),
            DEFAULT_ITEM_ID
        );

        let candidates = vec![String::new(), String::from("Rock_Stone"), String::from(" ")];
        for _ in 0..50 {
            assert_eq!(
                selector.pick_reward_with_rng(&mut rng, &meadow(), &candidates),
                "Rock_Stone"
            );
        }
    }

    #[test]
    fn test_weights_shape_the_distribution() {
        let mut selector = RewardSelector::default();
        selector.register_weight(&meadow(), "Common", 99);
        selector.register_weight(&meadow(), "Rare", 1);
        let candidates = vec![String::from("Common"), String::from("Rare")];
        let mut rng = StdRng::seed_from_u64(42);

        let common = (0..1000)
            .filter(|_| selector.pick_reward_with_rng(&mut rng, &meadow(), &candidates) == "Common")
            .count();
        assert!(common > 900, "Common picked {} times", common);
    }

    #[test]
    fn test_unlock_weight_overrides_default() {
        let mut unlocks = HashMap::new();
        unlocks.insert(
            String::from("OneBlock_Unlock_Stone"),
            UnlockDefinition::new(meadow(), "Rock_Stone", 50),
        );
        let selector = RewardSelector::new(
            &DropDefaultsDatabase::builtin(),
            &UnlockDatabase::new(unlocks),
        );

        assert_eq!(selector.get_weight(&meadow(), "Rock_Stone"), 50);
        assert_eq!(selector.get_weight(&meadow(), "Rubble_Stone"), 20);
        assert_eq!(selector.get_weight(&meadow(), "Unregistered"), 1);
        assert_eq!(
            selector.get_weight(&BucketId::new("Nowhere"), "Rock_Stone"),
            1
        );
    }

    #[test]
    fn test_known_drops_sorted_case_insensitively() {
        let mut selector = RewardSelector::default();
        selector.register_weight(&meadow(), "b_drop", 1);
        selector.register_weight(&meadow(), "A_drop", 1);
        selector.register_weight(&meadow(), "C_drop", 1);

        assert_eq!(
            selector.known_drops(&meadow()),
            vec!["A_drop", "b_drop", "C_drop"]
        );
        assert!(selector.known_drops(&BucketId::new("Nowhere")).is_empty());
    }
}
