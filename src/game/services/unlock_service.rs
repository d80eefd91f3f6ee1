use log::debug;
use std::sync::Arc;

use oneblock_data::{UnlockDatabase, UnlockDefinition};
use oneblock_game_common::{components::PlayerId, data::DropsStateProvider};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnlockConsumeResult {
    InvalidItem,
    AlreadyUnlocked,
    Unlocked,
    UnlockFailed,
}

impl UnlockConsumeResult {
    /// Only a fresh unlock uses up the consumable.
    pub fn should_consume_item(self) -> bool {
        matches!(self, UnlockConsumeResult::Unlocked)
    }
}

pub struct UnlockService {
    unlocks: Arc<UnlockDatabase>,
    drops_state: Arc<dyn DropsStateProvider + Send + Sync>,
}

impl UnlockService {
    pub fn new(
        unlocks: Arc<UnlockDatabase>,
        drops_state: Arc<dyn DropsStateProvider + Send + Sync>,
    ) -> Self {
        Self {
            unlocks,
            drops_state,
        }
    }

    pub fn get_definition(&self, consumable_item_id: &str) -> Option<&UnlockDefinition> {
        self.unlocks.get_unlock(consumable_item_id)
    }

    pub fn get_drop_id_for_consumable(&self, consumable_item_id: &str) -> Option<&str> {
        self.get_definition(consumable_item_id)
            .map(|definition| definition.drop_id.as_str())
    }

    pub fn consume(&self, player_id: PlayerId, consumable_item_id: &str) -> UnlockConsumeResult {
        let definition = match self.get_definition(consumable_item_id) {
            Some(definition) => definition,
            None => return UnlockConsumeResult::InvalidItem,
        };

        if self
            .drops_state
            .is_unlocked(player_id, &definition.bucket, &definition.drop_id)
        {
            return UnlockConsumeResult::AlreadyUnlocked;
        }

        if self
            .drops_state
            .unlock(player_id, &definition.bucket, &definition.drop_id)
        {
            debug!(
                "Player {} unlocked {} in {} with {}",
                player_id, definition.drop_id, definition.bucket, consumable_item_id
            );
            UnlockConsumeResult::Unlocked
        } else {
            UnlockConsumeResult::UnlockFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resources::DropsStateStore;
    use oneblock_data::{BucketId, DropDefaultsDatabase};
    use std::collections::HashMap;
    use uuid::Uuid;

    fn new_service() -> (UnlockService, Arc<DropsStateStore>) {
        let mut unlocks = HashMap::new();
        unlocks.insert(
            String::from("OneBlock_Unlock_Sand"),
            UnlockDefinition::new(BucketId::new("Meadow"), "Soil_Sand", 5),
        );
        unlocks.insert(
            String::from("OneBlock_Unlock_Blank"),
            UnlockDefinition::new(BucketId::new("Meadow"), "", 5),
        );
        let store = Arc::new(DropsStateStore::new(Arc::new(
            DropDefaultsDatabase::builtin(),
        )));
        (
            UnlockService::new(Arc::new(UnlockDatabase::new(unlocks)), store.clone()),
            store,
        )
    }

    #[test]
    fn test_consume_unlocks_once() {
        let (service, store) = new_service();
        let player = PlayerId::new(Uuid::new_v4());

        assert_eq!(
            service.consume(player, "OneBlock_Unlock_Sand"),
            UnlockConsumeResult::Unlocked
        );
        assert!(store.is_unlocked(player, &BucketId::new("Meadow"), "Soil_Sand"));
        assert_eq!(
            service.consume(player, "OneBlock_Unlock_Sand"),
            UnlockConsumeResult::AlreadyUnlocked
        );
    }

    #[test]
    fn test_consume_unknown_item_is_invalid() {
        let (service, store) = new_service();
        let player = PlayerId::new(Uuid::new_v4());

        assert_eq!(service.consume(player, "Foo"), UnlockConsumeResult::InvalidItem);
        assert_eq!(
            service.consume(player, "OneBlock_Unlock_Blank"),
            UnlockConsumeResult::InvalidItem
        );
        assert_eq!(store.get_bucket_state(player, &BucketId::new("Meadow")), None);
    }

    #[test]
    fn test_drop_id_for_consumable() {
        let (service, _) = new_service();

        assert_eq!(
            service.get_drop_id_for_consumable("OneBlock_Unlock_Sand"),
            Some("Soil_Sand")
        );
        assert_eq!(service.get_drop_id_for_consumable("Foo"), None);
        assert!(!UnlockConsumeResult::AlreadyUnlocked.should_consume_item());
        assert!(UnlockConsumeResult::Unlocked.should_consume_item());
    }
}
