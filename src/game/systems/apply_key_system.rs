use log::warn;

use oneblock_data::{block_id_for_bucket, bucket_from_key_item_id, is_reward_block};
use oneblock_game_common::data::DropsStateProvider;

use crate::game::{events::ApplyKeyEvent, resources::GameData, HostWorld};

/// Moves a reward block to the expedition named by the key. Returns whether
/// the key was used up.
pub fn apply_key_system(
    game_data: &GameData,
    world: &mut dyn HostWorld,
    event: &ApplyKeyEvent,
) -> bool {
    let bucket = match bucket_from_key_item_id(&event.key_item_id) {
        Some(bucket) => bucket,
        None => {
            warn!("Invalid expedition key item id {}", event.key_item_id);
            return false;
        }
    };

    if !is_reward_block(&world.block_categories(&event.block_id)) {
        world.send_message(event.player_id, "That is not a OneBlock block.");
        return false;
    }

    let target_block_id = block_id_for_bucket(&bucket);
    if target_block_id == event.block_id {
        world.send_message(event.player_id, "OneBlock is already in that expedition.");
        return false;
    }

    world.set_block(event.position, &target_block_id);
    world.consume_item(event.player_id, &event.key_item_id);
    game_data
        .drops_state
        .reset_enabled_to_unlocked(event.player_id, &bucket);

    world.send_message(
        event.player_id,
        &format!("OneBlock expedition set to: {}", bucket),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{HeadlessWorld, WorldChange};
    use oneblock_data::BucketId;
    use oneblock_game_common::components::{BlockPosition, PlayerId};
    use uuid::Uuid;

    fn key_event(player: PlayerId, key_item_id: &str, block_id: &str) -> ApplyKeyEvent {
        ApplyKeyEvent::new(
            player,
            key_item_id.to_string(),
            block_id.to_string(),
            BlockPosition::default(),
        )
    }

    #[test]
    fn test_key_changes_expedition() {
        let game_data = GameData::in_memory();
        let mut world = HeadlessWorld::default();
        let player = PlayerId::new(Uuid::new_v4());
        let cave = BucketId::new("Cave");

        game_data.drops_state.unlock(player, &cave, "Ore_Iron");
        game_data
            .drops_state
            .set_enabled(player, &cave, "Ore_Iron", false);

        assert!(apply_key_system(
            &game_data,
            &mut world,
            &key_event(player, "OneBlock_Expedition_Cave_Key", "OneBlock_Block_Meadow")
        ));
        assert_eq!(
            &world.changes()[..2],
            &[
                WorldChange::SetBlock(BlockPosition::default(), String::from("OneBlock_Block_Cave")),
                WorldChange::ConsumeItem(player, String::from("OneBlock_Expedition_Cave_Key")),
            ]
        );
        assert!(game_data
            .drops_state
            .get_enabled_drops(player, &cave)
            .contains(&String::from("Ore_Iron")));
    }

    #[test]
    fn test_key_for_current_expedition_is_kept() {
        let game_data = GameData::in_memory();
        let mut world = HeadlessWorld::default();
        let player = PlayerId::new(Uuid::new_v4());

        assert!(!apply_key_system(
            &game_data,
            &mut world,
            &key_event(player, "OneBlock_Expedition_Cave", "OneBlock_Block_Cave")
        ));
        assert_eq!(
            world.messages(player),
            vec!["OneBlock is already in that expedition."]
        );
    }

    #[test]
    fn test_invalid_key_or_block_is_rejected() {
        let game_data = GameData::in_memory();
        let mut world = HeadlessWorld::default();
        let player = PlayerId::new(Uuid::new_v4());

        assert!(!apply_key_system(
            &game_data,
            &mut world,
            &key_event(player, "Rock_Stone", "OneBlock_Block_Meadow")
        ));
        assert!(world.changes().is_empty());

        assert!(!apply_key_system(
            &game_data,
            &mut world,
            &key_event(player, "OneBlock_Expedition_Cave_Key", "Rock_Stone")
        ));
        assert_eq!(world.messages(player), vec!["That is not a OneBlock block."]);
    }
}
