use crate::game::{
    events::UseItemEvent, resources::GameData, services::UnlockConsumeResult, HostWorld,
};

/// Consumes an unlock item. Items that unlock nothing are left alone.
pub fn use_item_system(
    game_data: &GameData,
    world: &mut dyn HostWorld,
    event: &UseItemEvent,
) -> UnlockConsumeResult {
    let result = game_data
        .unlock_service
        .consume(event.player_id, &event.item_id);

    match result {
        UnlockConsumeResult::InvalidItem => {}
        UnlockConsumeResult::AlreadyUnlocked => world.send_message(
            event.player_id,
            &format!("OneBlock unlock already known: {}", event.item_id),
        ),
        UnlockConsumeResult::Unlocked => {
            world.consume_item(event.player_id, &event.item_id);

            let drop_id = game_data
                .unlock_service
                .get_drop_id_for_consumable(&event.item_id)
                .unwrap_or(event.item_id.as_str());
            world.send_message(
                event.player_id,
                &format!("Unlocked OneBlock drop: {}", drop_id),
            );
        }
        UnlockConsumeResult::UnlockFailed => world.send_message(
            event.player_id,
            &format!("Failed to unlock OneBlock drop from: {}", event.item_id),
        ),
    }

    result
}
