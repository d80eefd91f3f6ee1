use crate::game::{
    events::ExchangeEvent, resources::GameData, services::ExchangeConsumeResult, HostWorld,
};

/// Trades an exchange item for its output once the exchange is unlocked.
pub fn exchange_system(
    game_data: &GameData,
    world: &mut dyn HostWorld,
    event: &ExchangeEvent,
) -> ExchangeConsumeResult {
    let exchange_service = &game_data.exchange_service;
    let result = exchange_service.can_consume(event.player_id, &event.exchange_item_id);

    let definition = match exchange_service.get_definition(&event.exchange_item_id) {
        Some(definition) => definition,
        None => return ExchangeConsumeResult::InvalidItem,
    };

    match result {
        ExchangeConsumeResult::InvalidItem => {}
        ExchangeConsumeResult::Locked => world.send_message(
            event.player_id,
            &format!(
                "Exchange not unlocked: {} (requires {})",
                event.exchange_item_id,
                definition.unlock_id.as_deref().unwrap_or_default()
            ),
        ),
        ExchangeConsumeResult::Ready => {
            world.give_item(
                event.player_id,
                &definition.output_id,
                definition.output_quantity,
            );
            world.consume_item(event.player_id, &event.exchange_item_id);
            world.send_message(
                event.player_id,
                &format!(
                    "Exchanged for: {} x{}",
                    definition.output_id, definition.output_quantity
                ),
            );
        }
    }

    result
}
