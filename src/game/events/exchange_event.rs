use oneblock_game_common::components::PlayerId;

pub struct ExchangeEvent {
    pub player_id: PlayerId,
    pub exchange_item_id: String,
}

impl ExchangeEvent {
    pub fn new(player_id: PlayerId, exchange_item_id: String) -> Self {
        Self {
            player_id,
            exchange_item_id,
        }
    }
}
