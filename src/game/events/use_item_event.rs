use oneblock_game_common::components::PlayerId;

pub struct UseItemEvent {
    pub player_id: PlayerId,
    pub item_id: String,
}

impl UseItemEvent {
    pub fn new(player_id: PlayerId, item_id: String) -> Self {
        Self { player_id, item_id }
    }
}
