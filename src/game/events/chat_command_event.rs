use oneblock_game_common::components::PlayerId;

pub struct ChatCommandEvent {
    pub player_id: PlayerId,
    pub command: String,
}

impl ChatCommandEvent {
    pub fn new(player_id: PlayerId, command: String) -> Self {
        Self { player_id, command }
    }
}
