use oneblock_game_common::components::{BlockPosition, PlayerId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    Adventure,
    Creative,
}

pub struct BreakBlockEvent {
    pub player_id: PlayerId,
    pub game_mode: GameMode,
    pub block_id: String,
    pub position: BlockPosition,
}

impl BreakBlockEvent {
    pub fn new(
        player_id: PlayerId,
        game_mode: GameMode,
        block_id: String,
        position: BlockPosition,
    ) -> Self {
        Self {
            player_id,
            game_mode,
            block_id,
            position,
        }
    }
}
