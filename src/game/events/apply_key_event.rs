use oneblock_game_common::components::{BlockPosition, PlayerId};

/// A held key item used on a block.
pub struct ApplyKeyEvent {
    pub player_id: PlayerId,
    pub key_item_id: String,
    pub block_id: String,
    pub position: BlockPosition,
}

impl ApplyKeyEvent {
    pub fn new(
        player_id: PlayerId,
        key_item_id: String,
        block_id: String,
        position: BlockPosition,
    ) -> Self {
        Self {
            player_id,
            key_item_id,
            block_id,
            position,
        }
    }
}
