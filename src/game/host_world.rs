use thiserror::Error;

use oneblock_game_common::components::{BlockPosition, PlayerId};

#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("Unknown npc {0}")]
    UnknownNpc(String),
    #[error("Npc spawn rejected at {0:?}")]
    Rejected(BlockPosition),
}

/// Optional host capability for spawning creatures.
pub trait NpcSpawner {
    fn spawn_npc(&mut self, npc_id: &str, position: BlockPosition) -> Result<(), SpawnError>;
}

/// Everything the event systems need from the hosting game.
pub trait HostWorld {
    fn block_categories(&self, block_id: &str) -> Vec<String>;

    fn set_block(&mut self, position: BlockPosition, block_id: &str);

    fn spawn_item(&mut self, position: BlockPosition, item_id: &str, quantity: u32);

    fn give_item(&mut self, player_id: PlayerId, item_id: &str, quantity: u32);

    /// Removes one of `item_id` from the player's hand or inventory.
    fn consume_item(&mut self, player_id: PlayerId, item_id: &str);

    fn send_message(&mut self, player_id: PlayerId, message: &str);

    /// `None` when the host cannot spawn npcs.
    fn npc_spawner(&mut self) -> Option<&mut dyn NpcSpawner>;
}
