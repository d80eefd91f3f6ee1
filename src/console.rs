use log::info;
use thiserror::Error;

use oneblock_data::{BLOCK_PREFIX, REWARD_BLOCK_CATEGORY};
use oneblock_game_common::components::{BlockPosition, PlayerId};

use crate::game::{
    events::{
        ApplyKeyEvent, BreakBlockEvent, ChatCommandEvent, ExchangeEvent, GameEvent, GameMode,
        UseItemEvent,
    },
    HostWorld, NpcSpawner, SpawnError,
};

/// Where simulated console events happen.
pub const CONSOLE_BLOCK_POSITION: BlockPosition = BlockPosition { x: 0, y: 64, z: 0 };

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldChange {
    SetBlock(BlockPosition, String),
    SpawnItem(BlockPosition, String, u32),
    SpawnNpc(BlockPosition, String),
    GiveItem(PlayerId, String, u32),
    ConsumeItem(PlayerId, String),
    Message(PlayerId, String),
}

/// A world with no real blocks: every `OneBlock_Block_*` id is a reward
/// block, every change is logged and, unless disabled, recorded.
pub struct HeadlessWorld {
    spawn_npcs: bool,
    record_changes: bool,
    changes: Vec<WorldChange>,
}

impl Default for HeadlessWorld {
    fn default() -> Self {
        Self::new(false)
    }
}

impl HeadlessWorld {
    pub fn new(spawn_npcs: bool) -> Self {
        Self {
            spawn_npcs,
            record_changes: true,
            changes: Vec::new(),
        }
    }

    pub fn without_recording(mut self) -> Self {
        self.record_changes = false;
        self
    }

    fn record(&mut self, change: WorldChange) {
        if self.record_changes {
            self.changes.push(change);
        }
    }

    pub fn changes(&self) -> &[WorldChange] {
        &self.changes
    }

    pub fn take_changes(&mut self) -> Vec<WorldChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn messages(&self, player_id: PlayerId) -> Vec<&str> {
        self.changes
            .iter()
            .filter_map(|change| match change {
                WorldChange::Message(target, message) if *target == player_id => {
                    Some(message.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

impl NpcSpawner for HeadlessWorld {
    fn spawn_npc(&mut self, npc_id: &str, position: BlockPosition) -> Result<(), SpawnError> {
        if npc_id.trim().is_empty() {
            return Err(SpawnError::UnknownNpc(npc_id.to_string()));
        }

        info!("Spawned npc {} at {:?}", npc_id, position);
        self.record(WorldChange::SpawnNpc(position, npc_id.to_string()));
        Ok(())
    }
}

impl HostWorld for HeadlessWorld {
    fn block_categories(&self, block_id: &str) -> Vec<String> {
        if block_id.starts_with(BLOCK_PREFIX) {
            vec![String::from(REWARD_BLOCK_CATEGORY)]
        } else {
            Vec::new()
        }
    }

    fn set_block(&mut self, position: BlockPosition, block_id: &str) {
        info!("Set block {:?} to {}", position, block_id);
        self.record(WorldChange::SetBlock(position, block_id.to_string()));
    }

    fn spawn_item(&mut self, position: BlockPosition, item_id: &str, quantity: u32) {
        info!("Spawned {} x{} at {:?}", item_id, quantity, position);
        self.record(WorldChange::SpawnItem(position, item_id.to_string(), quantity));
    }

    fn give_item(&mut self, player_id: PlayerId, item_id: &str, quantity: u32) {
        info!("Gave {} x{} to {}", item_id, quantity, player_id);
        self.record(WorldChange::GiveItem(player_id, item_id.to_string(), quantity));
    }

    fn consume_item(&mut self, player_id: PlayerId, item_id: &str) {
        info!("Consumed {} from {}", item_id, player_id);
        self.record(WorldChange::ConsumeItem(player_id, item_id.to_string()));
    }

    fn send_message(&mut self, player_id: PlayerId, message: &str) {
        info!("[{}] {}", player_id, message);
        self.record(WorldChange::Message(player_id, message.to_string()));
    }

    fn npc_spawner(&mut self) -> Option<&mut dyn NpcSpawner> {
        if self.spawn_npcs {
            Some(self)
        } else {
            None
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConsoleLineError {
    #[error("Expected <player-uuid> <command>")]
    MissingCommand,
    #[error("Invalid player id {0}")]
    InvalidPlayerId(String),
    #[error("Mismatched quotes")]
    MismatchedQuotes,
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Parses `<player-uuid> <command...>`. The world events `break`, `use`,
/// `key` and `exchange` are simulated, anything else is a chat command.
pub fn parse_console_line(line: &str) -> Result<Option<GameEvent>, ConsoleLineError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (player, command) = line
        .split_once(char::is_whitespace)
        .ok_or(ConsoleLineError::MissingCommand)?;
    let player_id = player
        .parse::<PlayerId>()
        .map_err(|_| ConsoleLineError::InvalidPlayerId(player.to_string()))?;
    let command = command.trim();

    let words = shellwords::split(command).map_err(|_| ConsoleLineError::MismatchedQuotes)?;
    let arg = |index: usize, usage: &'static str| {
        words
            .get(index)
            .cloned()
            .ok_or(ConsoleLineError::Usage(usage))
    };

    let event = match words.first().map(String::as_str) {
        Some("break") => {
            let block_id = arg(1, "break <block-id> [creative]")?;
            let game_mode = match words.get(2).map(String::as_str) {
                Some("creative") => GameMode::Creative,
                _ => GameMode::Adventure,
            };
            GameEvent::BreakBlock(BreakBlockEvent::new(
                player_id,
                game_mode,
                block_id,
                CONSOLE_BLOCK_POSITION,
            ))
        }
        Some("use") => {
            let item_id = arg(1, "use <item-id>")?;
            GameEvent::UseItem(UseItemEvent::new(player_id, item_id))
        }
        Some("key") => {
            let key_item_id = arg(1, "key <item-id> <block-id>")?;
            let block_id = arg(2, "key <item-id> <block-id>")?;
            GameEvent::ApplyKey(ApplyKeyEvent::new(
                player_id,
                key_item_id,
                block_id,
                CONSOLE_BLOCK_POSITION,
            ))
        }
        Some("exchange") => {
            let item_id = arg(1, "exchange <item-id>")?;
            GameEvent::Exchange(ExchangeEvent::new(player_id, item_id))
        }
        Some(_) => GameEvent::ChatCommand(ChatCommandEvent::new(player_id, command.to_string())),
        None => return Err(ConsoleLineError::MissingCommand),
    };

    Ok(Some(event))
}
