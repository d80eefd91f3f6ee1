mod apply_key_event;
mod break_block_event;
mod chat_command_event;
mod exchange_event;
mod use_item_event;

pub use apply_key_event::ApplyKeyEvent;
pub use break_block_event::{BreakBlockEvent, GameMode};
pub use chat_command_event::ChatCommandEvent;
pub use exchange_event::ExchangeEvent;
pub use use_item_event::UseItemEvent;

/// Everything the host can feed into the game world.
pub enum GameEvent {
    ApplyKey(ApplyKeyEvent),
    BreakBlock(BreakBlockEvent),
    ChatCommand(ChatCommandEvent),
    Exchange(ExchangeEvent),
    UseItem(UseItemEvent),
}
