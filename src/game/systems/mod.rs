mod apply_key_system;
mod break_block_system;
mod chat_commands_system;
mod exchange_system;
mod use_item_system;

pub use apply_key_system::apply_key_system;
pub use break_block_system::break_block_system;
pub use chat_commands_system::{
    chat_commands_system, normalize_drop_id, ChatCommandError, CHAT_COMMANDS,
};
pub use exchange_system::exchange_system;
pub use use_item_system::use_item_system;
