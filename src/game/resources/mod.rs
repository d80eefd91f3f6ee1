mod drops_state;
mod game_config;
mod game_data;
mod reward_selector;

pub use drops_state::{BucketDropsState, DropsStateStore};
pub use game_config::GameConfig;
pub use game_data::GameData;
pub use reward_selector::RewardSelector;
