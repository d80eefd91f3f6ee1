mod drops_state;
mod reward_table;

pub use drops_state::DropsStateProvider;
pub use reward_table::RewardTable;
