mod block_position;
mod player_id;

pub use block_position::BlockPosition;
pub use player_id::PlayerId;
