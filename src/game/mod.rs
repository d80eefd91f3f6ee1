mod game_world;
mod host_world;

pub mod events;
pub mod resources;
pub mod services;
pub mod storage;
pub mod systems;

pub use game_world::GameWorld;
pub use host_world::{HostWorld, NpcSpawner, SpawnError};
