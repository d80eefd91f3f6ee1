use std::path::PathBuf;

use crate::game::storage::DROPS_STORAGE_PATH;

/// Startup settings, built once in `main`.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub storage_path: PathBuf,
    pub game_data_path: Option<PathBuf>,
    pub flush_on_mutation: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_path: DROPS_STORAGE_PATH.clone(),
            game_data_path: None,
            flush_on_mutation: true,
        }
    }
}
