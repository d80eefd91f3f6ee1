pub mod drops;

use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;

lazy_static! {
    pub static ref LOCAL_STORAGE_DIR: PathBuf = ProjectDirs::from("", "", "oneblock")
        .map(|project| PathBuf::from(project.data_local_dir()))
        .unwrap_or_else(|| PathBuf::from("data"));
    pub static ref DROPS_STORAGE_PATH: PathBuf = LOCAL_STORAGE_DIR.join("drops.json");
}
