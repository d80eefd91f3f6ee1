use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;

use oneblock_data::DEFAULT_BUCKET;

#[derive(Error, Debug)]
pub enum DropsStorageError {
    #[error("Drops storage file {0} not found")]
    NotFound(PathBuf),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BucketDropsStorage {
    #[serde(default)]
    pub unlocked: Vec<String>,
    #[serde(default)]
    pub enabled: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerDropsStorage {
    #[serde(default)]
    pub buckets: BTreeMap<String, BucketDropsStorage>,
}

/// On-disk form of every player's drop state:
/// `{ players: { <uuid>: { buckets: { <bucket>: { unlocked, enabled } } } } }`.
///
/// Reading is lenient. The flat form without `buckets`, written before
/// buckets existed, is read into the default bucket, and malformed entries
/// are skipped individually.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DropsStorage {
    #[serde(default)]
    pub players: BTreeMap<String, PlayerDropsStorage>,
}

fn read_string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(values)) => Some(
            values
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
        ),
        Some(_) => None,
    }
}

fn read_bucket(value: &Value) -> Option<BucketDropsStorage> {
    let object = value.as_object()?;
    Some(BucketDropsStorage {
        unlocked: read_string_list(object.get("unlocked"))?,
        enabled: read_string_list(object.get("enabled"))?,
    })
}

fn read_player(player_key: &str, value: &Value) -> Option<PlayerDropsStorage> {
    let object = match value.as_object() {
        Some(object) => object,
        None => {
            warn!("Skipping malformed drops entry for player {}", player_key);
            return None;
        }
    };

    let mut player = PlayerDropsStorage::default();
    match object.get("buckets") {
        Some(Value::Object(buckets)) => {
            for (bucket_key, bucket_value) in buckets {
                if bucket_key.trim().is_empty() {
                    warn!("Skipping unnamed bucket for player {}", player_key);
                    continue;
                }

                match read_bucket(bucket_value) {
                    Some(bucket) => {
                        player.buckets.insert(bucket_key.clone(), bucket);
                    }
                    None => warn!(
                        "Skipping malformed bucket {} for player {}",
                        bucket_key, player_key
                    ),
                }
            }
        }
        None | Some(Value::Null) => {
            if object.contains_key("unlocked") || object.contains_key("enabled") {
                match read_bucket(value) {
                    Some(bucket) => {
                        player.buckets.insert(String::from(DEFAULT_BUCKET), bucket);
                    }
                    None => warn!("Skipping malformed drops for player {}", player_key),
                }
            }
        }
        Some(_) => warn!("Skipping malformed buckets for player {}", player_key),
    }

    Some(player)
}

impl DropsStorage {
    pub fn from_value(value: &Value) -> Self {
        let mut storage = Self::default();
        let players = match value.get("players").and_then(Value::as_object) {
            Some(players) => players,
            None => {
                debug!("Drops storage has no players section, starting empty");
                return storage;
            }
        };

        for (player_key, player_value) in players {
            if let Some(player) = read_player(player_key, player_value) {
                storage.players.insert(player_key.clone(), player);
            }
        }

        storage
    }

    pub fn try_load(path: &Path) -> Result<Self, anyhow::Error> {
        if !path.exists() {
            return Err(DropsStorageError::NotFound(path.to_path_buf()).into());
        }

        let str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.to_string_lossy()))?;
        let value: Value = serde_json::from_str(&str).with_context(|| {
            format!(
                "Failed to deserialise DropsStorage from file {}",
                path.to_string_lossy()
            )
        })?;
        Ok(Self::from_value(&value))
    }

    pub fn save(&self, path: &Path) -> Result<(), anyhow::Error> {
        let storage_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        std::fs::create_dir_all(storage_dir).with_context(|| {
            format!(
                "Failed to create drops storage directory {}",
                storage_dir.to_string_lossy()
            )
        })?;

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialise DropsStorage whilst saving drops")?;

        let mut file = tempfile::Builder::new()
            .tempfile_in(storage_dir)
            .context("Failed to create temporary file whilst saving drops")?;
        file.write_all(json.as_bytes())
            .context("Failed to write data to temporary file whilst saving drops")?;
        file.persist(path).with_context(|| {
            format!(
                "Failed to persist temporary drops file to path {}",
                path.to_string_lossy()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_nested_buckets() {
        let storage = DropsStorage::from_value(&json!({
            "players": {
                "p1": { "buckets": {
                    "Cave": { "unlocked": ["Rock_Stone", "Ore_Iron"], "enabled": ["Ore_Iron"] },
                    "Forest": { "unlocked": ["Wood_Ash_Trunk"] }
                }}
            }
        }));

        let player = &storage.players["p1"];
        assert_eq!(player.buckets.len(), 2);
        assert_eq!(player.buckets["Cave"].enabled, vec!["Ore_Iron"]);
        assert!(player.buckets["Forest"].enabled.is_empty());
    }

    #[test]
    fn test_read_legacy_flat_player() {
        let storage = DropsStorage::from_value(&json!({
            "players": {
                "p1": { "unlocked": ["Soil_Sand"], "enabled": ["Soil_Sand"] }
            }
        }));

        let player = &storage.players["p1"];
        assert_eq!(player.buckets.len(), 1);
        assert_eq!(player.buckets[DEFAULT_BUCKET].unlocked, vec!["Soil_Sand"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let storage = DropsStorage::from_value(&json!({
            "players": {
                "p1": { "buckets": {
                    "Good": { "unlocked": ["A", 7, null] },
                    "Bad": { "unlocked": "A" },
                    "Worse": 12,
                    "": { "unlocked": ["B"] }
                }},
                "p2": "garbage"
            }
        }));

        assert_eq!(storage.players.len(), 1);
        let player = &storage.players["p1"];
        assert_eq!(player.buckets.len(), 1);
        assert_eq!(player.buckets["Good"].unlocked, vec!["A"]);
    }

    #[test]
    fn test_missing_players_is_empty() {
        assert!(DropsStorage::from_value(&json!({})).players.is_empty());
        assert!(DropsStorage::from_value(&json!({ "players": null }))
            .players
            .is_empty());
        assert!(DropsStorage::from_value(&json!([1, 2])).players.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("drops.json");

        let mut storage = DropsStorage::default();
        let mut player = PlayerDropsStorage::default();
        player.buckets.insert(
            String::from("Cave"),
            BucketDropsStorage {
                unlocked: vec![String::from("Ore_Iron")],
                enabled: vec![String::from("Ore_Iron")],
            },
        );
        storage.players.insert(String::from("p1"), player);

        storage.save(&path).unwrap();
        assert_eq!(DropsStorage::try_load(&path).unwrap(), storage);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let error = DropsStorage::try_load(&dir.path().join("drops.json"))
            .err()
            .unwrap();
        assert!(matches!(
            error.downcast_ref::<DropsStorageError>(),
            Some(DropsStorageError::NotFound(_))
        ));
    }
}
