use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};

use oneblock_data::{BucketId, DropDefaultsDatabase};
use oneblock_game_common::{components::PlayerId, data::DropsStateProvider};

use crate::game::storage::drops::{
    BucketDropsStorage, DropsStorage, DropsStorageError, PlayerDropsStorage,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketDropsState {
    pub unlocked: BTreeSet<String>,
    pub enabled: BTreeSet<String>,
}

impl BucketDropsState {
    fn with_defaults(default_drop_ids: &[String]) -> Self {
        Self {
            unlocked: default_drop_ids.iter().cloned().collect(),
            enabled: default_drop_ids.iter().cloned().collect(),
        }
    }

    /// Drops blank ids, keeps `enabled` within unlocked drops and defaults,
    /// and refills either set with the defaults if it ended up empty.
    fn ensure_defaults(&mut self, default_drop_ids: &[String]) {
        self.unlocked.retain(|drop_id| !drop_id.trim().is_empty());

        let unlocked = &self.unlocked;
        self.enabled.retain(|drop_id| {
            !drop_id.trim().is_empty()
                && (unlocked.contains(drop_id) || default_drop_ids.contains(drop_id))
        });

        if self.unlocked.is_empty() {
            self.unlocked.extend(default_drop_ids.iter().cloned());
        }

        if self.enabled.is_empty() {
            self.enabled.extend(default_drop_ids.iter().cloned());
        }
    }
}

type PlayerBuckets = HashMap<BucketId, BucketDropsState>;

#[derive(Default)]
struct DropsState {
    players: HashMap<PlayerId, PlayerBuckets>,
    dirty: bool,
}

/// The unlocked/enabled drop sets of every player, written through to a
/// JSON file after each change.
///
/// All access goes through a single mutex. A failed write leaves the store
/// dirty so the next change (or [`DropsStateStore::save_if_dirty`]) retries
/// it; in-memory state is never rolled back.
pub struct DropsStateStore {
    drop_defaults: Arc<DropDefaultsDatabase>,
    storage_path: Option<PathBuf>,
    flush_on_mutation: bool,
    state: Mutex<DropsState>,
}

fn bucket_state<'a>(
    players: &'a mut HashMap<PlayerId, PlayerBuckets>,
    dirty: &mut bool,
    drop_defaults: &DropDefaultsDatabase,
    player_id: PlayerId,
    bucket: &BucketId,
) -> &'a mut BucketDropsState {
    players
        .entry(player_id)
        .or_default()
        .entry(bucket.clone())
        .or_insert_with(|| {
            *dirty = true;
            BucketDropsState::with_defaults(&drop_defaults.default_drop_ids(bucket))
        })
}

impl DropsStateStore {
    /// A store that is never written to disk.
    pub fn new(drop_defaults: Arc<DropDefaultsDatabase>) -> Self {
        Self {
            drop_defaults,
            storage_path: None,
            flush_on_mutation: true,
            state: Mutex::new(DropsState::default()),
        }
    }

    /// Loads the store from `storage_path`. A missing or unreadable file
    /// starts an empty store that will be written back to the same path.
    pub fn load(drop_defaults: Arc<DropDefaultsDatabase>, storage_path: &Path) -> Self {
        let mut state = DropsState::default();

        match DropsStorage::try_load(storage_path) {
            Ok(storage) => {
                state.players = Self::players_from_storage(&drop_defaults, storage);
                info!(
                    "Loaded drops state for {} players from {}",
                    state.players.len(),
                    storage_path.to_string_lossy()
                );
            }
            Err(error) => match error.downcast_ref::<DropsStorageError>() {
                Some(DropsStorageError::NotFound(_)) => {
                    debug!(
                        "No drops state at {}, starting empty",
                        storage_path.to_string_lossy()
                    );
                }
                None => error!("Failed to load drops state with error {:?}", error),
            },
        }

        Self {
            drop_defaults,
            storage_path: Some(storage_path.to_path_buf()),
            flush_on_mutation: true,
            state: Mutex::new(state),
        }
    }

    /// When disabled, changes only mark the store dirty and are written by
    /// [`DropsStateStore::save_if_dirty`].
    pub fn with_flush_on_mutation(mut self, flush_on_mutation: bool) -> Self {
        self.flush_on_mutation = flush_on_mutation;
        self
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    /// Returns whether the file on disk now matches memory.
    pub fn save_if_dirty(&self) -> bool {
        let mut state = self.state.lock();
        self.flush(&mut state)
    }

    /// Copy of one player's bucket, without creating it.
    pub fn get_bucket_state(
        &self,
        player_id: PlayerId,
        bucket: &BucketId,
    ) -> Option<BucketDropsState> {
        self.state
            .lock()
            .players
            .get(&player_id)
            .and_then(|buckets| buckets.get(bucket))
            .cloned()
    }

    fn players_from_storage(
        drop_defaults: &DropDefaultsDatabase,
        storage: DropsStorage,
    ) -> HashMap<PlayerId, PlayerBuckets> {
        let mut players = HashMap::new();

        for (player_key, player_storage) in storage.players {
            let player_id = match player_key.parse::<PlayerId>() {
                Ok(player_id) => player_id,
                Err(_) => {
                    warn!("Dropping drops state for invalid player id {:?}", player_key);
                    continue;
                }
            };

            let buckets: &mut PlayerBuckets = players.entry(player_id).or_default();
            for (bucket_key, bucket_storage) in player_storage.buckets {
                let bucket = BucketId::new(&bucket_key);
                let default_drop_ids = drop_defaults.default_drop_ids(&bucket);
                let mut bucket_state = BucketDropsState {
                    unlocked: bucket_storage.unlocked.into_iter().collect(),
                    enabled: bucket_storage.enabled.into_iter().collect(),
                };
                bucket_state.ensure_defaults(&default_drop_ids);
                buckets.insert(bucket, bucket_state);
            }
        }

        players
    }

    fn to_storage(state: &DropsState) -> DropsStorage {
        let mut storage = DropsStorage::default();
        for (player_id, buckets) in state.players.iter() {
            let mut player_storage = PlayerDropsStorage::default();
            for (bucket, bucket_state) in buckets.iter() {
                player_storage.buckets.insert(
                    bucket.to_string(),
                    BucketDropsStorage {
                        unlocked: bucket_state.unlocked.iter().cloned().collect(),
                        enabled: bucket_state.enabled.iter().cloned().collect(),
                    },
                );
            }
            storage.players.insert(player_id.to_string(), player_storage);
        }
        storage
    }

    fn flush(&self, state: &mut DropsState) -> bool {
        if !state.dirty {
            return true;
        }

        let storage_path = match self.storage_path.as_deref() {
            Some(storage_path) => storage_path,
            None => {
                state.dirty = false;
                return true;
            }
        };

        match Self::to_storage(state).save(storage_path) {
            Ok(_) => {
                state.dirty = false;
                info!("Saved drops state to {}", storage_path.to_string_lossy());
                true
            }
            Err(error) => {
                warn!(
                    "Failed to save drops state to {} with error {:?}",
                    storage_path.to_string_lossy(),
                    error
                );
                false
            }
        }
    }

    fn mark_changed(&self, state: &mut DropsState) {
        state.dirty = true;
        if self.flush_on_mutation {
            self.flush(state);
        }
    }
}

impl DropsStateProvider for DropsStateStore {
    fn get_enabled_drops(&self, player_id: PlayerId, bucket: &BucketId) -> Vec<String> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let bucket_state = bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        );

        if bucket_state.enabled.is_empty() {
            self.drop_defaults.default_drop_ids(bucket)
        } else {
            bucket_state.enabled.iter().cloned().collect()
        }
    }

    fn get_unlocked_drops(&self, player_id: PlayerId, bucket: &BucketId) -> Vec<String> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let bucket_state = bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        );

        if bucket_state.unlocked.is_empty() {
            self.drop_defaults.default_drop_ids(bucket)
        } else {
            bucket_state.unlocked.iter().cloned().collect()
        }
    }

    fn is_unlocked(&self, player_id: PlayerId, bucket: &BucketId, drop_id: &str) -> bool {
        if drop_id.is_empty() {
            return false;
        }

        let mut guard = self.state.lock();
        let state = &mut *guard;
        bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        )
        .unlocked
        .contains(drop_id)
    }

    fn unlock(&self, player_id: PlayerId, bucket: &BucketId, drop_id: &str) -> bool {
        if drop_id.trim().is_empty() {
            return false;
        }

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let bucket_state = bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        );

        if !bucket_state.unlocked.insert(drop_id.to_string()) {
            return false;
        }
        bucket_state.enabled.insert(drop_id.to_string());

        self.mark_changed(state);
        true
    }

    fn lock(&self, player_id: PlayerId, bucket: &BucketId, drop_id: &str) -> bool {
        if drop_id.is_empty() || self.drop_defaults.is_default_drop(bucket, drop_id) {
            return false;
        }

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let bucket_state = bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        );

        let removed = bucket_state.unlocked.remove(drop_id);
        let disabled = bucket_state.enabled.remove(drop_id);
        bucket_state.ensure_defaults(&self.drop_defaults.default_drop_ids(bucket));

        if removed || disabled {
            self.mark_changed(state);
        }

        removed
    }

    fn set_enabled(
        &self,
        player_id: PlayerId,
        bucket: &BucketId,
        drop_id: &str,
        enabled: bool,
    ) -> bool {
        if drop_id.is_empty() {
            return false;
        }

        let is_default = self.drop_defaults.is_default_drop(bucket, drop_id);
        if !enabled && is_default {
            return false;
        }

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let bucket_state = bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        );

        if !is_default && !bucket_state.unlocked.contains(drop_id) {
            return false;
        }

        let changed = if enabled {
            bucket_state.enabled.insert(drop_id.to_string())
        } else {
            let removed = bucket_state.enabled.remove(drop_id);
            bucket_state.ensure_defaults(&self.drop_defaults.default_drop_ids(bucket));
            removed
        };

        if changed {
            self.mark_changed(state);
        }

        true
    }

    fn reset_enabled_to_unlocked(&self, player_id: PlayerId, bucket: &BucketId) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let bucket_state = bucket_state(
            &mut state.players,
            &mut state.dirty,
            &self.drop_defaults,
            player_id,
            bucket,
        );

        bucket_state.enabled = bucket_state.unlocked.clone();
        bucket_state.ensure_defaults(&self.drop_defaults.default_drop_ids(bucket));

        self.mark_changed(state);
    }
}
