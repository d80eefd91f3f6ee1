use oneblock_data::BucketId;

use crate::components::PlayerId;

/// Per-player, per-bucket unlocked and enabled drop sets.
///
/// Implementations are shared between threads, so every method takes
/// `&self` and serialises access internally. Invalid input is reported as
/// `false` or an empty/default answer, never as an error.
pub trait DropsStateProvider {
    /// Enabled drops, or the bucket defaults if none are enabled. Never empty.
    fn get_enabled_drops(&self, player_id: PlayerId, bucket: &BucketId) -> Vec<String>;

    /// Unlocked drops, or the bucket defaults if none are unlocked. Never empty.
    fn get_unlocked_drops(&self, player_id: PlayerId, bucket: &BucketId) -> Vec<String>;

    fn is_unlocked(&self, player_id: PlayerId, bucket: &BucketId, drop_id: &str) -> bool;

    /// Returns false for blank ids and for drops that are already unlocked.
    fn unlock(&self, player_id: PlayerId, bucket: &BucketId, drop_id: &str) -> bool;

    /// Returns whether the drop was actually removed. Bucket defaults can
    /// never be locked.
    fn lock(&self, player_id: PlayerId, bucket: &BucketId, drop_id: &str) -> bool;

    fn set_enabled(
        &self,
        player_id: PlayerId,
        bucket: &BucketId,
        drop_id: &str,
        enabled: bool,
    ) -> bool;

    fn reset_enabled_to_unlocked(&self, player_id: PlayerId, bucket: &BucketId);
}
