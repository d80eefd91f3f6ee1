use oneblock_data::BucketId;

pub trait RewardTable {
    /// Picks one of `candidates` for a reward in `bucket`. Always returns a
    /// usable drop id, falling back to the default item.
    fn pick_reward(&self, bucket: &BucketId, candidates: &[String]) -> String;

    /// Every drop id this table knows a weight for in `bucket`.
    fn known_drops(&self, bucket: &BucketId) -> Vec<String>;
}
