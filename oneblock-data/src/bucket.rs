pub const DEFAULT_BUCKET: &str = "Meadow";

pub const BLOCK_PREFIX: &str = "OneBlock_Block_";
pub const KEY_PREFIX: &str = "OneBlock_Expedition_";
pub const KEY_SUFFIX: &str = "_Key";

/// Item category carried by every block that yields rewards when broken.
pub const REWARD_BLOCK_CATEGORY: &str = "Blocks.OneBlock";

/// Name of a progression bucket (an expedition). Never empty: blank input
/// normalises to [`DEFAULT_BUCKET`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId(String);

id_wrapper_impl!(BucketId, String);

impl BucketId {
    pub fn new(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::default()
        } else {
            Self(raw.to_string())
        }
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_BUCKET
    }
}

impl Default for BucketId {
    fn default() -> Self {
        Self(String::from(DEFAULT_BUCKET))
    }
}

impl From<&str> for BucketId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// `OneBlock_Block_<bucket>` -> `<bucket>`, anything else -> default bucket.
pub fn bucket_from_block_id(block_id: &str) -> BucketId {
    match block_id.strip_prefix(BLOCK_PREFIX) {
        Some(bucket) => BucketId::new(bucket),
        None => BucketId::default(),
    }
}

/// `OneBlock_Expedition_<bucket>[_Key]` -> `<bucket>`. Unlike block ids an
/// unrecognised key resolves to no bucket at all.
pub fn bucket_from_key_item_id(item_id: &str) -> Option<BucketId> {
    let bucket = item_id.strip_prefix(KEY_PREFIX)?;
    let bucket = bucket.strip_suffix(KEY_SUFFIX).unwrap_or(bucket);
    if bucket.trim().is_empty() {
        None
    } else {
        Some(BucketId::new(bucket))
    }
}

pub fn block_id_for_bucket(bucket: &BucketId) -> String {
    format!("{}{}", BLOCK_PREFIX, bucket.get())
}

pub fn is_reward_block<S: AsRef<str>>(categories: &[S]) -> bool {
    categories
        .iter()
        .any(|category| category.as_ref() == REWARD_BLOCK_CATEGORY)
}
