macro_rules! id_wrapper_impl {
    ($name:ident, String) => {
        impl $name {
            #[allow(dead_code)]
            pub fn get(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

mod bucket;
mod drop_defaults_database;
mod drop_id;
mod exchange_database;
mod unlock_database;

pub use bucket::{
    block_id_for_bucket, bucket_from_block_id, bucket_from_key_item_id, is_reward_block,
    BucketId, BLOCK_PREFIX, DEFAULT_BUCKET, KEY_PREFIX, KEY_SUFFIX, REWARD_BLOCK_CATEGORY,
};
pub use drop_defaults_database::{DropDefaultsDatabase, DropDefinition, DEFAULT_ITEM_ID};
pub use drop_id::{DropId, DropKind};
pub use exchange_database::{
    is_exchange_unlock_id, ExchangeDatabase, ExchangeDefinition, EXCHANGE_UNLOCK_PREFIX,
};
pub use unlock_database::{UnlockDatabase, UnlockDefinition};
