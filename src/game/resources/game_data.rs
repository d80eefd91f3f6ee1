use std::sync::Arc;

use oneblock_data::{DropDefaultsDatabase, ExchangeDatabase, UnlockDatabase};

use crate::game::{
    resources::{DropsStateStore, GameConfig, RewardSelector},
    services::{ExchangeService, UnlockService},
};

pub struct GameData {
    pub drop_defaults: Arc<DropDefaultsDatabase>,
    pub unlocks: Arc<UnlockDatabase>,
    pub exchanges: Arc<ExchangeDatabase>,
    pub drops_state: Arc<DropsStateStore>,
    pub reward_selector: Arc<RewardSelector>,
    pub unlock_service: Arc<UnlockService>,
    pub exchange_service: Arc<ExchangeService>,
}

impl GameData {
    pub fn new(
        config: &GameConfig,
        drop_defaults: Arc<DropDefaultsDatabase>,
        unlocks: Arc<UnlockDatabase>,
        exchanges: Arc<ExchangeDatabase>,
    ) -> Self {
        let drops_state = Arc::new(
            DropsStateStore::load(drop_defaults.clone(), &config.storage_path)
                .with_flush_on_mutation(config.flush_on_mutation),
        );
        Self::with_store(drop_defaults, unlocks, exchanges, drops_state)
    }

    pub fn with_store(
        drop_defaults: Arc<DropDefaultsDatabase>,
        unlocks: Arc<UnlockDatabase>,
        exchanges: Arc<ExchangeDatabase>,
        drops_state: Arc<DropsStateStore>,
    ) -> Self {
        let reward_selector = Arc::new(RewardSelector::new(&drop_defaults, &unlocks));
        let unlock_service = Arc::new(UnlockService::new(unlocks.clone(), drops_state.clone()));
        let exchange_service = Arc::new(ExchangeService::new(
            exchanges.clone(),
            drops_state.clone(),
        ));

        Self {
            drop_defaults,
            unlocks,
            exchanges,
            drops_state,
            reward_selector,
            unlock_service,
            exchange_service,
        }
    }

    /// Builtin defaults, no unlocks or exchanges, nothing written to disk.
    pub fn in_memory() -> Self {
        let drop_defaults = Arc::new(DropDefaultsDatabase::builtin());
        let drops_state = Arc::new(DropsStateStore::new(drop_defaults.clone()));
        Self::with_store(
            drop_defaults,
            Arc::new(UnlockDatabase::default()),
            Arc::new(ExchangeDatabase::default()),
            drops_state,
        )
    }
}
