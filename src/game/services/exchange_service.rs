use std::sync::Arc;

use oneblock_data::{ExchangeDatabase, ExchangeDefinition};
use oneblock_game_common::{components::PlayerId, data::DropsStateProvider};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExchangeConsumeResult {
    InvalidItem,
    Locked,
    Ready,
}

pub struct ExchangeService {
    exchanges: Arc<ExchangeDatabase>,
    drops_state: Arc<dyn DropsStateProvider + Send + Sync>,
}

impl ExchangeService {
    pub fn new(
        exchanges: Arc<ExchangeDatabase>,
        drops_state: Arc<dyn DropsStateProvider + Send + Sync>,
    ) -> Self {
        Self {
            exchanges,
            drops_state,
        }
    }

    pub fn get_definition(&self, exchange_item_id: &str) -> Option<&ExchangeDefinition> {
        self.exchanges.get_exchange(exchange_item_id)
    }

    pub fn can_consume(&self, player_id: PlayerId, exchange_item_id: &str) -> ExchangeConsumeResult {
        let definition = match self.get_definition(exchange_item_id) {
            Some(definition) => definition,
            None => return ExchangeConsumeResult::InvalidItem,
        };

        match definition.unlock_id.as_deref() {
            Some(unlock_id)
                if !self
                    .drops_state
                    .is_unlocked(player_id, &definition.bucket, unlock_id) =>
            {
                ExchangeConsumeResult::Locked
            }
            _ => ExchangeConsumeResult::Ready,
        }
    }
}
