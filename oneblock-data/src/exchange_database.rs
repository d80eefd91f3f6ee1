use std::collections::{hash_map::Iter, HashMap};

use crate::BucketId;

/// Unlock ids gating an exchange rather than a drop carry this prefix.
pub const EXCHANGE_UNLOCK_PREFIX: &str = "Exchange:";

pub fn is_exchange_unlock_id(value: &str) -> bool {
    value.starts_with(EXCHANGE_UNLOCK_PREFIX)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeDefinition {
    pub bucket: BucketId,
    pub output_id: String,
    pub output_quantity: u32,
    pub unlock_id: Option<String>,
}

impl ExchangeDefinition {
    pub fn new(
        bucket: BucketId,
        output_id: impl Into<String>,
        output_quantity: u32,
        unlock_id: Option<String>,
    ) -> Self {
        Self {
            bucket,
            output_id: output_id.into(),
            output_quantity: output_quantity.max(1),
            unlock_id: unlock_id.filter(|unlock_id| !unlock_id.is_empty()),
        }
    }
}

/// Exchange definitions keyed by the exchange item id.
#[derive(Default)]
pub struct ExchangeDatabase {
    exchanges: HashMap<String, ExchangeDefinition>,
}

impl ExchangeDatabase {
    pub fn new(exchanges: HashMap<String, ExchangeDefinition>) -> Self {
        Self { exchanges }
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, ExchangeDefinition> {
        self.exchanges.iter()
    }

    pub fn get_exchange(&self, exchange_item_id: &str) -> Option<&ExchangeDefinition> {
        if exchange_item_id.is_empty() {
            return None;
        }

        self.exchanges.get(exchange_item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_definition_normalises_fields() {
        let definition =
            ExchangeDefinition::new(BucketId::new("Cave"), "Ore_Iron", 0, Some(String::new()));
        assert_eq!(definition.output_quantity, 1);
        assert_eq!(definition.unlock_id, None);
    }

    #[test]
    fn test_is_exchange_unlock_id() {
        assert!(is_exchange_unlock_id("Exchange:Rock_To_Ore"));
        assert!(!is_exchange_unlock_id("Rock_Stone"));
    }
}
