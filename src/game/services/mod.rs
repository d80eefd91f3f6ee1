mod exchange_service;
mod unlock_service;

pub use exchange_service::{ExchangeConsumeResult, ExchangeService};
pub use unlock_service::{UnlockConsumeResult, UnlockService};
