mod bench;
mod exchange_database;
mod unlock_database;

pub use bench::GameDataError;
pub use exchange_database::get_exchange_database;
pub use unlock_database::get_unlock_database;
