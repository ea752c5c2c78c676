pub mod app_config;
pub mod database;
pub mod offer_repo;
pub mod merchant_repo;
pub mod memory;

pub use database::DbClient;
pub use offer_repo::PostgresOfferStore;
pub use merchant_repo::PostgresMerchantStore;
pub use memory::{InMemoryMerchantStore, InMemoryOfferStore};
