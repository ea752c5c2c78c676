use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::merchant_repo::PostgresMerchantStore;
use crate::offer_repo::PostgresOfferStore;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Shared Postgres pool backing the offer and merchant stores
#[derive(Clone)]
pub struct DbClient {
    pub pool: PgPool,
}

impl DbClient {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Applies the `merchants` and `offers` schema
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("offer schema up to date");
        Ok(())
    }

    pub fn offer_store(&self) -> PostgresOfferStore {
        PostgresOfferStore::new(self.pool.clone())
    }

    pub fn merchant_store(&self) -> PostgresMerchantStore {
        PostgresMerchantStore::new(self.pool.clone())
    }
}
