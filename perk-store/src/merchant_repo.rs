use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use perk_core::{Merchant, MerchantStore, StoreError, StoreResult};

pub struct PostgresMerchantStore {
    pub pool: PgPool,
}

impl PostgresMerchantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MerchantRow {
    id: Uuid,
    display_name: String,
}

impl From<MerchantRow> for Merchant {
    fn from(row: MerchantRow) -> Self {
        Merchant {
            id: row.id,
            display_name: row.display_name,
        }
    }
}

#[async_trait]
impl MerchantStore for PostgresMerchantStore {
    async fn get_merchant(&self, id: Uuid) -> StoreResult<Option<Merchant>> {
        let row = sqlx::query_as::<_, MerchantRow>(
            "SELECT id, display_name FROM merchants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.map(Merchant::from))
    }

    async fn update_display_name(&self, id: Uuid, display_name: &str) -> StoreResult<Merchant> {
        // Profiles are created lazily on first save
        let row = sqlx::query_as::<_, MerchantRow>(
            r#"
            INSERT INTO merchants (id, display_name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET display_name = EXCLUDED.display_name
            RETURNING id, display_name
            "#,
        )
        .bind(id)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        info!("Updated display name for merchant {}", id);
        Ok(row.into())
    }
}
