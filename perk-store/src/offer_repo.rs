use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use perk_core::{OfferStore, StoreError, StoreResult};
use perk_offer::{Offer, OfferFields};

pub struct PostgresOfferStore {
    pub pool: PgPool,
}

impl PostgresOfferStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: Uuid,
    merchant_id: Uuid,
    title: String,
    discount_type: String,
    discount_value: i64,
    min_followers: i64,
    start_at: Option<String>,
    end_at: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl OfferRow {
    fn into_offer(self) -> StoreResult<Offer> {
        Ok(Offer {
            id: self.id,
            merchant_id: self.merchant_id,
            fields: OfferFields {
                title: self.title,
                discount_type: self.discount_type.parse().map_err(StoreError::backend)?,
                discount_value: self.discount_value,
                min_followers: self.min_followers,
                start_at: self.start_at,
                end_at: self.end_at,
                is_active: self.is_active,
            },
            created_at: self.created_at,
        })
    }
}

const OFFER_COLUMNS: &str = "id, merchant_id, title, discount_type, discount_value, min_followers, start_at, end_at, is_active, created_at";

#[async_trait]
impl OfferStore for PostgresOfferStore {
    async fn insert_offers(
        &self,
        merchant_id: Uuid,
        records: &[OfferFields],
    ) -> StoreResult<Vec<Offer>> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        let mut offers = Vec::with_capacity(records.len());

        for fields in records {
            let offer = Offer::new(merchant_id, fields.clone());

            sqlx::query(
                r#"
                INSERT INTO offers (id, merchant_id, title, discount_type, discount_value, min_followers, start_at, end_at, is_active, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(offer.id)
            .bind(offer.merchant_id)
            .bind(&offer.fields.title)
            .bind(offer.fields.discount_type.as_str())
            .bind(offer.fields.discount_value)
            .bind(offer.fields.min_followers)
            .bind(offer.fields.start_at.as_deref())
            .bind(offer.fields.end_at.as_deref())
            .bind(offer.fields.is_active)
            .bind(offer.created_at)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::backend)?;

            offers.push(offer);
        }

        tx.commit().await.map_err(StoreError::backend)?;
        info!("Inserted {} offers for merchant {}", offers.len(), merchant_id);

        Ok(offers)
    }

    async fn update_offer(&self, id: Uuid, fields: &OfferFields) -> StoreResult<Offer> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            UPDATE offers
            SET title = $2, discount_type = $3, discount_value = $4, min_followers = $5,
                start_at = $6, end_at = $7, is_active = $8
            WHERE id = $1
            RETURNING {}
            "#,
            OFFER_COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(fields.discount_type.as_str())
        .bind(fields.discount_value)
        .bind(fields.min_followers)
        .bind(fields.start_at.as_deref())
        .bind(fields.end_at.as_deref())
        .bind(fields.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        let Some(row) = row else {
            return Err(StoreError::OfferNotFound(id));
        };

        info!("Updated offer {}", id);
        row.into_offer()
    }

    async fn get_offer(&self, id: Uuid) -> StoreResult<Option<Offer>> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT {} FROM offers WHERE id = $1",
            OFFER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(OfferRow::into_offer).transpose()
    }

    async fn list_offers(&self, merchant_id: Uuid) -> StoreResult<Vec<Offer>> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT {} FROM offers WHERE merchant_id = $1 ORDER BY created_at DESC",
            OFFER_COLUMNS
        ))
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.into_iter().map(OfferRow::into_offer).collect()
    }
}
