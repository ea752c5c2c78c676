use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use perk_core::{Merchant, MerchantStore, OfferStore, StoreError, StoreResult};
use perk_offer::{Offer, OfferFields};

/// Offer store backed by a map, for tests and local runs without Postgres
#[derive(Default)]
pub struct InMemoryOfferStore {
    offers: RwLock<HashMap<Uuid, Offer>>,
}

impl InMemoryOfferStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.offers.read().await.len()
    }
}

#[async_trait]
impl OfferStore for InMemoryOfferStore {
    async fn insert_offers(
        &self,
        merchant_id: Uuid,
        records: &[OfferFields],
    ) -> StoreResult<Vec<Offer>> {
        let created: Vec<Offer> = records
            .iter()
            .map(|fields| Offer::new(merchant_id, fields.clone()))
            .collect();

        let mut offers = self.offers.write().await;
        for offer in &created {
            offers.insert(offer.id, offer.clone());
        }

        Ok(created)
    }

    async fn update_offer(&self, id: Uuid, fields: &OfferFields) -> StoreResult<Offer> {
        let mut offers = self.offers.write().await;
        let offer = offers.get_mut(&id).ok_or(StoreError::OfferNotFound(id))?;

        offer.fields = fields.clone();
        Ok(offer.clone())
    }

    async fn get_offer(&self, id: Uuid) -> StoreResult<Option<Offer>> {
        Ok(self.offers.read().await.get(&id).cloned())
    }

    async fn list_offers(&self, merchant_id: Uuid) -> StoreResult<Vec<Offer>> {
        let mut offers: Vec<Offer> = self
            .offers
            .read()
            .await
            .values()
            .filter(|o| o.merchant_id == merchant_id)
            .cloned()
            .collect();

        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(offers)
    }
}

#[derive(Default)]
pub struct InMemoryMerchantStore {
    merchants: RwLock<HashMap<Uuid, Merchant>>,
}

impl InMemoryMerchantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merchants(merchants: impl IntoIterator<Item = Merchant>) -> Self {
        Self {
            merchants: RwLock::new(merchants.into_iter().map(|m| (m.id, m)).collect()),
        }
    }
}

#[async_trait]
impl MerchantStore for InMemoryMerchantStore {
    async fn get_merchant(&self, id: Uuid) -> StoreResult<Option<Merchant>> {
        Ok(self.merchants.read().await.get(&id).cloned())
    }

    async fn update_display_name(&self, id: Uuid, display_name: &str) -> StoreResult<Merchant> {
        let merchant = Merchant {
            id,
            display_name: display_name.to_string(),
        };
        self.merchants.write().await.insert(id, merchant.clone());
        Ok(merchant)
    }
}
