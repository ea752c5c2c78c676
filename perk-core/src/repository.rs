use async_trait::async_trait;
use perk_offer::{Offer, OfferFields};
use uuid::Uuid;

use crate::merchant::Merchant;
use crate::StoreResult;

/// Offer persistence
#[async_trait]
pub trait OfferStore: Send + Sync {
    /// Insert all records for one merchant, or none of them
    async fn insert_offers(
        &self,
        merchant_id: Uuid,
        records: &[OfferFields],
    ) -> StoreResult<Vec<Offer>>;

    /// Overwrite the mutable fields of an existing offer
    async fn update_offer(&self, id: Uuid, fields: &OfferFields) -> StoreResult<Offer>;

    async fn get_offer(&self, id: Uuid) -> StoreResult<Option<Offer>>;

    /// Newest first
    async fn list_offers(&self, merchant_id: Uuid) -> StoreResult<Vec<Offer>>;
}

/// Merchant profile access
#[async_trait]
pub trait MerchantStore: Send + Sync {
    async fn get_merchant(&self, id: Uuid) -> StoreResult<Option<Merchant>>;

    async fn update_display_name(&self, id: Uuid, display_name: &str) -> StoreResult<Merchant>;
}
