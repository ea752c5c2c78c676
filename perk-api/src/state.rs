use std::sync::Arc;

use perk_core::{MerchantStore, OfferStore};
use perk_offer::{OfferTierScaler, OfferValidator};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub offers: Arc<dyn OfferStore>,
    pub merchants: Arc<dyn MerchantStore>,
    pub validator: OfferValidator,
    pub scaler: OfferTierScaler,
    pub auth: AuthConfig,
}
