pub mod models;
pub mod tiers;
pub mod validator;
pub mod scaler;

pub use models::{BaseOffer, DiscountType, Offer, OfferError, OfferFields, OfferPatch};
pub use tiers::{FollowerTier, FOLLOWER_TIERS};
pub use validator::{FieldErrors, OfferValidator, ValidatorConfig};
pub use scaler::{compute_scaling_ladder, CurrencyFormat, OfferTierScaler, ScalingOffer};
