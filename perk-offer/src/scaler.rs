use serde::{Deserialize, Serialize};

use crate::models::{BaseOffer, DiscountType, OfferFields};
use crate::tiers;

/// Percentage points added per tier step
pub const PERCENT_STEP: i64 = 10;
pub const PERCENT_CAP: i64 = 100;
/// Coupons at or above this amount are presented as free
pub const COUPON_CAP: i64 = 150;

/// A derived higher-tier variant of a base offer, proposed for bulk creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScalingOffer {
    pub min_followers: i64,
    pub discount_value: i64,
    pub title: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl ScalingOffer {
    /// Record to persist for this rung; type and dates come from the base offer
    pub fn to_fields(&self, base: &BaseOffer) -> OfferFields {
        let rung = BaseOffer {
            discount_value: self.discount_value,
            min_followers: self.min_followers,
            ..base.clone()
        };
        OfferFields::from_base(&rung, self.title.clone())
    }
}

/// How fixed amounts are rendered in offer titles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    pub fn format(&self, amount: i64) -> String {
        format!("{}{}", self.symbol, amount)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self { symbol: "$".to_string() }
    }
}

/// Derives the ladder of higher-tier offers from a base offer
#[derive(Debug, Clone, Default)]
pub struct OfferTierScaler {
    currency: CurrencyFormat,
}

impl OfferTierScaler {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    /// One entry per tier above the base tier, ascending. Empty when the base
    /// sits on the top tier or on an unknown threshold.
    pub fn ladder(&self, base: &BaseOffer, merchant_name: &str) -> Vec<ScalingOffer> {
        tiers::tiers_above(base.min_followers)
            .map(|(steps, tier)| {
                let discount_value = scaled_value(base, steps as i64);
                ScalingOffer {
                    min_followers: tier.min_followers,
                    discount_value,
                    title: self.title(base.discount_type, discount_value, merchant_name),
                    selected: true,
                }
            })
            .collect()
    }

    pub fn title(&self, discount_type: DiscountType, discount_value: i64, merchant_name: &str) -> String {
        match discount_type {
            DiscountType::Percent => format!("-{}% at {}", discount_value, merchant_name),
            DiscountType::Coupon if discount_value >= COUPON_CAP => format!("Free at {}", merchant_name),
            DiscountType::Coupon => format!("-{} at {}", self.currency.format(discount_value), merchant_name),
        }
    }
}

fn scaled_value(base: &BaseOffer, steps: i64) -> i64 {
    match base.discount_type {
        DiscountType::Percent => base
            .discount_value
            .saturating_add(steps.saturating_mul(PERCENT_STEP))
            .min(PERCENT_CAP),
        // step grows by the base amount itself, not a fixed constant
        DiscountType::Coupon => base
            .discount_value
            .saturating_mul(steps.saturating_add(1))
            .min(COUPON_CAP),
    }
}

/// Ladder with the default currency format
pub fn compute_scaling_ladder(base: &BaseOffer, merchant_name: &str) -> Vec<ScalingOffer> {
    OfferTierScaler::default().ladder(base, merchant_name)
}
