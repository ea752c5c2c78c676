use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{BaseOffer, DiscountType};
use crate::tiers;

pub const FIELD_DISCOUNT_VALUE: &str = "discount_value";
pub const FIELD_MIN_FOLLOWERS: &str = "min_followers";
pub const FIELD_START_AT: &str = "start_at";
pub const FIELD_END_AT: &str = "end_at";

const PERCENT_MIN: i64 = 5;
const PERCENT_MAX: i64 = 100;
const PERCENT_STEP: i64 = 5;
const COUPON_MIN: i64 = 1;

/// Field name to error message. Empty means the offer is valid.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Reject offers without a start date
    pub require_start_date: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { require_start_date: true }
    }
}

/// Checks offer fields before they are created or updated
#[derive(Debug, Clone, Default)]
pub struct OfferValidator {
    config: ValidatorConfig,
}

impl OfferValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, offer: &BaseOffer) -> FieldErrors {
        let mut errors = FieldErrors::new();

        match offer.discount_type {
            DiscountType::Percent => {
                let value = offer.discount_value;
                if !(PERCENT_MIN..=PERCENT_MAX).contains(&value) || value % PERCENT_STEP != 0 {
                    errors.insert(FIELD_DISCOUNT_VALUE, "invalid percentage");
                }
            }
            DiscountType::Coupon => {
                if offer.discount_value < COUPON_MIN {
                    errors.insert(FIELD_DISCOUNT_VALUE, "invalid fixed amount");
                }
            }
        }

        if !tiers::is_tier(offer.min_followers) {
            errors.insert(FIELD_MIN_FOLLOWERS, "invalid follower tier");
        }

        let start = offer.start_date();
        if self.config.require_start_date && start.is_none() {
            errors.insert(FIELD_START_AT, "start date required");
        }

        // ISO dates order lexicographically
        if let (Some(start), Some(end)) = (start, offer.end_date()) {
            if start > end {
                errors.insert(FIELD_END_AT, "end date before start date");
            }
        }

        errors
    }
}
