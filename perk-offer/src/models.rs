use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of discount an offer grants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage off, in whole percentage points
    Percent,
    /// Fixed amount off, in whole currency units
    Coupon,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Coupon => "coupon",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent" => Ok(DiscountType::Percent),
            "coupon" => Ok(DiscountType::Coupon),
            other => Err(OfferError::UnknownDiscountType(other.to_string())),
        }
    }
}

/// The offer as entered by the merchant, before any tier scaling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseOffer {
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_followers: i64,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

impl BaseOffer {
    /// Start date, with blank strings treated as absent
    pub fn start_date(&self) -> Option<&str> {
        non_blank(&self.start_at)
    }

    /// End date, with blank strings treated as absent
    pub fn end_date(&self) -> Option<&str> {
        non_blank(&self.end_at)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Persisted, mutable part of an offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferFields {
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_followers: i64,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub is_active: bool,
}

impl OfferFields {
    /// Active record for a base offer; blank dates are normalized to `None`
    pub fn from_base(base: &BaseOffer, title: String) -> Self {
        Self {
            title,
            discount_type: base.discount_type,
            discount_value: base.discount_value,
            min_followers: base.min_followers,
            start_at: base.start_date().map(str::to_string),
            end_at: base.end_date().map(str::to_string),
            is_active: true,
        }
    }

    /// The validatable view of these fields
    pub fn as_base(&self) -> BaseOffer {
        BaseOffer {
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_followers: self.min_followers,
            start_at: self.start_at.clone(),
            end_at: self.end_at.clone(),
        }
    }
}

/// A stored offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Offer {
    pub id: Uuid,
    pub merchant_id: Uuid,
    #[serde(flatten)]
    pub fields: OfferFields,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(merchant_id: Uuid, fields: OfferFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            merchant_id,
            fields,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of an offer. Absent members keep their stored value;
/// an empty date string clears the date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferPatch {
    pub title: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<i64>,
    pub min_followers: Option<i64>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub is_active: Option<bool>,
}

impl OfferPatch {
    pub fn apply(&self, current: &OfferFields) -> OfferFields {
        OfferFields {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            discount_type: self.discount_type.unwrap_or(current.discount_type),
            discount_value: self.discount_value.unwrap_or(current.discount_value),
            min_followers: self.min_followers.unwrap_or(current.min_followers),
            start_at: patch_date(&self.start_at, &current.start_at),
            end_at: patch_date(&self.end_at, &current.end_at),
            is_active: self.is_active.unwrap_or(current.is_active),
        }
    }
}

fn patch_date(patch: &Option<String>, current: &Option<String>) -> Option<String> {
    match patch {
        Some(value) => Some(value.trim()).filter(|s| !s.is_empty()).map(str::to_string),
        None => current.clone(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("Unknown discount type: {0}")]
    UnknownDiscountType(String),
}
