use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use perk_offer::{
    BaseOffer, FieldErrors, FollowerTier, Offer, OfferFields, OfferPatch, ScalingOffer, FOLLOWER_TIERS,
};

use crate::{error::AppError, middleware::auth::CurrentMerchant, profile, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScalingPreviewResponse {
    /// Title the base offer gets when none is supplied
    pub title: String,
    pub ladder: Vec<ScalingOffer>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOffersRequest {
    #[serde(flatten)]
    pub offer: BaseOffer,
    pub title: Option<String>,
    /// Previewed ladder as confirmed by the merchant; only `selected` is read
    #[serde(default)]
    pub scaling: Vec<ScalingOffer>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/offers", get(list_offers).post(create_offers))
        .route("/v1/offers/tiers", get(list_tiers))
        .route("/v1/offers/validate", post(validate_offer))
        .route("/v1/offers/scaling", post(preview_scaling))
        .route("/v1/offers/{id}", patch(update_offer))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/offers/tiers
///
/// Threshold choices for the offer form, ascending
async fn list_tiers() -> Json<&'static [FollowerTier]> {
    Json(&FOLLOWER_TIERS[..])
}

/// POST /v1/offers/validate
async fn validate_offer(
    State(state): State<AppState>,
    Json(offer): Json<BaseOffer>,
) -> Json<ValidateResponse> {
    let errors = state.validator.validate(&offer);
    Json(ValidateResponse { valid: errors.is_empty(), errors })
}

/// POST /v1/offers/scaling
/// Propose the higher-tier ladder for a base offer
async fn preview_scaling(
    State(state): State<AppState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Json(offer): Json<BaseOffer>,
) -> Result<Json<ScalingPreviewResponse>, AppError> {
    ensure_valid(state.validator.validate(&offer))?;

    let name = profile::display_name(&state, merchant.id).await?;
    let title = state.scaler.title(offer.discount_type, offer.discount_value, &name);
    let ladder = state.scaler.ladder(&offer, &name);

    Ok(Json(ScalingPreviewResponse { title, ladder }))
}

/// POST /v1/offers
/// Create a base offer together with the confirmed ladder entries
async fn create_offers(
    State(state): State<AppState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Json(req): Json<CreateOffersRequest>,
) -> Result<(StatusCode, Json<Vec<Offer>>), AppError> {
    let base = req.offer;
    ensure_valid(state.validator.validate(&base))?;

    let name = profile::display_name(&state, merchant.id).await?;
    let title = req.title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| state.scaler.title(base.discount_type, base.discount_value, &name));

    // The ladder is recomputed here; the client only decides which rungs to keep.
    let selected: HashSet<i64> = req.scaling
        .iter()
        .filter(|rung| rung.selected)
        .map(|rung| rung.min_followers)
        .collect();

    let mut records = vec![OfferFields::from_base(&base, title)];
    records.extend(
        state.scaler
            .ladder(&base, &name)
            .iter()
            .filter(|rung| selected.contains(&rung.min_followers))
            .map(|rung| rung.to_fields(&base)),
    );

    let created = state.offers.insert_offers(merchant.id, &records).await?;
    info!("Merchant {} created {} offers", merchant.id, created.len());

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/offers
async fn list_offers(
    State(state): State<AppState>,
    Extension(merchant): Extension<CurrentMerchant>,
) -> Result<Json<Vec<Offer>>, AppError> {
    let offers = state.offers.list_offers(merchant.id).await?;
    Ok(Json(offers))
}

/// PATCH /v1/offers/{id}
async fn update_offer(
    State(state): State<AppState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Path(offer_id): Path<Uuid>,
    Json(changes): Json<OfferPatch>,
) -> Result<Json<Offer>, AppError> {
    let offer = state.offers
        .get_offer(offer_id)
        .await?
        .filter(|o| o.merchant_id == merchant.id)
        .ok_or_else(|| AppError::NotFound(format!("Offer not found: {}", offer_id)))?;

    let merged = changes.apply(&offer.fields);

    let mut errors = state.validator.validate(&merged.as_base());
    if merged.title.trim().is_empty() {
        errors.insert("title", "title required");
    }
    ensure_valid(errors)?;

    let updated = state.offers.update_offer(offer_id, &merged).await?;
    info!("Merchant {} updated offer {}", merchant.id, offer_id);

    Ok(Json(updated))
}

fn ensure_valid(errors: FieldErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
