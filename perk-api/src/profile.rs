use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use perk_core::Merchant;
use perk_offer::FieldErrors;
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::AppError, middleware::auth::CurrentMerchant, state::AppState};

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/merchant/profile", get(get_profile).put(update_profile))
}

/// Display name used in offer titles
pub async fn display_name(state: &AppState, merchant_id: Uuid) -> Result<String, AppError> {
    state.merchants
        .get_merchant(merchant_id)
        .await?
        .map(|m| m.display_name)
        .ok_or_else(|| AppError::NotFound("Merchant profile not found".to_string()))
}

/// GET /v1/merchant/profile
async fn get_profile(
    State(state): State<AppState>,
    Extension(merchant): Extension<CurrentMerchant>,
) -> Result<Json<Merchant>, AppError> {
    let profile = state.merchants
        .get_merchant(merchant.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Merchant profile not found".to_string()))?;

    Ok(Json(profile))
}

/// PUT /v1/merchant/profile
async fn update_profile(
    State(state): State<AppState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Merchant>, AppError> {
    let name = req.display_name.trim();
    if name.is_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("display_name", "display name required");
        return Err(AppError::Validation(errors));
    }

    let profile = state.merchants.update_display_name(merchant.id, name).await?;
    tracing::info!("Merchant {} renamed to {}", merchant.id, profile.display_name);

    Ok(Json(profile))
}
