use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use perk_core::StoreError;
use perk_offer::FieldErrors;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Authentication(String),
    Authorization(String),
    Validation(FieldErrors),
    NotFound(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, fields) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Anyhow(err) => match err.downcast_ref::<StoreError>() {
                Some(StoreError::OfferNotFound(id)) => {
                    (StatusCode::NOT_FOUND, format!("Offer not found: {}", id), None)
                }
                _ => {
                    tracing::error!("Internal Server Error: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string(), None)
                }
            },
        };

        let body = match fields {
            Some(fields) => Json(json!({ "error": error_message, "fields": fields })),
            None => Json(json!({ "error": error_message })),
        };

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
