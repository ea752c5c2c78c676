pub mod merchant;
pub mod repository;

pub use merchant::Merchant;
pub use repository::{MerchantStore, OfferStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Offer not found: {0}")]
    OfferNotFound(uuid::Uuid),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
