/// Error types for the post repository
///
/// Every failure leaves the post collection unchanged and publishes nothing.
use kv_store::StoreError;
use thiserror::Error;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// No signed-in user
    #[error("Please login to continue")]
    Unauthenticated,

    /// Empty text or malformed image URL
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced post or comment is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Actor is not the owning author
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ContentError {
    /// Short machine-readable kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            ContentError::Unauthenticated => "unauthenticated",
            ContentError::Validation(_) => "validation",
            ContentError::NotFound(_) => "not_found",
            ContentError::Forbidden(_) => "forbidden",
            ContentError::Store(_) => "store",
        }
    }
}
