use content_service::ContentError;
use identity_service::IdentityError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}
