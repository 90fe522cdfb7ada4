use kv_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists with this email")]
    EmailAlreadyExists,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            IdentityError::Validation("Passwords do not match".into()).to_string(),
            "Validation error: Passwords do not match"
        );
        assert_eq!(
            IdentityError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_from_store_error() {
        let err: IdentityError = StoreError::Backend("down".into()).into();
        assert!(matches!(err, IdentityError::Store(_)));
    }
}
