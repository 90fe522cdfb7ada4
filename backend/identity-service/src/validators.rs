use regex::Regex;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

/// Input validation utilities for sign-up and profile forms

// Anything, an @, anything, a dot, anything; no whitespace and no second @
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Validate email shape
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// validator crate compatible custom validator for email shape
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_email");
        err.message = Some("Please enter a valid email address".into());
        Err(err)
    }
}

/// First human-readable message among `fields`, checked in the given order
pub fn first_error_message(errors: &ValidationErrors, fields: &[&str]) -> Option<String> {
    let field_errors = errors.field_errors();
    fields.iter().find_map(|field| {
        field_errors
            .get(*field)
            .and_then(|errs| errs.first())
            .map(|err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
    })
}
