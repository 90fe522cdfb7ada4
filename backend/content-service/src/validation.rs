use crate::error::{ContentError, Result};
use url::Url;

pub const EMPTY_POST_MESSAGE: &str = "Post content cannot be empty";
pub const INVALID_IMAGE_URL_MESSAGE: &str = "Invalid image URL";

/// Trimmed post text, rejecting text that trims to nothing
pub fn post_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ContentError::Validation(EMPTY_POST_MESSAGE.into()));
    }
    Ok(trimmed.to_string())
}

/// Normalize an optional image URL.
///
/// Absent or empty means "no image". Anything else must parse as an absolute
/// URL; the stored value is trimmed.
pub fn image_url(raw: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if Url::parse(raw).is_err() {
        return Err(ContentError::Validation(INVALID_IMAGE_URL_MESSAGE.into()));
    }

    let trimmed = raw.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}
