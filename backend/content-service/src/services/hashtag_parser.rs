//! Hashtag Parser Utility
//!
//! Extracts #hashtags from post text for filtering and trending.

use regex::Regex;
use std::sync::LazyLock;

/// Matches #tag where tag is one or more ASCII letters, digits or underscores
static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").expect("Invalid hashtag regex"));

/// Extract hashtags from post text
///
/// Returns tags without the `#`, case preserved, in order of occurrence.
/// Duplicates are kept so trending counts every occurrence.
///
/// # Examples
/// ```
/// use content_service::extract_hashtags;
///
/// let tags = extract_hashtags("Shipping #Rust today #rust #rust");
/// assert_eq!(tags, vec!["Rust", "rust", "rust"]);
/// ```
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Whether `text` carries `tag` (exact, case-sensitive)
pub fn has_hashtag(text: &str, tag: &str) -> bool {
    HASHTAG_REGEX
        .captures_iter(text)
        .any(|cap| cap.get(1).is_some_and(|m| m.as_str() == tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_hashtag() {
        assert_eq!(extract_hashtags("hello #test"), vec!["test"]);
    }

    #[test]
    fn test_extract_stops_at_punctuation() {
        assert_eq!(
            extract_hashtags("#one, #two! (#three_3) #four-five"),
            vec!["one", "two", "three_3", "four"]
        );
    }

    #[test]
    fn test_extract_keeps_duplicates_and_case() {
        assert_eq!(extract_hashtags("#a #A #a"), vec!["a", "A", "a"]);
    }

    #[test]
    fn test_no_hashtags() {
        assert!(extract_hashtags("no tags # here").is_empty());
        assert!(extract_hashtags("").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_end_tag() {
        assert_eq!(extract_hashtags("#café"), vec!["caf"]);
    }

    #[test]
    fn test_has_hashtag() {
        assert!(has_hashtag("learning #rust", "rust"));
        assert!(!has_hashtag("learning #rust", "Rust"));
        assert!(!has_hashtag("learning #rustacean", "rust"));
    }
}
