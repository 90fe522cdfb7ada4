//! Sort modes for post lists

use crate::models::Post;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Storage order, which is already newest first
    #[default]
    Latest,
    /// Positional reverse of the input
    Oldest,
    /// Descending like count, ties keep input order
    MostLiked,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Latest, SortMode::Oldest, SortMode::MostLiked];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Latest => "latest",
            SortMode::Oldest => "oldest",
            SortMode::MostLiked => "mostLiked",
        }
    }

    /// Parse a wire name; unknown names fall back to `Latest`
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "oldest" => SortMode::Oldest,
            "mostLiked" => SortMode::MostLiked,
            _ => SortMode::Latest,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sorted copy of `posts`; the input is left untouched
pub fn sort_posts(posts: &[Post], mode: SortMode) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    match mode {
        SortMode::Latest => {}
        SortMode::Oldest => sorted.reverse(),
        // sort_by is stable
        SortMode::MostLiked => sorted.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, likes: usize, created_ms: i64) -> Post {
        Post {
            id: id.to_string(),
            author_id: "u".into(),
            author: "U".into(),
            text: id.to_string(),
            image_url: None,
            likes,
            liked_by: (0..likes).map(|i| format!("l{i}")).collect(),
            comments: vec![],
            created_at: Utc.timestamp_millis_opt(created_ms).unwrap(),
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_latest_is_identity() {
        let posts = vec![post("a", 1, 3), post("b", 5, 2), post("c", 0, 1)];
        assert_eq!(ids(&sort_posts(&posts, SortMode::Latest)), ["a", "b", "c"]);
    }

    #[test]
    fn test_oldest_is_positional_reverse() {
        // Timestamps deliberately out of order: reversal ignores them
        let posts = vec![post("a", 0, 1), post("b", 0, 3), post("c", 0, 2)];
        assert_eq!(ids(&sort_posts(&posts, SortMode::Oldest)), ["c", "b", "a"]);
    }

    #[test]
    fn test_most_liked_is_stable() {
        let posts = vec![
            post("a", 1, 5),
            post("b", 3, 4),
            post("c", 1, 3),
            post("d", 3, 2),
            post("e", 0, 1),
        ];
        let sorted = sort_posts(&posts, SortMode::MostLiked);
        assert_eq!(ids(&sorted), ["b", "d", "a", "c", "e"]);
        // input untouched
        assert_eq!(ids(&posts), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_from_name() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::from_name(mode.as_str()), mode);
        }
        assert_eq!(SortMode::from_name("popular"), SortMode::Latest);
        assert_eq!(SortMode::from_name("MOSTLIKED"), SortMode::Latest);
    }

    #[test]
    fn test_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortMode::MostLiked).unwrap(),
            "\"mostLiked\""
        );
        let mode: SortMode = serde_json::from_str("\"oldest\"").unwrap();
        assert_eq!(mode, SortMode::Oldest);
    }
}
