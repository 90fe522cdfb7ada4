//! Addressable view state
//!
//! The feed page is addressed by `?hashtag=<tag>&q=<search>&sort=<mode>`.

use content_service::SortMode;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Tag without the leading `#`
    pub hashtag: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
}

impl FeedQuery {
    pub fn with_hashtag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.hashtag = non_empty(tag.strip_prefix('#').unwrap_or(&tag));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(&search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Empty values count as absent; an unknown sort falls back to latest.
    /// The last occurrence of a repeated key wins.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes()).fold(Self::default(), |acc, (key, value)| {
            match key.as_ref() {
                "hashtag" => acc.with_hashtag(value),
                "q" => acc.with_search(value),
                "sort" => acc.with_sort(SortMode::from_name(&value)),
                _ => acc,
            }
        })
    }

    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(tag) = &self.hashtag {
            out.append_pair("hashtag", tag);
        }
        if let Some(search) = &self.search {
            out.append_pair("q", search);
        }
        if self.sort != SortMode::Latest {
            out.append_pair("sort", self.sort.as_str());
        }
        out.finish()
    }

    /// Search text that actually filters (non-blank)
    pub fn active_search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
