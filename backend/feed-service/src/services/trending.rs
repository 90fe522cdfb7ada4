/// Trending hashtags
///
/// Counts every hashtag occurrence across the collection.
use content_service::{extract_hashtags, Post};
use std::collections::HashMap;

use crate::models::TrendingHashtag;

pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Top `limit` tags by occurrence count. Equal counts keep first-seen order.
pub fn trending_hashtags(posts: &[Post], limit: usize) -> Vec<TrendingHashtag> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TrendingHashtag> = Vec::new();

    for tag in posts.iter().flat_map(|p| extract_hashtags(&p.text)) {
        match index.get(&tag) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(tag.clone(), counts.len());
                counts.push(TrendingHashtag { tag, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
