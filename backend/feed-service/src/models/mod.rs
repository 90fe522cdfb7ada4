use chrono::{DateTime, Utc};
use content_service::{extract_hashtags, Comment, Post};
use identity_service::User;
use serde::{Deserialize, Serialize};

use crate::utils::format_relative;

/// Rendering state for one post in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCard {
    pub post: Post,
    /// Whether the viewer has liked this post
    pub is_liked: bool,
    /// Whether the viewer wrote this post (edit/delete controls)
    pub is_author: bool,
    pub comment_count: usize,
    pub hashtags: Vec<String>,
    /// Relative age, e.g. "5m ago"
    pub age: String,
    pub comments: Vec<CommentCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCard {
    pub comment: Comment,
    pub can_delete: bool,
    pub age: String,
}

impl PostCard {
    pub fn build(post: Post, viewer: Option<&User>, now: DateTime<Utc>) -> Self {
        let viewer_id = viewer.map(|u| u.id.as_str());
        let comments = post
            .comments
            .iter()
            .map(|comment| CommentCard {
                can_delete: viewer_id == Some(comment.author_id.as_str()),
                age: format_relative(comment.created_at, now),
                comment: comment.clone(),
            })
            .collect();

        Self {
            is_liked: viewer_id.is_some_and(|id| post.is_liked_by(id)),
            is_author: viewer_id == Some(post.author_id.as_str()),
            comment_count: post.comments.len(),
            hashtags: extract_hashtags(&post.text),
            age: format_relative(post.created_at, now),
            comments,
            post,
        }
    }
}

/// One entry of the trending sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingHashtag {
    pub tag: String,
    pub count: usize,
}
