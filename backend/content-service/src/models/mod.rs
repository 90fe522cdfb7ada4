/// Data models for posts and comments
///
/// Field names follow the persisted JSON shape of the `posts` key.
use chrono::{DateTime, Utc};
use identity_service::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    /// Author display name captured at creation time
    pub author: String,
    pub text: String,
    pub image_url: Option<String>,
    /// Always `liked_by.len()`
    pub likes: usize,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(author: &User, text: String, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author_id: author.id.clone(),
            author: author.name.clone(),
            text,
            image_url,
            likes: 0,
            liked_by: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    /// Add or remove `user_id` from `liked_by`. Returns true if the post is now liked.
    pub(crate) fn toggle_like(&mut self, user_id: &str) -> bool {
        let liked = match self.liked_by.iter().position(|id| id == user_id) {
            Some(idx) => {
                self.liked_by.remove(idx);
                false
            }
            None => {
                self.liked_by.push(user_id.to_string());
                true
            }
        };
        self.likes = self.liked_by.len();
        liked
    }

    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub author: String,
    pub text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn new(author: &User, text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author_id: author.id.clone(),
            author: author.name.clone(),
            text,
            created_at: Utc::now(),
        }
    }
}
