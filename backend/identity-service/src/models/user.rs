use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Avatar generator used for freshly registered users
pub const DEFAULT_AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// User model - core identity entity
///
/// Field names follow the persisted JSON shape. Records written by older
/// versions used `password` and `profilePic`; both are still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(alias = "password")]
    pub password_hash: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub bio: String,
    #[serde(default, alias = "profilePic")]
    pub profile_pic_url: String,
    /// Ids of users following this user
    #[serde(default)]
    pub followers: Vec<String>,
    /// Ids of users this user follows
    #[serde(default)]
    pub following: Vec<String>,
}

impl User {
    pub fn is_following(&self, user_id: &str) -> bool {
        self.following.iter().any(|id| id == user_id)
    }

    /// Add `user_id` to `following`; false if already present
    pub(crate) fn add_following(&mut self, user_id: &str) -> bool {
        insert_unique(&mut self.following, user_id)
    }

    pub(crate) fn remove_following(&mut self, user_id: &str) -> bool {
        remove_all(&mut self.following, user_id)
    }

    pub(crate) fn add_follower(&mut self, user_id: &str) -> bool {
        insert_unique(&mut self.followers, user_id)
    }

    pub(crate) fn remove_follower(&mut self, user_id: &str) -> bool {
        remove_all(&mut self.followers, user_id)
    }
}

fn insert_unique(ids: &mut Vec<String>, user_id: &str) -> bool {
    if ids.iter().any(|id| id == user_id) {
        return false;
    }
    ids.push(user_id.to_string());
    true
}

fn remove_all(ids: &mut Vec<String>, user_id: &str) -> bool {
    let before = ids.len();
    ids.retain(|id| id != user_id);
    ids.len() != before
}

/// Sign-up form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    #[validate(custom(function = "crate::validators::validate_email_shape"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

impl SignupRequest {
    /// Trim the identifying fields; passwords are taken verbatim
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self
        }
    }

    pub fn has_empty_field(&self) -> bool {
        self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
    }
}

/// Partial profile edit; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none() && self.profile_pic_url.is_none()
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(bio) = &self.bio {
            user.bio = bio.clone();
        }
        if let Some(url) = &self.profile_pic_url {
            user.profile_pic_url = url.clone();
        }
    }
}
