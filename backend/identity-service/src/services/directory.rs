//! User directory
//!
//! Read-modify-write access to the `users` collection: registration,
//! sign-in, profile edits and follow-graph edits. Edits that touch the
//! signed-in user are mirrored into the session copy.

use chrono::Utc;
use kv_store::{SharedStore, StoreExt, StoreKey};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::session::SessionStore;
use crate::error::{IdentityError, Result};
use crate::models::user::DEFAULT_AVATAR_BASE;
use crate::models::{ProfileUpdate, SignupRequest, User};
use crate::security::{digest_password, verify_password};
use crate::validators::first_error_message;

#[derive(Clone)]
pub struct UserDirectory {
    store: SharedStore,
    session: SessionStore,
}

impl UserDirectory {
    pub fn new(store: SharedStore, session: SessionStore) -> Self {
        Self { store, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.load(StoreKey::Users)?.unwrap_or_default())
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        self.store.save(StoreKey::Users, users)?;
        Ok(())
    }

    pub fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|u| u.id == user_id))
    }

    /// Register a new user.
    ///
    /// Checks run in form order: required fields, email shape, password
    /// length, confirmation match, then email uniqueness.
    pub fn sign_up(&self, request: SignupRequest) -> Result<User> {
        let request = request.normalized();

        if request.has_empty_field() {
            return Err(IdentityError::Validation("All fields are required".into()));
        }

        if let Err(errors) = request.validate() {
            let message = first_error_message(&errors, &["email", "password", "confirm_password"])
                .unwrap_or_else(|| errors.to_string());
            warn!(email = %request.email, reason = %message, "Sign-up rejected");
            return Err(IdentityError::Validation(message));
        }

        let mut users = self.list_users()?;
        if users.iter().any(|u| u.email == request.email) {
            warn!(email = %request.email, "Sign-up rejected: email taken");
            return Err(IdentityError::EmailAlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            profile_pic_url: format!("{}{}", DEFAULT_AVATAR_BASE, request.name),
            name: request.name,
            email: request.email,
            password_hash: digest_password(&request.password),
            created_at: Utc::now(),
            bio: String::new(),
            followers: Vec::new(),
            following: Vec::new(),
        };

        users.push(user.clone());
        self.save_users(&users)?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and point the session at the matching user
    pub fn log_in(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(IdentityError::Validation(
                "Email and password are required".into(),
            ));
        }

        let user = self
            .list_users()?
            .into_iter()
            .find(|u| u.email == email && verify_password(password, &u.password_hash))
            .ok_or(IdentityError::InvalidCredentials)?;

        self.session.begin(&user)?;
        Ok(user)
    }

    pub fn log_out(&self) -> Result<()> {
        self.session.end()
    }

    /// Merge `update` into the stored user. Unknown ids are a silent no-op.
    pub fn update_user_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Option<User>> {
        let mut users = self.list_users()?;
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(None);
        };

        update.apply(user);
        let updated = user.clone();
        self.save_users(&users)?;
        self.session.update_if_current(user_id, |u| update.apply(u))?;

        info!(user_id = %user_id, "Profile updated");
        Ok(Some(updated))
    }

    /// Make `follower_id` follow `followee_id`. Returns false if it already did.
    pub fn follow(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        self.edit_follow(follower_id, followee_id, true)
    }

    /// Returns false if `follower_id` was not following `followee_id`
    pub fn unfollow(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        self.edit_follow(follower_id, followee_id, false)
    }

    fn edit_follow(&self, follower_id: &str, followee_id: &str, follow: bool) -> Result<bool> {
        if follower_id == followee_id {
            return Err(IdentityError::Validation("You cannot follow yourself".into()));
        }

        let mut users = self.list_users()?;
        let follower_idx = users
            .iter()
            .position(|u| u.id == follower_id)
            .ok_or(IdentityError::UserNotFound)?;
        let followee_idx = users
            .iter()
            .position(|u| u.id == followee_id)
            .ok_or(IdentityError::UserNotFound)?;

        let apply_follower = |u: &mut User| {
            if follow {
                u.add_following(followee_id)
            } else {
                u.remove_following(followee_id)
            }
        };
        let apply_followee = |u: &mut User| {
            if follow {
                u.add_follower(follower_id)
            } else {
                u.remove_follower(follower_id)
            }
        };

        let changed = apply_follower(&mut users[follower_idx]);
        apply_followee(&mut users[followee_idx]);
        self.save_users(&users)?;

        self.session.update_if_current(follower_id, |u| {
            apply_follower(u);
        })?;
        self.session.update_if_current(followee_id, |u| {
            apply_followee(u);
        })?;

        info!(
            follower_id = %follower_id,
            followee_id = %followee_id,
            follow,
            changed,
            "Follow graph updated"
        );
        Ok(changed)
    }
}
