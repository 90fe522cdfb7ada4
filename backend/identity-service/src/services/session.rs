//! Session pointer
//!
//! The signed-in user is a copy of their record stored under `currentUser`.
//! Every reader resolves it at call time; nothing caches it.

use crate::error::Result;
use crate::models::User;
use kv_store::{SharedStore, StoreExt, StoreKey};
use tracing::{debug, info};

#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Result<Option<User>> {
        let user: Option<User> = self.store.load(StoreKey::CurrentUser)?;
        debug!(signed_in = user.is_some(), "Resolved session user");
        Ok(user)
    }

    /// Point the session at `user`
    pub fn begin(&self, user: &User) -> Result<()> {
        self.store.save(StoreKey::CurrentUser, user)?;
        info!(user_id = %user.id, "Session started");
        Ok(())
    }

    /// Clear the session pointer
    pub fn end(&self) -> Result<()> {
        self.store.clear(StoreKey::CurrentUser)?;
        info!("Session ended");
        Ok(())
    }

    /// Apply `edit` to the session copy when it belongs to `user_id`
    pub(crate) fn update_if_current<F>(&self, user_id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut User),
    {
        if let Some(mut current) = self.current_user()? {
            if current.id == user_id {
                edit(&mut current);
                self.store.save(StoreKey::CurrentUser, &current)?;
                debug!(user_id = %user_id, "Session copy refreshed");
            }
        }
        Ok(())
    }
}
