//! Test Harness Module
//!
//! Provides infrastructure for the cross-crate flow tests:
//! - A fully wired app over a fresh in-memory store
//! - A broadcast counter subscribed to the change bus
//! - Shortcuts for registering and signing in users

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use feedline::{App, Config};
use identity_service::{SignupRequest, User};
use kv_store::{InMemoryStore, SharedStore};

pub const PASSWORD: &str = "secret123";

/// Test Environment
pub struct TestEnvironment {
    pub app: App,
    broadcasts: Arc<AtomicUsize>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::over_store(Arc::new(InMemoryStore::new()))
    }

    /// A second environment over the same store models a second tab
    pub fn over_store(store: SharedStore) -> Self {
        let app = App::with_store(Config::default(), store);
        let broadcasts = Arc::new(AtomicUsize::new(0));
        let counter = broadcasts.clone();
        app.bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        Self { app, broadcasts }
    }

    pub fn broadcasts(&self) -> usize {
        self.broadcasts.load(Ordering::SeqCst)
    }

    /// Register a user with a derived email and the shared test password
    pub fn register(&self, name: &str) -> User {
        self.app
            .users
            .sign_up(SignupRequest {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password: PASSWORD.to_string(),
                confirm_password: PASSWORD.to_string(),
            })
            .expect("sign-up should succeed")
    }

    /// Sign in as `user` and return the session copy
    pub fn login(&self, user: &User) -> User {
        self.app
            .users
            .log_in(&user.email, PASSWORD)
            .expect("log-in should succeed")
    }

    pub fn logout(&self) {
        self.app.users.log_out().expect("log-out should succeed");
    }

    /// The session user as the repository sees it right now
    pub fn me(&self) -> Option<User> {
        self.app.current_user().expect("session should resolve")
    }

    /// Refresh a user record from the directory
    pub fn reload(&self, user: &User) -> User {
        self.app
            .users
            .get_user_by_id(&user.id)
            .expect("directory should load")
            .expect("user should exist")
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
