//! Feedline
//!
//! Single-process wiring of the feed core: one key-value store and one change
//! bus shared by the session pointer, the user directory, the post repository
//! and the feed composer.
//!
//! ```
//! use feedline::{App, Config};
//!
//! let app = App::in_memory(Config::default());
//! assert!(app.posts.all_posts().unwrap().is_empty());
//! ```

pub mod config;
pub mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use change_bus::ChangeBus;
use content_service::PostRepository;
use feed_service::{FeedComposer, FeedQuery, FeedView, TrendingHashtag};
use identity_service::{SessionStore, User, UserDirectory};
use kv_store::{InMemoryStore, JsonFileStore, SharedStore};
use tracing::info;

pub use config::{Config, LogFormat, StorageBackend};
pub use telemetry::init_tracing;

/// Every component of one running feed, sharing one store and one bus
#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub store: SharedStore,
    pub bus: ChangeBus,
    pub session: SessionStore,
    pub users: UserDirectory,
    pub posts: PostRepository,
    pub feed: FeedComposer,
}

impl App {
    /// Build the store named by `config.storage`, then wire everything over it
    pub fn from_config(config: Config) -> Result<Self> {
        let store = open_store(&config)?;
        Ok(Self::with_store(config, store))
    }

    pub fn in_memory(config: Config) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::new()))
    }

    pub fn with_store(config: Config, store: SharedStore) -> Self {
        let bus = ChangeBus::new();
        let session = SessionStore::new(store.clone());
        let users = UserDirectory::new(store.clone(), session.clone());
        let posts = PostRepository::new(store.clone(), bus.clone());
        let feed = FeedComposer::new(posts.clone(), session.clone());

        Self {
            config,
            store,
            bus,
            session,
            users,
            posts,
            feed,
        }
    }

    /// The signed-in user, resolved now
    pub fn current_user(&self) -> Result<Option<User>> {
        self.session
            .current_user()
            .context("Failed to resolve session user")
    }

    /// Query a fresh feed view starts with
    pub fn default_query(&self) -> FeedQuery {
        FeedQuery::default().with_sort(self.config.feed.default_sort)
    }

    /// Attach a live view of the feed
    pub fn open_feed_view(&self, query: FeedQuery) -> Result<FeedView> {
        FeedView::attach(self.feed.clone(), query).context("Failed to open feed view")
    }

    pub fn trending(&self) -> Result<Vec<TrendingHashtag>> {
        self.feed
            .trending(self.config.feed.trending_limit)
            .context("Failed to compute trending hashtags")
    }
}

fn open_store(config: &Config) -> Result<SharedStore> {
    let store: SharedStore = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::File => {
            let path = &config.storage.path;
            Arc::new(
                JsonFileStore::open(path)
                    .with_context(|| format!("Failed to open store at {}", path.display()))?,
            )
        }
    };
    info!(backend = ?config.storage.backend, "Store opened");
    Ok(store)
}
