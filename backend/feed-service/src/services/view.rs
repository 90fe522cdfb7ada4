//! Live feed view
//!
//! The presentation side of the feed: holds the active [`FeedQuery`],
//! subscribes to the change bus and rebuilds its cards from scratch on every
//! `postsUpdated`. The session pointer is re-read on each rebuild.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use change_bus::{ChangeBus, SubscriptionId};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::PostCard;
use crate::query::FeedQuery;
use crate::services::composer::FeedComposer;

struct ViewState {
    composer: FeedComposer,
    query: RwLock<FeedQuery>,
    cards: RwLock<Vec<PostCard>>,
    renders: AtomicU64,
}

impl ViewState {
    fn refresh(&self) -> Result<()> {
        let viewer = self.composer.session().current_user()?;
        let query = self.query.read().clone();
        let posts = self.composer.compose_for(viewer.as_ref(), &query)?;

        let now = Utc::now();
        let cards: Vec<PostCard> = posts
            .into_iter()
            .map(|post| PostCard::build(post, viewer.as_ref(), now))
            .collect();

        let count = cards.len();
        *self.cards.write() = cards;
        let renders = self.renders.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(cards = count, renders, "Feed view rebuilt");
        Ok(())
    }
}

pub struct FeedView {
    state: Arc<ViewState>,
    bus: ChangeBus,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl FeedView {
    /// Compose once, then follow every change published on the repository's bus
    pub fn attach(composer: FeedComposer, query: FeedQuery) -> Result<Self> {
        let bus = composer.posts().bus().clone();
        let state = Arc::new(ViewState {
            composer,
            query: RwLock::new(query),
            cards: RwLock::new(Vec::new()),
            renders: AtomicU64::new(0),
        });
        state.refresh()?;

        // Weak so a forgotten view does not keep itself alive through the bus
        let weak = Arc::downgrade(&state);
        let id = bus.subscribe(move |event| {
            let Some(state) = weak.upgrade() else {
                return Ok(());
            };
            state
                .refresh()
                .with_context(|| format!("recomposing feed view on {event}"))
        });

        info!(subscription = %id, "Feed view attached");
        Ok(Self {
            state,
            bus,
            subscription: Mutex::new(Some(id)),
        })
    }

    pub fn query(&self) -> FeedQuery {
        self.state.query.read().clone()
    }

    /// Replace the view state and recompose immediately
    pub fn set_query(&self, query: FeedQuery) -> Result<()> {
        debug!(query = %query.to_query_string(), "Feed query changed");
        *self.state.query.write() = query;
        self.state.refresh()
    }

    pub fn refresh(&self) -> Result<()> {
        self.state.refresh()
    }

    /// Cards from the most recent rebuild
    pub fn snapshot(&self) -> Vec<PostCard> {
        self.state.cards.read().clone()
    }

    pub fn post_ids(&self) -> Vec<String> {
        self.state
            .cards
            .read()
            .iter()
            .map(|card| card.post.id.clone())
            .collect()
    }

    /// Number of rebuilds so far, including the initial one
    pub fn render_count(&self) -> u64 {
        self.state.renders.load(Ordering::Relaxed)
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Stop following changes. Returns false if already detached.
    pub fn detach(&self) -> bool {
        match self.subscription.lock().take() {
            Some(id) => {
                self.bus.unsubscribe(id);
                info!(subscription = %id, "Feed view detached");
                true
            }
            None => false,
        }
    }
}

impl Drop for FeedView {
    fn drop(&mut self) {
        self.detach();
    }
}
