//! Change notification bus
//!
//! A process-wide publish/subscribe channel carrying zero-payload change
//! signals. Delivery is synchronous: `publish` returns only after every
//! subscriber has run, and subscribers run in the order they subscribed.
//!
//! ```text
//! PostRepository:
//!   1. load whole collection
//!   2. apply mutation
//!   3. persist whole collection
//!   4. publish(ChangeEvent::PostsUpdated)
//!        ↓ (same call stack, subscription order)
//! FeedView, other subscribers:
//!   5. recompose from scratch
//! ```
//!
//! # Example
//!
//! ```
//! use change_bus::{ChangeBus, ChangeEvent};
//!
//! let bus = ChangeBus::new();
//! let id = bus.subscribe(|event| {
//!     assert_eq!(event.name(), "postsUpdated");
//!     Ok(())
//! });
//!
//! assert_eq!(bus.publish(ChangeEvent::PostsUpdated), 1);
//! assert!(bus.unsubscribe(id));
//! assert_eq!(bus.publish(ChangeEvent::PostsUpdated), 0);
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

mod stats;

pub use stats::BusStats;
use stats::StatsCollector;

/// Change signals carried by the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeEvent {
    /// The post collection was written
    #[serde(rename = "postsUpdated")]
    PostsUpdated,
}

impl ChangeEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            ChangeEvent::PostsUpdated => "postsUpdated",
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by [`ChangeBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Handler = Arc<dyn Fn(&ChangeEvent) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
struct BusInner {
    subscribers: Mutex<Vec<(SubscriptionId, Handler)>>,
    next_id: AtomicU64,
    stats: StatsCollector,
}

/// Cloneable handle to one process-wide bus
#[derive(Clone, Default)]
pub struct ChangeBus {
    inner: Arc<BusInner>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it receives every event published after this call
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.subscribers.lock().push((id, Arc::new(handler)));
        debug!(subscription = %id, "Subscriber registered");
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = subscribers.len() != before;
        if removed {
            debug!(subscription = %id, "Subscriber removed");
        }
        removed
    }

    /// Deliver `event` to every subscriber, in subscription order.
    ///
    /// Returns the number of handlers invoked. A failing handler is logged
    /// and counted; later handlers still run.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        // Snapshot so handlers may subscribe or publish without deadlocking
        let handlers: Vec<(SubscriptionId, Handler)> = self.inner.subscribers.lock().clone();
        self.inner.stats.record_publish();

        for (id, handler) in &handlers {
            self.inner.stats.record_delivery();
            if let Err(e) = handler(&event) {
                self.inner.stats.record_error();
                warn!(subscription = %id, event = %event, error = %e, "Change handler failed");
            }
        }

        debug!(event = %event, subscribers = handlers.len(), "Change event published");
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    pub fn stats(&self) -> BusStats {
        self.inner.stats.snapshot()
    }
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.subscriber_count())
            .field("stats", &self.stats())
            .finish()
    }
}
