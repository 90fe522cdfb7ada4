//! Delivery statistics for the change bus

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Snapshot of bus activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusStats {
    pub events_published: u64,
    pub deliveries: u64,
    pub handler_errors: u64,
}

/// Thread-safe statistics collector
#[derive(Clone, Default)]
pub(crate) struct StatsCollector {
    events_published: Arc<AtomicU64>,
    deliveries: Arc<AtomicU64>,
    handler_errors: Arc<AtomicU64>,
}

impl StatsCollector {
    pub fn record_publish(&self) {
        self.events_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self) {
        self.deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.handler_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BusStats {
        BusStats {
            events_published: self.events_published.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            handler_errors: self.handler_errors.load(Ordering::Relaxed),
        }
    }
}
