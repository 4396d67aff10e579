//! Counters for registry operations
//!
//! ## Usage
//!
//! ```ignore
//! let snapshot = registry.metrics().snapshot();
//! println!("{} delegated hits", snapshot.delegated_matches);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for one registry
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    /// Records appended to the table
    pub subscriptions_added: AtomicU64,
    /// Registrations skipped because an identical record existed
    pub duplicates_ignored: AtomicU64,
    /// Records removed by unsubscribe, undelegate or reset
    pub subscriptions_removed: AtomicU64,
    /// Events handed to the host for dispatch
    pub events_dispatched: AtomicU64,
    /// Delegated deliveries that found a matching descendant
    pub delegated_matches: AtomicU64,
    /// Delegated deliveries that found none
    pub delegated_misses: AtomicU64,
}

impl RegistryMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_added(&self) {
        self.subscriptions_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicates_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_removed(&self, count: usize) {
        self.subscriptions_removed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_dispatch(&self) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a delegated selector match
    pub fn record_delegation(&self, matched: bool) {
        if matched {
            self.delegated_matches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.delegated_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            subscriptions_added: self.subscriptions_added.load(Ordering::Relaxed),
            duplicates_ignored: self.duplicates_ignored.load(Ordering::Relaxed),
            subscriptions_removed: self.subscriptions_removed.load(Ordering::Relaxed),
            events_dispatched: self.events_dispatched.load(Ordering::Relaxed),
            delegated_matches: self.delegated_matches.load(Ordering::Relaxed),
            delegated_misses: self.delegated_misses.load(Ordering::Relaxed),
        }
    }

    /// Records currently live according to the counters
    pub fn active_subscriptions(&self) -> u64 {
        let added = self.subscriptions_added.load(Ordering::Relaxed);
        let removed = self.subscriptions_removed.load(Ordering::Relaxed);
        added.saturating_sub(removed)
    }
}

/// Point-in-time copy of [`RegistryMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub subscriptions_added: u64,
    pub duplicates_ignored: u64,
    pub subscriptions_removed: u64,
    pub events_dispatched: u64,
    pub delegated_matches: u64,
    pub delegated_misses: u64,
}
