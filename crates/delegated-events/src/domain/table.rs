//! Registration table
//!
//! Maps a target identifier to its records in insertion order. A target's
//! entry is created on first insert and survives becoming empty; identifiers
//! are never reclaimed here.

use std::collections::HashMap;

use super::callback::Callback;
use super::identity::TargetId;
use super::record::{RecordFilter, SubscriptionRecord};

pub struct RegistrationTable<N> {
    entries: HashMap<TargetId, Vec<SubscriptionRecord<N>>>,
}

impl<N: 'static> RegistrationTable<N> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Records on `target` accepted by `filter`, in insertion order
    pub fn find_matching(
        &self,
        target: TargetId,
        filter: &RecordFilter<'_, N>,
    ) -> Vec<SubscriptionRecord<N>> {
        self.entries
            .get(&target)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| filter.matches(record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True if `target` already holds a record identical to `record`
    pub fn contains_identical(&self, target: TargetId, record: &SubscriptionRecord<N>) -> bool {
        self.entries
            .get(&target)
            .is_some_and(|records| records.iter().any(|r| r.is_identical(record)))
    }

    /// True if some record on `target` still has `listener` registered for `event_type`
    pub fn listener_in_use(&self, target: TargetId, event_type: &str, listener: &Callback<N>) -> bool {
        self.entries.get(&target).is_some_and(|records| {
            records
                .iter()
                .any(|r| r.event_type == event_type && r.listener().same_as(listener))
        })
    }

    pub fn push(&mut self, target: TargetId, record: SubscriptionRecord<N>) {
        self.entries.entry(target).or_default().push(record);
    }

    /// Remove and return the records accepted by `filter`
    pub fn remove_matching(
        &mut self,
        target: TargetId,
        filter: &RecordFilter<'_, N>,
    ) -> Vec<SubscriptionRecord<N>> {
        let Some(records) = self.entries.get_mut(&target) else {
            return Vec::new();
        };

        let (removed, kept): (Vec<_>, Vec<_>) = records
            .drain(..)
            .partition(|record| filter.matches(record));
        *records = kept;
        removed
    }

    /// Snapshot of every record on `target`
    pub fn records(&self, target: TargetId) -> Vec<SubscriptionRecord<N>> {
        self.entries.get(&target).cloned().unwrap_or_default()
    }

    /// Empty `target`'s entry, returning what it held
    pub fn take(&mut self, target: TargetId) -> Vec<SubscriptionRecord<N>> {
        self.entries
            .get_mut(&target)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Total number of records across all targets
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<N: 'static> Default for RegistrationTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
