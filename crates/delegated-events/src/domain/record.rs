//! Subscription records and the filter used to look them up

use super::callback::Callback;
use super::event_name::EventName;

/// One registration on one target
pub struct SubscriptionRecord<N> {
    /// Bare event type
    pub event_type: String,
    pub namespace: Option<String>,
    /// The user's listener
    pub callback: Callback<N>,
    /// Descendant selector, delegated subscriptions only
    pub selector: Option<String>,
    /// Listener actually handed to the host, delegated subscriptions only
    pub dispatch_proxy: Option<Callback<N>>,
}

impl<N: 'static> SubscriptionRecord<N> {
    /// The listener registered with the host for this record
    pub fn listener(&self) -> &Callback<N> {
        self.dispatch_proxy.as_ref().unwrap_or(&self.callback)
    }

    /// Same type, namespace, callback and selector
    pub fn is_identical(&self, other: &SubscriptionRecord<N>) -> bool {
        self.event_type == other.event_type
            && self.namespace == other.namespace
            && self.callback.same_as(&other.callback)
            && self.selector == other.selector
    }
}

impl<N> Clone for SubscriptionRecord<N> {
    fn clone(&self) -> Self {
        Self {
            event_type: self.event_type.clone(),
            namespace: self.namespace.clone(),
            callback: self.callback.clone(),
            selector: self.selector.clone(),
            dispatch_proxy: self.dispatch_proxy.clone(),
        }
    }
}

impl<N> std::fmt::Debug for SubscriptionRecord<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionRecord")
            .field("event_type", &self.event_type)
            .field("namespace", &self.namespace)
            .field("callback", &self.callback)
            .field("selector", &self.selector)
            .field("delegated", &self.dispatch_proxy.is_some())
            .finish()
    }
}

/// Lookup criteria for records on one target
///
/// The event type always has to match. Namespace, callback and selector only
/// narrow the match when given.
pub struct RecordFilter<'a, N> {
    pub name: EventName,
    pub callback: Option<&'a Callback<N>>,
    pub selector: Option<&'a str>,
}

impl<'a, N: 'static> RecordFilter<'a, N> {
    pub fn new(
        event: &str,
        callback: Option<&'a Callback<N>>,
        selector: Option<&'a str>,
    ) -> Self {
        Self {
            name: EventName::parse(event),
            callback,
            selector,
        }
    }

    pub fn matches(&self, record: &SubscriptionRecord<N>) -> bool {
        record.event_type == self.name.event_type
            && self
                .name
                .namespace()
                .map_or(true, |ns| record.namespace.as_deref() == Some(ns))
            && self
                .callback
                .map_or(true, |cb| record.callback.same_as(cb))
            && self
                .selector
                .map_or(true, |sel| record.selector.as_deref() == Some(sel))
    }
}
