//! Event Registry Service
//!
//! Orchestrates the domain table and the host's listener primitives. Every
//! public operation goes parser → table → host and runs to completion before
//! returning.
//!
//! Table borrows are never held across host calls: dispatching re-enters the
//! registry whenever a one-shot listener removes itself.

use serde_json::{Map, Value};
use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::domain::{
    same_object, Anchored, Callback, Event, EventInit, EventInterface, EventName, IdentityMap,
    RecordFilter, RegistrationTable, SubscriptionRecord, TargetId, WeakCallback,
};
use crate::error::EventError;
use crate::metrics::RegistryMetrics;
use crate::ports::{EventApi, EventHost, ListenerMechanism, ListenerOptions};
use crate::{BUBBLES_PROP, LEGACY_HANDLER_PREFIX};

struct RegistryInner<H: EventHost> {
    host: Rc<H>,
    config: RegistryConfig,
    identities: RefCell<IdentityMap>,
    table: RefCell<RegistrationTable<H::Node>>,
    metrics: RegistryMetrics,
}

/// Event registry implementation
///
/// Implements the `EventApi` port over an injected host. Cloning yields
/// another handle to the same registry.
pub struct EventRegistry<H: EventHost + 'static> {
    inner: Rc<RegistryInner<H>>,
}

impl<H: EventHost + 'static> Clone for EventRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: EventHost + 'static> EventRegistry<H> {
    /// Create a registry over `host` with default configuration
    pub fn new(host: Rc<H>) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(host: Rc<H>, config: RegistryConfig) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                host,
                config,
                identities: RefCell::new(IdentityMap::new()),
                table: RefCell::new(RegistrationTable::new()),
                metrics: RegistryMetrics::new(),
            }),
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.inner.host
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.inner.metrics
    }

    /// Identifier of a target or callback, assigned on first use
    ///
    /// Nodes and callbacks draw from the same counter.
    pub fn identity_of(&self, obj: &impl Anchored) -> TargetId {
        self.inner.identities.borrow_mut().identity_of(obj)
    }

    /// Records on `target` matching the filters
    ///
    /// `event` must name the type; namespace, `callback` and `selector`
    /// narrow the result only when supplied. Never assigns an identity.
    pub fn find_matching(
        &self,
        target: &H::Node,
        selector: Option<&str>,
        event: &str,
        callback: Option<&Callback<H::Node>>,
    ) -> Vec<SubscriptionRecord<H::Node>> {
        let id = self.inner.identities.borrow().peek(target);
        let Some(id) = id else {
            return Vec::new();
        };
        let filter = RecordFilter::new(event, callback, selector);
        self.inner.table.borrow().find_matching(id, &filter)
    }

    /// Snapshot of every record on `target`
    pub fn records(&self, target: &H::Node) -> Vec<SubscriptionRecord<H::Node>> {
        let id = self.inner.identities.borrow().peek(target);
        id.map(|id| self.inner.table.borrow().records(id))
            .unwrap_or_default()
    }

    /// Register a listener with the host and record it
    ///
    /// The host receives `dispatch_proxy` when given, otherwise `callback`.
    pub fn register(
        &self,
        target: &H::Node,
        selector: Option<&str>,
        event: &str,
        callback: &Callback<H::Node>,
        dispatch_proxy: Option<Callback<H::Node>>,
    ) -> Result<(), EventError> {
        let name = EventName::parse(event);
        let id = self.identity_of(target);
        let record = SubscriptionRecord {
            event_type: name.event_type,
            namespace: name.namespace,
            callback: callback.clone(),
            selector: selector.map(str::to_string),
            dispatch_proxy,
        };

        if self.inner.config.duplicate_policy == DuplicatePolicy::Ignore
            && self.inner.table.borrow().contains_identical(id, &record)
        {
            debug!(target_id = %id, event, selector, "Identical subscription ignored");
            self.inner.metrics.record_duplicate();
            return Ok(());
        }

        let mechanism = self
            .inner
            .attach(target, &record.event_type, record.listener())?;
        debug!(
            target_id = %id,
            event,
            selector,
            mechanism = ?mechanism,
            "Subscription registered"
        );

        self.inner.table.borrow_mut().push(id, record);
        self.inner.metrics.record_added();
        Ok(())
    }

    /// Remove matching records and their host registrations
    ///
    /// A host listener shared by several records (one callback under two
    /// namespaces) stays registered until its last record is gone.
    pub fn unregister(
        &self,
        target: &H::Node,
        selector: Option<&str>,
        event: &str,
        callback: Option<&Callback<H::Node>>,
    ) -> Result<usize, EventError> {
        let id = self.inner.identities.borrow().peek(target);
        let Some(id) = id else {
            return Ok(0);
        };

        let filter = RecordFilter::new(event, callback, selector);
        let removed = self.inner.table.borrow_mut().remove_matching(id, &filter);
        if removed.is_empty() {
            return Ok(0);
        }
        self.inner.metrics.record_removed(removed.len());

        self.inner.detach_unused(target, id, &removed)?;
        debug!(target_id = %id, event, selector, removed = removed.len(), "Subscriptions removed");
        Ok(removed.len())
    }

    /// Remove every record on `target`, whatever its type
    pub fn unsubscribe_all(&self, target: &H::Node) -> Result<usize, EventError> {
        let id = self.inner.identities.borrow().peek(target);
        let Some(id) = id else {
            return Ok(0);
        };

        let removed = self.inner.table.borrow_mut().take(id);
        self.inner.metrics.record_removed(removed.len());
        self.inner.detach_unused(target, id, &removed)?;
        debug!(target_id = %id, removed = removed.len(), "All subscriptions removed");
        Ok(removed.len())
    }

    /// Forget every record and prune identities of dropped objects
    ///
    /// Host registrations are left in place: the table is keyed by identity
    /// and does not keep targets alive. Call [`Self::unsubscribe_all`] first
    /// for targets that outlive the reset. Returns the number of records
    /// forgotten.
    pub fn reset(&self) -> usize {
        let forgotten = {
            let mut table = self.inner.table.borrow_mut();
            let count = table.len();
            *table = RegistrationTable::new();
            count
        };
        let pruned = self.inner.identities.borrow_mut().prune();
        self.inner.metrics.record_removed(forgotten);
        debug!(records = forgotten, pruned = pruned.len(), "Registry reset");
        forgotten
    }

    fn delegation_proxy(&self, selector: &str, callback: &Callback<H::Node>) -> Callback<H::Node> {
        let registry = Rc::downgrade(&self.inner);
        let selector = selector.to_string();
        let callback = callback.clone();
        Callback::new(move |current: &H::Node, fired: &Event<H::Node>| {
            if let Some(inner) = registry.upgrade() {
                inner.deliver_delegated(current, &selector, &callback, fired);
            }
        })
    }

    fn once_wrapper(&self, callback: &Callback<H::Node>) -> Callback<H::Node> {
        let registry: Weak<RegistryInner<H>> = Rc::downgrade(&self.inner);
        let slot: Rc<OnceCell<WeakCallback<H::Node>>> = Rc::new(OnceCell::new());
        let user = callback.clone();

        let wrapper = Callback::new({
            let slot = Rc::clone(&slot);
            move |context: &H::Node, fired: &Event<H::Node>| {
                let this = slot.get().and_then(WeakCallback::upgrade);
                if let (Some(inner), Some(this)) = (registry.upgrade(), this) {
                    let current = fired.current_target().unwrap_or_else(|| context.clone());
                    let handle = EventRegistry { inner };
                    if let Err(err) = handle.unsubscribe(&current, fired.event_type(), Some(&this)) {
                        warn!(error = %err, event = fired.event_type(), "One-shot listener could not remove itself");
                    }
                }
                user.call(context, fired);
            }
        });

        // Weak, so the wrapper does not keep itself alive.
        let _ = slot.set(wrapper.downgrade());
        wrapper
    }
}

impl<H: EventHost + 'static> RegistryInner<H> {
    fn attach(
        &self,
        target: &H::Node,
        event_type: &str,
        listener: &Callback<H::Node>,
    ) -> Result<ListenerMechanism, EventError> {
        if self.host.supports(target, ListenerMechanism::Standard) {
            self.host
                .add_event_listener(target, event_type, listener, ListenerOptions::default())?;
            Ok(ListenerMechanism::Standard)
        } else if self.host.supports(target, ListenerMechanism::Legacy) {
            self.host
                .attach_event(target, &legacy_handler_name(event_type), listener)?;
            Ok(ListenerMechanism::Legacy)
        } else {
            Err(no_mechanism(target))
        }
    }

    fn detach(
        &self,
        target: &H::Node,
        event_type: &str,
        listener: &Callback<H::Node>,
    ) -> Result<(), EventError> {
        if self.host.supports(target, ListenerMechanism::Standard) {
            self.host
                .remove_event_listener(target, event_type, listener, ListenerOptions::default())
        } else if self.host.supports(target, ListenerMechanism::Legacy) {
            self.host
                .detach_event(target, &legacy_handler_name(event_type), listener)
        } else {
            Err(no_mechanism(target))
        }
    }

    fn detach_unused(
        &self,
        target: &H::Node,
        id: TargetId,
        removed: &[SubscriptionRecord<H::Node>],
    ) -> Result<(), EventError> {
        for record in removed {
            let in_use = self
                .table
                .borrow()
                .listener_in_use(id, &record.event_type, record.listener());
            if !in_use {
                self.detach(target, &record.event_type, record.listener())?;
            }
        }
        Ok(())
    }

    /// Run `callback` if the event's origin is, or sits inside, a descendant
    /// of `root` matching `selector` right now
    fn deliver_delegated(
        &self,
        root: &H::Node,
        selector: &str,
        callback: &Callback<H::Node>,
        fired: &Event<H::Node>,
    ) {
        let Some(origin) = fired.target() else {
            return;
        };

        let candidates = match self.host.query_selector_all(root, selector) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(selector, error = %err, "Delegated selector query failed");
                return;
            }
        };

        let matched = candidates
            .into_iter()
            .find(|candidate| same_object(candidate, &origin) || self.host.contains(candidate, &origin));
        self.metrics.record_delegation(matched.is_some());

        match matched {
            Some(node) => {
                trace!(selector, matched = ?node, origin = ?origin, "Delegated match");
                callback.call(&node, fired);
            }
            None => trace!(selector, origin = ?origin, "No delegated match"),
        }
    }
}

impl<H: EventHost + 'static> EventApi<H::Node> for EventRegistry<H> {
    fn subscribe(
        &self,
        target: &H::Node,
        event: &str,
        callback: &Callback<H::Node>,
    ) -> Result<(), EventError> {
        self.register(target, None, event, callback, None)
    }

    fn unsubscribe(
        &self,
        target: &H::Node,
        event: &str,
        callback: Option<&Callback<H::Node>>,
    ) -> Result<usize, EventError> {
        self.unregister(target, None, event, callback)
    }

    fn subscribe_once(
        &self,
        target: &H::Node,
        event: &str,
        callback: &Callback<H::Node>,
    ) -> Result<Callback<H::Node>, EventError> {
        let wrapper = self.once_wrapper(callback);
        self.subscribe(target, event, &wrapper)?;
        Ok(wrapper)
    }

    fn delegate(
        &self,
        target: &H::Node,
        selector: &str,
        event: &str,
        callback: &Callback<H::Node>,
    ) -> Result<(), EventError> {
        let proxy = self.delegation_proxy(selector, callback);
        self.register(target, Some(selector), event, callback, Some(proxy))
    }

    fn undelegate(
        &self,
        target: &H::Node,
        selector: &str,
        event: &str,
        callback: Option<&Callback<H::Node>>,
    ) -> Result<usize, EventError> {
        self.unregister(target, Some(selector), event, callback)
    }

    fn dispatch(
        &self,
        target: &H::Node,
        event_type: &str,
        props: Option<Map<String, Value>>,
    ) -> Result<bool, EventError> {
        let mut init = EventInit {
            bubbles: self.inner.config.default_bubbles,
            cancelable: self.inner.config.cancelable,
            props: Map::new(),
        };
        for (key, value) in props.into_iter().flatten() {
            if key == BUBBLES_PROP {
                init.bubbles = is_truthy(&value);
            } else {
                init.props.insert(key, value);
            }
        }

        let interface = EventInterface::for_type(event_type);
        let bubbles = init.bubbles;
        let fired = self.inner.host.create_event(interface, event_type, init);
        self.inner.metrics.record_dispatch();
        debug!(event = event_type, target = ?target, bubbles, "Dispatching event");
        self.inner.host.dispatch_event(target, &fired)
    }
}

fn legacy_handler_name(event_type: &str) -> String {
    format!("{LEGACY_HANDLER_PREFIX}{event_type}")
}

fn no_mechanism<N: std::fmt::Debug>(target: &N) -> EventError {
    EventError::NoListenerMechanism {
        target: format!("{target:?}"),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
