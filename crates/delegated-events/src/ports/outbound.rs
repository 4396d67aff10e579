//! Outbound Ports (Driven Ports)
//!
//! The primitives the registry needs from the host platform. Delivery,
//! bubbling and listener ordering are entirely the host's business.

use std::fmt::Debug;

use crate::domain::{Anchored, Callback, Event, EventInit, EventInterface};
use crate::error::EventError;

/// The two historical registration mechanisms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerMechanism {
    /// `add_event_listener(type, listener, options)`
    Standard,
    /// `attach_event("on" + type, listener)`
    Legacy,
}

/// Options for standard registrations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Register for the capture phase instead of target/bubble
    pub capture: bool,
}

/// Host platform event primitives (Driven Port)
///
/// Mechanism support is probed through [`EventHost::supports`] on every call
/// and never cached, so a target may change what it supports over time.
pub trait EventHost {
    /// Node handle. Clones must refer to the same node.
    type Node: Anchored + Clone + Debug + 'static;

    /// Whether `target` offers `mechanism`
    fn supports(&self, target: &Self::Node, mechanism: ListenerMechanism) -> bool;

    fn add_event_listener(
        &self,
        target: &Self::Node,
        event_type: &str,
        listener: &Callback<Self::Node>,
        options: ListenerOptions,
    ) -> Result<(), EventError>;

    fn remove_event_listener(
        &self,
        target: &Self::Node,
        event_type: &str,
        listener: &Callback<Self::Node>,
        options: ListenerOptions,
    ) -> Result<(), EventError>;

    /// Legacy registration; `handler_name` is the `on`-prefixed type
    fn attach_event(
        &self,
        target: &Self::Node,
        handler_name: &str,
        listener: &Callback<Self::Node>,
    ) -> Result<(), EventError> {
        let _ = (handler_name, listener);
        Err(EventError::NoListenerMechanism {
            target: format!("{target:?}"),
        })
    }

    /// Legacy deregistration; `handler_name` is the `on`-prefixed type
    fn detach_event(
        &self,
        target: &Self::Node,
        handler_name: &str,
        listener: &Callback<Self::Node>,
    ) -> Result<(), EventError> {
        let _ = (handler_name, listener);
        Err(EventError::NoListenerMechanism {
            target: format!("{target:?}"),
        })
    }

    /// Descendants of `root` matching `selector`, in tree order
    fn query_selector_all(
        &self,
        root: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, EventError>;

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Construct an event value
    fn create_event(
        &self,
        interface: EventInterface,
        event_type: &str,
        init: EventInit,
    ) -> Event<Self::Node>;

    /// Deliver `event` starting at `target`
    ///
    /// Returns `false` if a listener prevented the default action.
    fn dispatch_event(
        &self,
        target: &Self::Node,
        event: &Event<Self::Node>,
    ) -> Result<bool, EventError>;
}
