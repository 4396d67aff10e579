//! In-memory document host
//!
//! Implements [`EventHost`] over [`Node`] trees with DOM-like delivery:
//! capture listeners from the root down, then the target's own listeners,
//! then non-capture listeners on the way back up when the event bubbles.
//! Legacy `on<type>` listeners run in the target and bubble phases.

use tracing::trace;

use super::node::Node;
use super::selector::SelectorList;
use crate::domain::{Callback, Event, EventInit, EventInterface};
use crate::error::EventError;
use crate::ports::{EventHost, ListenerMechanism, ListenerOptions};
use crate::LEGACY_HANDLER_PREFIX;

/// Root of an in-memory element tree
pub struct MemoryDocument {
    root: Node,
    body: Node,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Capture,
    Target,
    Bubble,
}

impl MemoryDocument {
    /// Document with an `html` root holding an empty `body`
    pub fn new() -> Self {
        let root = Node::element("html");
        let body = Node::element("body");
        root.attach(&body);
        Self { root, body }
    }

    pub fn body(&self) -> &Node {
        &self.body
    }

    /// First element in the document matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<Node>, EventError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(self
            .root
            .descendants()
            .into_iter()
            .find(|node| selectors.matches(node)))
    }

    fn require(&self, target: &Node, mechanism: ListenerMechanism) -> Result<(), EventError> {
        if self.supports(target, mechanism) {
            Ok(())
        } else {
            Err(EventError::Host(format!(
                "{mechanism:?} listeners are not available on {target:?}"
            )))
        }
    }

    fn invoke(&self, node: &Node, event: &Event<Node>, phase: Phase) {
        event.set_current_target(Some(node.clone()));

        let capture = match phase {
            Phase::Capture => Some(true),
            Phase::Target => None,
            Phase::Bubble => Some(false),
        };
        for (listener, is_capture) in node.snapshot(false, event.event_type(), capture) {
            // Listeners removed by an earlier listener in this step do not run.
            if node.has_listener(false, event.event_type(), &listener, is_capture) {
                listener.call(node, event);
            }
        }

        if phase != Phase::Capture {
            let handler_name = format!("{LEGACY_HANDLER_PREFIX}{}", event.event_type());
            for (listener, _) in node.snapshot(true, &handler_name, None) {
                if node.has_listener(true, &handler_name, &listener, false) {
                    listener.call(node, event);
                }
            }
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHost for MemoryDocument {
    type Node = Node;

    fn supports(&self, target: &Node, mechanism: ListenerMechanism) -> bool {
        let support = target.listener_support();
        match mechanism {
            ListenerMechanism::Standard => support.standard,
            ListenerMechanism::Legacy => support.legacy,
        }
    }

    fn add_event_listener(
        &self,
        target: &Node,
        event_type: &str,
        listener: &Callback<Node>,
        options: ListenerOptions,
    ) -> Result<(), EventError> {
        self.require(target, ListenerMechanism::Standard)?;
        target.add_listener(false, event_type, listener, options.capture);
        Ok(())
    }

    fn remove_event_listener(
        &self,
        target: &Node,
        event_type: &str,
        listener: &Callback<Node>,
        options: ListenerOptions,
    ) -> Result<(), EventError> {
        self.require(target, ListenerMechanism::Standard)?;
        target.remove_listener(false, event_type, listener, options.capture);
        Ok(())
    }

    fn attach_event(
        &self,
        target: &Node,
        handler_name: &str,
        listener: &Callback<Node>,
    ) -> Result<(), EventError> {
        self.require(target, ListenerMechanism::Legacy)?;
        target.add_listener(true, handler_name, listener, false);
        Ok(())
    }

    fn detach_event(
        &self,
        target: &Node,
        handler_name: &str,
        listener: &Callback<Node>,
    ) -> Result<(), EventError> {
        self.require(target, ListenerMechanism::Legacy)?;
        target.remove_listener(true, handler_name, listener, false);
        Ok(())
    }

    fn query_selector_all(&self, root: &Node, selector: &str) -> Result<Vec<Node>, EventError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(root
            .descendants()
            .into_iter()
            .filter(|node| selectors.matches(node))
            .collect())
    }

    fn contains(&self, ancestor: &Node, node: &Node) -> bool {
        ancestor.contains(node)
    }

    fn create_event(
        &self,
        interface: EventInterface,
        event_type: &str,
        init: EventInit,
    ) -> Event<Node> {
        Event::new(interface, event_type, init)
    }

    fn dispatch_event(&self, target: &Node, event: &Event<Node>) -> Result<bool, EventError> {
        event.set_target(Some(target.clone()));
        let ancestors = target.ancestors();
        trace!(event = event.event_type(), target = ?target, depth = ancestors.len(), "Dispatching");

        let mut steps: Vec<(Node, Phase)> = ancestors
            .iter()
            .rev()
            .map(|node| (node.clone(), Phase::Capture))
            .collect();
        steps.push((target.clone(), Phase::Target));
        if event.bubbles() {
            steps.extend(ancestors.into_iter().map(|node| (node, Phase::Bubble)));
        }

        for (node, phase) in steps {
            self.invoke(&node, event, phase);
            if event.propagation_stopped() {
                break;
            }
        }

        event.set_current_target(None);
        Ok(!event.default_prevented())
    }
}
