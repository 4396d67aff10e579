//! Event values
//!
//! An [`Event`] is created by the host, filled with the dispatch properties
//! and then walked along its propagation path. The host updates `target` and
//! `current_target` through interior mutability while listeners only ever
//! see `&Event`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};

/// Host event interface an event is constructed with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventInterface {
    /// Generic event
    Event,
    /// Pointer events (`click`, `mousedown`, `mouseup`, `mousemove`)
    MouseEvent,
}

impl EventInterface {
    /// Interface used when synthesizing an event of `event_type`
    pub fn for_type(event_type: &str) -> Self {
        match event_type {
            "click" | "mousedown" | "mouseup" | "mousemove" => Self::MouseEvent,
            _ => Self::Event,
        }
    }
}

/// Construction flags and extra properties for a synthesized event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
    pub props: Map<String, Value>,
}

impl Default for EventInit {
    fn default() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            props: Map::new(),
        }
    }
}

/// An event travelling through a host
#[derive(Debug)]
pub struct Event<N> {
    interface: EventInterface,
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    props: Map<String, Value>,
    target: RefCell<Option<N>>,
    current_target: RefCell<Option<N>>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl<N: Clone> Event<N> {
    pub fn new(interface: EventInterface, event_type: &str, init: EventInit) -> Self {
        Self {
            interface,
            event_type: event_type.to_string(),
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            props: init.props,
            target: RefCell::new(None),
            current_target: RefCell::new(None),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn interface(&self) -> EventInterface {
        self.interface
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Extra property copied in at dispatch
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    /// Node the event was dispatched on (its origin)
    pub fn target(&self) -> Option<N> {
        self.target.borrow().clone()
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> Option<N> {
        self.current_target.borrow().clone()
    }

    /// Set by hosts when dispatch starts
    pub fn set_target(&self, target: Option<N>) {
        *self.target.borrow_mut() = target;
    }

    /// Set by hosts at every step of the propagation path
    pub fn set_current_target(&self, current: Option<N>) {
        *self.current_target.borrow_mut() = current;
    }

    /// Cancel the default action. Ignored for non-cancelable events.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stop the event after the current node's listeners
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}
