//! # Delegated Events
//!
//! A registry over a host platform's native event mechanism that adds
//! namespaced event names, one-shot subscriptions and selector-based
//! delegation.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure bookkeeping, no host calls
//!   - `EventName`: `type.namespace` parser
//!   - `IdentityMap`: lazy, weak object-to-integer identities
//!   - `RegistrationTable`: per-target subscription records
//!   - `Event`: the event value handed to listeners
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `EventApi`: Driving port (subscribe, delegate, dispatch, ...)
//!   - `EventHost`: Driven port (the platform's listener primitives)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `EventRegistry`: Implements `EventApi` on top of an `EventHost`
//!
//! - **Adapters Layer** (`adapters/`): Hosts
//!   - `MemoryDocument`: In-memory node tree with DOM-like dispatch
//!
//! ## Execution Model
//!
//! Everything runs synchronously on the calling thread. The registry is
//! built on `Rc`/`RefCell` and is deliberately neither `Send` nor `Sync`.
//!
//! ## Usage Example
//!
//! ```ignore
//! use delegated_events::{Callback, EventApi, EventRegistry, MemoryDocument, Node};
//! use std::rc::Rc;
//!
//! let document = Rc::new(MemoryDocument::new());
//! let list = Node::element("ul");
//! document.body().append_child(&list)?;
//!
//! let registry = EventRegistry::new(document.clone());
//! let on_red = Callback::new(|item: &Node, _event| println!("clicked {item:?}"));
//! registry.delegate(&list, "li.red", "click.menu", &on_red)?;
//!
//! // Items appended later are still matched.
//! let item = Node::element("li").with_class("red");
//! list.append_child(&item)?;
//! registry.dispatch(&item, "click", None)?;
//!
//! // Drop every `menu` subscription at once.
//! registry.unsubscribe(&list, "click.menu", None)?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-exports for convenience
pub use adapters::{ListenerSupport, MemoryDocument, Node};
pub use config::{DuplicatePolicy, LogConfig, RegistryConfig};
pub use domain::{
    Anchored, Callback, Event, EventInit, EventInterface, EventName, IdentityMap,
    RegistrationTable, SubscriptionRecord, TargetId,
};
pub use error::EventError;
pub use metrics::{MetricsSnapshot, RegistryMetrics};
pub use ports::{EventApi, EventHost, ListenerMechanism, ListenerOptions};
pub use service::EventRegistry;
pub use telemetry::init_tracing;

/// Event property that controls the bubbling flag instead of being copied.
pub const BUBBLES_PROP: &str = "bubbles";

/// Prefix the legacy registration mechanism puts in front of event types.
pub const LEGACY_HANDLER_PREFIX: &str = "on";
