//! Domain Layer - Registry bookkeeping
//!
//! This layer contains:
//! - Event-string parsing (`type.namespace`)
//! - Identity assignment for targets and callbacks
//! - Subscription records and their lookup filter
//! - The per-target registration table
//! - The event value passed to listeners
//!
//! RULES:
//! - No host calls
//! - Single-threaded (`Rc`, `RefCell`, `Cell`)

pub mod callback;
pub mod event;
pub mod event_name;
pub mod identity;
pub mod record;
pub mod table;

pub use callback::{Callback, WeakCallback};
pub use event::{Event, EventInit, EventInterface};
pub use event_name::EventName;
pub use identity::{same_object, Anchored, IdentityMap, TargetId};
pub use record::{RecordFilter, SubscriptionRecord};
pub use table::RegistrationTable;
