//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Port (inbound) - the subscription API callers use
//! - Driven Port (outbound) - the host platform's event primitives

pub mod inbound;
pub mod outbound;

pub use inbound::EventApi;
pub use outbound::{EventHost, ListenerMechanism, ListenerOptions};
