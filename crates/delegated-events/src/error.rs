//! Error types for the event registry
//!
//! Arguments are never validated by the registry itself. Every variant here
//! is a failure raised by the host platform (or the tracing setup) and handed
//! back to the caller unchanged.

use thiserror::Error;

/// Errors surfaced by registry operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Target {target} supports neither standard nor legacy listeners")]
    NoListenerMechanism { target: String },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Cannot insert {child} under {parent}: it would become its own ancestor")]
    HierarchyRequest { parent: String, child: String },

    #[error("Host error: {0}")]
    Host(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl EventError {
    /// Shorthand for a selector the host could not parse
    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
