//! Event-string parsing
//!
//! A subscription string is either `type` or `type.namespace`. Only the first
//! `.` separates the two, so `click.menu.item` has type `click` and
//! namespace `menu.item`. A leading dot does not count as a separator.

use std::fmt;

/// A parsed subscription string
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventName {
    /// Bare event type, namespace stripped
    pub event_type: String,
    /// Optional grouping tag
    pub namespace: Option<String>,
}

impl EventName {
    /// Split `input` on its first dot. Never fails.
    pub fn parse(input: &str) -> Self {
        match input.find('.') {
            Some(dot) if dot > 0 => Self {
                event_type: input[..dot].to_string(),
                namespace: Some(input[dot + 1..].to_string()),
            },
            _ => Self {
                event_type: input.to_string(),
                namespace: None,
            },
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}.{}", self.event_type, ns),
            None => f.write_str(&self.event_type),
        }
    }
}
