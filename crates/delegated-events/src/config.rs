//! Registry and logging configuration
//!
//! # Example
//!
//! ```ignore
//! use delegated_events::config::{DuplicatePolicy, RegistryConfig};
//!
//! let config = RegistryConfig::default()
//!     .with_duplicate_policy(DuplicatePolicy::Allow)
//!     .with_default_bubbles(false);
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// What `register` does with a record identical to one already stored
///
/// Identical means same event type, namespace, callback and selector on the
/// same target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first record, skip the host registration
    #[default]
    Ignore,
    /// Store every record and hand every listener to the host
    Allow,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" | "dedupe" => Ok(Self::Ignore),
            "allow" => Ok(Self::Allow),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

/// Registry configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Handling of identical registrations
    pub duplicate_policy: DuplicatePolicy,
    /// Bubbling flag for dispatched events without a `bubbles` prop
    pub default_bubbles: bool,
    /// Cancelable flag for dispatched events
    pub cancelable: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Ignore,
            default_bubbles: true,
            cancelable: true,
        }
    }
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EVENTS_DUPLICATE_POLICY`: `ignore` or `allow` (default: ignore)
    /// - `EVENTS_DEFAULT_BUBBLES`: Bubble dispatched events (default: true)
    /// - `EVENTS_CANCELABLE`: Make dispatched events cancelable (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            duplicate_policy: env::var("EVENTS_DUPLICATE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.duplicate_policy),

            default_bubbles: env::var("EVENTS_DEFAULT_BUBBLES")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.default_bubbles),

            cancelable: env::var("EVENTS_CANCELABLE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.cancelable),
        }
    }

    /// Builder-style method to set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builder-style method to set the default bubbling flag
    pub fn with_default_bubbles(mut self, bubbles: bool) -> Self {
        self.default_bubbles = bubbles;
        self
    }

    /// Builder-style method to set the cancelable flag
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

/// Logging configuration for [`crate::telemetry::init_tracing`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive (trace, debug, info, warn, error, or `target=level`)
    pub level: String,
    /// Emit JSON formatted logs
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EVENTS_LOG_LEVEL` or `RUST_LOG`: Filter directive (default: info)
    /// - `EVENTS_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            level: env::var("EVENTS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json: env::var("EVENTS_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && !value.is_empty()
}
