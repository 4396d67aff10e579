//! Tracing subscriber setup.
//!
//! The registry only emits `tracing` events; installing a subscriber is left
//! to the embedding application. This helper wires up the usual
//! `tracing-subscriber` stack: an `EnvFilter` plus a plain or JSON `fmt`
//! layer.

use crate::config::LogConfig;
use crate::error::EventError;
use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber.
///
/// Fails with [`EventError::Telemetry`] if the filter directive cannot be
/// parsed or a global subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), EventError> {
    let filter =
        EnvFilter::try_new(&config.level).map_err(|e| EventError::Telemetry(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| EventError::Telemetry(e.to_string()))?;

    tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
    Ok(())
}
