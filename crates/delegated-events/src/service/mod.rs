//! Service Layer
//!
//! `EventRegistry` implements the `EventApi` driving port over any
//! `EventHost`.

pub mod registry;

pub use registry::EventRegistry;
