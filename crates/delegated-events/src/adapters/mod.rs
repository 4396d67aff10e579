//! Adapters Layer
//!
//! Host implementations of the `EventHost` driven port.

pub mod memory;

pub use memory::{ListenerSupport, MemoryDocument, Node, SelectorList};
