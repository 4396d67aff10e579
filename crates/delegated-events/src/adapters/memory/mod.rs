//! In-memory host
//!
//! A small element tree with DOM-like listener registration, selector
//! queries and event propagation. Used by the test suites and by headless
//! callers that want the registry without a real platform underneath.

pub mod document;
pub mod node;
pub mod selector;

pub use document::MemoryDocument;
pub use node::{ListenerSupport, Node};
pub use selector::SelectorList;
