//! # Delegated Events Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks (lookup, dispatch, delegation)
//! └── src/
//!     ├── fixtures.rs   # Shared document fixture
//!     └── integration/  # End-to-end scenarios through the public API
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p delegated-events-tests
//!
//! # By category
//! cargo test -p delegated-events-tests integration::delegation
//!
//! # Benchmarks
//! cargo bench -p delegated-events-tests
//! ```

pub mod fixtures;
