//! # Node Registry Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployed registry on an in-memory chain
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── front_running.rs
//! │   ├── forged_headers.rs
//! │   └── replay.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── lifecycle.rs
//!     ├── reconstruction.rs
//!     └── slashing.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nr-tests
//!
//! # By category
//! cargo test -p nr-tests integration::
//! cargo test -p nr-tests exploits::
//!
//! # With logs
//! RUST_LOG=debug cargo test -p nr-tests -- --nocapture
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
