//! # Integration Flows
//!
//! Node registry, node ledger and blockhash registry driven together over
//! one in-memory chain.

pub mod lifecycle;
pub mod reconstruction;
pub mod slashing;
