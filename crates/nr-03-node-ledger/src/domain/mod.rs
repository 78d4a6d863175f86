//! # Domain Layer
//!
//! Nodes, signer records and the dense node set.

pub mod entities;
pub mod errors;
pub mod node_set;

pub use entities::{Node, SignerRecord, Stage};
pub use errors::LedgerError;
pub use node_set::NodeSet;
