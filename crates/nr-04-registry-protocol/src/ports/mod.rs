//! # Ports Layer

pub mod inbound;
pub mod outbound;

pub use inbound::NodeRegistryApi;
pub use outbound::SignerRecovery;
