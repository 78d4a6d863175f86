//! # Domain Layer

pub mod commitment;
pub mod errors;
pub mod events;
pub mod messages;

pub use commitment::ConvictCommitment;
pub use errors::RegistryError;
pub use events::{RegistryEvent, RemovalReason};
pub use messages::{convict_commitment, registration_message, registry_id};
