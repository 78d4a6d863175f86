//! # Domain Layer
//!
//! Block header entity, RLP encoders and codec errors.

pub mod encoding;
pub mod errors;
pub mod header;

pub use errors::{rlp_error, HeaderCodecError};
pub use header::{BlockHeader, BLOOM_LENGTH, EMPTY_OMMERS_HASH, NONCE_LENGTH};
