//! # Outbound Ports (Driven Ports)

use shared_crypto::{CryptoError, RecoverableSignature};
use shared_types::{Address, Hash};

/// Signature primitive: recovers the signing address of a 32-byte hash.
///
/// Production/Testing: `Secp256k1Recovery`
pub trait SignerRecovery: Send + Sync {
    /// Address that produced `signature` over `hash`.
    ///
    /// Malformed or non-canonical components are an error.
    fn recover(&self, hash: &Hash, signature: &RecoverableSignature)
        -> Result<Address, CryptoError>;
}
