//! secp256k1 signer recovery.

use crate::ports::SignerRecovery;
use shared_crypto::{recover_address, CryptoError, RecoverableSignature};
use shared_types::{Address, Hash};

/// Recovers signers with secp256k1 ECDSA (low-S, v in {0, 1, 27, 28}).
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover(
        &self,
        hash: &Hash,
        signature: &RecoverableSignature,
    ) -> Result<Address, CryptoError> {
        recover_address(hash, signature)
    }
}
