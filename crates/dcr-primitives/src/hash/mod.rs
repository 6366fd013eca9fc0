//! Hash function primitives for the Decred SDK.
//!
//! Decred uses BLAKE-256 (14 rounds) wherever Bitcoin uses SHA-256: for
//! transaction hashes, signature hashes, and as the inner half of the
//! 20-byte `hash160` used by pay-to-pubkey-hash and pay-to-script-hash.

use blake_hash::{Blake256, Digest as _};
use ripemd::{Digest, Ripemd160};

/// Compute the BLAKE-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte BLAKE-256 digest.
pub fn blake256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute RIPEMD-160 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// Compute Decred's Hash160: RIPEMD-160(BLAKE-256(data)).
///
/// This is the digest committed to by P2PKH and P2SH locking scripts.
///
/// # Arguments
/// * `data` - Byte slice to hash (a serialized public key or script).
///
/// # Returns
/// A 20-byte Hash160 digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&blake256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_blake256_empty_string() {
        assert_eq!(
            hex::encode(blake256(b"")),
            "716f6e863f744b9ac22c97ec7b76ea5f5908bc5b2f67c61510bfc4751384ea7a"
        );
    }

    #[test]
    fn test_blake256_string() {
        assert_eq!(
            hex::encode(blake256(FOX)),
            "7576698ee9cad30173080678e5965916adbb11cb5245d386bf1ffda1cb26c9d7"
        );
    }

    #[test]
    fn test_ripemd160_empty_string() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_ripemd160_string() {
        assert_eq!(
            hex::encode(ripemd160(FOX)),
            "37f332f68db77bd9d7edd4969571ad671cf9dd3b"
        );
    }

    /// Hash160 must chain BLAKE-256 into RIPEMD-160, never SHA-256.
    #[test]
    fn test_hash160_composition() {
        let data = b"decred";
        assert_eq!(hash160(data), ripemd160(&blake256(data)));
        assert_eq!(hash160(data).len(), 20);
    }
}
