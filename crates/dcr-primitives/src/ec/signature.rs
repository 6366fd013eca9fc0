//! ECDSA signature with DER serialization and RFC6979 deterministic nonces.
//!
//! Signatures are always held in low-S form, which is what Decred's
//! standardness rules require of script signatures.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// An ECDSA signature over secp256k1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
}

impl Signature {
    /// Create a signature from raw R and S 32-byte big-endian arrays.
    ///
    /// A high S value is normalized to `N - S`.
    ///
    /// # Returns
    /// `Ok(Signature)`, or an error if either scalar is zero or not below the curve order.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Result<Self, PrimitivesError> {
        let sig = ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(r),
            k256::FieldBytes::from(s),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Self::low_s(sig))
    }

    /// Parse a strict DER-encoded signature.
    ///
    /// # Arguments
    /// * `bytes` - DER bytes, without a trailing hash-type byte.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: too short".to_string(),
            ));
        }
        let sig = ecdsa::Signature::from_der(bytes)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Self::low_s(sig))
    }

    /// Serialize the signature in canonical DER form.
    ///
    /// # Returns
    /// The DER bytes (`0x30 len 0x02 rlen r 0x02 slen s`).
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_der().as_bytes().to_vec()
    }

    /// Sign a message hash with RFC6979 deterministic nonces.
    ///
    /// # Arguments
    /// * `hash` - The message hash to sign (a 32-byte signature hash).
    /// * `priv_key` - The private key to sign with.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(hash: &[u8], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let prehash = normalize_hash(hash);
        let (sig, _recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(&prehash)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Self::low_s(sig))
    }

    /// Verify this signature against a message hash and public key.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, hash: &[u8], pub_key: &PublicKey) -> bool {
        let prehash = normalize_hash(hash);
        pub_key
            .verifying_key()
            .verify_prehash(&prehash, &self.inner)
            .is_ok()
    }

    fn low_s(sig: ecdsa::Signature) -> Self {
        Signature {
            inner: sig.normalize_s().unwrap_or(sig),
        }
    }
}

/// Left-pad short hashes and truncate long ones to the 32-byte scalar size.
fn normalize_hash(hash: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if hash.len() >= 32 {
        padded.copy_from_slice(&hash[..32]);
    } else {
        padded[32 - hash.len()..].copy_from_slice(hash);
    }
    padded
}
