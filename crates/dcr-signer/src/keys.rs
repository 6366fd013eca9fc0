//! Resolution of private keys and redeem scripts by hash.

use std::collections::HashMap;

use zeroize::Zeroizing;

use dcr_primitives::ec::PrivateKey;
use dcr_script::Script;

use crate::input::SigningInput;

/// Looks up candidate keys and redeem scripts supplied with a request.
///
/// Lookups never fail loudly: absence is `None` and the caller decides
/// which error it maps to.
pub struct KeyResolver<'a> {
    private_keys: &'a [Zeroizing<Vec<u8>>],
    scripts: &'a HashMap<String, Script>,
}

impl<'a> KeyResolver<'a> {
    /// Borrow the keys and redeem scripts of `input`.
    pub fn new(input: &'a SigningInput) -> Self {
        KeyResolver {
            private_keys: &input.private_keys,
            scripts: &input.scripts,
        }
    }

    /// Find the key whose compressed public key hashes to `hash`.
    ///
    /// Candidates are scanned in order and the whole of `hash` is compared,
    /// so a slice of any other length than 20 bytes never matches. Bytes
    /// that are not a valid scalar are skipped.
    pub fn key_for_hash(&self, hash: &[u8]) -> Option<PrivateKey> {
        self.private_keys
            .iter()
            .filter_map(|bytes| PrivateKey::from_bytes(bytes).ok())
            .find(|key| key.pub_key().hash160().as_slice() == hash)
    }

    /// Find the redeem script registered under `hash`.
    pub fn script_for_hash(&self, hash: &[u8]) -> Option<&'a Script> {
        self.scripts.get(&hex::encode(hash))
    }
}
