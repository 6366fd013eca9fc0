//! Caller-supplied signing request.

use std::collections::HashMap;
use std::fmt;

use zeroize::Zeroizing;

use dcr_primitives::hash::hash160;
use dcr_script::Script;
use dcr_transaction::sighash::SIGHASH_ALL;
use dcr_transaction::{OutPoint, TransactionOutput};

use crate::config::SignerConfig;

/// A previous output to be spent by the transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnspentOutput {
    /// The output being spent.
    pub out_point: OutPoint,
    /// Its value in atoms.
    pub amount: i64,
    /// Its locking script.
    pub script: Script,
    /// Sequence for the spending input; `None` uses
    /// [`SignerConfig::default_sequence`].
    pub sequence: Option<u32>,
}

impl UnspentOutput {
    /// Describe a UTXO; its spending input uses the configured default sequence.
    pub fn new(out_point: OutPoint, amount: i64, script: Script) -> Self {
        UnspentOutput {
            out_point,
            amount,
            script,
            sequence: None,
        }
    }
}

/// Everything needed to build and sign one transaction.
///
/// Every UTXO is spent, in order, by one input. `scripts` maps the
/// lowercase hex of a redeem script's hash160 to the script; use
/// [`add_script`](Self::add_script) to keep keys in that form.
#[derive(Clone)]
pub struct SigningInput {
    /// Sighash flags applied to every signature.
    pub hash_type: u32,
    pub utxos: Vec<UnspentOutput>,
    pub outputs: Vec<TransactionOutput>,
    /// Candidate 32-byte secp256k1 scalars, wiped on drop.
    pub private_keys: Vec<Zeroizing<Vec<u8>>>,
    pub scripts: HashMap<String, Script>,
    pub lock_time: u32,
    pub expiry: u32,
    pub config: SignerConfig,
}

impl SigningInput {
    /// Create an empty request signing with `hash_type`.
    pub fn new(hash_type: u32) -> Self {
        SigningInput {
            hash_type,
            utxos: Vec::new(),
            outputs: Vec::new(),
            private_keys: Vec::new(),
            scripts: HashMap::new(),
            lock_time: 0,
            expiry: 0,
            config: SignerConfig::default(),
        }
    }

    /// Add a candidate private key, copying it into a zeroizing buffer.
    pub fn add_private_key(&mut self, key: &[u8]) {
        self.private_keys.push(Zeroizing::new(key.to_vec()));
    }

    /// Register a redeem script under its hash160.
    pub fn add_script(&mut self, redeem_script: Script) {
        let hash = hash160(redeem_script.to_bytes());
        self.add_script_for_hash(&hash, redeem_script);
    }

    /// Register a script under an explicit hash.
    pub fn add_script_for_hash(&mut self, hash: &[u8], script: Script) {
        self.scripts.insert(hex::encode(hash), script);
    }
}

impl Default for SigningInput {
    fn default() -> Self {
        Self::new(SIGHASH_ALL)
    }
}

impl fmt::Debug for SigningInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningInput")
            .field("hash_type", &self.hash_type)
            .field("utxos", &self.utxos)
            .field("outputs", &self.outputs)
            .field("private_keys", &format_args!("<{} keys>", self.private_keys.len()))
            .field("scripts", &self.scripts)
            .field("lock_time", &self.lock_time)
            .field("expiry", &self.expiry)
            .field("config", &self.config)
            .finish()
    }
}
