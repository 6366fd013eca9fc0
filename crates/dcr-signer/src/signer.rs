//! Per-input and whole-transaction signing.
//!
//! A [`Signer`] is built for one request, runs a single pass over the
//! inputs and is consumed by [`Signer::sign`]. Every input is signed
//! against its UTXO's locking script; a pay-to-script-hash script is
//! unwrapped once into its redeem script. The first failing input aborts
//! the pass and no partially signed transaction escapes.

use tracing::{debug, debug_span, warn};

use dcr_primitives::ec::PrivateKey;
use dcr_primitives::hash::hash160;
use dcr_script::{classify, push_all, Script, ScriptPattern};
use dcr_transaction::sighash;
use dcr_transaction::Transaction;

use crate::error::{ErrorCode, SignerError};
use crate::input::SigningInput;
use crate::keys::KeyResolver;
use crate::plan::TransactionPlan;

/// Single-use signer for one [`SigningInput`].
pub struct Signer<'a> {
    input: &'a SigningInput,
    keys: KeyResolver<'a>,
    plan: TransactionPlan,
    /// The unsigned transaction built from the plan.
    transaction: Transaction,
    /// Copy of `transaction` whose inputs collect signature scripts.
    working: Transaction,
}

impl<'a> Signer<'a> {
    /// Plan the spend and build the unsigned transaction for `input`.
    pub fn new(input: &'a SigningInput) -> Self {
        let plan = TransactionPlan::new(input);
        let transaction = plan.unsigned_transaction(input);
        Signer {
            input,
            keys: KeyResolver::new(input),
            working: transaction.clone(),
            transaction,
            plan,
        }
    }

    /// The plan the transaction was built from.
    pub fn plan(&self) -> &TransactionPlan {
        &self.plan
    }

    /// The transaction before any signature script is set.
    pub fn unsigned_transaction(&self) -> &Transaction {
        &self.transaction
    }

    // -----------------------------------------------------------------
    // Transaction signing
    // -----------------------------------------------------------------

    /// Sign every input and return the signed transaction.
    ///
    /// Under SIGHASH_SINGLE, inputs without an output at the same index
    /// are left unsigned.
    pub fn sign(mut self) -> Result<Transaction, SignerError> {
        let span = debug_span!(
            "sign_transaction",
            inputs = self.transaction.inputs.len(),
            outputs = self.transaction.outputs.len(),
            hash_type = self.input.hash_type,
        );
        let _enter = span.enter();

        if self.plan.utxos.is_empty() || self.transaction.inputs.is_empty() {
            warn!(code = %ErrorCode::MissingInputUtxos, "nothing to sign");
            return Err(SignerError::MissingInputUtxos);
        }
        if self.plan.error == Some(ErrorCode::NotEnoughUtxos) {
            warn!(
                code = %ErrorCode::NotEnoughUtxos,
                available = self.plan.available_amount,
                amount = self.plan.amount,
                "inputs do not cover outputs"
            );
            return Err(SignerError::NotEnoughUtxos);
        }

        let single = sighash::is_single(self.input.hash_type);
        for (index, utxo) in self.plan.utxos.iter().enumerate() {
            if single && index >= self.transaction.outputs.len() {
                debug!(index, "no output for SIGHASH_SINGLE, leaving input unsigned");
                continue;
            }
            let script = self.sign_input(&utxo.script, index).map_err(|e| {
                warn!(index, code = %e.code(), "signing aborted");
                e
            })?;
            self.working.inputs[index].signature_script = script;
        }

        Ok(self.working)
    }

    // -----------------------------------------------------------------
    // Input signing
    // -----------------------------------------------------------------

    /// Produce the signature script satisfying `locking_script` for input
    /// `index`.
    pub fn sign_input(&self, locking_script: &Script, index: usize) -> Result<Script, SignerError> {
        let stack = self.sign_step(locking_script, index, false)?;
        Ok(Script::from(push_all(&stack)?))
    }

    /// Collect the stack elements satisfying `script`.
    ///
    /// `nested` is set while signing a redeem script, where another
    /// pay-to-script-hash layer is rejected.
    fn sign_step(
        &self,
        script: &Script,
        index: usize,
        nested: bool,
    ) -> Result<Vec<Vec<u8>>, SignerError> {
        let pattern = classify(script);
        debug!(index, pattern = pattern.name(), nested, "signing input");

        match pattern {
            ScriptPattern::PayToPublicKey(pub_key) => {
                let key = self
                    .keys
                    .key_for_hash(&hash160(&pub_key))
                    .ok_or(SignerError::MissingPrivateKey)?;
                Ok(vec![self.create_signature(script, &key, index)?])
            }
            ScriptPattern::PayToPublicKeyHash(hash) => {
                let key = self
                    .keys
                    .key_for_hash(&hash)
                    .ok_or(SignerError::MissingPrivateKey)?;
                let signature = self.create_signature(script, &key, index)?;
                Ok(vec![signature, key.pub_key().to_compressed().to_vec()])
            }
            ScriptPattern::PayToScriptHash(hash) => {
                if nested {
                    return Err(SignerError::NestedScriptHash);
                }
                let redeem_script = self
                    .keys
                    .script_for_hash(&hash)
                    .ok_or(SignerError::MissingRedeemScript)?;
                let mut stack = self.sign_step(redeem_script, index, true)?;
                stack.push(redeem_script.to_bytes().to_vec());
                Ok(stack)
            }
            ScriptPattern::Multisig { keys, required } => {
                // CHECKMULTISIG pops one element more than it uses.
                let mut stack = vec![Vec::new()];
                for pub_key in &keys {
                    if stack.len() > required {
                        break;
                    }
                    let Some(key) = self.keys.key_for_hash(&hash160(pub_key)) else {
                        continue;
                    };
                    stack.push(self.create_signature(script, &key, index)?);
                }
                if stack.len() <= required {
                    return Err(SignerError::MissingPrivateKey);
                }
                Ok(stack)
            }
            ScriptPattern::Unrecognized => Err(SignerError::InvalidOutputScript),
        }
    }

    /// DER signature over the input's signature hash, followed by the
    /// hash type byte.
    fn create_signature(
        &self,
        script: &Script,
        key: &PrivateKey,
        index: usize,
    ) -> Result<Vec<u8>, SignerError> {
        if script.is_empty() {
            return Err(SignerError::SigningFailed);
        }
        let hash_type = self.input.hash_type;
        let digest = self
            .working
            .signature_hash(index, script.to_bytes(), hash_type)
            .map_err(|_| SignerError::SigningFailed)?;
        let signature = key.sign(&digest).map_err(|_| SignerError::SigningFailed)?;

        let mut bytes = signature.to_der();
        bytes.push(hash_type as u8);
        Ok(bytes)
    }
}

/// Sign `input` in one pass.
pub fn sign(input: &SigningInput) -> Result<Transaction, SignerError> {
    Signer::new(input).sign()
}

/// Describe the spend `input` would make without signing it.
pub fn plan(input: &SigningInput) -> TransactionPlan {
    TransactionPlan::new(input)
}
