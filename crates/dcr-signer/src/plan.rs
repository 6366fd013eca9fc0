//! Transaction plan: which UTXOs are spent and what is left for fees.
//!
//! No coin selection is performed; the plan spends every supplied UTXO.

use dcr_transaction::{Transaction, TransactionInput};

use crate::error::ErrorCode;
use crate::input::{SigningInput, UnspentOutput};

/// Summary of the spend described by a [`SigningInput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionPlan {
    /// UTXOs to spend, in input order.
    pub utxos: Vec<UnspentOutput>,
    /// Total paid to outputs, in atoms.
    pub amount: i64,
    /// Total held by the UTXOs, in atoms.
    pub available_amount: i64,
    /// `available_amount - amount`.
    pub fee: i64,
    /// Set when the plan cannot be signed.
    pub error: Option<ErrorCode>,
}

impl TransactionPlan {
    /// Build the plan for `input`.
    pub fn new(input: &SigningInput) -> Self {
        let amount = input
            .outputs
            .iter()
            .fold(0i64, |acc, o| acc.saturating_add(o.value));
        let available_amount = input
            .utxos
            .iter()
            .fold(0i64, |acc, u| acc.saturating_add(u.amount));

        let error = if input.utxos.is_empty() {
            Some(ErrorCode::MissingInputUtxos)
        } else if available_amount < amount {
            Some(ErrorCode::NotEnoughUtxos)
        } else {
            None
        };

        TransactionPlan {
            utxos: input.utxos.clone(),
            amount,
            available_amount,
            fee: available_amount.saturating_sub(amount),
            error,
        }
    }

    /// Build the unsigned transaction spending this plan's UTXOs.
    ///
    /// Each input carries the UTXO's amount as `value_in`, a null block
    /// location and an empty signature script.
    pub fn unsigned_transaction(&self, input: &SigningInput) -> Transaction {
        let mut tx = Transaction::new();
        tx.version = input.config.tx_version;
        tx.lock_time = input.lock_time;
        tx.expiry = input.expiry;

        for utxo in &self.utxos {
            let mut txin = TransactionInput::new(utxo.out_point, utxo.amount);
            txin.sequence = utxo.sequence.unwrap_or(input.config.default_sequence);
            tx.add_input(txin);
        }
        tx.outputs = input.outputs.clone();
        tx
    }
}
