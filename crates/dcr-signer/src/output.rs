//! Result of a signing request, in a form suitable for a binding layer.

use serde::{Serialize, Serializer};

use dcr_transaction::Transaction;

use crate::error::{ErrorCode, SignerError};

/// Code and message of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningFailure {
    pub code: ErrorCode,
    pub text: String,
}

impl From<&SignerError> for SigningFailure {
    fn from(err: &SignerError) -> Self {
        SigningFailure {
            code: err.code(),
            text: err.to_string(),
        }
    }
}

/// Outcome of signing: either a transaction or an error, never both.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningOutput {
    Signed {
        #[serde(skip_serializing)]
        transaction: Transaction,
        /// Full serialization of the signed transaction.
        #[serde(serialize_with = "serialize_hex")]
        encoded: Vec<u8>,
        /// Hex of the BLAKE-256 digest of `encoded`.
        transaction_id: String,
    },
    Failed {
        error: SigningFailure,
    },
}

impl SigningOutput {
    /// Wrap a signed transaction, encoding it and computing its id.
    pub fn signed(transaction: Transaction) -> Self {
        let encoded = transaction.to_bytes();
        let transaction_id = transaction.tx_id_hex();
        SigningOutput::Signed {
            transaction,
            encoded,
            transaction_id,
        }
    }

    /// Wrap a signing error as its code and message.
    pub fn failed(err: &SignerError) -> Self {
        SigningOutput::Failed {
            error: SigningFailure::from(err),
        }
    }

    /// Returns true when a signed transaction is present.
    pub fn is_success(&self) -> bool {
        matches!(self, SigningOutput::Signed { .. })
    }

    /// The signed transaction, if signing succeeded.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            SigningOutput::Signed { transaction, .. } => Some(transaction),
            SigningOutput::Failed { .. } => None,
        }
    }

    /// Full serialization of the signed transaction.
    pub fn encoded(&self) -> Option<&[u8]> {
        match self {
            SigningOutput::Signed { encoded, .. } => Some(encoded),
            SigningOutput::Failed { .. } => None,
        }
    }

    /// Hex transaction id of the signed transaction.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            SigningOutput::Signed { transaction_id, .. } => Some(transaction_id),
            SigningOutput::Failed { .. } => None,
        }
    }

    /// The failure, if signing did not succeed.
    pub fn error(&self) -> Option<&SigningFailure> {
        match self {
            SigningOutput::Signed { .. } => None,
            SigningOutput::Failed { error } => Some(error),
        }
    }
}

impl From<Result<Transaction, SignerError>> for SigningOutput {
    fn from(result: Result<Transaction, SignerError>) -> Self {
        match result {
            Ok(tx) => SigningOutput::signed(tx),
            Err(err) => SigningOutput::failed(&err),
        }
    }
}

fn serialize_hex<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(bytes.as_ref()))
}
