//! Error taxonomy for transaction signing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse failure category reported alongside a signing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No inputs or no spendable outputs were supplied.
    MissingInputUtxos,
    /// The supplied outputs do not cover the requested outputs.
    NotEnoughUtxos,
    /// A key needed to satisfy a locking script is not available.
    MissingPrivateKey,
    /// A locking or redeem script could not be resolved or recognized.
    ScriptError,
    /// The signature primitive failed even though a key was found.
    SigningError,
}

impl ErrorCode {
    /// The SCREAMING_SNAKE_CASE name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingInputUtxos => "MISSING_INPUT_UTXOS",
            Self::NotEnoughUtxos => "NOT_ENOUGH_UTXOS",
            Self::MissingPrivateKey => "MISSING_PRIVATE_KEY",
            Self::ScriptError => "SCRIPT_ERROR",
            Self::SigningError => "SIGNING_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a signing pass.
///
/// Messages never contain key or signature material.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Missing inputs or UTXOs")]
    MissingInputUtxos,

    #[error("Not enough UTXOs")]
    NotEnoughUtxos,

    #[error("Missing private key.")]
    MissingPrivateKey,

    #[error("Missing redeem script.")]
    MissingRedeemScript,

    #[error("Invalid output script.")]
    InvalidOutputScript,

    #[error("Nested pay-to-script-hash is not supported.")]
    NestedScriptHash,

    /// A script could not be encoded (forwarded from `dcr-script`).
    #[error("script error: {0}")]
    Script(#[from] dcr_script::ScriptError),

    #[error("Failed to sign.")]
    SigningFailed,
}

impl SignerError {
    /// The category this error is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingInputUtxos => ErrorCode::MissingInputUtxos,
            Self::NotEnoughUtxos => ErrorCode::NotEnoughUtxos,
            Self::MissingPrivateKey => ErrorCode::MissingPrivateKey,
            Self::MissingRedeemScript
            | Self::InvalidOutputScript
            | Self::NestedScriptHash
            | Self::Script(_) => ErrorCode::ScriptError,
            Self::SigningFailed => ErrorCode::SigningError,
        }
    }
}
