/// Decred SDK - Transaction signing.
///
/// Builds the unsigned transaction for a [`SigningInput`], signs every
/// input against its UTXO's locking script (pay-to-pubkey,
/// pay-to-pubkey-hash, bare multisig, and one level of pay-to-script-hash),
/// and reports the result as a [`SigningOutput`].

pub mod chain;
pub mod config;
pub mod input;
pub mod keys;
pub mod output;
pub mod plan;
pub mod signer;

mod error;
pub use error::{ErrorCode, SignerError};
pub use chain::{Chain, ChainSigner, Decred};
pub use config::SignerConfig;
pub use input::{SigningInput, UnspentOutput};
pub use keys::KeyResolver;
pub use output::{SigningFailure, SigningOutput};
pub use plan::TransactionPlan;
pub use signer::{plan, sign, Signer};
