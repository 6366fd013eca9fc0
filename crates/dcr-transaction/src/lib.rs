/// Decred SDK - Transaction model, wire encoding, and signature hashing.
///
/// Provides the Transaction type with prefix/witness inputs, outputs,
/// the three Decred serialization forms, and the consensus signature hash.

pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;

mod error;
pub use error::TransactionError;
pub use transaction::{SerializeType, Transaction};
pub use input::{OutPoint, TransactionInput};
pub use output::TransactionOutput;
