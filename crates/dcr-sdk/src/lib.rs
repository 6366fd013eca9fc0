#![deny(missing_docs)]

//! Decred SDK - Complete SDK.
//!
//! Re-exports the Decred SDK components for single-crate usage: hashing and
//! keys, scripts, the transaction model, and the transaction signer.

pub use dcr_primitives as primitives;
pub use dcr_script as script;
pub use dcr_transaction as transaction;
pub use dcr_signer as signer;
