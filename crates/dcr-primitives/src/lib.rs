/// Decred SDK - Cryptographic primitives, hashing, and wire utilities.
///
/// This crate provides the foundational building blocks for the Decred SDK:
/// - Hash functions (BLAKE-256, RIPEMD-160, Decred hash160)
/// - Chain hash type for outpoint and transaction identification
/// - secp256k1 private/public keys and DER signatures
/// - Variable-length integer encoding and a little-endian reader/writer

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;
