/// Errors raised by hashing, key handling and wire decoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// Bytes are not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Bytes are not a valid SEC1 point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("key must be {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Wrong length for a 32-byte chain hash.
    #[error("invalid chain hash: {0}")]
    InvalidHash(String),

    /// A length prefix does not fit in memory.
    #[error("varint length {0} exceeds addressable size")]
    VarIntTooLarge(u64),

    /// Input ended before a field was complete.
    #[error("unexpected end of data: needed {needed} bytes, {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
