/// Error types for script operations.
///
/// Covers parsing errors, push encoding limits and template construction.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid opcode data encountered during ASM parsing.
    #[error("invalid opcode data")]
    InvalidOpcodeData,

    /// Attempted to use append_opcodes for a push data opcode.
    #[error("use append_push_data for push data funcs: {0}")]
    InvalidOpcodeType(String),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// A push data part exceeds protocol limits.
    #[error("part too big '{0}'")]
    PartTooBig(usize),

    /// A public key does not have a standard SEC1 length and prefix.
    #[error("invalid public key encoding: {0}")]
    InvalidPublicKey(String),

    /// Threshold and key count do not form a standard multisig script.
    #[error("invalid multisig: {required} of {keys} keys")]
    InvalidMultisig { required: usize, keys: usize },

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] dcr_primitives::PrimitivesError),
}
