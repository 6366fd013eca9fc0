//! Transaction input referencing a previous output.
//!
//! A Decred input is split across the two halves of the wire encoding: the
//! outpoint and sequence live in the prefix, while the spent value, the
//! block location of the funding transaction and the signature script live
//! in the witness.

use std::fmt;

use dcr_primitives::chainhash::Hash;
use dcr_primitives::util::{DcrReader, DcrWriter};
use dcr_script::Script;

use crate::TransactionError;

/// Default sequence number indicating a finalized input (no relative lock-time).
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// Block height recorded in the witness when the funding block is unknown.
pub const NULL_BLOCK_HEIGHT: u32 = 0x0000_0000;

/// Block index recorded in the witness when the funding block is unknown.
pub const NULL_BLOCK_INDEX: u32 = 0xFFFF_FFFF;

/// Outpoint tree for regular transactions.
pub const TX_TREE_REGULAR: i8 = 0;

/// Outpoint tree for stake transactions.
pub const TX_TREE_STAKE: i8 = 1;

/// A reference to a specific output of a previous transaction.
///
/// # Wire format
///
/// | Field | Size          |
/// |-------|---------------|
/// | hash  | 32 bytes      |
/// | index | 4 bytes (LE)  |
/// | tree  | 1 byte        |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutPoint {
    /// Hash of the funding transaction, in internal byte order.
    pub hash: Hash,
    /// Index of the output within the funding transaction.
    pub index: u32,
    /// Which transaction tree the funding transaction is in.
    pub tree: i8,
}

impl OutPoint {
    /// Reference output `index` of `hash` in `tree`.
    pub fn new(hash: Hash, index: u32, tree: i8) -> Self {
        OutPoint { hash, index, tree }
    }

    /// Deserialize an outpoint from a `DcrReader`.
    pub fn read_from(reader: &mut DcrReader) -> Result<Self, TransactionError> {
        let hash_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint hash: {}", e))
        })?;
        let hash = Hash::from_bytes(hash_bytes)?;

        let index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint index: {}", e))
        })?;

        let tree = reader.read_u8().map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint tree: {}", e))
        })?;

        Ok(OutPoint {
            hash,
            index,
            tree: tree as i8,
        })
    }

    /// Serialize this outpoint into a `DcrWriter`.
    pub fn write_to(&self, writer: &mut DcrWriter) {
        writer.write_bytes(self.hash.as_bytes());
        writer.write_u32_le(self.index);
        writer.write_u8(self.tree as u8);
    }
}

impl fmt::Display for OutPoint {
    /// Display as `<hash>:<index>` using the reversed-hex hash form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hash, self.index)
    }
}

/// A single input in a Decred transaction.
///
/// # Wire format
///
/// Prefix half:
///
/// | Field           | Size          |
/// |-----------------|---------------|
/// | previous_output | 37 bytes      |
/// | sequence        | 4 bytes (LE)  |
///
/// Witness half:
///
/// | Field            | Size          |
/// |------------------|---------------|
/// | value_in         | 8 bytes (LE)  |
/// | block_height     | 4 bytes (LE)  |
/// | block_index      | 4 bytes (LE)  |
/// | script length    | VarInt        |
/// | signature_script | variable      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The output being spent.
    pub previous_output: OutPoint,

    /// Sequence number. Defaults to `0xFFFFFFFF` (finalized).
    pub sequence: u32,

    /// Amount of the output being spent, in atoms.
    pub value_in: i64,

    /// Height of the block containing the funding transaction.
    pub block_height: u32,

    /// Index of the funding transaction within its block.
    pub block_index: u32,

    /// The signature script that satisfies the spent output's locking
    /// script. Empty until the input is signed.
    pub signature_script: Script,
}

impl TransactionInput {
    /// Create an unsigned input spending `previous_output` worth `value_in`
    /// atoms, with a finalized sequence and a null block location.
    pub fn new(previous_output: OutPoint, value_in: i64) -> Self {
        TransactionInput {
            previous_output,
            sequence: DEFAULT_SEQUENCE_NUMBER,
            value_in,
            block_height: NULL_BLOCK_HEIGHT,
            block_index: NULL_BLOCK_INDEX,
            signature_script: Script::new(),
        }
    }

    /// Deserialize the prefix half of an input.
    ///
    /// Witness fields are left at their null values; fill them with
    /// [`read_witness`](Self::read_witness).
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded prefix input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_prefix(reader: &mut DcrReader) -> Result<Self, TransactionError> {
        let previous_output = OutPoint::read_from(reader)?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence: {}", e))
        })?;

        let mut input = TransactionInput::new(previous_output, 0);
        input.sequence = sequence;
        Ok(input)
    }

    /// Deserialize the witness half of an input into `self`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded witness input.
    pub fn read_witness(&mut self, reader: &mut DcrReader) -> Result<(), TransactionError> {
        self.value_in = reader.read_i64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading value in: {}", e))
        })?;

        self.block_height = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading block height: {}", e))
        })?;

        self.block_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading block index: {}", e))
        })?;

        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading signature script: {}", e))
        })?;
        self.signature_script = Script::from_bytes(script_bytes);
        Ok(())
    }

    /// Serialize the prefix half of this input.
    pub fn write_prefix(&self, writer: &mut DcrWriter) {
        self.previous_output.write_to(writer);
        writer.write_u32_le(self.sequence);
    }

    /// Serialize the witness half of this input.
    pub fn write_witness(&self, writer: &mut DcrWriter) {
        writer.write_i64_le(self.value_in);
        writer.write_u32_le(self.block_height);
        writer.write_u32_le(self.block_index);
        writer.write_var_bytes(self.signature_script.to_bytes());
    }

    /// Whether a signature script has been attached.
    pub fn is_signed(&self) -> bool {
        !self.signature_script.is_empty()
    }
}
