//! Core transaction type for the Decred blockchain.
//!
//! Represents a transaction with a 16-bit version, inputs, outputs, lock
//! time and expiry. The wire encoding splits every transaction into a
//! prefix (outpoints, sequences, outputs, lock time, expiry) and a witness
//! (per-input values and signature scripts); the upper half of the
//! version word selects which of the two halves a buffer carries.

use std::fmt;

use dcr_primitives::chainhash::{hash_h, Hash};
use dcr_primitives::hash::blake256;
use dcr_primitives::util::{DcrReader, DcrWriter, VarInt};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::sighash;
use crate::TransactionError;

/// Which halves of a transaction a serialization contains.
///
/// Encoded in the upper 16 bits of the leading version word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerializeType {
    /// Prefix followed by witness.
    Full,
    /// Prefix only.
    NoWitness,
    /// Witness only.
    OnlyWitness,
}

impl SerializeType {
    /// The 16-bit code stored in the version word.
    pub fn code(self) -> u16 {
        match self {
            SerializeType::Full => 0,
            SerializeType::NoWitness => 1,
            SerializeType::OnlyWitness => 2,
        }
    }

    /// Map a serialization type code from the version word.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(SerializeType::Full),
            1 => Some(SerializeType::NoWitness),
            2 => Some(SerializeType::OnlyWitness),
            _ => None,
        }
    }

    fn has_prefix(self) -> bool {
        self != SerializeType::OnlyWitness
    }

    fn has_witness(self) -> bool {
        self != SerializeType::NoWitness
    }
}

/// A Decred transaction.
///
/// # Wire format (full)
///
/// | Field          | Size                          |
/// |----------------|-------------------------------|
/// | version word   | 4 bytes (LE): version, type   |
/// | input count    | VarInt                        |
/// | input prefixes | variable                      |
/// | output count   | VarInt                        |
/// | outputs        | variable                      |
/// | lock_time      | 4 bytes (LE)                  |
/// | expiry         | 4 bytes (LE)                  |
/// | witness count  | VarInt                        |
/// | input witnesses| variable                      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u16,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time. If non-zero, the transaction is not valid until the
    /// specified block height or Unix timestamp.
    pub lock_time: u32,

    /// Block height after which the transaction can no longer be mined.
    /// Zero disables expiry.
    pub expiry: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1, lock time 0 and no expiry.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            expiry: 0,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// This method requires the byte slice to contain exactly one complete
    /// transaction, in any of the three serialization forms, with no
    /// trailing data.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data
    /// is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = DcrReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `DcrReader`.
    ///
    /// A prefix-only buffer yields inputs with null witness fields; a
    /// witness-only buffer yields inputs with null outpoints and no outputs.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of a serialized transaction.
    pub fn read_from(reader: &mut DcrReader) -> Result<Self, TransactionError> {
        let word = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;
        let version = (word & 0xffff) as u16;
        let ser_type = SerializeType::from_code((word >> 16) as u16).ok_or_else(|| {
            TransactionError::SerializationError(format!(
                "unknown serialization type {}",
                word >> 16
            ))
        })?;

        let mut tx = Transaction {
            version,
            ..Transaction::new()
        };

        if ser_type.has_prefix() {
            tx.read_prefix(reader)?;
        }

        if ser_type.has_witness() {
            let count = read_count(reader, "witness count")?;
            if ser_type == SerializeType::OnlyWitness {
                tx.inputs = (0..count)
                    .map(|_| TransactionInput::new(Default::default(), 0))
                    .collect();
            } else if count != tx.inputs.len() {
                return Err(TransactionError::SerializationError(format!(
                    "witness count {} does not match input count {}",
                    count,
                    tx.inputs.len()
                )));
            }
            for input in tx.inputs.iter_mut() {
                input.read_witness(reader)?;
            }
        }

        Ok(tx)
    }

    fn read_prefix(&mut self, reader: &mut DcrReader) -> Result<(), TransactionError> {
        let input_count = read_count(reader, "input count")?;
        self.inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            self.inputs.push(TransactionInput::read_prefix(reader)?);
        }

        let output_count = read_count(reader, "output count")?;
        self.outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            self.outputs.push(TransactionOutput::read_from(reader)?);
        }

        self.lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;
        self.expiry = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading expiry: {}", e))
        })?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize the transaction in the requested form.
    pub fn serialize(&self, ser_type: SerializeType) -> Vec<u8> {
        let mut writer = DcrWriter::new();
        writer.write_u32_le(self.version as u32 | (ser_type.code() as u32) << 16);

        if ser_type.has_prefix() {
            writer.write_varint(VarInt::from(self.inputs.len()));
            for input in &self.inputs {
                input.write_prefix(&mut writer);
            }
            writer.write_varint(VarInt::from(self.outputs.len()));
            for output in &self.outputs {
                output.write_to(&mut writer);
            }
            writer.write_u32_le(self.lock_time);
            writer.write_u32_le(self.expiry);
        }

        if ser_type.has_witness() {
            writer.write_varint(VarInt::from(self.inputs.len()));
            for input in &self.inputs {
                input.write_witness(&mut writer);
            }
        }

        writer.into_bytes()
    }

    /// Serialize the full transaction (prefix and witness).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize(SerializeType::Full)
    }

    /// Serialize the full transaction to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Transaction identity
    // -----------------------------------------------------------------

    /// BLAKE-256 of the full serialization.
    ///
    /// This is the identifier reported for a freshly signed transaction.
    pub fn tx_id(&self) -> [u8; 32] {
        blake256(&self.to_bytes())
    }

    /// Lowercase hex of [`tx_id`](Self::tx_id), in digest byte order.
    pub fn tx_id_hex(&self) -> String {
        hex::encode(self.tx_id())
    }

    /// BLAKE-256 of the prefix serialization, which is what outpoints
    /// spending this transaction reference.
    pub fn prefix_hash(&self) -> Hash {
        hash_h(&self.serialize(SerializeType::NoWitness))
    }

    // -----------------------------------------------------------------
    // Inputs and outputs
    // -----------------------------------------------------------------

    /// Append an input.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Append an output.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output values, in atoms. Saturates at the `i64` bounds.
    pub fn total_output_value(&self) -> i64 {
        self.outputs
            .iter()
            .fold(0i64, |acc, o| acc.saturating_add(o.value))
    }

    /// Sum of the `value_in` of all inputs, in atoms. Saturates at the
    /// `i64` bounds.
    pub fn total_input_value(&self) -> i64 {
        self.inputs
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.value_in))
    }

    /// Size of the full serialization in bytes.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    // -----------------------------------------------------------------
    // Signing support
    // -----------------------------------------------------------------

    /// Compute the signature hash for input `input_index` against
    /// `script_code`. See [`sighash::signature_hash`].
    pub fn signature_hash(
        &self,
        input_index: usize,
        script_code: &[u8],
        hash_type: u32,
    ) -> Result<[u8; 32], TransactionError> {
        sighash::signature_hash(self, input_index, script_code, hash_type)
    }
}

fn read_count(reader: &mut DcrReader, what: &str) -> Result<usize, TransactionError> {
    let count = reader.read_varint().map_err(|e| {
        TransactionError::SerializationError(format!("reading {}: {}", what, e))
    })?;
    // Every input or output takes at least one byte, so a count larger
    // than the remaining data is malformed.
    if count.value() > reader.remaining() as u64 {
        return Err(TransactionError::SerializationError(format!(
            "{} {} exceeds remaining {} bytes",
            what,
            count.value(),
            reader.remaining()
        )));
    }
    Ok(count.value() as usize)
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Transaction {
    /// Display the transaction as its full-serialization hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
