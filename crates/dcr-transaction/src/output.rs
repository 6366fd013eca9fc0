//! Transaction output with an atom value and a versioned locking script.

use dcr_primitives::util::{DcrReader, DcrWriter};
use dcr_script::Script;

use crate::TransactionError;

/// Script version of every standard output.
pub const DEFAULT_SCRIPT_VERSION: u16 = 0;

/// A single output in a Decred transaction.
///
/// # Wire format
///
/// | Field          | Size          |
/// |----------------|---------------|
/// | value          | 8 bytes (LE)  |
/// | version        | 2 bytes (LE)  |
/// | script length  | VarInt        |
/// | locking_script | variable      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The number of atoms (1 atom = 10^-8 DCR) locked by this output.
    pub value: i64,

    /// Version of the locking script.
    pub version: u16,

    /// The locking script that defines spending conditions.
    pub locking_script: Script,
}

impl TransactionOutput {
    /// Create a version-0 output paying `value` atoms to `locking_script`.
    pub fn new(value: i64, locking_script: Script) -> Self {
        TransactionOutput {
            value,
            version: DEFAULT_SCRIPT_VERSION,
            locking_script,
        }
    }

    /// Deserialize a `TransactionOutput` from a `DcrReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut DcrReader) -> Result<Self, TransactionError> {
        let value = reader.read_i64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading value: {}", e))
        })?;

        let version = reader.read_u16_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading script version: {}", e))
        })?;

        let script_bytes = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        Ok(TransactionOutput {
            value,
            version,
            locking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this `TransactionOutput` into a `DcrWriter`.
    pub fn write_to(&self, writer: &mut DcrWriter) {
        writer.write_i64_le(self.value);
        writer.write_u16_le(self.version);
        writer.write_var_bytes(self.locking_script.to_bytes());
    }

    /// Serialize this output to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = DcrWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

impl Default for TransactionOutput {
    fn default() -> Self {
        Self::new(0, Script::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_layout() {
        let output = TransactionOutput::new(
            100_000_000,
            Script::from_hex("76a914222222222222222222222222222222222222222288ac").unwrap(),
        );
        assert_eq!(
            hex::encode(output.to_bytes()),
            "00e1f50500000000000019\
             76a914222222222222222222222222222222222222222288ac"
        );
    }

    #[test]
    fn test_output_roundtrip() {
        let mut output = TransactionOutput::new(-1, Script::from_bytes(&[0x51]));
        output.version = 3;
        let bytes = output.to_bytes();
        let parsed = TransactionOutput::read_from(&mut DcrReader::new(&bytes)).unwrap();
        assert_eq!(parsed, output);
    }

    #[test]
    fn test_output_truncated_script() {
        let bytes = hex::decode("0100000000000000000005aabb").unwrap();
        assert!(TransactionOutput::read_from(&mut DcrReader::new(&bytes)).is_err());
    }
}
