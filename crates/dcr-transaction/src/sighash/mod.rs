//! Signature hash computation for transaction signing.
//!
//! Computes the digest that is signed by ECDSA to authorize spending a
//! transaction input, following Decred consensus. The digest commits
//! separately to a hash of the (possibly reduced) prefix and a hash of the
//! witness in which only the signed input carries a script.

use dcr_primitives::hash::blake256;
use dcr_primitives::util::{DcrWriter, VarInt};

use crate::input::TransactionInput;
use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs, allowing outputs to be modified.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Combined with another flag: only sign the current input, allowing other
/// inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

/// Serialization type tag of the prefix preimage.
const SIGHASH_SERIALIZE_PREFIX: u32 = 1;

/// Serialization type tag of the witness preimage.
const SIGHASH_SERIALIZE_WITNESS: u32 = 3;

/// Returns true when `hash_type` has the SINGLE base type.
pub fn is_single(hash_type: u32) -> bool {
    hash_type & SIGHASH_MASK == SIGHASH_SINGLE
}

// -----------------------------------------------------------------------
// Signature hash
// -----------------------------------------------------------------------

/// Compute the Decred signature hash for a given input.
///
/// The digest is `BLAKE-256(hash_type ‖ prefix_hash ‖ witness_hash)`:
///
/// - the prefix hash covers the committed inputs (only the signed one under
///   ANYONECANPAY), with the sequences of other inputs zeroed under NONE
///   and SINGLE, and the committed outputs (none under NONE, outputs up to
///   and including the signed index under SINGLE with earlier ones blanked,
///   every output otherwise), followed by lock time and expiry;
/// - the witness hash covers `script_code` for the signed input and an
///   empty script for every other committed input.
///
/// Signature scripts already present on the transaction do not affect the
/// result.
///
/// # Arguments
/// * `tx`          - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `script_code` - The script the signature must satisfy.
/// * `hash_type`   - The sighash flags (e.g. `SIGHASH_ALL`).
///
/// # Returns
/// A 32-byte BLAKE-256 digest, or `InvalidTransaction` if the index is out
/// of range or SINGLE is requested for an input without a matching output.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    hash_type: u32,
) -> Result<[u8; 32], TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }
    if is_single(hash_type) && input_index >= tx.outputs.len() {
        return Err(TransactionError::InvalidTransaction(format!(
            "SIGHASH_SINGLE on input {} with only {} outputs",
            input_index,
            tx.outputs.len()
        )));
    }

    let prefix_hash = blake256(&prefix_preimage(tx, input_index, hash_type));
    let witness_hash = blake256(&witness_preimage(tx, input_index, script_code, hash_type));

    let mut writer = DcrWriter::with_capacity(4 + 32 + 32);
    writer.write_u32_le(hash_type);
    writer.write_bytes(&prefix_hash);
    writer.write_bytes(&witness_hash);
    Ok(blake256(writer.as_bytes()))
}

/// The inputs committed to and the position of the signed one among them.
fn committed_inputs(
    tx: &Transaction,
    input_index: usize,
    hash_type: u32,
) -> (&[TransactionInput], usize) {
    if hash_type & SIGHASH_ANYONECANPAY != 0 {
        (&tx.inputs[input_index..=input_index], 0)
    } else {
        (&tx.inputs[..], input_index)
    }
}

fn version_word(tx: &Transaction, ser_type: u32) -> u32 {
    tx.version as u32 | ser_type << 16
}

/// Serialize the prefix as committed to by `hash_type`.
fn prefix_preimage(tx: &Transaction, input_index: usize, hash_type: u32) -> Vec<u8> {
    let base_type = hash_type & SIGHASH_MASK;
    let (inputs, signed) = committed_inputs(tx, input_index, hash_type);
    let zero_other_sequences = base_type == SIGHASH_NONE || base_type == SIGHASH_SINGLE;

    let mut writer = DcrWriter::new();
    writer.write_u32_le(version_word(tx, SIGHASH_SERIALIZE_PREFIX));

    writer.write_varint(VarInt::from(inputs.len()));
    for (i, input) in inputs.iter().enumerate() {
        input.previous_output.write_to(&mut writer);
        let sequence = if zero_other_sequences && i != signed {
            0
        } else {
            input.sequence
        };
        writer.write_u32_le(sequence);
    }

    let outputs = match base_type {
        SIGHASH_NONE => &tx.outputs[..0],
        SIGHASH_SINGLE => &tx.outputs[..=input_index],
        _ => &tx.outputs[..],
    };
    writer.write_varint(VarInt::from(outputs.len()));
    for (i, output) in outputs.iter().enumerate() {
        if base_type == SIGHASH_SINGLE && i != input_index {
            writer.write_i64_le(-1);
            writer.write_u16_le(output.version);
            writer.write_var_bytes(&[]);
        } else {
            output.write_to(&mut writer);
        }
    }

    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(tx.expiry);
    writer.into_bytes()
}

/// Serialize the witness as committed to: only the signed input carries
/// `script_code`.
fn witness_preimage(
    tx: &Transaction,
    input_index: usize,
    script_code: &[u8],
    hash_type: u32,
) -> Vec<u8> {
    let (inputs, signed) = committed_inputs(tx, input_index, hash_type);

    let mut writer = DcrWriter::new();
    writer.write_u32_le(version_word(tx, SIGHASH_SERIALIZE_WITNESS));
    writer.write_varint(VarInt::from(inputs.len()));
    for i in 0..inputs.len() {
        if i == signed {
            writer.write_var_bytes(script_code);
        } else {
            writer.write_var_bytes(&[]);
        }
    }
    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{OutPoint, TX_TREE_REGULAR, TX_TREE_STAKE};
    use crate::output::TransactionOutput;
    use dcr_primitives::chainhash::Hash;
    use dcr_script::Script;

    fn two_by_two() -> Transaction {
        let mut tx = Transaction::new();
        for (fill, index, sequence) in [(0x11u8, 0u32, 5u32), (0x22, 1, 6)] {
            let outpoint = OutPoint::new(Hash::new([fill; 32]), index, TX_TREE_REGULAR);
            let mut input = TransactionInput::new(outpoint, 1000);
            input.sequence = sequence;
            tx.add_input(input);
        }
        tx.add_output(TransactionOutput::new(1, Script::from_bytes(&[0x51])));
        tx.add_output(TransactionOutput::new(2, Script::from_bytes(&[0x52])));
        tx
    }

    #[test]
    fn test_prefix_preimage_single() {
        let tx = two_by_two();
        let expected = [
            "01000100",
            "02",
            &"11".repeat(32),
            "00000000",
            "00",
            "00000000",
            &"22".repeat(32),
            "01000000",
            "00",
            "06000000",
            "02",
            "ffffffffffffffff",
            "0000",
            "00",
            "0200000000000000",
            "0000",
            "0152",
            "00000000",
            "00000000",
        ]
        .concat();
        assert_eq!(hex::encode(prefix_preimage(&tx, 1, SIGHASH_SINGLE)), expected);
    }

    #[test]
    fn test_prefix_preimage_none_anyonecanpay() {
        let tx = two_by_two();
        let expected = [
            "01000100",
            "01",
            &"11".repeat(32),
            "00000000",
            "00",
            "05000000",
            "00",
            "00000000",
            "00000000",
        ]
        .concat();
        assert_eq!(
            hex::encode(prefix_preimage(&tx, 0, SIGHASH_NONE | SIGHASH_ANYONECANPAY)),
            expected
        );
    }

    #[test]
    fn test_witness_preimage() {
        let tx = two_by_two();
        assert_eq!(
            hex::encode(witness_preimage(&tx, 1, &[0xac], SIGHASH_ALL)),
            "01000300020001ac"
        );
        assert_eq!(
            hex::encode(witness_preimage(&tx, 1, &[0xac], SIGHASH_ALL | SIGHASH_ANYONECANPAY)),
            "010003000101ac"
        );
    }

    #[test]
    fn test_signature_hash_range_checks() {
        let mut tx = two_by_two();
        assert!(signature_hash(&tx, 2, &[0xac], SIGHASH_ALL).is_err());

        tx.outputs.truncate(1);
        assert!(signature_hash(&tx, 1, &[0xac], SIGHASH_SINGLE).is_err());
        assert!(signature_hash(&tx, 1, &[0xac], SIGHASH_SINGLE | SIGHASH_ANYONECANPAY).is_err());
        assert!(signature_hash(&tx, 0, &[0xac], SIGHASH_SINGLE).is_ok());
        assert!(signature_hash(&tx, 1, &[0xac], SIGHASH_ALL).is_ok());
    }

    #[test]
    fn test_hash_type_is_committed() {
        let tx = two_by_two();
        let all = signature_hash(&tx, 0, &[0xac], SIGHASH_ALL).unwrap();
        let undefined = signature_hash(&tx, 0, &[0xac], 0x04).unwrap();
        // Undefined types commit to the same data as ALL but a different tag.
        assert_eq!(prefix_preimage(&tx, 0, 0x04), prefix_preimage(&tx, 0, SIGHASH_ALL));
        assert_ne!(all, undefined);
    }

    /// Mixed-tree inputs, non-zero lock time and expiry.
    fn stake_and_regular() -> Transaction {
        let mut tx = Transaction::new();
        tx.lock_time = 0x1234;
        tx.expiry = 0x5678;
        tx.add_input(TransactionInput::new(
            OutPoint::new(Hash::new([0x11; 32]), 0, TX_TREE_REGULAR),
            0,
        ));
        let mut stake =
            TransactionInput::new(OutPoint::new(Hash::new([0x22; 32]), 3, TX_TREE_STAKE), 0);
        stake.sequence = 7;
        tx.add_input(stake);
        tx.add_output(TransactionOutput::new(
            100_000_000,
            Script::from_hex(&format!("76a914{}88ac", "33".repeat(20))).unwrap(),
        ));
        tx.add_output(TransactionOutput::new(50_000, Script::from_bytes(&[0x51])));
        tx
    }

    #[test]
    fn test_known_answer_digests() {
        let tx = stake_and_regular();
        let code = hex::decode(format!("76a914{}88ac", "44".repeat(20))).unwrap();
        let cases = [
            (0, SIGHASH_ALL, "4cfac4f43d63057092edbc341f2996dd51d1ce640da83bbb8f1ff6f8b5b44385"),
            (1, SIGHASH_ALL, "a9cf54603732cd940f138191b241c7d65c7396e78c8d8b5b7172a9f2b99b9904"),
            (1, SIGHASH_NONE, "1d5f610c2b488afc58017591150a57733594e3a200f083a3234f6e3b1ab16bea"),
            (1, SIGHASH_SINGLE, "66e33d90869a4ea53408ed9377bfab5f23eea5d7b19c216dbfbafb69d00fd3ef"),
            (
                1,
                SIGHASH_ALL | SIGHASH_ANYONECANPAY,
                "b323a1c8a5352481227443922fc3ada2472c1da1e5a69bd0b577c6ad03172a0f",
            ),
            (
                0,
                SIGHASH_SINGLE | SIGHASH_ANYONECANPAY,
                "0cc69f82cb7b8b84572c29cd9305b1e14c3b53707e00ac833c0641198aa1cc5c",
            ),
        ];
        for (index, hash_type, expected) in cases {
            assert_eq!(
                hex::encode(signature_hash(&tx, index, &code, hash_type).unwrap()),
                expected,
                "input {} hash type {:#x}",
                index,
                hash_type
            );
        }
    }
}
