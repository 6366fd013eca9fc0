use proptest::prelude::*;

use dcr_script::chunk::decode_script;
use dcr_script::opcodes::*;
use dcr_script::{classify, push_all, Script, ScriptPattern};

/// A byte string biased toward script-shaped input: opcodes the classifier
/// looks for, plus arbitrary bytes.
fn script_like_bytes() -> impl Strategy<Value = Vec<u8>> {
    let interesting = prop::sample::select(vec![
        OP_0, OP_1, OP_2, OP_3, OP_16, OP_DUP, OP_HASH160, OP_EQUAL, OP_EQUALVERIFY,
        OP_CHECKSIG, OP_CHECKMULTISIG, OP_DATA_20, OP_DATA_33, OP_DATA_65, OP_PUSHDATA1,
        OP_PUSHDATA2, OP_PUSHDATA4, 0x02, 0x03, 0x04,
    ]);
    prop::collection::vec(prop_oneof![interesting, any::<u8>()], 0..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Classification never panics and a recognized pattern is internally
    /// consistent with the script it came from.
    #[test]
    fn classify_is_total(data in script_like_bytes()) {
        let script = Script::from(data.clone());
        match classify(&script) {
            ScriptPattern::PayToPublicKey(key) => {
                prop_assert!(data.len() == 35 || data.len() == 67);
                prop_assert_eq!(key.len() + 2, data.len());
            }
            ScriptPattern::PayToPublicKeyHash(hash) => {
                prop_assert_eq!(data.len(), 25);
                prop_assert_eq!(&data[3..23], &hash[..]);
            }
            ScriptPattern::PayToScriptHash(hash) => {
                prop_assert_eq!(data.len(), 23);
                prop_assert_eq!(&data[2..22], &hash[..]);
            }
            ScriptPattern::Multisig { keys, required } => {
                prop_assert!(required >= 1);
                prop_assert!(required <= keys.len());
                prop_assert!(keys.len() <= MAX_PUB_KEYS_PER_MULTISIG);
                prop_assert_eq!(data.last().copied(), Some(OP_CHECKMULTISIG));
            }
            ScriptPattern::Unrecognized => {}
        }
    }

    #[test]
    fn script_hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        let script2 = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(script.to_bytes(), script2.to_bytes());
    }

    /// `push_all` output decodes to one chunk per element carrying the same
    /// bytes, with empty and small-integer elements as bare opcodes.
    #[test]
    fn push_all_decodes_to_elements(
        parts in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..8)
    ) {
        let encoded = push_all(&parts).unwrap();
        let chunks = decode_script(&encoded).unwrap();
        prop_assert_eq!(chunks.len(), parts.len());

        for (chunk, part) in chunks.iter().zip(&parts) {
            match chunk.push_data() {
                Some(data) => prop_assert_eq!(data, part.as_slice()),
                None => {
                    let value = small_int_value(chunk.op).map(|v| v as u8);
                    match part.as_slice() {
                        [] => prop_assert_eq!(value, Some(0)),
                        [n] => prop_assert_eq!(value, Some(*n)),
                        _ => prop_assert!(false, "multi-byte element encoded as opcode"),
                    }
                }
            }
        }
    }
}
