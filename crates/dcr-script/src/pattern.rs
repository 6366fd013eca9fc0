//! Standard output-script classification.
//!
//! `classify` recognizes the locking-script shapes the signer can satisfy
//! and extracts the data each one commits to. It is total: any byte
//! sequence, including one with truncated pushes, maps to exactly one
//! pattern.

use std::fmt;

use crate::opcodes::*;
use crate::Script;

/// Length of a P2PKH locking script.
const P2PKH_LEN: usize = 25;

/// Length of a P2SH locking script.
const P2SH_LEN: usize = 23;

/// A recognized locking-script shape and its committed data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptPattern {
    /// `<pubkey> OP_CHECKSIG`
    PayToPublicKey(Vec<u8>),
    /// `OP_DUP OP_HASH160 <hash160> OP_EQUALVERIFY OP_CHECKSIG`
    PayToPublicKeyHash([u8; 20]),
    /// `OP_HASH160 <hash160> OP_EQUAL`
    PayToScriptHash([u8; 20]),
    /// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`, keys in script order.
    Multisig { keys: Vec<Vec<u8>>, required: usize },
    Unrecognized,
}

impl ScriptPattern {
    /// Short name of the pattern, as used by `dcrd` script class strings.
    pub fn name(&self) -> &'static str {
        match self {
            ScriptPattern::PayToPublicKey(_) => "pubkey",
            ScriptPattern::PayToPublicKeyHash(_) => "pubkeyhash",
            ScriptPattern::PayToScriptHash(_) => "scripthash",
            ScriptPattern::Multisig { .. } => "multisig",
            ScriptPattern::Unrecognized => "nonstandard",
        }
    }
}

impl fmt::Display for ScriptPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `key` has a standard secp256k1 SEC1 length and prefix.
///
/// Only the structure is checked; the point itself is not decoded.
pub fn is_public_key_encoding(key: &[u8]) -> bool {
    match key.first() {
        Some(0x02 | 0x03) => key.len() == 33,
        Some(0x04 | 0x06 | 0x07) => key.len() == 65,
        _ => false,
    }
}

/// Classify a locking script.
///
/// # Arguments
/// * `script` - The script to inspect.
///
/// # Returns
/// The first matching pattern, or `ScriptPattern::Unrecognized`.
pub fn classify(script: &Script) -> ScriptPattern {
    let b = script.to_bytes();
    if let Some(key) = match_pay_to_public_key(b) {
        return ScriptPattern::PayToPublicKey(key.to_vec());
    }
    if let Some(hash) = match_pay_to_public_key_hash(b) {
        return ScriptPattern::PayToPublicKeyHash(hash);
    }
    if let Some(hash) = match_pay_to_script_hash(b) {
        return ScriptPattern::PayToScriptHash(hash);
    }
    if let Some((keys, required)) = match_multisig(script) {
        return ScriptPattern::Multisig { keys, required };
    }
    ScriptPattern::Unrecognized
}

fn match_pay_to_public_key(b: &[u8]) -> Option<&[u8]> {
    let (&last, body) = b.split_last()?;
    let (&push, key) = body.split_first()?;
    let direct = push == OP_DATA_33 || push == OP_DATA_65;
    (last == OP_CHECKSIG && direct && key.len() == push as usize && is_public_key_encoding(key))
        .then_some(key)
}

fn match_pay_to_public_key_hash(b: &[u8]) -> Option<[u8; 20]> {
    if b.len() == P2PKH_LEN
        && b[0] == OP_DUP
        && b[1] == OP_HASH160
        && b[2] == OP_DATA_20
        && b[23] == OP_EQUALVERIFY
        && b[24] == OP_CHECKSIG
    {
        b[3..23].try_into().ok()
    } else {
        None
    }
}

fn match_pay_to_script_hash(b: &[u8]) -> Option<[u8; 20]> {
    if b.len() == P2SH_LEN && b[0] == OP_HASH160 && b[1] == OP_DATA_20 && b[22] == OP_EQUAL {
        b[2..22].try_into().ok()
    } else {
        None
    }
}

fn match_multisig(script: &Script) -> Option<(Vec<Vec<u8>>, usize)> {
    let chunks = script.chunks().ok()?;
    let (last, rest) = chunks.split_last()?;
    let (n_chunk, rest) = rest.split_last()?;
    let (m_chunk, key_chunks) = rest.split_first()?;

    if last.op != OP_CHECKMULTISIG || n_chunk.data.is_some() || m_chunk.data.is_some() {
        return None;
    }
    let required = small_int_value(m_chunk.op)?;
    let total = small_int_value(n_chunk.op)?;

    let keys = key_chunks
        .iter()
        .map(|chunk| chunk.push_data().filter(|k| is_public_key_encoding(k)).map(<[u8]>::to_vec))
        .collect::<Option<Vec<_>>>()?;

    let valid = required >= 1
        && required <= total
        && total <= MAX_PUB_KEYS_PER_MULTISIG
        && total == keys.len();
    valid.then_some((keys, required))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(prefix: u8, len: usize) -> Vec<u8> {
        let mut k = vec![0x5a; len];
        k[0] = prefix;
        k
    }

    fn multisig_bytes(m: u8, keys: &[Vec<u8>], n: u8) -> Vec<u8> {
        let mut b = vec![m];
        for k in keys {
            b.push(k.len() as u8);
            b.extend_from_slice(k);
        }
        b.extend_from_slice(&[n, OP_CHECKMULTISIG]);
        b
    }

    #[test]
    fn test_pay_to_public_key() {
        let compressed = key(0x03, 33);
        let mut b = vec![OP_DATA_33];
        b.extend_from_slice(&compressed);
        b.push(OP_CHECKSIG);
        assert_eq!(
            classify(&Script::from(b)),
            ScriptPattern::PayToPublicKey(compressed)
        );

        for prefix in [0x04, 0x06, 0x07] {
            let uncompressed = key(prefix, 65);
            let mut b = vec![OP_DATA_65];
            b.extend_from_slice(&uncompressed);
            b.push(OP_CHECKSIG);
            assert_eq!(
                classify(&Script::from(b)),
                ScriptPattern::PayToPublicKey(uncompressed)
            );
        }
    }

    #[test]
    fn test_pay_to_public_key_bad_prefix() {
        let mut b = vec![OP_DATA_33];
        b.extend_from_slice(&key(0x04, 33));
        b.push(OP_CHECKSIG);
        assert_eq!(classify(&Script::from(b)), ScriptPattern::Unrecognized);
    }

    #[test]
    fn test_pay_to_public_key_hash() {
        let script =
            Script::from_hex("76a91403ececf2d12a7f614aef4c82ecf13c303bd9975d88ac").unwrap();
        let mut expected = [0u8; 20];
        expected.copy_from_slice(&hex::decode("03ececf2d12a7f614aef4c82ecf13c303bd9975d").unwrap());
        assert_eq!(classify(&script), ScriptPattern::PayToPublicKeyHash(expected));
    }

    #[test]
    fn test_pay_to_script_hash() {
        let script = Script::from_hex("a9149de5aeaff9c48431ba4dd6e8af73d51f38e451cb87").unwrap();
        match classify(&script) {
            ScriptPattern::PayToScriptHash(h) => {
                assert_eq!(hex::encode(h), "9de5aeaff9c48431ba4dd6e8af73d51f38e451cb")
            }
            other => panic!("expected scripthash, got {}", other),
        }
    }

    #[test]
    fn test_multisig_keys_in_order() {
        let keys = vec![key(0x02, 33), key(0x03, 33), key(0x04, 65)];
        let script = Script::from(multisig_bytes(OP_2, &keys, OP_3));
        assert_eq!(
            classify(&script),
            ScriptPattern::Multisig { keys, required: 2 }
        );
    }

    #[test]
    fn test_multisig_rejections() {
        let keys = vec![key(0x02, 33), key(0x03, 33)];
        let cases = vec![
            ("m greater than n", multisig_bytes(OP_3, &keys, OP_2)),
            ("m is zero", multisig_bytes(OP_0, &keys, OP_2)),
            ("n differs from key count", multisig_bytes(OP_1, &keys, OP_3)),
            ("bad key prefix", multisig_bytes(OP_1, &[key(0x05, 33), key(0x02, 33)], OP_2)),
            ("no keys", vec![OP_1, OP_1, OP_CHECKMULTISIG]),
            ("missing checkmultisig", {
                let mut b = multisig_bytes(OP_1, &keys, OP_2);
                b.pop();
                b
            }),
            ("trailing opcode", {
                let mut b = multisig_bytes(OP_1, &keys, OP_2);
                b.push(OP_NOP);
                b
            }),
        ];
        for (name, bytes) in cases {
            assert_eq!(
                classify(&Script::from(bytes)),
                ScriptPattern::Unrecognized,
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_multisig_sixteen_keys() {
        let keys: Vec<Vec<u8>> = (0..16).map(|_| key(0x02, 33)).collect();
        let script = Script::from(multisig_bytes(OP_16, &keys, OP_16));
        assert!(matches!(
            classify(&script),
            ScriptPattern::Multisig { required: 16, .. }
        ));
    }

    #[test]
    fn test_unrecognized() {
        let cases = [
            "",
            "6a0401020304",
            "76a914",
            "a9140102",
            // P2PKH with one trailing byte
            "76a91403ececf2d12a7f614aef4c82ecf13c303bd9975d88ac00",
        ];
        for case in cases {
            let script = Script::from_hex(case).unwrap();
            assert_eq!(classify(&script), ScriptPattern::Unrecognized, "{}", case);
        }
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(ScriptPattern::PayToScriptHash([0; 20]).to_string(), "scripthash");
        assert_eq!(ScriptPattern::Unrecognized.name(), "nonstandard");
    }
}
