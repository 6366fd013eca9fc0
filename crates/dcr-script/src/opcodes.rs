//! Decred script opcode values and name lookup.
//!
//! Values match `dcrd/txscript`. Opcodes Decred shares with Bitcoin keep
//! their Bitcoin byte values; `OP_HASH160` hashes with BLAKE-256 rather than
//! SHA-256 but keeps the 0xa9 code.

/// Maximum number of public keys in a standard multisig script.
///
/// Bounded by the small-integer opcodes `OP_1..OP_16` that encode `n`.
pub const MAX_PUB_KEYS_PER_MULTISIG: usize = 16;

// Push value
pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = 0x00;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_65: u8 = 0x41;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_RESERVED: u8 = 0x50;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = 0x51;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_4: u8 = 0x54;
pub const OP_5: u8 = 0x55;
pub const OP_6: u8 = 0x56;
pub const OP_7: u8 = 0x57;
pub const OP_8: u8 = 0x58;
pub const OP_9: u8 = 0x59;
pub const OP_10: u8 = 0x5a;
pub const OP_11: u8 = 0x5b;
pub const OP_12: u8 = 0x5c;
pub const OP_13: u8 = 0x5d;
pub const OP_14: u8 = 0x5e;
pub const OP_15: u8 = 0x5f;
pub const OP_16: u8 = 0x60;

// Control
pub const OP_NOP: u8 = 0x61;
pub const OP_VER: u8 = 0x62;
pub const OP_IF: u8 = 0x63;
pub const OP_NOTIF: u8 = 0x64;
pub const OP_VERIF: u8 = 0x65;
pub const OP_VERNOTIF: u8 = 0x66;
pub const OP_ELSE: u8 = 0x67;
pub const OP_ENDIF: u8 = 0x68;
pub const OP_VERIFY: u8 = 0x69;
pub const OP_RETURN: u8 = 0x6a;

// Stack
pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_2DROP: u8 = 0x6d;
pub const OP_2DUP: u8 = 0x6e;
pub const OP_3DUP: u8 = 0x6f;
pub const OP_2OVER: u8 = 0x70;
pub const OP_2ROT: u8 = 0x71;
pub const OP_2SWAP: u8 = 0x72;
pub const OP_IFDUP: u8 = 0x73;
pub const OP_DEPTH: u8 = 0x74;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_NIP: u8 = 0x77;
pub const OP_OVER: u8 = 0x78;
pub const OP_PICK: u8 = 0x79;
pub const OP_ROLL: u8 = 0x7a;
pub const OP_ROT: u8 = 0x7b;
pub const OP_SWAP: u8 = 0x7c;
pub const OP_TUCK: u8 = 0x7d;

// Splice and bitwise logic
pub const OP_CAT: u8 = 0x7e;
pub const OP_SUBSTR: u8 = 0x7f;
pub const OP_LEFT: u8 = 0x80;
pub const OP_RIGHT: u8 = 0x81;
pub const OP_SIZE: u8 = 0x82;
pub const OP_INVERT: u8 = 0x83;
pub const OP_AND: u8 = 0x84;
pub const OP_OR: u8 = 0x85;
pub const OP_XOR: u8 = 0x86;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_ROTR: u8 = 0x89;
pub const OP_ROTL: u8 = 0x8a;

// Arithmetic
pub const OP_1ADD: u8 = 0x8b;
pub const OP_1SUB: u8 = 0x8c;
pub const OP_2MUL: u8 = 0x8d;
pub const OP_2DIV: u8 = 0x8e;
pub const OP_NEGATE: u8 = 0x8f;
pub const OP_ABS: u8 = 0x90;
pub const OP_NOT: u8 = 0x91;
pub const OP_0NOTEQUAL: u8 = 0x92;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
pub const OP_MUL: u8 = 0x95;
pub const OP_DIV: u8 = 0x96;
pub const OP_MOD: u8 = 0x97;
pub const OP_LSHIFT: u8 = 0x98;
pub const OP_RSHIFT: u8 = 0x99;
pub const OP_BOOLAND: u8 = 0x9a;
pub const OP_BOOLOR: u8 = 0x9b;
pub const OP_NUMEQUAL: u8 = 0x9c;
pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
pub const OP_LESSTHAN: u8 = 0x9f;
pub const OP_GREATERTHAN: u8 = 0xa0;
pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
pub const OP_MIN: u8 = 0xa3;
pub const OP_MAX: u8 = 0xa4;
pub const OP_WITHIN: u8 = 0xa5;

// Crypto
pub const OP_RIPEMD160: u8 = 0xa6;
pub const OP_SHA1: u8 = 0xa7;
pub const OP_BLAKE256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CODESEPARATOR: u8 = 0xab;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

// Locktime and Decred stake/treasury extensions
pub const OP_NOP1: u8 = 0xb0;
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;
pub const OP_SSTX: u8 = 0xba;
pub const OP_SSGEN: u8 = 0xbb;
pub const OP_SSRTX: u8 = 0xbc;
pub const OP_SSTXCHANGE: u8 = 0xbd;
pub const OP_CHECKSIGALT: u8 = 0xbe;
pub const OP_CHECKSIGALTVERIFY: u8 = 0xbf;
pub const OP_SHA256: u8 = 0xc0;
pub const OP_TADD: u8 = 0xc1;
pub const OP_TSPEND: u8 = 0xc2;
pub const OP_TGEN: u8 = 0xc3;

pub const OP_INVALIDOPCODE: u8 = 0xff;

/// Names for every opcode that is not a data push or small integer.
const NAMED_OPCODES: &[(u8, &str)] = &[
    (OP_PUSHDATA1, "OP_PUSHDATA1"),
    (OP_PUSHDATA2, "OP_PUSHDATA2"),
    (OP_PUSHDATA4, "OP_PUSHDATA4"),
    (OP_1NEGATE, "OP_1NEGATE"),
    (OP_RESERVED, "OP_RESERVED"),
    (OP_NOP, "OP_NOP"),
    (OP_VER, "OP_VER"),
    (OP_IF, "OP_IF"),
    (OP_NOTIF, "OP_NOTIF"),
    (OP_VERIF, "OP_VERIF"),
    (OP_VERNOTIF, "OP_VERNOTIF"),
    (OP_ELSE, "OP_ELSE"),
    (OP_ENDIF, "OP_ENDIF"),
    (OP_VERIFY, "OP_VERIFY"),
    (OP_RETURN, "OP_RETURN"),
    (OP_TOALTSTACK, "OP_TOALTSTACK"),
    (OP_FROMALTSTACK, "OP_FROMALTSTACK"),
    (OP_2DROP, "OP_2DROP"),
    (OP_2DUP, "OP_2DUP"),
    (OP_3DUP, "OP_3DUP"),
    (OP_2OVER, "OP_2OVER"),
    (OP_2ROT, "OP_2ROT"),
    (OP_2SWAP, "OP_2SWAP"),
    (OP_IFDUP, "OP_IFDUP"),
    (OP_DEPTH, "OP_DEPTH"),
    (OP_DROP, "OP_DROP"),
    (OP_DUP, "OP_DUP"),
    (OP_NIP, "OP_NIP"),
    (OP_OVER, "OP_OVER"),
    (OP_PICK, "OP_PICK"),
    (OP_ROLL, "OP_ROLL"),
    (OP_ROT, "OP_ROT"),
    (OP_SWAP, "OP_SWAP"),
    (OP_TUCK, "OP_TUCK"),
    (OP_CAT, "OP_CAT"),
    (OP_SUBSTR, "OP_SUBSTR"),
    (OP_LEFT, "OP_LEFT"),
    (OP_RIGHT, "OP_RIGHT"),
    (OP_SIZE, "OP_SIZE"),
    (OP_INVERT, "OP_INVERT"),
    (OP_AND, "OP_AND"),
    (OP_OR, "OP_OR"),
    (OP_XOR, "OP_XOR"),
    (OP_EQUAL, "OP_EQUAL"),
    (OP_EQUALVERIFY, "OP_EQUALVERIFY"),
    (OP_ROTR, "OP_ROTR"),
    (OP_ROTL, "OP_ROTL"),
    (OP_1ADD, "OP_1ADD"),
    (OP_1SUB, "OP_1SUB"),
    (OP_2MUL, "OP_2MUL"),
    (OP_2DIV, "OP_2DIV"),
    (OP_NEGATE, "OP_NEGATE"),
    (OP_ABS, "OP_ABS"),
    (OP_NOT, "OP_NOT"),
    (OP_0NOTEQUAL, "OP_0NOTEQUAL"),
    (OP_ADD, "OP_ADD"),
    (OP_SUB, "OP_SUB"),
    (OP_MUL, "OP_MUL"),
    (OP_DIV, "OP_DIV"),
    (OP_MOD, "OP_MOD"),
    (OP_LSHIFT, "OP_LSHIFT"),
    (OP_RSHIFT, "OP_RSHIFT"),
    (OP_BOOLAND, "OP_BOOLAND"),
    (OP_BOOLOR, "OP_BOOLOR"),
    (OP_NUMEQUAL, "OP_NUMEQUAL"),
    (OP_NUMEQUALVERIFY, "OP_NUMEQUALVERIFY"),
    (OP_NUMNOTEQUAL, "OP_NUMNOTEQUAL"),
    (OP_LESSTHAN, "OP_LESSTHAN"),
    (OP_GREATERTHAN, "OP_GREATERTHAN"),
    (OP_LESSTHANOREQUAL, "OP_LESSTHANOREQUAL"),
    (OP_GREATERTHANOREQUAL, "OP_GREATERTHANOREQUAL"),
    (OP_MIN, "OP_MIN"),
    (OP_MAX, "OP_MAX"),
    (OP_WITHIN, "OP_WITHIN"),
    (OP_RIPEMD160, "OP_RIPEMD160"),
    (OP_SHA1, "OP_SHA1"),
    (OP_BLAKE256, "OP_BLAKE256"),
    (OP_HASH160, "OP_HASH160"),
    (OP_HASH256, "OP_HASH256"),
    (OP_CODESEPARATOR, "OP_CODESEPARATOR"),
    (OP_CHECKSIG, "OP_CHECKSIG"),
    (OP_CHECKSIGVERIFY, "OP_CHECKSIGVERIFY"),
    (OP_CHECKMULTISIG, "OP_CHECKMULTISIG"),
    (OP_CHECKMULTISIGVERIFY, "OP_CHECKMULTISIGVERIFY"),
    (OP_NOP1, "OP_NOP1"),
    (OP_CHECKLOCKTIMEVERIFY, "OP_CHECKLOCKTIMEVERIFY"),
    (OP_CHECKSEQUENCEVERIFY, "OP_CHECKSEQUENCEVERIFY"),
    (OP_SSTX, "OP_SSTX"),
    (OP_SSGEN, "OP_SSGEN"),
    (OP_SSRTX, "OP_SSRTX"),
    (OP_SSTXCHANGE, "OP_SSTXCHANGE"),
    (OP_CHECKSIGALT, "OP_CHECKSIGALT"),
    (OP_CHECKSIGALTVERIFY, "OP_CHECKSIGALTVERIFY"),
    (OP_SHA256, "OP_SHA256"),
    (OP_TADD, "OP_TADD"),
    (OP_TSPEND, "OP_TSPEND"),
    (OP_TGEN, "OP_TGEN"),
    (OP_INVALIDOPCODE, "OP_INVALIDOPCODE"),
];

/// Return the canonical name of an opcode.
///
/// `OP_0` renders as `OP_FALSE` and direct pushes as `OP_DATA_n`; bytes
/// with no assigned opcode render as `OP_UNKNOWN<n>`.
pub fn opcode_to_string(op: u8) -> String {
    match op {
        OP_0 => "OP_FALSE".to_string(),
        OP_DATA_1..=OP_DATA_75 => format!("OP_DATA_{}", op),
        OP_1..=OP_16 => format!("OP_{}", op - OP_1 + 1),
        _ => NAMED_OPCODES
            .iter()
            .find(|(code, _)| *code == op)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| format!("OP_UNKNOWN{}", op)),
    }
}

/// Look up an opcode by its ASM name.
///
/// Accepts the aliases `OP_0`, `OP_FALSE` and `OP_TRUE` in addition to the
/// names produced by [`opcode_to_string`]. Direct push names are not
/// accepted, because ASM renders pushes as hex.
pub fn string_to_opcode(name: &str) -> Option<u8> {
    match name {
        "OP_0" | "OP_FALSE" => return Some(OP_0),
        "OP_TRUE" => return Some(OP_TRUE),
        _ => {}
    }
    if let Some(n) = name.strip_prefix("OP_").and_then(|s| s.parse::<u8>().ok()) {
        if (1..=16).contains(&n) {
            return Some(OP_1 + n - 1);
        }
    }
    NAMED_OPCODES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

/// Check whether `op` is `OP_0` or one of `OP_1..OP_16`.
pub fn is_small_int_op(op: u8) -> bool {
    op == OP_0 || (OP_1..=OP_16).contains(&op)
}

/// Decode a small-integer opcode to its value.
///
/// # Returns
/// `Some(0..=16)` for `OP_0` and `OP_1..OP_16`, `None` for every other byte.
pub fn small_int_value(op: u8) -> Option<usize> {
    match op {
        OP_0 => Some(0),
        OP_1..=OP_16 => Some((op - OP_1 + 1) as usize),
        _ => None,
    }
}

/// Encode a value in `0..=16` as its small-integer opcode.
pub fn small_int_opcode(value: usize) -> Option<u8> {
    match value {
        0 => Some(OP_0),
        1..=16 => Some(OP_1 + (value as u8) - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_names() {
        assert_eq!(opcode_to_string(OP_0), "OP_FALSE");
        assert_eq!(opcode_to_string(OP_DATA_20), "OP_DATA_20");
        assert_eq!(opcode_to_string(OP_3), "OP_3");
        assert_eq!(opcode_to_string(OP_HASH160), "OP_HASH160");
        assert_eq!(opcode_to_string(OP_SSGEN), "OP_SSGEN");
        assert_eq!(opcode_to_string(0xd0), "OP_UNKNOWN208");
    }

    /// Every named opcode parses back to its own byte.
    #[test]
    fn test_name_lookup_round_trip() {
        for op in 0u8..=255 {
            if (OP_DATA_1..=OP_DATA_75).contains(&op) {
                continue;
            }
            let name = opcode_to_string(op);
            if name.starts_with("OP_UNKNOWN") {
                assert_eq!(string_to_opcode(&name), None);
            } else {
                assert_eq!(string_to_opcode(&name), Some(op), "{}", name);
            }
        }
        assert_eq!(string_to_opcode("OP_0"), Some(OP_0));
        assert_eq!(string_to_opcode("OP_17"), None);
        assert_eq!(string_to_opcode("deadbeef"), None);
    }

    #[test]
    fn test_small_ints() {
        assert!(is_small_int_op(OP_0));
        assert!(is_small_int_op(OP_16));
        assert!(!is_small_int_op(OP_1NEGATE));
        assert_eq!(small_int_value(OP_2), Some(2));
        assert_eq!(small_int_value(OP_DUP), None);
        assert_eq!(small_int_opcode(16), Some(OP_16));
        assert_eq!(small_int_opcode(17), None);
        for v in 0..=16 {
            assert_eq!(small_int_opcode(v).and_then(small_int_value), Some(v));
        }
    }
}
