//! Builders for standard Decred locking scripts.
//!
//! Each builder produces a script that [`classify`](crate::classify) maps
//! back to the matching [`ScriptPattern`](crate::ScriptPattern).

use dcr_primitives::ec::PublicKey;
use dcr_primitives::hash::hash160;

use crate::opcodes::*;
use crate::pattern::is_public_key_encoding;
use crate::{Script, ScriptError};

/// Create a pay-to-pubkey locking script: `<pubkey> OP_CHECKSIG`.
///
/// # Arguments
/// * `pub_key` - A 33-byte compressed or 65-byte uncompressed SEC1 key.
///
/// # Returns
/// The 35- or 67-byte script, or `InvalidPublicKey` if the encoding is not standard.
pub fn p2pk(pub_key: &[u8]) -> Result<Script, ScriptError> {
    if !is_public_key_encoding(pub_key) {
        return Err(ScriptError::InvalidPublicKey(hex::encode(pub_key)));
    }
    let mut bytes = Vec::with_capacity(pub_key.len() + 2);
    bytes.push(pub_key.len() as u8);
    bytes.extend_from_slice(pub_key);
    bytes.push(OP_CHECKSIG);
    Ok(Script::from(bytes))
}

/// Create a pay-to-pubkey-hash locking script.
///
/// Produces: `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`
pub fn p2pkh(pub_key_hash: &[u8; 20]) -> Script {
    let mut bytes = Vec::with_capacity(25);
    bytes.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
    bytes.extend_from_slice(pub_key_hash);
    bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
    Script::from(bytes)
}

/// Create a pay-to-pubkey-hash locking script paying to `pub_key`'s
/// compressed-key hash.
pub fn p2pkh_for_key(pub_key: &PublicKey) -> Script {
    p2pkh(&pub_key.hash160())
}

/// Create a pay-to-script-hash locking script: `OP_HASH160 <hash> OP_EQUAL`.
pub fn p2sh(script_hash: &[u8; 20]) -> Script {
    let mut bytes = Vec::with_capacity(23);
    bytes.extend_from_slice(&[OP_HASH160, OP_DATA_20]);
    bytes.extend_from_slice(script_hash);
    bytes.push(OP_EQUAL);
    Script::from(bytes)
}

/// Create a pay-to-script-hash locking script committing to `redeem_script`.
pub fn p2sh_for_script(redeem_script: &Script) -> Script {
    p2sh(&hash160(redeem_script.to_bytes()))
}

/// Create a bare `required`-of-`keys.len()` multisig script.
///
/// Produces: `OP_m <key_1> ... <key_n> OP_n OP_CHECKMULTISIG` with each key
/// in compressed form.
///
/// # Returns
/// The script, or `InvalidMultisig` unless `1 <= required <= keys.len() <= 16`.
pub fn multisig(required: usize, keys: &[PublicKey]) -> Result<Script, ScriptError> {
    let invalid = ScriptError::InvalidMultisig {
        required,
        keys: keys.len(),
    };
    if required == 0 || required > keys.len() || keys.len() > MAX_PUB_KEYS_PER_MULTISIG {
        return Err(invalid);
    }
    let (Some(m), Some(n)) = (small_int_opcode(required), small_int_opcode(keys.len())) else {
        return Err(invalid);
    };

    let mut script = Script::new();
    script.append_opcodes(&[m])?;
    for key in keys {
        script.append_push_data(&key.to_compressed())?;
    }
    script.append_opcodes(&[n, OP_CHECKMULTISIG])?;
    Ok(script)
}
