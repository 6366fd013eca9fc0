//! Script chunk parsing and push encoding.
//!
//! A script chunk is either an opcode or a data push with its associated bytes.
//! This module decodes raw script bytes into structured chunks and encodes
//! stacks of byte strings into unlocking scripts.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Convert this chunk to its ASM token.
    ///
    /// Data pushes render as hex; every other opcode uses its OP_xxx name.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) => hex::encode(data),
            None => opcode_to_string(self.op),
        }
    }

    /// Return the pushed bytes, or `None` for a non-push opcode.
    pub fn push_data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles OP_DATA_1..OP_DATA_75 (direct push) and OP_PUSHDATA1/2/4
/// (extended push). Every other byte becomes a bare opcode chunk.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// A vector of parsed chunks, or `ScriptError::DataTooSmall` if a push
/// announces more bytes than remain.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut rest = bytes;

    while let Some((&op, tail)) = rest.split_first() {
        rest = tail;
        let length = match op {
            OP_DATA_1..=OP_DATA_75 => op as usize,
            OP_PUSHDATA1 => take(&mut rest, 1)?[0] as usize,
            OP_PUSHDATA2 => {
                let raw = take(&mut rest, 2)?;
                u16::from_le_bytes([raw[0], raw[1]]) as usize
            }
            OP_PUSHDATA4 => {
                let raw = take(&mut rest, 4)?;
                u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };
        let data = take(&mut rest, length)?.to_vec();
        chunks.push(ScriptChunk { op, data: Some(data) });
    }

    Ok(chunks)
}

fn take<'a>(rest: &mut &'a [u8], n: usize) -> Result<&'a [u8], ScriptError> {
    if rest.len() < n {
        return Err(ScriptError::DataTooSmall);
    }
    let (head, tail) = rest.split_at(n);
    *rest = tail;
    Ok(head)
}

/// Compute the push prefix bytes for a data payload of the given length.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The prefix to place before the data, or `DataTooBig` if the length does
/// not fit OP_PUSHDATA4.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if let Ok(len) = u8::try_from(data_len) {
        Ok(vec![OP_PUSHDATA1, len])
    } else if let Ok(len) = u16::try_from(data_len) {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&len.to_le_bytes());
        Ok(buf)
    } else if let Ok(len) = u32::try_from(data_len) {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&len.to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Encode multiple data payloads as plain pushes.
///
/// Each element gets its own push prefix based on length; no small-integer
/// substitution is made, so an empty element encodes as `0x00`.
///
/// # Returns
/// All pushes concatenated, or `PartTooBig(i)` naming the oversized part.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let prefix = push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
        result.extend_from_slice(&prefix);
        result.extend_from_slice(part);
    }
    Ok(result)
}

/// Encode a stack of byte strings as an unlocking script using minimal pushes.
///
/// - an empty element becomes `OP_0`
/// - a single byte in `1..=16` becomes `OP_1..OP_16`
/// - up to 75 bytes use a direct push
/// - longer elements use `OP_PUSHDATA1/2/4`
///
/// # Arguments
/// * `parts` - The stack elements, bottom first.
///
/// # Returns
/// The encoded script bytes, or `PartTooBig(i)` naming the oversized element.
pub fn push_all<T: AsRef<[u8]>>(parts: &[T]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let part = part.as_ref();
        match part {
            [] => result.push(OP_0),
            [n @ 1..=16] => result.push(OP_1 + n - 1),
            _ => {
                let prefix =
                    push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
                result.extend_from_slice(&prefix);
                result.extend_from_slice(part);
            }
        }
    }
    Ok(result)
}
