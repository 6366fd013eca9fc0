//! Chain hash type for outpoints and transaction identification.
//!
//! A `Hash` is a 32-byte array stored in internal (little-endian) order and
//! displayed as byte-reversed hex, the convention `dcrd` uses for
//! transaction and block hashes.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use crate::hash::blake256;
use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Maximum hex string length for a Hash (64 hex characters).
pub const MAX_HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte hash used for previous-outpoint references and transaction IDs.
///
/// When displayed as a string, the bytes are reversed (little-endian
/// internal, big-endian display).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from a raw 32-byte array in internal byte order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            )));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Hash(arr))
    }

    /// Create a Hash from a byte-reversed (display order) hex string.
    ///
    /// Short strings are zero-padded on the high end, so leading zeros of
    /// a displayed hash may be omitted.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of up to 64 characters.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Ok(Hash::default());
        }
        if hex_str.len() > MAX_HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "max hash string length is {} bytes",
                MAX_HASH_STRING_SIZE
            )));
        }

        let padded = if hex_str.len() % 2 != 0 {
            format!("0{}", hex_str)
        } else {
            hex_str.to_string()
        };

        let decoded = hex::decode(&padded)?;
        let mut display = [0u8; HASH_SIZE];
        display[HASH_SIZE - decoded.len()..].copy_from_slice(&decoded);
        display.reverse();

        Ok(Hash(display))
    }

    /// Access the internal byte array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

/// Display the hash as byte-reversed hex.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "{}", hex::encode(reversed))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

/// Serialize as a display-order hex string.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute BLAKE-256 of the input and return it as a Hash.
///
/// Equivalent to `dcrd`'s `chainhash.HashH`.
pub fn hash_h(data: &[u8]) -> Hash {
    Hash(blake256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_string_is_reversed() {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[0] = 0x06;
        bytes[1] = 0xe5;
        let hash = Hash::new(bytes);
        let s = hash.to_string();
        assert!(s.ends_with("e506"));
        assert!(s.starts_with("0000"));
    }

    #[test]
    fn test_from_hex_roundtrip() {
        let display = "298e5cc3d985bfe7f81dc135f360abe089edd4396b86d2de66b0cef42b21d980";
        let hash = Hash::from_hex(display).unwrap();
        assert_eq!(hash.to_string(), display);
        assert_eq!(hash.as_bytes()[0], 0x80);
        assert_eq!(hash.as_bytes()[31], 0x29);
    }

    #[test]
    fn test_from_hex_short_and_empty() {
        assert_eq!(Hash::from_hex("").unwrap(), Hash::default());

        let one = Hash::from_hex("1").unwrap();
        let mut expected = [0u8; HASH_SIZE];
        expected[0] = 0x01;
        assert_eq!(one, Hash::new(expected));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Hash::from_hex(&"0".repeat(MAX_HASH_STRING_SIZE + 1)).is_err());
        assert!(Hash::from_hex("abcdefg").is_err());
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE]).is_ok());
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE + 1]).is_err());
    }

    #[test]
    fn test_marshalling() {
        #[derive(Serialize, Deserialize)]
        struct TestData {
            hash: Hash,
        }

        let data = TestData { hash: hash_h(b"hello") };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, format!(r#"{{"hash":"{}"}}"#, data.hash));

        let data2: TestData = serde_json::from_str(&json).unwrap();
        assert_eq!(data2.hash, data.hash);
    }
}
