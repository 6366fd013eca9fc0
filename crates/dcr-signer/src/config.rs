//! Signer configuration.

use serde::{Deserialize, Serialize};

use dcr_transaction::input::DEFAULT_SEQUENCE_NUMBER;

/// Settings applied when building the unsigned transaction.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Version written to the transaction.
    pub tx_version: u16,
    /// Sequence for inputs whose UTXO does not specify one.
    pub default_sequence: u32,
}

impl SignerConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            tx_version: 1,
            default_sequence: DEFAULT_SEQUENCE_NUMBER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SignerConfig::from_json(r#"{"tx_version": 3}"#).unwrap();
        assert_eq!(config.tx_version, 3);
        assert_eq!(config.default_sequence, DEFAULT_SEQUENCE_NUMBER);

        assert_eq!(SignerConfig::from_json("{}").unwrap(), SignerConfig::default());
        assert!(SignerConfig::from_json(r#"{"tx_version": -1}"#).is_err());
    }
}
