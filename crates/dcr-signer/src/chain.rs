//! Chain-selected signing capability.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::input::SigningInput;
use crate::output::SigningOutput;
use crate::plan::TransactionPlan;
use crate::signer;

/// The operations a chain's signer exposes to a binding layer.
pub trait ChainSigner {
    /// Describe the spend without signing.
    fn plan(&self, input: &SigningInput) -> TransactionPlan;
    /// Sign the transaction described by `input`.
    fn sign(&self, input: &SigningInput) -> SigningOutput;
}

/// Signer for Decred transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decred;

impl ChainSigner for Decred {
    fn plan(&self, input: &SigningInput) -> TransactionPlan {
        signer::plan(input)
    }

    fn sign(&self, input: &SigningInput) -> SigningOutput {
        SigningOutput::from(signer::sign(input))
    }
}

/// Chains with a signer in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Decred,
}

impl Chain {
    /// The signer implementation for this chain.
    pub fn signer(self) -> Box<dyn ChainSigner> {
        match self {
            Chain::Decred => Box::new(Decred),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Decred => f.write_str("decred"),
        }
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decred" | "dcr" => Ok(Chain::Decred),
            other => Err(format!("unsupported chain: {}", other)),
        }
    }
}
