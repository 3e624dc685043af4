//! Chain and address shape checks
//!
//! Catches typos before a network round trip. Only the shape is checked
//! (length and alphabet); existence is the provider's call.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Solana public keys are 32 bytes
const SOLANA_PUBKEY_LEN: usize = 32;

/// Ethereum addresses are 20 bytes, hex encoded
const ETHEREUM_HEX_LEN: usize = 40;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Invalid Solana address '{0}': expected base58-encoded 32-byte key")]
    InvalidSolana(String),

    #[error("Invalid Ethereum address '{0}': expected 0x followed by 40 hex digits")]
    InvalidEthereum(String),
}

/// Supported blockchains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Solana,
    Ethereum,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
        }
    }

    /// Check the address shape for this chain, returning it trimmed
    pub fn validate_address<'a>(&self, address: &'a str) -> Result<&'a str, AddressError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AddressError::Empty);
        }

        match self {
            Chain::Solana => {
                let valid = bs58::decode(address)
                    .into_vec()
                    .map(|bytes| bytes.len() == SOLANA_PUBKEY_LEN)
                    .unwrap_or(false);
                if !valid {
                    return Err(AddressError::InvalidSolana(address.to_string()));
                }
            }
            Chain::Ethereum => {
                let hex = address
                    .strip_prefix("0x")
                    .or_else(|| address.strip_prefix("0X"))
                    .ok_or_else(|| AddressError::InvalidEthereum(address.to_string()))?;
                if hex.len() != ETHEREUM_HEX_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(AddressError::InvalidEthereum(address.to_string()));
                }
            }
        }

        Ok(address)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";
    const USDC_ETH: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn test_valid_solana_address() {
        assert_eq!(Chain::Solana.validate_address(WSOL), Ok(WSOL));
        assert_eq!(Chain::Solana.validate_address("  So11111111111111111111111111111111111111112 "), Ok(WSOL));
    }

    #[test]
    fn test_invalid_solana_address() {
        // '0' and 'l' are outside the base58 alphabet
        assert!(matches!(
            Chain::Solana.validate_address("0xl23"),
            Err(AddressError::InvalidSolana(_))
        ));
        // Decodes, but too short for a public key
        assert!(matches!(
            Chain::Solana.validate_address("So1111"),
            Err(AddressError::InvalidSolana(_))
        ));
        assert!(matches!(
            Chain::Solana.validate_address(USDC_ETH),
            Err(AddressError::InvalidSolana(_))
        ));
    }

    #[test]
    fn test_valid_ethereum_address() {
        assert_eq!(Chain::Ethereum.validate_address(USDC_ETH), Ok(USDC_ETH));
    }

    #[test]
    fn test_invalid_ethereum_address() {
        assert!(matches!(
            Chain::Ethereum.validate_address(WSOL),
            Err(AddressError::InvalidEthereum(_))
        ));
        assert!(matches!(
            Chain::Ethereum.validate_address("0x1234"),
            Err(AddressError::InvalidEthereum(_))
        ));
        assert!(matches!(
            Chain::Ethereum.validate_address("0xZZb86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            Err(AddressError::InvalidEthereum(_))
        ));
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(Chain::Solana.validate_address("   "), Err(AddressError::Empty));
        assert_eq!(Chain::Ethereum.validate_address(""), Err(AddressError::Empty));
    }
}
