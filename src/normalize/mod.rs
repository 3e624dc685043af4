//! Provider Response Parser
//!
//! Maps raw provider payloads onto the canonical metrics models:
//!
//! | Provider | Output | Fields |
//! |---|---|---|
//! | Dexscreener | `TokenMetrics` | price, liquidity, 24h volume, 24h change |
//! | Solscan token meta | `TokenMetrics` | name, symbol, holder count |
//! | Solscan account | `WalletMetrics` | tx count, balance, holdings |
//! | Etherscan | `TokenMetrics` | total supply |
//!
//! Absent fields stay `None`. Upstream HTTP status codes are the adapter's
//! business; by the time a payload reaches here it is just JSON.

mod dexscreener;
mod etherscan;
pub mod fields;
mod solscan;

use thiserror::Error;

use crate::domain::metrics::{TokenMetrics, WalletMetrics};
use crate::ports::{Provider, RawPayload};

pub use dexscreener::parse_pair;
pub use etherscan::parse_token_supply;
pub use solscan::{parse_account, parse_token_meta};

/// Parse failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed {provider} response: {reason}")]
    MalformedResponse { provider: Provider, reason: String },

    #[error("Invalid numeric value for '{field}': {value}")]
    InvalidNumericField { field: String, value: String },
}

/// Normalized result of one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metrics {
    Token(TokenMetrics),
    Wallet(WalletMetrics),
}

impl Metrics {
    pub fn into_token(self) -> Option<TokenMetrics> {
        match self {
            Metrics::Token(metrics) => Some(metrics),
            Metrics::Wallet(_) => None,
        }
    }

    pub fn into_wallet(self) -> Option<WalletMetrics> {
        match self {
            Metrics::Wallet(metrics) => Some(metrics),
            Metrics::Token(_) => None,
        }
    }
}

/// Normalize one provider payload
pub fn parse(payload: &RawPayload) -> Result<Metrics, ParseError> {
    tracing::debug!(provider = %payload.provider, subject = %payload.subject, "normalizing payload");

    match payload.provider {
        Provider::Dexscreener => parse_pair(&payload.body).map(Metrics::Token),
        Provider::SolscanTokenMeta => parse_token_meta(&payload.body).map(Metrics::Token),
        Provider::SolscanAccount => {
            parse_account(&payload.subject, &payload.body).map(Metrics::Wallet)
        }
        Provider::Etherscan => parse_token_supply(&payload.body).map(Metrics::Token),
    }
}

/// Normalize a payload that must describe a token
pub fn parse_token(payload: &RawPayload) -> Result<TokenMetrics, ParseError> {
    parse(payload)?
        .into_token()
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: payload.provider,
            reason: "expected token data, got wallet data".to_string(),
        })
}

/// Normalize a payload that must describe a wallet
pub fn parse_wallet(payload: &RawPayload) -> Result<WalletMetrics, ParseError> {
    parse(payload)?
        .into_wallet()
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: payload.provider,
            reason: "expected wallet data, got token data".to_string(),
        })
}
