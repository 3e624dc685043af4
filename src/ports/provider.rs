//! Provider fetch port
//!
//! The core never issues HTTP requests itself. Adapters implement
//! `RawFetcher` and hand back the untouched JSON body tagged with where it
//! came from.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Upstream data sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// Dexscreener pair data (price, liquidity, volume)
    Dexscreener,
    /// Solscan token metadata (name, symbol, holders)
    SolscanTokenMeta,
    /// Solscan account data (transactions, balance, token holdings)
    SolscanAccount,
    /// Etherscan token supply
    Etherscan,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Dexscreener => "Dexscreener",
            Provider::SolscanTokenMeta => "Solscan token meta",
            Provider::SolscanAccount => "Solscan account",
            Provider::Etherscan => "Etherscan",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transport-level failures reported by an adapter
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{provider} returned HTTP status {status}")]
    HttpError { provider: Provider, status: u16 },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request to {0} timed out")]
    NetworkTimeout(Provider),
}

/// One lookup against one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub provider: Provider,
    /// Token mint/contract or wallet address being looked up
    pub subject: String,
    /// Optional API key, passed through opaquely
    pub credential: Option<String>,
}

impl FetchRequest {
    pub fn new(provider: Provider, subject: impl Into<String>) -> Self {
        Self {
            provider,
            subject: subject.into(),
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }
}

/// Untouched provider response plus its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload {
    pub provider: Provider,
    pub subject: String,
    pub body: Value,
}

impl RawPayload {
    pub fn new(provider: Provider, subject: impl Into<String>, body: Value) -> Self {
        Self {
            provider,
            subject: subject.into(),
            body,
        }
    }
}

/// Port for fetching raw provider payloads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawFetcher: Send + Sync {
    /// Perform a single lookup. Non-2xx responses map to `HttpError`,
    /// transport failures to `NetworkError` / `NetworkTimeout`.
    async fn fetch_raw(&self, request: FetchRequest) -> Result<RawPayload, FetchError>;
}
