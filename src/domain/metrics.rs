//! Canonical Metrics Models
//!
//! Provider-independent records produced by the normalizer and consumed by
//! the risk engine. Every provider fills a different subset of fields, so
//! token fields are independently optional.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of holdings the console view shows for a wallet
pub const DEFAULT_TOP_HOLDINGS: usize = 5;

/// Errors raised when constructing a model from invalid values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Wallet address cannot be empty")]
    EmptyAddress,

    #[error("Wallet balance cannot be negative: {0}")]
    NegativeBalance(Decimal),
}

/// Market and metadata snapshot for a single token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetrics {
    /// Current price in USD
    pub price_usd: Option<Decimal>,
    /// Pool liquidity in USD
    pub liquidity_usd: Option<Decimal>,
    /// Trading volume over the last 24 hours in USD
    pub volume_24h_usd: Option<Decimal>,
    /// Price change over the last 24 hours, in percent
    pub price_change_24h_pct: Option<Decimal>,
    /// Number of holders (None = unknown, distinct from zero)
    pub holder_count: Option<u64>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// Total token supply as reported by Etherscan
    pub total_supply: Option<Decimal>,
}

impl TokenMetrics {
    /// True when sizing math is possible
    pub fn is_price_bearing(&self) -> bool {
        self.price_usd.is_some()
    }

    /// True when no provider supplied anything at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine two partial snapshots of the same token.
    ///
    /// Fields already present in `self` win; absent fields are filled from
    /// `other`. Used when pricing and metadata come from different providers.
    pub fn merge(self, other: TokenMetrics) -> TokenMetrics {
        TokenMetrics {
            price_usd: self.price_usd.or(other.price_usd),
            liquidity_usd: self.liquidity_usd.or(other.liquidity_usd),
            volume_24h_usd: self.volume_24h_usd.or(other.volume_24h_usd),
            price_change_24h_pct: self.price_change_24h_pct.or(other.price_change_24h_pct),
            holder_count: self.holder_count.or(other.holder_count),
            name: self.name.or(other.name),
            symbol: self.symbol.or(other.symbol),
            total_supply: self.total_supply.or(other.total_supply),
        }
    }
}

/// A single token balance held by a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub token_address: String,
    pub amount: Decimal,
}

impl Holding {
    pub fn new(token_address: impl Into<String>, amount: Decimal) -> Self {
        Self {
            token_address: token_address.into(),
            amount,
        }
    }
}

/// Activity and balance snapshot for a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletMetrics {
    address: String,
    transaction_count: u64,
    /// Native balance (SOL). Reported independently of `holdings`.
    total_balance: Decimal,
    /// Token balances in provider order
    holdings: Vec<Holding>,
}

impl WalletMetrics {
    /// Build a wallet snapshot, rejecting an empty address or negative balance
    pub fn new(
        address: impl Into<String>,
        transaction_count: u64,
        total_balance: Decimal,
        holdings: Vec<Holding>,
    ) -> Result<Self, MetricsError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(MetricsError::EmptyAddress);
        }
        if total_balance < Decimal::ZERO {
            return Err(MetricsError::NegativeBalance(total_balance));
        }

        Ok(Self {
            address,
            transaction_count,
            total_balance,
            holdings,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn transaction_count(&self) -> u64 {
        self.transaction_count
    }

    pub fn total_balance(&self) -> Decimal {
        self.total_balance
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// First `n` holdings in provider order
    pub fn top_holdings(&self, n: usize) -> &[Holding] {
        &self.holdings[..n.min(self.holdings.len())]
    }
}
