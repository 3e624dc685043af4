//! Risk & Recommendation Engine
//!
//! Pure scoring of normalized metrics against fixed heuristic thresholds.
//! No I/O, no clock: identical inputs always yield an identical report.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::metrics::{TokenMetrics, WalletMetrics};

/// Liquidity below this (USD) risks heavy slippage
pub const DEFAULT_MIN_LIQUIDITY_USD: Decimal = dec!(10000);

/// Fewer holders than this suggests a small or inactive community
pub const DEFAULT_MIN_HOLDERS: u64 = 500;

/// Wallets with fewer transactions are poor copy-trading candidates.
///
/// Earlier drafts of the scanner disagreed here (the token path used 100,
/// the wallet path 50). 50 is the canonical value.
pub const DEFAULT_MIN_WALLET_TRANSACTIONS: u64 = 50;

/// Target sell price as a multiple of entry (50% gain)
pub const DEFAULT_TARGET_MULTIPLIER: Decimal = dec!(1.5);

/// Stop-loss price as a multiple of entry (20% loss)
pub const DEFAULT_STOP_LOSS_MULTIPLIER: Decimal = dec!(0.8);

/// Reasons an assessment could not be produced
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Insufficient data: no usable USD price, cannot size a position")]
    InsufficientData,

    #[error("Invalid budget {0}: must be greater than zero")]
    InvalidBudget(Decimal),

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// A single risk finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RiskFlag {
    /// Pool liquidity is below the policy minimum
    LowLiquidity,
    /// Holder count is below the policy minimum or unknown
    FewHolders,
    /// Wallet transaction count is below the policy minimum
    LowWalletActivity,
}

impl RiskFlag {
    /// Human-readable warning for this flag
    pub fn description(&self) -> &'static str {
        match self {
            RiskFlag::LowLiquidity => "High risk: Low liquidity may lead to slippage.",
            RiskFlag::FewHolders => {
                "High risk: Few holders indicate a small or inactive community."
            }
            RiskFlag::LowWalletActivity => {
                "This wallet has low activity. Be cautious when copying trades."
            }
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A trade-sizing suggestion derived from price and budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Quantity purchasable with the whole budget
    BuyQuantity { budget: Decimal, quantity: Decimal },
    /// Exit price for the configured gain
    TargetSell { price: Decimal, gain_pct: Decimal },
    /// Exit price for the configured loss tolerance
    StopLoss { price: Decimal, loss_pct: Decimal },
}

/// Half-up rounding for display
fn rounded(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::BuyQuantity { budget, quantity } => write!(
                f,
                "With a ${} budget, you can buy approximately {:.2} tokens.",
                budget.normalize(),
                rounded(*quantity, 2)
            ),
            Recommendation::TargetSell { price, gain_pct } => write!(
                f,
                "Consider selling at a target price of ${:.4} for a {}% gain.",
                rounded(*price, 4),
                gain_pct.normalize()
            ),
            Recommendation::StopLoss { price, loss_pct } => write!(
                f,
                "Set a stop-loss at ${:.4} to limit losses to {}%.",
                rounded(*price, 4),
                loss_pct.normalize()
            ),
        }
    }
}

/// Engine output: ordered flags plus ordered recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskReport {
    pub flags: Vec<RiskFlag>,
    pub recommendations: Vec<Recommendation>,
}

impl RiskReport {
    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }

    /// Suggested quantity, if the report carries sizing
    pub fn suggested_quantity(&self) -> Option<Decimal> {
        self.recommendations.iter().find_map(|r| match r {
            Recommendation::BuyQuantity { quantity, .. } => Some(*quantity),
            _ => None,
        })
    }

    pub fn target_sell_price(&self) -> Option<Decimal> {
        self.recommendations.iter().find_map(|r| match r {
            Recommendation::TargetSell { price, .. } => Some(*price),
            _ => None,
        })
    }

    pub fn stop_loss_price(&self) -> Option<Decimal> {
        self.recommendations.iter().find_map(|r| match r {
            Recommendation::StopLoss { price, .. } => Some(*price),
            _ => None,
        })
    }
}

/// Thresholds and multipliers used by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicy {
    pub min_liquidity_usd: Decimal,
    pub min_holders: u64,
    pub min_wallet_transactions: u64,
    pub target_multiplier: Decimal,
    pub stop_loss_multiplier: Decimal,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            min_liquidity_usd: DEFAULT_MIN_LIQUIDITY_USD,
            min_holders: DEFAULT_MIN_HOLDERS,
            min_wallet_transactions: DEFAULT_MIN_WALLET_TRANSACTIONS,
            target_multiplier: DEFAULT_TARGET_MULTIPLIER,
            stop_loss_multiplier: DEFAULT_STOP_LOSS_MULTIPLIER,
        }
    }
}

impl RiskPolicy {
    fn liquidity_flag(&self, metrics: &TokenMetrics) -> Option<RiskFlag> {
        match metrics.liquidity_usd {
            Some(liquidity) if liquidity < self.min_liquidity_usd => Some(RiskFlag::LowLiquidity),
            _ => None,
        }
    }

    fn holders_flag(&self, metrics: &TokenMetrics) -> Option<RiskFlag> {
        // Unknown holder count is treated as few holders
        match metrics.holder_count {
            Some(holders) if holders >= self.min_holders => None,
            _ => Some(RiskFlag::FewHolders),
        }
    }

    fn sizing(&self, price: Decimal, budget: Decimal) -> Result<Vec<Recommendation>, AssessmentError> {
        let quantity = budget
            .checked_div(price)
            .ok_or(AssessmentError::Overflow("quantity"))?;
        let target = price
            .checked_mul(self.target_multiplier)
            .ok_or(AssessmentError::Overflow("target price"))?;
        let stop = price
            .checked_mul(self.stop_loss_multiplier)
            .ok_or(AssessmentError::Overflow("stop-loss price"))?;

        Ok(vec![
            Recommendation::BuyQuantity { budget, quantity },
            Recommendation::TargetSell {
                price: target,
                gain_pct: (self.target_multiplier - Decimal::ONE) * Decimal::ONE_HUNDRED,
            },
            Recommendation::StopLoss {
                price: stop,
                loss_pct: (Decimal::ONE - self.stop_loss_multiplier) * Decimal::ONE_HUNDRED,
            },
        ])
    }
}

/// Score a token and size a position for `budget` USD.
///
/// Fails with `InsufficientData` when the metrics carry no positive price and
/// with `InvalidBudget` when `budget <= 0`.
pub fn assess_token(
    metrics: &TokenMetrics,
    budget: Decimal,
    policy: &RiskPolicy,
) -> Result<RiskReport, AssessmentError> {
    let price = match metrics.price_usd {
        Some(price) if price > Decimal::ZERO => price,
        _ => return Err(AssessmentError::InsufficientData),
    };
    if budget <= Decimal::ZERO {
        return Err(AssessmentError::InvalidBudget(budget));
    }

    let flags = [policy.liquidity_flag(metrics), policy.holders_flag(metrics)]
        .into_iter()
        .flatten()
        .collect();

    Ok(RiskReport {
        flags,
        recommendations: policy.sizing(price, budget)?,
    })
}

/// Score a wallet as a copy-trading candidate
pub fn assess_wallet(metrics: &WalletMetrics, policy: &RiskPolicy) -> RiskReport {
    let mut flags = Vec::new();
    if metrics.transaction_count() < policy.min_wallet_transactions {
        flags.push(RiskFlag::LowWalletActivity);
    }

    RiskReport {
        flags,
        recommendations: Vec::new(),
    }
}

/// `assess_token` under `RiskPolicy::default()`
pub fn assess_token_default(
    metrics: &TokenMetrics,
    budget: Decimal,
) -> Result<RiskReport, AssessmentError> {
    assess_token(metrics, budget, &RiskPolicy::default())
}

/// `assess_wallet` under `RiskPolicy::default()`
pub fn assess_wallet_default(metrics: &WalletMetrics) -> RiskReport {
    assess_wallet(metrics, &RiskPolicy::default())
}
