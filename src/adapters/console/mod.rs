//! Console Renderer
//!
//! Turns scan results into the plain-text reports shown to the operator.
//! Everything here returns a `String`; printing is left to the caller.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::application::{TokenScan, WalletScan};
use crate::domain::metrics::TokenMetrics;
use crate::domain::risk::{RiskFlag, RiskReport};
use crate::error::ScoutError;

pub const CLOSING_LINE: &str = "Trade cautiously and monitor price movements closely!";
pub const HIGH_ACTIVITY_LINE: &str =
    "This wallet has high activity and may belong to an experienced trader.";

const NOT_AVAILABLE: &str = "N/A";

/// Section header stamped with the time the scan ran
pub fn header(title: &str, at: DateTime<Utc>) -> String {
    format!("--- {} --- ({})", title, at.format("%Y-%m-%d %H:%M:%S UTC"))
}

struct OrNa<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for OrNa<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}

fn usd(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${}", v.normalize()),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{}%", v.normalize()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Metrics block of a token report
pub fn token_details(address: &str, metrics: &TokenMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Token Address: {}", address);
    let _ = writeln!(out, "Token Name: {}", OrNa(metrics.name.as_deref()));
    let _ = writeln!(out, "Symbol: {}", OrNa(metrics.symbol.as_deref()));
    let _ = writeln!(out, "Number of Holders: {}", OrNa(metrics.holder_count));
    let _ = writeln!(out, "Price (USD): {}", usd(metrics.price_usd));
    let _ = writeln!(out, "Liquidity (USD): {}", usd(metrics.liquidity_usd));
    let _ = writeln!(out, "24h Volume (USD): {}", usd(metrics.volume_24h_usd));
    let _ = writeln!(out, "24h Price Change: {}", percent(metrics.price_change_24h_pct));
    let _ = writeln!(
        out,
        "Total Supply: {}",
        OrNa(metrics.total_supply.map(|s| s.normalize()))
    );
    out
}

/// Flags and recommendations of a token report
pub fn risk_section(report: &RiskReport) -> String {
    let mut out = String::from("Risk Assessment:\n");
    if report.flags.is_empty() {
        out.push_str("  No risk flags raised.\n");
    }
    for flag in &report.flags {
        let _ = writeln!(out, "  - {}", flag);
    }

    out.push_str("Investment Recommendations:\n");
    for rec in &report.recommendations {
        let _ = writeln!(out, "  - {}", rec);
    }
    out
}

/// Full token report, including the assessment failure if sizing was impossible
pub fn render_token_scan(scan: &TokenScan, at: DateTime<Utc>) -> String {
    let mut out = header(&format!("Token Scan ({})", scan.chain), at);
    out.push('\n');
    out.push_str(&token_details(&scan.address, &scan.metrics));
    out.push('\n');

    match &scan.assessment {
        Ok(report) => out.push_str(&risk_section(report)),
        Err(e) => {
            let err = ScoutError::Assessment(e.clone());
            let _ = writeln!(out, "Risk Assessment unavailable: {}", err.user_message());
        }
    }

    out.push('\n');
    out.push_str(CLOSING_LINE);
    out.push('\n');
    out
}

/// Full wallet report showing the first `top` holdings
pub fn render_wallet_scan(scan: &WalletScan, top: usize, at: DateTime<Utc>) -> String {
    let wallet = &scan.metrics;
    let mut out = header("Wallet Analysis", at);
    out.push('\n');
    let _ = writeln!(out, "Wallet Address: {}", wallet.address());
    let _ = writeln!(out, "Transaction Count: {}", wallet.transaction_count());
    let _ = writeln!(out, "Total Balance: {} SOL", wallet.total_balance().normalize());

    let holdings = wallet.top_holdings(top);
    if holdings.is_empty() {
        out.push_str("Top Holdings: none\n");
    } else {
        let _ = writeln!(out, "Top Holdings ({} of {}):", holdings.len(), wallet.holdings().len());
        for holding in holdings {
            let _ = writeln!(
                out,
                "  - {}: {}",
                holding.token_address,
                holding.amount.normalize()
            );
        }
    }

    out.push('\n');
    if scan.report.has_flag(RiskFlag::LowWalletActivity) {
        let _ = writeln!(out, "{}", RiskFlag::LowWalletActivity);
    } else {
        let _ = writeln!(out, "{}", HIGH_ACTIVITY_LINE);
    }
    out
}
