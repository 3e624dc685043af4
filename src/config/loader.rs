//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/scout.toml.
//! Every section is optional; omitted values fall back to the built-in defaults.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::risk::RiskPolicy;

/// Main configuration structure matching config/scout.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub risk: RiskSection,
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub providers: ProvidersSection,
    #[serde(default)]
    pub credentials: CredentialsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Risk thresholds and exit multipliers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskSection {
    /// Liquidity (USD) below which a token is flagged
    pub min_liquidity_usd: f64,
    /// Holder count below which a token is flagged
    pub min_holders: u64,
    /// Transaction count below which a wallet is flagged
    pub min_wallet_transactions: u64,
    /// Target sell price as a multiple of entry (1.5 = +50%)
    pub target_multiplier: f64,
    /// Stop-loss price as a multiple of entry (0.8 = -20%)
    pub stop_loss_multiplier: f64,
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            min_liquidity_usd: 10_000.0,
            min_holders: 500,
            min_wallet_transactions: 50,
            target_multiplier: 1.5,
            stop_loss_multiplier: 0.8,
        }
    }
}

/// Scan behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    /// Budget in USD used when none is given on the command line
    pub default_budget: f64,
    /// Fetch pricing and metadata from two providers and merge them
    pub combined: bool,
    /// Number of wallet holdings shown
    pub top_holdings: usize,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            default_budget: 10.0,
            combined: false,
            top_holdings: crate::domain::metrics::DEFAULT_TOP_HOLDINGS,
        }
    }
}

/// Provider endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersSection {
    pub dexscreener_url: String,
    pub solscan_url: String,
    pub etherscan_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProvidersSection {
    fn default() -> Self {
        Self {
            dexscreener_url: "https://api.dexscreener.io".to_string(),
            solscan_url: "https://api.solscan.io".to_string(),
            etherscan_url: "https://api.etherscan.io".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Optional API keys (prefer .env over committing these)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsSection {
    pub solscan_api_key: Option<String>,
    pub etherscan_api_key: Option<String>,
}

impl CredentialsSection {
    /// Get Solscan key with environment variable fallback
    /// Checks SOLSCAN_API_KEY env var if config value is empty/None
    pub fn get_solscan_api_key(&self) -> Option<String> {
        non_empty(&self.solscan_api_key).or_else(|| env_key("SOLSCAN_API_KEY"))
    }

    /// Get Etherscan key with environment variable fallback
    /// Checks ETHERSCAN_API_KEY env var if config value is empty/None
    pub fn get_etherscan_api_key(&self) -> Option<String> {
        non_empty(&self.etherscan_api_key).or_else(|| env_key("ETHERSCAN_API_KEY"))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn env_key(name: &str) -> Option<String> {
    non_empty(&std::env::var(name).ok())
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration, falling back to defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}

fn to_decimal(name: &str, value: f64) -> Result<Decimal, ConfigError> {
    Decimal::from_f64(value)
        .ok_or_else(|| ConfigError::ValidationError(format!("{} is not a finite number: {}", name, value)))
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate risk section
        if self.risk.min_liquidity_usd.is_nan() || self.risk.min_liquidity_usd < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_liquidity_usd must be >= 0, got {}",
                self.risk.min_liquidity_usd
            )));
        }

        if self.risk.target_multiplier.is_nan() || self.risk.target_multiplier <= 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "target_multiplier must be > 1, got {}",
                self.risk.target_multiplier
            )));
        }

        let stop_loss = self.risk.stop_loss_multiplier;
        if stop_loss.is_nan() || stop_loss <= 0.0 || stop_loss >= 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "stop_loss_multiplier must be between 0 and 1, got {}",
                self.risk.stop_loss_multiplier
            )));
        }

        // Validate scan section
        if self.scan.default_budget.is_nan() || self.scan.default_budget <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "default_budget must be > 0, got {}",
                self.scan.default_budget
            )));
        }

        if self.scan.top_holdings == 0 {
            return Err(ConfigError::ValidationError(
                "top_holdings must be > 0".to_string(),
            ));
        }

        // Validate providers
        for (name, url) in [
            ("dexscreener_url", &self.providers.dexscreener_url),
            ("solscan_url", &self.providers.solscan_url),
            ("etherscan_url", &self.providers.etherscan_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        if self.providers.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        self.risk_policy()?;
        self.default_budget()?;
        Ok(())
    }

    /// Risk policy built from the `[risk]` section
    pub fn risk_policy(&self) -> Result<RiskPolicy, ConfigError> {
        Ok(RiskPolicy {
            min_liquidity_usd: to_decimal("min_liquidity_usd", self.risk.min_liquidity_usd)?,
            min_holders: self.risk.min_holders,
            min_wallet_transactions: self.risk.min_wallet_transactions,
            target_multiplier: to_decimal("target_multiplier", self.risk.target_multiplier)?,
            stop_loss_multiplier: to_decimal("stop_loss_multiplier", self.risk.stop_loss_multiplier)?,
        })
    }

    /// Default budget as a decimal
    pub fn default_budget(&self) -> Result<Decimal, ConfigError> {
        to_decimal("default_budget", self.scan.default_budget)
    }
}
