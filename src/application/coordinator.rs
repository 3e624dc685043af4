//! Scan Coordinator
//!
//! Glues the fetch port, the normalizer and the risk engine together for a
//! single token or wallet lookup:
//!
//! ```text
//! address -> validate -> RawFetcher -> normalize::parse -> assess -> scan result
//! ```
//!
//! Every failure is returned to the caller; nothing here retries or prints.

use rust_decimal::Decimal;

use crate::config::Config;
use crate::domain::address::Chain;
use crate::domain::metrics::{TokenMetrics, WalletMetrics};
use crate::domain::risk::{assess_token, assess_wallet, AssessmentError, RiskPolicy, RiskReport};
use crate::error::{Result, ScoutError};
use crate::normalize;
use crate::ports::{FetchRequest, Provider, RawFetcher};

/// API keys threaded into each request
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub solscan: Option<String>,
    pub etherscan: Option<String>,
}

impl Credentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            solscan: config.credentials.get_solscan_api_key(),
            etherscan: config.credentials.get_etherscan_api_key(),
        }
    }

    fn for_provider(&self, provider: Provider) -> Option<String> {
        match provider {
            Provider::SolscanTokenMeta | Provider::SolscanAccount => self.solscan.clone(),
            Provider::Etherscan => self.etherscan.clone(),
            Provider::Dexscreener => None,
        }
    }
}

/// Outcome of a token scan.
///
/// Metrics are always available once the fetch succeeded; the assessment
/// may still fail (e.g. a metadata-only provider gave no price).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenScan {
    pub chain: Chain,
    pub address: String,
    pub budget: Decimal,
    pub metrics: TokenMetrics,
    pub assessment: std::result::Result<RiskReport, AssessmentError>,
}

impl TokenScan {
    /// The report, or the assessment failure as a `ScoutError`
    pub fn into_report(self) -> Result<RiskReport> {
        self.assessment.map_err(ScoutError::from)
    }
}

/// Outcome of a wallet scan
#[derive(Debug, Clone, PartialEq)]
pub struct WalletScan {
    pub metrics: WalletMetrics,
    pub report: RiskReport,
}

/// Provider used for a plain (single-request) token scan
pub fn primary_provider(chain: Chain) -> Provider {
    match chain {
        Chain::Solana => Provider::SolscanTokenMeta,
        Chain::Ethereum => Provider::Dexscreener,
    }
}

/// Provider that supplements Dexscreener pricing in a combined scan
pub fn metadata_provider(chain: Chain) -> Provider {
    match chain {
        Chain::Solana => Provider::SolscanTokenMeta,
        Chain::Ethereum => Provider::Etherscan,
    }
}

pub struct Coordinator<F: RawFetcher> {
    fetcher: F,
    policy: RiskPolicy,
    credentials: Credentials,
}

impl<F: RawFetcher> Coordinator<F> {
    pub fn new(fetcher: F, policy: RiskPolicy, credentials: Credentials) -> Self {
        Self {
            fetcher,
            policy,
            credentials,
        }
    }

    /// Policy and credentials taken from a loaded configuration
    pub fn from_config(fetcher: F, config: &Config) -> Result<Self> {
        Ok(Self::new(fetcher, config.risk_policy()?, Credentials::from_config(config)))
    }

    async fn fetch_token(&self, provider: Provider, address: &str) -> Result<TokenMetrics> {
        let request = FetchRequest::new(provider, address)
            .with_credential(self.credentials.for_provider(provider));
        let payload = self.fetcher.fetch_raw(request).await?;
        Ok(normalize::parse_token(&payload)?)
    }

    fn check_budget(budget: Decimal) -> Result<()> {
        if budget <= Decimal::ZERO {
            return Err(AssessmentError::InvalidBudget(budget).into());
        }
        Ok(())
    }

    fn finish(&self, chain: Chain, address: &str, budget: Decimal, metrics: TokenMetrics) -> TokenScan {
        let assessment = assess_token(&metrics, budget, &self.policy);
        match &assessment {
            Ok(report) => tracing::info!(
                %chain,
                address,
                flags = report.flags.len(),
                "token assessed"
            ),
            Err(e) => tracing::info!(%chain, address, "token not assessable: {}", e),
        }

        TokenScan {
            chain,
            address: address.to_string(),
            budget,
            metrics,
            assessment,
        }
    }

    /// Scan a token with one request to the chain's primary provider
    pub async fn scan_token(&self, chain: Chain, address: &str, budget: Decimal) -> Result<TokenScan> {
        let address = chain.validate_address(address)?;
        Self::check_budget(budget)?;

        let provider = primary_provider(chain);
        let metrics = self.fetch_token(provider, address).await?;
        if !metrics.is_price_bearing() {
            tracing::info!(%provider, "no pricing in response; a combined scan adds Dexscreener pricing");
        }
        Ok(self.finish(chain, address, budget, metrics))
    }

    /// Scan a token with Dexscreener pricing plus chain metadata.
    ///
    /// The pricing request must succeed. A failed metadata request is logged
    /// and the scan continues with pricing alone.
    pub async fn scan_token_combined(
        &self,
        chain: Chain,
        address: &str,
        budget: Decimal,
    ) -> Result<TokenScan> {
        let address = chain.validate_address(address)?;
        Self::check_budget(budget)?;

        let priced = self.fetch_token(Provider::Dexscreener, address).await?;

        let provider = metadata_provider(chain);
        let metrics = match self.fetch_token(provider, address).await {
            Ok(meta) if meta.is_empty() => {
                tracing::debug!(%provider, "metadata lookup returned no usable fields");
                priced
            }
            Ok(meta) => priced.merge(meta),
            Err(e) => {
                tracing::warn!(%provider, "metadata lookup failed, continuing without it: {}", e);
                priced
            }
        };

        Ok(self.finish(chain, address, budget, metrics))
    }

    /// Analyze a Solana wallet as a copy-trading candidate
    pub async fn analyze_wallet(&self, address: &str) -> Result<WalletScan> {
        let address = Chain::Solana.validate_address(address)?;

        let request = FetchRequest::new(Provider::SolscanAccount, address)
            .with_credential(self.credentials.for_provider(Provider::SolscanAccount));
        let payload = self.fetcher.fetch_raw(request).await?;
        let metrics = normalize::parse_wallet(&payload)?;
        let report = assess_wallet(&metrics, &self.policy);

        tracing::info!(
            address,
            tx_count = metrics.transaction_count(),
            flags = report.flags.len(),
            "wallet assessed"
        );

        Ok(WalletScan { metrics, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::RiskFlag;
    use crate::ports::provider::MockRawFetcher;
    use crate::ports::{FetchError, RawPayload};
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const ETH_TOKEN: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
    const SOL_TOKEN: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
    const SOL_WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    fn coordinator(mock: MockRawFetcher) -> Coordinator<MockRawFetcher> {
        Coordinator::new(mock, RiskPolicy::default(), Credentials::default())
    }

    fn respond(body: serde_json::Value) -> impl Fn(FetchRequest) -> std::result::Result<RawPayload, FetchError> {
        move |req: FetchRequest| Ok(RawPayload::new(req.provider, req.subject, body.clone()))
    }

    #[tokio::test]
    async fn test_ethereum_scan_uses_dexscreener() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .with(eq(FetchRequest::new(Provider::Dexscreener, ETH_TOKEN)))
            .times(1)
            .returning(respond(json!({
                "pair": {
                    "priceUsd": "2.0",
                    "liquidity": {"usd": 5000},
                    "volume": {"h24": 1000},
                    "priceChange": {"h24": 4.2}
                }
            })));

        let scan = coordinator(mock)
            .scan_token(Chain::Ethereum, ETH_TOKEN, dec!(10))
            .await
            .unwrap();

        let report = scan.into_report().unwrap();
        // Dexscreener has no holder data, so holders are unknown
        assert_eq!(report.flags, vec![RiskFlag::LowLiquidity, RiskFlag::FewHolders]);
        assert_eq!(report.suggested_quantity(), Some(dec!(5)));
    }

    #[tokio::test]
    async fn test_solana_scan_without_price_is_insufficient() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .withf(|req| req.provider == Provider::SolscanTokenMeta)
            .times(1)
            .returning(respond(json!({"status": 1, "name": "Bonk", "symbol": "BONK", "holder_count": 900})));

        let scan = coordinator(mock)
            .scan_token(Chain::Solana, SOL_TOKEN, dec!(10))
            .await
            .unwrap();

        assert_eq!(scan.metrics.symbol.as_deref(), Some("BONK"));
        assert_eq!(scan.assessment, Err(AssessmentError::InsufficientData));

        // A partial report still fails the scan as a whole
        let error = scan.into_report().unwrap_err();
        assert!(matches!(error, ScoutError::Assessment(AssessmentError::InsufficientData)));
        assert!(error.user_message().starts_with("No USD price is available"));
    }

    #[tokio::test]
    async fn test_invalid_address_skips_fetch() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw().times(0);

        let result = coordinator(mock)
            .scan_token(Chain::Ethereum, "not-an-address", dec!(10))
            .await;
        assert!(matches!(result, Err(ScoutError::Address(_))));
    }

    #[tokio::test]
    async fn test_invalid_budget_skips_fetch() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw().times(0);

        let result = coordinator(mock)
            .scan_token(Chain::Ethereum, ETH_TOKEN, dec!(-5))
            .await;
        assert!(matches!(
            result,
            Err(ScoutError::Assessment(AssessmentError::InvalidBudget(_)))
        ));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw().times(1).returning(|req| {
            Err(FetchError::HttpError {
                provider: req.provider,
                status: 502,
            })
        });

        let result = coordinator(mock)
            .scan_token(Chain::Ethereum, ETH_TOKEN, dec!(10))
            .await;
        assert!(matches!(
            result,
            Err(ScoutError::Fetch(FetchError::HttpError { status: 502, .. }))
        ));
    }

    #[tokio::test]
    async fn test_combined_scan_merges_holders() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .withf(|req| req.provider == Provider::Dexscreener)
            .times(1)
            .returning(respond(json!({"pair": {"priceUsd": "0.25", "liquidity": {"usd": 80000}}})));
        mock.expect_fetch_raw()
            .withf(|req| req.provider == Provider::SolscanTokenMeta)
            .times(1)
            .returning(respond(json!({"status": 1, "symbol": "BONK", "holder_count": 12000})));

        let scan = coordinator(mock)
            .scan_token_combined(Chain::Solana, SOL_TOKEN, dec!(100))
            .await
            .unwrap();

        assert_eq!(scan.metrics.holder_count, Some(12000));
        assert_eq!(scan.metrics.symbol.as_deref(), Some("BONK"));
        let report = scan.into_report().unwrap();
        assert!(report.is_clean());
        assert_eq!(report.suggested_quantity(), Some(dec!(400)));
    }

    #[tokio::test]
    async fn test_combined_scan_survives_metadata_failure() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .withf(|req| req.provider == Provider::Dexscreener)
            .times(1)
            .returning(respond(json!({"pair": {"priceUsd": "3"}})));
        mock.expect_fetch_raw()
            .withf(|req| req.provider == Provider::Etherscan)
            .times(1)
            .returning(|_| Err(FetchError::NetworkTimeout(Provider::Etherscan)));

        let scan = coordinator(mock)
            .scan_token_combined(Chain::Ethereum, ETH_TOKEN, dec!(9))
            .await
            .unwrap();

        assert_eq!(scan.metrics.total_supply, None);
        assert_eq!(scan.into_report().unwrap().suggested_quantity(), Some(dec!(3)));
    }

    #[tokio::test]
    async fn test_credentials_are_threaded_per_provider() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .withf(|req| req.provider == Provider::Dexscreener && req.credential.is_none())
            .times(1)
            .returning(respond(json!({"pair": {"priceUsd": "3"}})));
        mock.expect_fetch_raw()
            .withf(|req| {
                req.provider == Provider::Etherscan && req.credential.as_deref() == Some("ETHKEY")
            })
            .times(1)
            .returning(respond(json!({"status": "1", "message": "OK", "result": "1000"})));

        let credentials = Credentials {
            solscan: Some("SOLKEY".to_string()),
            etherscan: Some("ETHKEY".to_string()),
        };
        let coordinator = Coordinator::new(mock, RiskPolicy::default(), credentials);
        let scan = coordinator
            .scan_token_combined(Chain::Ethereum, ETH_TOKEN, dec!(9))
            .await
            .unwrap();

        assert_eq!(scan.metrics.total_supply, Some(dec!(1000)));
        // Supply is not a holder count
        assert_eq!(scan.metrics.holder_count, None);
    }

    #[tokio::test]
    async fn test_wallet_analysis() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .with(eq(FetchRequest::new(Provider::SolscanAccount, SOL_WALLET)))
            .times(1)
            .returning(respond(json!({"status": 1, "tx_count": 40, "balance": {"total": 1.5}})));

        let scan = coordinator(mock).analyze_wallet(SOL_WALLET).await.unwrap();
        assert_eq!(scan.metrics.address(), SOL_WALLET);
        assert_eq!(scan.report.flags, vec![RiskFlag::LowWalletActivity]);
    }

    #[test]
    fn test_from_config_rejects_unrepresentable_policy() {
        let mut config = Config::default();
        config.risk.min_liquidity_usd = f64::MAX;

        let result = Coordinator::from_config(MockRawFetcher::new(), &config);
        let error = result.err().unwrap();
        assert!(matches!(error, ScoutError::Config(_)));
        assert!(error.user_message().starts_with("Configuration error"));
    }

    #[test]
    fn test_from_config_uses_configured_thresholds() {
        let mut config = Config::default();
        config.risk.min_holders = 42;
        config.credentials.etherscan_api_key = Some("KEY".to_string());

        let coordinator = Coordinator::from_config(MockRawFetcher::new(), &config).unwrap();
        assert_eq!(coordinator.policy.min_holders, 42);
        assert_eq!(coordinator.credentials.etherscan.as_deref(), Some("KEY"));
    }

    #[tokio::test]
    async fn test_wallet_not_found() {
        let mut mock = MockRawFetcher::new();
        mock.expect_fetch_raw()
            .times(1)
            .returning(respond(json!({"status": 0})));

        let result = coordinator(mock).analyze_wallet(SOL_WALLET).await;
        assert!(matches!(
            result,
            Err(ScoutError::Parse(crate::normalize::ParseError::MalformedResponse { .. }))
        ));
    }
}
