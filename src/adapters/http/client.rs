//! Provider HTTP Client
//!
//! One GET per `FetchRequest`, bounded by a timeout. No retries: a failed
//! request is reported to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::loader::ProvidersSection;
use crate::ports::{FetchError, FetchRequest, Provider, RawFetcher, RawPayload};

/// Configuration for the HttpFetcher
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    pub dexscreener_url: String,
    pub solscan_url: String,
    pub etherscan_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self::from(&ProvidersSection::default())
    }
}

impl From<&ProvidersSection> for HttpFetcherConfig {
    fn from(section: &ProvidersSection) -> Self {
        Self {
            dexscreener_url: section.dexscreener_url.clone(),
            solscan_url: section.solscan_url.clone(),
            etherscan_url: section.etherscan_url.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
        }
    }
}

/// reqwest-backed implementation of the fetch port
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    config: HttpFetcherConfig,
    http: Client,
}

impl HttpFetcher {
    /// Create a new HttpFetcher with default endpoints
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(HttpFetcherConfig::default())
    }

    /// Create a new HttpFetcher with custom configuration
    pub fn with_config(config: HttpFetcherConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("token-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Build the endpoint URL for a request
    pub fn endpoint(&self, request: &FetchRequest) -> Result<Url, FetchError> {
        let subject = request.subject.as_str();
        let parsed = match request.provider {
            Provider::Dexscreener => Url::parse(&format!(
                "{}/latest/dex/tokens/{}",
                trim_base(&self.config.dexscreener_url),
                subject
            )),
            Provider::SolscanTokenMeta => Url::parse_with_params(
                &format!("{}/token/meta", trim_base(&self.config.solscan_url)),
                &[("tokenAddress", subject)],
            ),
            Provider::SolscanAccount => Url::parse_with_params(
                &format!("{}/account", trim_base(&self.config.solscan_url)),
                &[("address", subject)],
            ),
            Provider::Etherscan => Url::parse_with_params(
                &format!("{}/api", trim_base(&self.config.etherscan_url)),
                &[
                    ("module", "stats"),
                    ("action", "tokensupply"),
                    ("contractaddress", subject),
                    ("apikey", request.credential.as_deref().unwrap_or_default()),
                ],
            ),
        };

        parsed.map_err(|e| {
            FetchError::NetworkError(format!("Invalid {} endpoint: {}", request.provider, e))
        })
    }

    /// The request URL is stripped; Etherscan carries its key in the query
    fn classify(provider: Provider, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::NetworkTimeout(provider)
        } else {
            FetchError::NetworkError(format!("{}: {}", provider, error.without_url()))
        }
    }
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Keep non-JSON bodies as a string so the parser reports them as malformed
fn decode_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl RawFetcher for HttpFetcher {
    async fn fetch_raw(&self, request: FetchRequest) -> Result<RawPayload, FetchError> {
        let url = self.endpoint(&request)?;
        tracing::debug!(provider = %request.provider, subject = %request.subject, "fetching");

        let mut builder = self.http.get(url);
        // Solscan takes its key as a header; Etherscan's is already in the query
        if let (Provider::SolscanTokenMeta | Provider::SolscanAccount, Some(key)) =
            (request.provider, request.credential.as_deref())
        {
            builder = builder.header("token", key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::classify(request.provider, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(provider = %request.provider, status = status.as_u16(), "non-success status");
            return Err(FetchError::HttpError {
                provider: request.provider,
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| Self::classify(request.provider, e))?;

        Ok(RawPayload::new(request.provider, request.subject, decode_body(text)))
    }
}
