//! Crate-level error type
//!
//! Every layer keeps its own error enum; `ScoutError` gathers them so the
//! coordinator can hand one type to whoever renders the session.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::address::AddressError;
use crate::domain::risk::AssessmentError;
use crate::normalize::ParseError;
use crate::ports::FetchError;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Upstream failures that may succeed if simply tried again later
    pub fn is_transient(&self) -> bool {
        match self {
            ScoutError::Fetch(FetchError::HttpError { status, .. }) => {
                *status == 429 || *status >= 500
            }
            ScoutError::Fetch(_) => true,
            _ => false,
        }
    }

    /// Guidance shown to the operator in place of the raw error
    pub fn user_message(&self) -> String {
        match self {
            ScoutError::Address(e) => format!("{} Check the address and try again.", e),
            ScoutError::Fetch(FetchError::HttpError { provider, status }) => match status {
                404 => format!(
                    "{} has no record of this address (HTTP 404). Verify the address and try again.",
                    provider
                ),
                401 | 403 => format!(
                    "{} rejected the request (HTTP {}). Check your API key.",
                    provider, status
                ),
                429 => format!("{} is rate limiting requests. Wait a moment and try again.", provider),
                _ => format!("Error: {} API returned status code {}.", provider, status),
            },
            ScoutError::Fetch(FetchError::NetworkTimeout(provider)) => format!(
                "{} did not respond in time. Check your connection and try again.",
                provider
            ),
            ScoutError::Fetch(FetchError::NetworkError(detail)) => {
                format!("Network error while contacting the provider: {}", detail)
            }
            ScoutError::Parse(ParseError::MalformedResponse { provider, reason }) => format!(
                "Not found on {} ({}). Verify the address and try again.",
                provider, reason
            ),
            ScoutError::Parse(ParseError::InvalidNumericField { field, value }) => format!(
                "The provider returned an unreadable value for '{}' ({}). Try again later.",
                field, value
            ),
            ScoutError::Assessment(AssessmentError::InsufficientData) => {
                "No USD price is available for this token, so no position sizing is possible. \
                 Try a combined scan to pull pricing from Dexscreener."
                    .to_string()
            }
            ScoutError::Assessment(AssessmentError::InvalidBudget(budget)) => {
                format!("Budget must be greater than zero (got {}).", budget)
            }
            ScoutError::Assessment(e) => e.to_string(),
            ScoutError::Config(e) => format!("Configuration error: {}", e),
        }
    }
}
