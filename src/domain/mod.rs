//! Domain Layer - token and wallet scoring
//!
//! Pure types and rules with no I/O. Metrics arrive already normalized;
//! the ports layer handles everything external.
//!
//! - `address`: chain selection and address shape checks
//! - `metrics`: TokenMetrics / WalletMetrics snapshots
//! - `risk`: risk flags and position sizing

pub mod address;
pub mod metrics;
pub mod risk;

pub use address::{AddressError, Chain};
pub use metrics::{Holding, MetricsError, TokenMetrics, WalletMetrics};
pub use risk::{
    assess_token, assess_token_default, assess_wallet, assess_wallet_default, AssessmentError,
    Recommendation, RiskFlag, RiskPolicy, RiskReport,
};
