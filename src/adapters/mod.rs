//! Adapters Layer - External System Implementations
//!
//! - HTTP: `RawFetcher` over the Dexscreener, Solscan and Etherscan APIs
//! - CLI: Command-line argument definitions
//! - Console: Plain-text report rendering

pub mod http;
pub mod cli;
pub mod console;

pub use http::{HttpFetcher, HttpFetcherConfig};
pub use cli::CliApp;
