//! Token Scout - token and wallet risk scanner
//!
//! Pulls market data for a token (or activity data for a wallet) from public
//! blockchain data providers, flags obvious risks and suggests entry sizing
//! for a USD budget.
//!
//! # Modules
//!
//! - `domain`: Metrics models and the risk engine
//! - `ports`: The `RawFetcher` trait and test doubles
//! - `normalize`: Provider JSON -> metrics
//! - `adapters`: HTTP fetcher, CLI definitions, console rendering
//! - `config`: Configuration loading and validation
//! - `application`: Scan coordinator and interactive session

pub mod domain;
pub mod ports;
pub mod normalize;
pub mod adapters;
pub mod config;
pub mod application;
pub mod error;

pub use error::ScoutError;
