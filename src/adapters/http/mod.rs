//! HTTP Adapter
//!
//! Implements the `RawFetcher` port against the public provider APIs:
//! - Dexscreener: `/latest/dex/tokens/{address}`
//! - Solscan: `/token/meta?tokenAddress=` and `/account?address=`
//! - Etherscan: `/api?module=stats&action=tokensupply`

mod client;

pub use client::{HttpFetcher, HttpFetcherConfig};
