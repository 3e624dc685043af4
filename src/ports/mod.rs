//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, the core only sees the `RawFetcher`
//! port; HTTP lives in the adapters.

pub mod provider;
pub mod mocks;

pub use provider::{FetchError, FetchRequest, Provider, RawFetcher, RawPayload};
pub use mocks::MockFetcher;
