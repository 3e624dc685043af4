//! Application layer: scan coordination and the interactive session

pub mod coordinator;
pub mod session;

pub use coordinator::{Coordinator, Credentials, TokenScan, WalletScan};
pub use session::{Session, SessionOptions};
