//! CLI Adapter
//!
//! Command-line interface for token-scout.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{ChainArg, CliApp, Command, InteractiveCmd, OutputFormat, ScanCmd, WalletCmd};

/// Parse the process arguments
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
