//! CLI Command Definitions
//!
//! Argument structs for every token-scout command.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::address::Chain;

/// Token Scout - token and wallet risk scanner
#[derive(Parser, Debug)]
#[command(
    name = "token-scout",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Token and wallet risk scanner for Solana and Ethereum",
    long_about = "Token Scout pulls market data from Dexscreener, Solscan and Etherscan, \
                  flags liquidity and holder risks, and suggests entry sizing for a USD budget."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a token contract
    Scan(ScanCmd),

    /// Analyze a Solana wallet
    Wallet(WalletCmd),

    /// Start the interactive menu
    Interactive(InteractiveCmd),
}

impl Command {
    /// Configuration file named by the command
    pub fn config_path(&self) -> &Path {
        match self {
            Command::Scan(cmd) => &cmd.config,
            Command::Wallet(cmd) => &cmd.config,
            Command::Interactive(cmd) => &cmd.config,
        }
    }
}

/// Chain selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChainArg {
    #[value(alias = "sol")]
    Solana,
    #[value(alias = "eth")]
    Ethereum,
}

impl From<ChainArg> for Chain {
    fn from(arg: ChainArg) -> Self {
        match arg {
            ChainArg::Solana => Chain::Solana,
            ChainArg::Ethereum => Chain::Ethereum,
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Scan a token
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Token mint (Solana) or contract address (Ethereum)
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Chain the token lives on
    #[arg(long, value_enum, default_value = "solana")]
    pub chain: ChainArg,

    /// USD budget for position sizing (defaults to scan.default_budget)
    #[arg(short, long, value_name = "USD")]
    pub budget: Option<Decimal>,

    /// Combine Dexscreener pricing with chain metadata
    #[arg(long)]
    pub combined: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/scout.toml")]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Analyze a wallet
#[derive(Parser, Debug)]
pub struct WalletCmd {
    /// Solana wallet address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Number of holdings to list (defaults to scan.top_holdings)
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/scout.toml")]
    pub config: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Interactive menu
#[derive(Parser, Debug)]
pub struct InteractiveCmd {
    /// USD budget for position sizing (defaults to scan.default_budget)
    #[arg(short, long, value_name = "USD")]
    pub budget: Option<Decimal>,

    /// Combine Dexscreener pricing with chain metadata
    #[arg(long)]
    pub combined: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/scout.toml")]
    pub config: PathBuf,
}
