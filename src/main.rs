//! Token Scout - token and wallet risk scanner
//!
//! Scans a token or wallet against public blockchain data providers and
//! prints a risk report with entry sizing.

use std::io;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use token_scout::adapters::cli::{self, Command, InteractiveCmd, OutputFormat, ScanCmd, WalletCmd};
use token_scout::adapters::console;
use token_scout::adapters::{HttpFetcher, HttpFetcherConfig};
use token_scout::application::{Coordinator, Session, SessionOptions};
use token_scout::config::{load_config_or_default, Config};
use token_scout::domain::Chain;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (API keys go here, not in scout.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();

    let config_path = shellexpand::tilde(&app.command.config_path().to_string_lossy()).to_string();
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    init_logging(app.verbose, app.debug, &config.logging.level)?;
    tracing::debug!("Using configuration from {}", config_path);

    match app.command {
        Command::Scan(cmd) => scan_command(cmd, &config).await,
        Command::Wallet(cmd) => wallet_command(cmd, &config).await,
        Command::Interactive(cmd) => interactive_command(cmd, &config).await,
    }
}

/// Initialize logging; reports go to stdout, logs to stderr
fn init_logging(verbose: bool, debug: bool, level: &str) -> Result<()> {
    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        level
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

fn build_coordinator(config: &Config) -> Result<Coordinator<HttpFetcher>> {
    let fetcher = HttpFetcher::with_config(HttpFetcherConfig::from(&config.providers))
        .context("Failed to create HTTP client")?;

    Coordinator::from_config(fetcher, config).map_err(report_failure)
}

/// Operator-facing failure; transient upstream errors are also logged
fn report_failure(error: token_scout::ScoutError) -> anyhow::Error {
    if error.is_transient() {
        tracing::warn!("Upstream failure, retrying later may succeed: {}", error);
    }
    anyhow!(error.user_message())
}

fn resolve_budget(flag: Option<Decimal>, config: &Config) -> Result<Decimal> {
    match flag {
        Some(budget) => Ok(budget),
        None => Ok(config.default_budget()?),
    }
}

async fn scan_command(cmd: ScanCmd, config: &Config) -> Result<()> {
    let coordinator = build_coordinator(config)?;
    let chain = Chain::from(cmd.chain);
    let budget = resolve_budget(cmd.budget, config)?;
    let combined = cmd.combined || config.scan.combined;

    tracing::info!(%chain, address = %cmd.address, %budget, combined, "Scanning token");

    let result = if combined {
        coordinator.scan_token_combined(chain, &cmd.address, budget).await
    } else {
        coordinator.scan_token(chain, &cmd.address, budget).await
    };
    let scan = result.map_err(report_failure)?;

    match cmd.format {
        OutputFormat::Json => {
            let (report, error) = match &scan.assessment {
                Ok(report) => (Some(report), None),
                Err(e) => (None, Some(e.to_string())),
            };
            let body = json!({
                "chain": scan.chain,
                "address": scan.address,
                "budget": scan.budget,
                "metrics": scan.metrics,
                "report": report,
                "error": error,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => print!("{}", console::render_token_scan(&scan, Utc::now())),
    }

    // The partial report is already printed; the command still fails
    scan.into_report().map_err(report_failure)?;

    Ok(())
}

async fn wallet_command(cmd: WalletCmd, config: &Config) -> Result<()> {
    let coordinator = build_coordinator(config)?;
    let top = cmd.top.unwrap_or(config.scan.top_holdings);

    tracing::info!(address = %cmd.address, "Analyzing wallet");

    let scan = coordinator
        .analyze_wallet(&cmd.address)
        .await
        .map_err(report_failure)?;

    match cmd.format {
        OutputFormat::Json => {
            let body = json!({
                "wallet": scan.metrics,
                "top_holdings": scan.metrics.top_holdings(top),
                "report": scan.report,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => print!("{}", console::render_wallet_scan(&scan, top, Utc::now())),
    }

    Ok(())
}

async fn interactive_command(cmd: InteractiveCmd, config: &Config) -> Result<()> {
    let coordinator = build_coordinator(config)?;
    let options = SessionOptions {
        budget: resolve_budget(cmd.budget, config)?,
        combined: cmd.combined || config.scan.combined,
        top_holdings: config.scan.top_holdings,
    };

    let stdin = io::stdin();
    let mut session = Session::new(&coordinator, options, stdin.lock(), io::stdout());
    session.run().await.context("Interactive session failed")?;

    Ok(())
}
