//! Interactive session
//!
//! Menu loop over any line-based input/output pair. A failed scan prints
//! its guidance and returns to the menu; end of input ends the session.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use rust_decimal::Decimal;

use super::coordinator::Coordinator;
use crate::adapters::console;
use crate::domain::address::Chain;
use crate::ports::RawFetcher;

/// Per-session scan settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub budget: Decimal,
    pub combined: bool,
    pub top_holdings: usize,
}

enum MenuChoice {
    Token,
    Wallet,
    Quit,
    Invalid,
}

impl MenuChoice {
    fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" => MenuChoice::Token,
            "2" => MenuChoice::Wallet,
            "q" | "quit" | "exit" => MenuChoice::Quit,
            _ => MenuChoice::Invalid,
        }
    }
}

pub struct Session<'a, F: RawFetcher, R, W> {
    coordinator: &'a Coordinator<F>,
    options: SessionOptions,
    input: R,
    output: W,
}

impl<'a, F, R, W> Session<'a, F, R, W>
where
    F: RawFetcher,
    R: BufRead,
    W: Write,
{
    pub fn new(coordinator: &'a Coordinator<F>, options: SessionOptions, input: R, output: W) -> Self {
        Self {
            coordinator,
            options,
            input,
            output,
        }
    }

    /// Prompt and read one trimmed line; `None` on end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Run until the operator quits or input ends
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Token Scout!")?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Select an option:")?;
            writeln!(self.output, "1. Scan a token contract")?;
            writeln!(self.output, "2. Analyze a wallet address")?;
            writeln!(self.output, "q. Quit")?;

            let Some(choice) = self.prompt("Enter your choice (1/2/q): ")? else {
                break;
            };

            let keep_going = match MenuChoice::parse(&choice) {
                MenuChoice::Token => self.token_flow().await?,
                MenuChoice::Wallet => self.wallet_flow().await?,
                MenuChoice::Quit => false,
                MenuChoice::Invalid => {
                    writeln!(self.output, "Invalid choice. Please select 1, 2, or q.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    async fn token_flow(&mut self) -> io::Result<bool> {
        let Some(address) = self.prompt("Enter the token contract address: ")? else {
            return Ok(false);
        };

        writeln!(self.output, "Select blockchain:")?;
        writeln!(self.output, "1. Solana")?;
        writeln!(self.output, "2. Ethereum")?;
        let Some(selection) = self.prompt("Enter your blockchain choice (1/2): ")? else {
            return Ok(false);
        };

        let chain = match selection.as_str() {
            "1" => Chain::Solana,
            "2" => Chain::Ethereum,
            _ => {
                writeln!(self.output, "Invalid blockchain selection.")?;
                return Ok(true);
            }
        };

        let budget = self.options.budget;
        let result = if self.options.combined {
            self.coordinator.scan_token_combined(chain, &address, budget).await
        } else {
            self.coordinator.scan_token(chain, &address, budget).await
        };

        match result {
            Ok(scan) => write!(self.output, "{}", console::render_token_scan(&scan, Utc::now()))?,
            Err(e) => {
                tracing::debug!(transient = e.is_transient(), "token scan failed: {}", e);
                writeln!(self.output, "{}", e.user_message())?;
            }
        }
        Ok(true)
    }

    async fn wallet_flow(&mut self) -> io::Result<bool> {
        let Some(address) = self.prompt("Enter the wallet address: ")? else {
            return Ok(false);
        };

        match self.coordinator.analyze_wallet(&address).await {
            Ok(scan) => write!(
                self.output,
                "{}",
                console::render_wallet_scan(&scan, self.options.top_holdings, Utc::now())
            )?,
            Err(e) => {
                tracing::debug!(transient = e.is_transient(), "wallet analysis failed: {}", e);
                writeln!(self.output, "{}", e.user_message())?;
            }
        }
        Ok(true)
    }
}
