//! CLI argument definitions for the Super Simple Stocks shell.
//!
//! The binary loads a stock list, then reads commands from standard input
//! until `quit` or end of input.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--stocks` | built-in sample | JSON array of stock configurations |
//! | `--decay-seconds` | per stock (900) | Rolling price window override |
//! | `--format` | `text` | Metric output format (text, json) |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! # Start with the sample stocks
//! sss
//!
//! # Use a custom list and a one-minute window
//! sss --stocks stocks.json --decay-seconds 60
//!
//! # Script a session
//! printf 'single POP\nrecord 10 buy 2.0\nprice\nquit\nquit\n' | sss --format json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Super Simple Stocks - record trades and derive stock metrics
#[derive(Debug, Parser)]
#[command(
    name = "sss",
    author,
    version,
    about = "Interactive shell for recording trades and reading stock metrics",
    long_about = "Super Simple Stocks keeps a rolling window of trades per stock and derives:\n\
\n\
  • Volume-weighted stock price\n\
  • Dividend yield and P/E ratio\n\
  • The GBCE All Share Index (geometric mean of prices)\n\
\n\
Type 'help' at the prompt for the list of commands."
)]
pub struct Cli {
    /// JSON file holding an array of stock configurations.
    ///
    /// Each entry has symbol, kind (common/preferred), last_dividend,
    /// fixed_dividend_percent (preferred only), par_value and an optional
    /// trade_decay_seconds. Defaults to the built-in sample list.
    #[arg(long, value_name = "FILE")]
    pub stocks: Option<PathBuf>,

    /// Rolling price window in seconds, applied to every stock.
    #[arg(long, value_name = "SECONDS")]
    pub decay_seconds: Option<f64>,

    /// Output format for metrics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log filter used when RUST_LOG is not set (e.g. debug, sss_core=debug).
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["sss"]).expect("defaults parse");
        assert_eq!(cli.stocks, None);
        assert_eq!(cli.decay_seconds, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "sss",
            "--stocks",
            "stocks.json",
            "--decay-seconds",
            "60",
            "--format",
            "json",
        ])
        .expect("overrides parse");
        assert_eq!(cli.stocks, Some(PathBuf::from("stocks.json")));
        assert_eq!(cli.decay_seconds, Some(60.0));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
