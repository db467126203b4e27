use serde::{Deserialize, Serialize};

/// Rolling price window applied when a configuration does not set one.
pub const DEFAULT_TRADE_DECAY_SECONDS: f64 = 15.0 * 60.0;

/// Unvalidated stock configuration, as written in a seed list.
///
/// `kind` holds the raw `common` / `preferred` tag so that an unknown tag is
/// reported together with every other violation by [`crate::Stock::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockConfig {
    pub symbol: String,
    pub kind: String,
    pub last_dividend: f64,
    #[serde(default, alias = "fixed_dividend")]
    pub fixed_dividend_percent: Option<f64>,
    pub par_value: f64,
    #[serde(default = "default_trade_decay_seconds")]
    pub trade_decay_seconds: f64,
}

impl StockConfig {
    pub fn new(
        symbol: impl Into<String>,
        kind: impl Into<String>,
        last_dividend: f64,
        fixed_dividend_percent: Option<f64>,
        par_value: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind: kind.into(),
            last_dividend,
            fixed_dividend_percent,
            par_value,
            trade_decay_seconds: DEFAULT_TRADE_DECAY_SECONDS,
        }
    }

    pub fn common(symbol: impl Into<String>, last_dividend: f64, par_value: f64) -> Self {
        Self::new(symbol, "common", last_dividend, None, par_value)
    }

    pub fn preferred(
        symbol: impl Into<String>,
        last_dividend: f64,
        fixed_dividend_percent: f64,
        par_value: f64,
    ) -> Self {
        Self::new(
            symbol,
            "preferred",
            last_dividend,
            Some(fixed_dividend_percent),
            par_value,
        )
    }

    pub fn with_decay_seconds(mut self, trade_decay_seconds: f64) -> Self {
        self.trade_decay_seconds = trade_decay_seconds;
        self
    }
}

fn default_trade_decay_seconds() -> f64 {
    DEFAULT_TRADE_DECAY_SECONDS
}
