use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::Violations;
use crate::{Side, StockConfig, StockKind, Symbol, Trade, TradeLedger, ValidationError, Violation};

/// One listed equity with its rolling trade ledger.
///
/// Identity and valuation parameters are fixed at construction. Price-derived
/// reads take `&mut self` because they first evict trades that fell out of the
/// decay window; use [`Stock::window_price`] for a read that leaves the ledger
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    symbol: Symbol,
    kind: StockKind,
    last_dividend: f64,
    fixed_dividend_percent: Option<f64>,
    par_value: f64,
    trade_decay_seconds: f64,
    ledger: TradeLedger,
}

/// Price, yield and P/E evaluated against a single instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockMetrics {
    pub symbol: Symbol,
    pub as_of: f64,
    pub trade_count: usize,
    pub stock_price: f64,
    pub dividend_yield: f64,
    pub pe_ratio: f64,
}

impl Stock {
    /// Validate every field of `config` and build the stock.
    ///
    /// All violations are reported together. A fixed dividend supplied for a
    /// common stock is dropped rather than rejected.
    pub fn new(config: StockConfig) -> Result<Self, ValidationError> {
        let mut violations = Violations::default();

        let symbol = violations.check(Symbol::parse(&config.symbol));
        let kind = violations.check(StockKind::parse(&config.kind));
        let last_dividend = violations.check(non_negative(config.last_dividend, |value| {
            Violation::InvalidLastDividend { value }
        }));
        let fixed_dividend_percent = match kind {
            Some(StockKind::Preferred) => violations
                .check(percent(config.fixed_dividend_percent))
                .map(Some),
            _ => Some(None),
        };
        let par_value = violations.check(non_negative(config.par_value, |value| {
            Violation::InvalidParValue { value }
        }));
        let trade_decay_seconds = violations.check(positive(config.trade_decay_seconds, |value| {
            Violation::InvalidDecayWindow { value }
        }));

        match (
            symbol,
            kind,
            last_dividend,
            fixed_dividend_percent,
            par_value,
            trade_decay_seconds,
        ) {
            (
                Some(symbol),
                Some(kind),
                Some(last_dividend),
                Some(fixed_dividend_percent),
                Some(par_value),
                Some(trade_decay_seconds),
            ) => Ok(Self {
                symbol,
                kind,
                last_dividend,
                fixed_dividend_percent,
                par_value,
                trade_decay_seconds,
                ledger: TradeLedger::default(),
            }),
            _ => Err(violations.into_error()),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn kind(&self) -> StockKind {
        self.kind
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    /// Stored percentage, `None` for common stocks.
    pub fn fixed_dividend_percent(&self) -> Option<f64> {
        self.fixed_dividend_percent
    }

    /// Fixed dividend as a fraction of par value, `None` for common stocks.
    pub fn fixed_dividend(&self) -> Option<f64> {
        self.fixed_dividend_percent.map(|percent| percent / 100.0)
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    pub fn trade_decay_seconds(&self) -> f64 {
        self.trade_decay_seconds
    }

    pub fn trades(&self) -> &TradeLedger {
        &self.ledger
    }

    pub fn last_trade_timestamp(&self) -> Option<f64> {
        self.ledger.last_timestamp()
    }

    /// Validate and append a trade to the tail of the ledger.
    ///
    /// `timestamp` must not precede the last recorded trade. On failure the
    /// ledger is left as it was. Recording never evicts.
    pub fn record_trade(
        &mut self,
        timestamp: f64,
        quantity: i64,
        side: &str,
        price: f64,
    ) -> Result<Trade, ValidationError> {
        let trade = self.validate_trade(
            timestamp,
            positive_quantity(quantity, || quantity.to_string()),
            side,
            positive_price(price, || price.to_string()),
        )?;
        Ok(self.append(trade))
    }

    /// Like [`Stock::record_trade`], with quantity and price given as raw text.
    ///
    /// Text that does not parse is reported alongside the other violations.
    pub fn record_trade_text(
        &mut self,
        timestamp: f64,
        quantity: &str,
        side: &str,
        price: &str,
    ) -> Result<Trade, ValidationError> {
        let quantity = match quantity.trim().parse::<i64>() {
            Ok(parsed) => positive_quantity(parsed, || quantity.to_owned()),
            Err(_) => Err(Violation::InvalidQuantity {
                value: quantity.to_owned(),
            }),
        };
        let price = match price.trim().parse::<f64>() {
            Ok(parsed) => positive_price(parsed, || price.to_owned()),
            Err(_) => Err(Violation::InvalidPrice {
                value: price.to_owned(),
            }),
        };

        let trade = self.validate_trade(timestamp, quantity, side, price)?;
        Ok(self.append(trade))
    }

    fn validate_trade(
        &self,
        timestamp: f64,
        quantity: Result<u64, Violation>,
        side: &str,
        price: Result<f64, Violation>,
    ) -> Result<Trade, ValidationError> {
        let mut violations = Violations::default();

        let timestamp = violations.check(self.check_timestamp(timestamp));
        let quantity = violations.check(quantity);
        let side = violations.check(Side::parse(side));
        let price = violations.check(price);

        match (timestamp, quantity, side, price) {
            (Some(timestamp), Some(quantity), Some(side), Some(price)) => {
                Ok(Trade::new(timestamp, quantity, side, price))
            }
            _ => Err(violations.into_error()),
        }
    }

    fn check_timestamp(&self, timestamp: f64) -> Result<f64, Violation> {
        if !timestamp.is_finite() || timestamp < 0.0 {
            return Err(Violation::InvalidTimestamp {
                value: timestamp.to_string(),
            });
        }
        match self.ledger.last_timestamp() {
            Some(last) if last > timestamp => Err(Violation::TimestampBeforeLastTrade {
                value: timestamp.to_string(),
                last: last.to_string(),
            }),
            _ => Ok(timestamp),
        }
    }

    fn append(&mut self, trade: Trade) -> Trade {
        debug!(
            symbol = %self.symbol,
            timestamp = trade.timestamp(),
            quantity = trade.quantity(),
            side = %trade.side(),
            price = trade.price(),
            "recorded trade"
        );
        self.ledger.push(trade);
        trade
    }

    fn window_start(&self, now: f64) -> f64 {
        now - self.trade_decay_seconds
    }

    /// Evict trades strictly older than the decay window ending at `now`.
    ///
    /// Stops at the first trade still inside the window. Returns the number
    /// of trades removed.
    pub fn prune_expired(&mut self, now: f64) -> usize {
        let evicted = self.ledger.evict_older_than(self.window_start(now));
        if evicted > 0 {
            debug!(
                symbol = %self.symbol,
                evicted,
                remaining = self.ledger.len(),
                "evicted expired trades"
            );
        }
        evicted
    }

    /// Volume-weighted price over the window ending at `now`, without evicting.
    pub fn window_price(&self, now: f64) -> f64 {
        self.ledger.weighted_price_since(self.window_start(now))
    }

    /// Current volume-weighted price. Evicts expired trades as a side effect.
    ///
    /// Returns 0.0 when no trade falls inside the window.
    pub fn stock_price(&mut self) -> f64 {
        self.stock_price_at(SystemClock.now())
    }

    pub fn stock_price_at(&mut self, now: f64) -> f64 {
        self.prune_expired(now);
        self.window_price(now)
    }

    /// Dividend yield at the current price, 0.0 when the price is unavailable.
    pub fn dividend_yield(&mut self) -> f64 {
        self.dividend_yield_at(SystemClock.now())
    }

    pub fn dividend_yield_at(&mut self, now: f64) -> f64 {
        let price = self.stock_price_at(now);
        self.yield_for_price(price)
    }

    /// Price over dividend yield, 0.0 when the yield is unavailable.
    pub fn pe_ratio(&mut self) -> f64 {
        self.pe_ratio_at(SystemClock.now())
    }

    pub fn pe_ratio_at(&mut self, now: f64) -> f64 {
        let price = self.stock_price_at(now);
        pe_for(price, self.yield_for_price(price))
    }

    /// Snapshot of every derived metric against one sampled instant.
    pub fn metrics(&mut self) -> StockMetrics {
        self.metrics_at(SystemClock.now())
    }

    pub fn metrics_at(&mut self, now: f64) -> StockMetrics {
        let stock_price = self.stock_price_at(now);
        let dividend_yield = self.yield_for_price(stock_price);

        StockMetrics {
            symbol: self.symbol.clone(),
            as_of: now,
            trade_count: self.ledger.len(),
            stock_price,
            dividend_yield,
            pe_ratio: pe_for(stock_price, dividend_yield),
        }
    }

    fn yield_for_price(&self, price: f64) -> f64 {
        if price == 0.0 {
            return 0.0;
        }
        match self.kind {
            StockKind::Common => self.last_dividend / price,
            StockKind::Preferred => {
                self.fixed_dividend().unwrap_or_default() * self.par_value / price
            }
        }
    }
}

impl TryFrom<StockConfig> for Stock {
    type Error = ValidationError;

    fn try_from(config: StockConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

fn pe_for(price: f64, dividend_yield: f64) -> f64 {
    if dividend_yield == 0.0 {
        0.0
    } else {
        price / dividend_yield
    }
}

fn non_negative(value: f64, violation: fn(String) -> Violation) -> Result<f64, Violation> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(violation(value.to_string()))
    }
}

fn positive(value: f64, violation: fn(String) -> Violation) -> Result<f64, Violation> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(violation(value.to_string()))
    }
}

fn percent(value: Option<f64>) -> Result<f64, Violation> {
    match value {
        Some(value) if value.is_finite() && (0.0..=100.0).contains(&value) => Ok(value),
        Some(value) => Err(Violation::InvalidFixedDividend {
            value: value.to_string(),
        }),
        None => Err(Violation::InvalidFixedDividend {
            value: String::from("none"),
        }),
    }
}

fn positive_quantity(quantity: i64, raw: impl FnOnce() -> String) -> Result<u64, Violation> {
    u64::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or_else(|| Violation::InvalidQuantity { value: raw() })
}

fn positive_price(price: f64, raw: impl FnOnce() -> String) -> Result<f64, Violation> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(Violation::InvalidPrice { value: raw() })
    }
}
