use std::collections::HashMap;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::{Stock, StockConfig, StockError, Symbol};

/// Registry of stocks keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StockManager {
    stocks: HashMap<Symbol, Stock>,
}

impl StockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a stock for every configuration, in order.
    ///
    /// Fails on the first invalid configuration. Later entries overwrite
    /// earlier ones with the same symbol.
    pub fn from_configs<I>(configs: I) -> Result<Self, StockError>
    where
        I: IntoIterator<Item = StockConfig>,
    {
        let mut manager = Self::new();
        for config in configs {
            let symbol = config.symbol.clone();
            let stock = Stock::new(config)
                .map_err(|source| StockError::InvalidConfig { symbol, source })?;
            manager.add_stock(stock);
        }
        Ok(manager)
    }

    /// Register `stock`, replacing and returning any stock with the same symbol.
    pub fn add_stock(&mut self, stock: Stock) -> Option<Stock> {
        let symbol = stock.symbol().clone();
        let replaced = self.stocks.insert(symbol.clone(), stock);
        debug!(%symbol, replaced = replaced.is_some(), "registered stock");
        replaced
    }

    pub fn get_stock(&self, symbol: &str) -> Result<&Stock, StockError> {
        self.stocks.get(symbol).ok_or_else(|| not_found(symbol))
    }

    pub fn get_stock_mut(&mut self, symbol: &str) -> Result<&mut Stock, StockError> {
        self.stocks.get_mut(symbol).ok_or_else(|| not_found(symbol))
    }

    /// Registered symbols in ascending order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.stocks.keys().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stock> + '_ {
        self.stocks.values()
    }

    /// Geometric mean of every positive stock price.
    ///
    /// Reads each stock's price fresh, which evicts its expired trades.
    /// Stocks without a price are left out of both product and count; with
    /// none left the index is 0.0.
    pub fn all_share_index(&mut self) -> f64 {
        self.all_share_index_at(SystemClock.now())
    }

    pub fn all_share_index_at(&mut self, now: f64) -> f64 {
        let prices: Vec<f64> = self
            .stocks
            .values_mut()
            .map(|stock| stock.stock_price_at(now))
            .filter(|price| *price > 0.0)
            .collect();

        if prices.is_empty() {
            return 0.0;
        }

        // Mean of logs keeps large markets clear of overflow and underflow.
        let log_sum: f64 = prices.iter().map(|price| price.ln()).sum();
        (log_sum / prices.len() as f64).exp()
    }
}

fn not_found(symbol: &str) -> StockError {
    StockError::NotFound {
        symbol: symbol.to_owned(),
    }
}
