//! # SSS Core
//!
//! Domain core for Super Simple Stocks: a handful of listed equities, the
//! trades recorded against them, and the metrics derived from those trades.
//!
//! ## Overview
//!
//! - **[`Stock`]** owns its identity, valuation parameters and a rolling
//!   [`TradeLedger`], and derives price, dividend yield and P/E ratio.
//! - **[`StockManager`]** registers stocks by [`Symbol`] and derives the
//!   geometric-mean All Share Index.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`clock`] | "Now" as seconds since the Unix epoch |
//! | [`config`] | Unvalidated stock configuration |
//! | [`domain`] | Symbol, kinds, sides, trades and the ledger |
//! | [`error`] | Validation and lookup errors |
//! | [`manager`] | Stock registry and All Share Index |
//! | [`stock`] | Stock aggregate and derived metrics |
//!
//! ## Quick Start
//!
//! ```rust
//! use sss_core::{Stock, StockConfig, StockManager};
//!
//! # fn main() -> Result<(), sss_core::StockError> {
//! let mut pop = Stock::new(StockConfig::common("POP", 8.0, 100.0))?;
//! pop.record_trade(1_700_000_000.0, 10, "buy", 2.0)?;
//! pop.record_trade(1_700_000_001.0, 20, "sell", 4.0)?;
//!
//! let price = pop.stock_price_at(1_700_000_002.0);
//! assert!((price - 100.0 / 30.0).abs() < 1e-12);
//!
//! let mut manager = StockManager::new();
//! manager.add_stock(pop);
//! assert!((manager.all_share_index_at(1_700_000_002.0) - price).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! ## Rolling window
//!
//! Price reads evict trades older than the stock's decay window (900 seconds
//! unless configured) and therefore take `&mut self`. Every read has an
//! `_at(now)` form for a caller-supplied instant; the plain form samples the
//! system clock once.
//!
//! ## Unavailable metrics
//!
//! A stock with no trades in its window has price 0.0, and yield and P/E
//! short-circuit to 0.0 from there. Nothing here divides by zero or fails
//! for lack of data.
//!
//! ## Error Handling
//!
//! ```rust
//! use sss_core::{Stock, StockConfig, Violation};
//!
//! let err = Stock::new(StockConfig::new("pop", "COMMON", -1.0, None, 100.0))
//!     .expect_err("three violations");
//! assert_eq!(err.violations().len(), 3);
//! assert!(matches!(err.violations()[0], Violation::InvalidSymbol { .. }));
//! ```

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod manager;
pub mod stock;

// Re-export commonly used types at crate root for convenience

// Clock
pub use clock::{Clock, ManualClock, SystemClock};

// Configuration
pub use config::{StockConfig, DEFAULT_TRADE_DECAY_SECONDS};

// Domain models
pub use domain::{Side, StockKind, Symbol, Trade, TradeLedger};

// Error types
pub use error::{StockError, ValidationError, Violation};

// Aggregates
pub use manager::StockManager;
pub use stock::{Stock, StockMetrics};
