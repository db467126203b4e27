//! # Domain Models
//!
//! Value types shared by [`crate::Stock`] and [`crate::StockManager`].
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated three-letter ticker |
//! | [`StockKind`] | Common or preferred stock |
//! | [`Side`] | Buy or sell |
//! | [`Trade`] | Immutable recorded trade |
//! | [`TradeLedger`] | Time-ordered trades owned by one stock |
//!
//! Every type validates at construction and reports failures as a
//! [`crate::Violation`], so callers can collect several at once.

mod models;
mod symbol;
mod trade;

pub use models::{Side, StockKind};
pub use symbol::Symbol;
pub use trade::{Trade, TradeLedger};
