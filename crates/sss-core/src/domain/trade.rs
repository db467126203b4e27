use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::Side;

/// A recorded trade. Only constructed by [`crate::Stock::record_trade`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    timestamp: f64,
    quantity: u64,
    side: Side,
    price: f64,
}

impl Trade {
    pub(crate) fn new(timestamp: f64, quantity: u64, side: Side, price: f64) -> Self {
        Self {
            timestamp,
            quantity,
            side,
            price,
        }
    }

    /// Seconds since the Unix epoch.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Trades ordered by non-decreasing timestamp.
///
/// Ordering is enforced by the caller at insert time; eviction and the
/// window scan both rely on it to stop at the first in-window entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLedger {
    trades: VecDeque<Trade>,
}

impl TradeLedger {
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Trade> + '_ {
        self.trades.iter()
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.trades.back().map(Trade::timestamp)
    }

    pub(crate) fn push(&mut self, trade: Trade) {
        debug_assert!(self
            .last_timestamp()
            .is_none_or(|last| last <= trade.timestamp));
        self.trades.push_back(trade);
    }

    /// Drops head entries strictly older than `cutoff`, returning how many went.
    pub(crate) fn evict_older_than(&mut self, cutoff: f64) -> usize {
        let mut evicted = 0;
        while self
            .trades
            .front()
            .is_some_and(|trade| trade.timestamp < cutoff)
        {
            self.trades.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Quantity-weighted average price of trades at or after `cutoff`, 0.0 if none.
    pub(crate) fn weighted_price_since(&self, cutoff: f64) -> f64 {
        let start = self.trades.partition_point(|trade| trade.timestamp < cutoff);
        let (notional, quantity) = self
            .trades
            .range(start..)
            .fold((0.0_f64, 0.0_f64), |(notional, quantity), trade| {
                let trade_quantity = trade.quantity as f64;
                (notional + trade.price * trade_quantity, quantity + trade_quantity)
            });

        if quantity == 0.0 {
            0.0
        } else {
            notional / quantity
        }
    }
}

impl<'a> IntoIterator for &'a TradeLedger {
    type Item = &'a Trade;
    type IntoIter = std::collections::vec_deque::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.iter()
    }
}
