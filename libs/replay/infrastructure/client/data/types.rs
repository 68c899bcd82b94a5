//! Data API types for trades

use crate::domain::{Side, TradeFill};
use serde::{Deserialize, Serialize};

// =============================================================================
// Trade
// =============================================================================

/// Direction of a trade as reported by the Data API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Trade record from the Data API `/trades` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// User's proxy wallet address
    #[serde(default)]
    pub proxy_wallet: String,

    pub side: TradeSide,

    /// Asset token ID
    #[serde(default)]
    pub asset: String,

    /// Market condition ID
    #[serde(default)]
    pub condition_id: String,

    /// Shares traded
    pub size: f64,

    /// Price per share
    pub price: f64,

    /// Unix seconds
    pub timestamp: i64,

    /// Outcome label (e.g., "Up", "Down")
    #[serde(default)]
    pub outcome: String,

    /// Outcome index (0 or 1)
    #[serde(default)]
    pub outcome_index: Option<i32>,

    // Optional fields that may not always be present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl Trade {
    /// Outcome side, by label first and index second
    pub fn outcome_side(&self) -> Option<Side> {
        Side::from_outcome(&self.outcome).or_else(|| self.outcome_index.and_then(Side::from_index))
    }

    pub fn is_buy(&self) -> bool {
        self.side == TradeSide::Buy
    }

    /// Convert a buy on an Up/Down outcome into a fill
    ///
    /// Sells and unknown outcomes return `None`: fills only ever increase a
    /// position.
    pub fn to_fill(&self) -> Option<TradeFill> {
        if !self.is_buy() {
            return None;
        }
        self.outcome_side()
            .map(|side| TradeFill::new(self.timestamp, side, self.size, self.price))
    }
}

/// Buy/sell counts per outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TradeCounts {
    pub buy_up: usize,
    pub buy_down: usize,
    pub sell_up: usize,
    pub sell_down: usize,
    pub unknown: usize,
}

impl TradeCounts {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut counts = Self::default();
        for trade in trades {
            match (trade.side, trade.outcome_side()) {
                (TradeSide::Buy, Some(Side::Up)) => counts.buy_up += 1,
                (TradeSide::Buy, Some(Side::Down)) => counts.buy_down += 1,
                (TradeSide::Sell, Some(Side::Up)) => counts.sell_up += 1,
                (TradeSide::Sell, Some(Side::Down)) => counts.sell_down += 1,
                (_, None) => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn sells(&self) -> usize {
        self.sell_up + self.sell_down
    }
}

/// Convert raw trades to fills (buys on Up/Down only)
pub fn trades_to_fills(trades: &[Trade]) -> Vec<TradeFill> {
    trades.iter().filter_map(Trade::to_fill).collect()
}
