//! Output table row

use super::{RunningPosition, SecondBucket, StrategyMetrics};

/// One second of the merged table
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub timestamp: i64,
    /// Wall-clock time in the configured display offset
    pub display_time: String,
    /// Aligned reference price for this second
    pub reference_price: f64,
    /// reference_price minus the price at the window's first second
    pub price_delta: f64,
    pub bucket: SecondBucket,
    pub position: RunningPosition,
    pub metrics: StrategyMetrics,
}

impl OutputRow {
    pub fn buy_up_price(&self) -> Option<f64> {
        self.bucket.buy_up_price()
    }

    pub fn buy_down_price(&self) -> Option<f64> {
        self.bucket.buy_down_price()
    }

    pub fn cum_up_size(&self) -> f64 {
        self.position.cum_up_size
    }

    pub fn cum_down_size(&self) -> f64 {
        self.position.cum_down_size
    }

    pub fn cum_up_avg_cost(&self) -> Option<f64> {
        self.position.up_avg_cost()
    }

    pub fn cum_down_avg_cost(&self) -> Option<f64> {
        self.position.down_avg_cost()
    }

    pub fn has_trades(&self) -> bool {
        self.bucket.has_trades()
    }
}
