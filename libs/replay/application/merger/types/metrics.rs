//! Hedge and break-even indicators derived from a running position

/// Strategy metrics for one second
///
/// Every field is `None` when its inputs are undefined; a flat position
/// yields all `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrategyMetrics {
    /// cum_down_size - cum_up_size (negative = net Up, positive = net Down)
    pub target_shares: Option<f64>,
    /// Break-even price of the dominant side (Down on a tie)
    pub target_price: Option<f64>,
    /// Number of fully hedged Up + Down pairs
    pub cash_out_shares: Option<f64>,
    /// Cost of one hedged pair (< 1 = locked-in edge)
    pub cash_out_price: Option<f64>,
    /// Cost of the unhedged exposure at break-even
    pub hidden_lost: Option<f64>,
    /// Profit locked in by hedged pairs
    pub hidden_profit: Option<f64>,
}

impl StrategyMetrics {
    /// Metrics for a position with no shares
    pub fn undefined() -> Self {
        Self::default()
    }

    pub fn is_undefined(&self) -> bool {
        *self == Self::undefined()
    }

    /// Riskless edge per hedged pair, when the pair costs less than 1
    pub fn arbitrage_edge(&self) -> Option<f64> {
        self.cash_out_price
            .map(|price| 1.0 - price)
            .filter(|edge| *edge > 0.0)
    }
}
