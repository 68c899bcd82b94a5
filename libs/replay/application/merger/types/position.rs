//! Running position state

use super::bucket::{average, SecondBucket};
use crate::domain::Side;

/// Cumulative buys per side from the window start up to the current second
///
/// Sizes never decrease: every fill is treated as a position increase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningPosition {
    pub cum_up_size: f64,
    pub cum_up_notional: f64,
    pub cum_down_size: f64,
    pub cum_down_notional: f64,
}

impl RunningPosition {
    /// Position before any trade
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one second of activity into the position
    pub fn step(self, bucket: &SecondBucket) -> Self {
        Self {
            cum_up_size: self.cum_up_size + bucket.buy_up_size,
            cum_up_notional: self.cum_up_notional + bucket.buy_up_notional,
            cum_down_size: self.cum_down_size + bucket.buy_down_size,
            cum_down_notional: self.cum_down_notional + bucket.buy_down_notional,
        }
    }

    /// Volume-weighted average Up cost, undefined while no Up is held
    pub fn up_avg_cost(&self) -> Option<f64> {
        average(self.cum_up_notional, self.cum_up_size)
    }

    /// Volume-weighted average Down cost, undefined while no Down is held
    pub fn down_avg_cost(&self) -> Option<f64> {
        average(self.cum_down_notional, self.cum_down_size)
    }

    pub fn size(&self, side: Side) -> f64 {
        match side {
            Side::Up => self.cum_up_size,
            Side::Down => self.cum_down_size,
        }
    }

    pub fn avg_cost(&self, side: Side) -> Option<f64> {
        match side {
            Side::Up => self.up_avg_cost(),
            Side::Down => self.down_avg_cost(),
        }
    }

    /// True until either side has accumulated shares
    pub fn is_flat(&self) -> bool {
        self.cum_up_size <= 0.0 && self.cum_down_size <= 0.0
    }

    /// Total capital spent on both sides
    pub fn total_cost(&self) -> f64 {
        self.cum_up_notional + self.cum_down_notional
    }
}
