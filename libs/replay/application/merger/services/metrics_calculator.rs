//! Break-even and hedge metrics

use crate::application::merger::types::{RunningPosition, StrategyMetrics};
use crate::domain::round_size;

/// Pure mapping from a running position to its strategy metrics
pub struct StrategyMetricsCalculator;

impl StrategyMetricsCalculator {
    /// Derive metrics for a position
    ///
    /// A winning outcome token pays exactly 1, so break-even is
    /// `1 - average cost`. With `target_shares == 0` the Down side is used.
    /// The net size is rounded to [`SIZE_DECIMALS`] before the sign test.
    ///
    /// [`SIZE_DECIMALS`]: crate::domain::SIZE_DECIMALS
    pub fn calculate(position: &RunningPosition) -> StrategyMetrics {
        if position.is_flat() {
            return StrategyMetrics::undefined();
        }

        let up_avg = position.up_avg_cost();
        let down_avg = position.down_avg_cost();

        let target_shares = round_size(position.cum_down_size - position.cum_up_size);
        let target_price = if target_shares < 0.0 {
            up_avg.map(|avg| 1.0 - avg)
        } else {
            down_avg.map(|avg| 1.0 - avg)
        };

        let cash_out_shares = position.cum_up_size.min(position.cum_down_size);
        let cash_out_price = match (up_avg, down_avg) {
            (Some(up), Some(down)) => Some(up + down),
            _ => None,
        };

        let hidden_lost = target_price.map(|price| -target_shares.abs() * (1.0 - price));
        let hidden_profit = cash_out_price.map(|price| cash_out_shares * (1.0 - price));

        StrategyMetrics {
            target_shares: Some(target_shares),
            target_price,
            cash_out_shares: Some(cash_out_shares),
            cash_out_price,
            hidden_lost,
            hidden_profit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(up: (f64, f64), down: (f64, f64)) -> RunningPosition {
        RunningPosition {
            cum_up_size: up.0,
            cum_up_notional: up.0 * up.1,
            cum_down_size: down.0,
            cum_down_notional: down.0 * down.1,
        }
    }

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.map_or(false, |v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn test_flat_position_is_undefined() {
        let metrics = StrategyMetricsCalculator::calculate(&RunningPosition::new());
        assert!(metrics.is_undefined());
    }

    #[test]
    fn test_net_up_position() {
        let metrics = StrategyMetricsCalculator::calculate(&position((100.0, 0.55), (60.0, 0.40)));

        assert!(approx(metrics.target_shares, -40.0));
        assert!(approx(metrics.target_price, 0.45));
        assert!(approx(metrics.cash_out_shares, 60.0));
        assert!(approx(metrics.cash_out_price, 0.95));
        assert!(approx(metrics.hidden_lost, -40.0 * 0.55));
        assert!(approx(metrics.hidden_profit, 60.0 * 0.05));
        assert!(approx(metrics.arbitrage_edge(), 0.05));
    }

    #[test]
    fn test_net_down_position_uses_down_cost() {
        let metrics = StrategyMetricsCalculator::calculate(&position((20.0, 0.70), (50.0, 0.35)));
        assert!(approx(metrics.target_shares, 30.0));
        assert!(approx(metrics.target_price, 0.65));
        assert!(approx(metrics.cash_out_price, 1.05));
        assert_eq!(metrics.arbitrage_edge(), None);
        assert!(approx(metrics.hidden_profit, 20.0 * -0.05));
    }

    #[test]
    fn test_hedged_tie_routes_to_down() {
        let metrics = StrategyMetricsCalculator::calculate(&position((50.0, 0.30), (50.0, 0.60)));
        assert!(approx(metrics.target_shares, 0.0));
        // 1 - down cost, not 1 - up cost
        assert!(approx(metrics.target_price, 0.40));
        assert!(approx(metrics.hidden_lost, 0.0));
    }

    #[test]
    fn test_decimal_hedge_is_a_tie() {
        // 0.1 + 0.2 Up against 0.3 Down differs from zero only by f64 noise
        let position = RunningPosition {
            cum_up_size: 0.1 + 0.2,
            cum_up_notional: 0.1 * 0.30 + 0.2 * 0.30,
            cum_down_size: 0.3,
            cum_down_notional: 0.3 * 0.60,
        };
        let metrics = StrategyMetricsCalculator::calculate(&position);

        assert_eq!(metrics.target_shares, Some(0.0));
        assert!(approx(metrics.target_price, 0.40));
        assert_eq!(metrics.hidden_lost.map(f64::abs), Some(0.0));
    }

    #[test]
    fn test_one_sided_up_position() {
        let metrics = StrategyMetricsCalculator::calculate(&position((10.0, 0.60), (0.0, 0.0)));
        assert!(approx(metrics.target_shares, -10.0));
        assert!(approx(metrics.target_price, 0.40));
        assert!(approx(metrics.cash_out_shares, 0.0));
        assert_eq!(metrics.cash_out_price, None);
        assert_eq!(metrics.hidden_profit, None);
    }

    #[test]
    fn test_one_sided_down_position() {
        let metrics = StrategyMetricsCalculator::calculate(&position((0.0, 0.0), (10.0, 0.25)));
        assert!(approx(metrics.target_shares, 10.0));
        assert!(approx(metrics.target_price, 0.75));
        assert_eq!(metrics.cash_out_price, None);
    }
}
