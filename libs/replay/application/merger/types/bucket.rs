//! Per-second trade activity

use crate::domain::{Side, TradeFill};

/// Aggregated buy activity within a single second
///
/// Sizes and notionals are stored; average prices are derived on read so that
/// combining fills stays additive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SecondBucket {
    pub timestamp: i64,
    pub buy_up_size: f64,
    pub buy_up_notional: f64,
    pub buy_down_size: f64,
    pub buy_down_notional: f64,
    pub trade_count: u32,
}

impl SecondBucket {
    /// Create an empty bucket for a second
    pub fn empty(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    /// Fold a fill into this bucket
    pub fn add(&mut self, fill: &TradeFill) {
        match fill.side {
            Side::Up => {
                self.buy_up_size += fill.size;
                self.buy_up_notional += fill.notional();
            }
            Side::Down => {
                self.buy_down_size += fill.size;
                self.buy_down_notional += fill.notional();
            }
        }
        self.trade_count += 1;
    }

    /// Size-weighted Up price for this second, if any Up was bought
    pub fn buy_up_price(&self) -> Option<f64> {
        average(self.buy_up_notional, self.buy_up_size)
    }

    /// Size-weighted Down price for this second, if any Down was bought
    pub fn buy_down_price(&self) -> Option<f64> {
        average(self.buy_down_notional, self.buy_down_size)
    }

    pub fn size(&self, side: Side) -> f64 {
        match side {
            Side::Up => self.buy_up_size,
            Side::Down => self.buy_down_size,
        }
    }

    pub fn has_trades(&self) -> bool {
        self.trade_count > 0
    }
}

/// notional / size, undefined for an empty side
pub(crate) fn average(notional: f64, size: f64) -> Option<f64> {
    (size > 0.0).then(|| notional / size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bucket_has_no_prices() {
        let bucket = SecondBucket::empty(42);
        assert_eq!(bucket.timestamp, 42);
        assert_eq!(bucket.buy_up_price(), None);
        assert_eq!(bucket.buy_down_price(), None);
        assert!(!bucket.has_trades());
    }

    #[test]
    fn test_same_second_fills_combine() {
        let mut bucket = SecondBucket::empty(0);
        bucket.add(&TradeFill::new(0, Side::Up, 10.0, 0.50));
        bucket.add(&TradeFill::new(0, Side::Up, 30.0, 0.60));
        bucket.add(&TradeFill::new(0, Side::Down, 5.0, 0.40));

        assert_eq!(bucket.trade_count, 3);
        assert_eq!(bucket.buy_up_size, 40.0);
        assert!((bucket.buy_up_notional - 23.0).abs() < 1e-12);
        // (10 * 0.50 + 30 * 0.60) / 40
        assert!((bucket.buy_up_price().unwrap() - 0.575).abs() < 1e-12);
        assert!((bucket.buy_down_price().unwrap() - 0.40).abs() < 1e-12);
        assert_eq!(bucket.size(Side::Down), 5.0);
    }

    #[test]
    fn test_zero_size_fill_keeps_price_undefined() {
        let mut bucket = SecondBucket::empty(0);
        bucket.add(&TradeFill::new(0, Side::Up, 0.0, 0.50));
        assert_eq!(bucket.trade_count, 1);
        assert_eq!(bucket.buy_up_price(), None);
    }
}
