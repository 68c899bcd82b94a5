//! Aligns a reference price series onto the per-second grid

use crate::application::merger::error::{MergeError, MergeWarning, Result, SeriesKind};
use crate::domain::{EventWindow, PricePoint};
use tracing::warn;

/// One price per second of the window
#[derive(Debug, Clone)]
pub struct AlignedPrices {
    window: EventWindow,
    prices: Vec<f64>,
    warning: Option<MergeWarning>,
}

impl AlignedPrices {
    pub fn get(&self, timestamp: i64) -> Option<f64> {
        self.window
            .offset_of(timestamp)
            .and_then(|offset| self.prices.get(offset).copied())
    }

    /// Price at the window's first second
    pub fn open(&self) -> Option<f64> {
        self.prices.first().copied()
    }

    /// Price at the window's last second
    pub fn close(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.window.seconds().zip(self.prices.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Boundary extrapolation recorded during alignment, if any
    pub fn warning(&self) -> Option<MergeWarning> {
        self.warning
    }
}

/// Last-observation-carry-forward alignment for a fixed window
pub struct PriceAligner {
    window: EventWindow,
}

impl PriceAligner {
    pub fn new(window: EventWindow) -> Self {
        Self { window }
    }

    /// Align points onto every second of the window
    ///
    /// Each second takes the latest point at or before it. Seconds before the
    /// first known point take the first point's price, recorded once as a
    /// boundary-extrapolation warning.
    pub fn align(&self, points: &[PricePoint]) -> Result<AlignedPrices> {
        if points.is_empty() {
            return Err(MergeError::EmptySeries(SeriesKind::Prices));
        }

        let mut sorted = points.to_vec();
        sorted.sort_by_key(|p| p.timestamp);
        let first = sorted[0];

        let mut prices = Vec::with_capacity(self.window.len());
        let mut warning = None;
        let mut current: Option<f64> = None;
        let mut next = 0;

        for second in self.window.seconds() {
            while next < sorted.len() && sorted[next].timestamp <= second {
                current = Some(sorted[next].close);
                next += 1;
            }

            let price = match current {
                Some(price) => price,
                None => {
                    if warning.is_none() {
                        let extrapolation = MergeWarning::BoundaryExtrapolation {
                            window_start: self.window.start,
                            first_price_ts: first.timestamp,
                            price: first.close,
                        };
                        warn!("{}", extrapolation);
                        warning = Some(extrapolation);
                    }
                    first.close
                }
            };
            prices.push(price);
        }

        Ok(AlignedPrices {
            window: self.window,
            prices,
            warning,
        })
    }
}
