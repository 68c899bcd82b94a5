//! Time-series merger
//!
//! Joins bucketed trades and aligned prices over the event's second grid,
//! folding the position forward and deriving metrics for every second.

use super::error::{MergeError, MergeWarning, Result, SeriesKind};
use super::services::{PositionAccumulator, PriceAligner, StrategyMetricsCalculator, TradeBucketizer};
use super::types::OutputRow;
use crate::domain::{default_display_offset, format_timestamp, EventWindow, PricePoint, TradeFill};
use chrono::FixedOffset;
use tracing::{debug, info};

/// Summary of a merge run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeReport {
    /// Fills supplied to the merger
    pub total_fills: usize,
    /// Fills dropped for falling outside the window
    pub excluded_fills: usize,
    /// Seconds with at least one fill
    pub active_seconds: usize,
    pub warnings: Vec<MergeWarning>,
}

impl MergeReport {
    pub fn included_fills(&self) -> usize {
        self.total_fills - self.excluded_fills
    }

    pub fn has_boundary_extrapolation(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, MergeWarning::BoundaryExtrapolation { .. }))
    }
}

/// The merged per-second table of one event
#[derive(Debug, Clone)]
pub struct MergedSeries {
    pub window: EventWindow,
    /// Offset the `display_time` of every row was rendered in
    pub display_offset: FixedOffset,
    pub rows: Vec<OutputRow>,
    pub report: MergeReport,
}

impl MergedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a second, if inside the window
    pub fn row_at(&self, timestamp: i64) -> Option<&OutputRow> {
        self.window
            .offset_of(timestamp)
            .and_then(|offset| self.rows.get(offset))
    }

    /// Rows with at least one fill
    pub fn active_rows(&self) -> impl Iterator<Item = &OutputRow> {
        self.rows.iter().filter(|r| r.has_trades())
    }

    /// Last row, carrying the final position
    pub fn last(&self) -> Option<&OutputRow> {
        self.rows.last()
    }
}

/// Builds the per-second table for one event window
///
/// Each merge uses its own accumulator, so independent events can be merged
/// concurrently with separate mergers.
pub struct TimeSeriesMerger {
    window: EventWindow,
    display_offset: FixedOffset,
}

impl TimeSeriesMerger {
    /// Create a merger displaying times in UTC+8
    pub fn new(window: EventWindow) -> Self {
        Self {
            window,
            display_offset: default_display_offset(),
        }
    }

    /// Set the fixed offset used for the display-time column
    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn window(&self) -> EventWindow {
        self.window
    }

    /// Merge fills and price points into one row per second
    pub fn merge(&self, fills: &[TradeFill], points: &[PricePoint]) -> Result<MergedSeries> {
        if !self.window.is_valid() {
            return Err(MergeError::InvalidWindow {
                start: self.window.start,
                end: self.window.end,
            });
        }
        if fills.is_empty() {
            return Err(MergeError::EmptySeries(SeriesKind::Trades));
        }

        let prices = PriceAligner::new(self.window).align(points)?;
        let buckets = TradeBucketizer::new(self.window).bucketize(fills);

        let open_price = prices
            .open()
            .ok_or(MergeError::EmptySeries(SeriesKind::Prices))?;

        debug!(
            "Merging {} fill(s) and {} price point(s) over {} second(s)",
            fills.len(),
            points.len(),
            self.window.len()
        );

        let mut accumulator = PositionAccumulator::new();
        let mut rows = Vec::with_capacity(self.window.len());

        for (bucket, (timestamp, price)) in buckets.iter().zip(prices.iter()) {
            let position = accumulator.advance(bucket)?;
            let metrics = StrategyMetricsCalculator::calculate(&position);

            rows.push(OutputRow {
                timestamp,
                display_time: format_timestamp(timestamp, &self.display_offset),
                reference_price: price,
                price_delta: price - open_price,
                bucket: *bucket,
                position,
                metrics,
            });
        }

        let report = MergeReport {
            total_fills: fills.len(),
            excluded_fills: buckets.excluded(),
            active_seconds: buckets.active_seconds(),
            warnings: prices.warning().into_iter().collect(),
        };

        info!(
            "Merged {} rows ({} active seconds, {} fill(s) excluded)",
            rows.len(),
            report.active_seconds,
            report.excluded_fills
        );

        Ok(MergedSeries {
            window: self.window,
            display_offset: self.display_offset,
            rows,
            report,
        })
    }
}
