//! Time-Series Merger
//!
//! Per-second merge of a wallet's Up/Down fills with a reference price series.
//!
//! ## Pipeline
//!
//! - **TradeBucketizer**: fills to per-second, per-side buckets
//! - **PriceAligner**: price points to one price per second (carry-forward)
//! - **PositionAccumulator**: forward fold of buckets into running totals
//! - **StrategyMetricsCalculator**: break-even and hedge metrics per second
//! - **TimeSeriesMerger**: assembles the ordered, gap-free table

pub mod error;
pub mod merger;
pub mod services;
pub mod types;

pub use error::{MergeError, MergeWarning, SeriesKind};
pub use merger::{MergeReport, MergedSeries, TimeSeriesMerger};
pub use services::{
    AlignedPrices, BucketedTrades, PositionAccumulator, PriceAligner, StrategyMetricsCalculator,
    TradeBucketizer,
};
pub use types::{OutputRow, RunningPosition, SecondBucket, StrategyMetrics};
