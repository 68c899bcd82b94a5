//! Types for the time-series merger

mod bucket;
mod metrics;
mod position;
mod row;

pub use bucket::SecondBucket;
pub use metrics::StrategyMetrics;
pub use position::RunningPosition;
pub use row::OutputRow;
