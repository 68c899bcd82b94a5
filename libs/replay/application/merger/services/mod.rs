//! Services composing the time-series merger

mod accumulator;
mod aligner;
mod bucketizer;
mod metrics_calculator;

pub use accumulator::PositionAccumulator;
pub use aligner::{AlignedPrices, PriceAligner};
pub use bucketizer::{BucketedTrades, TradeBucketizer};
pub use metrics_calculator::StrategyMetricsCalculator;
