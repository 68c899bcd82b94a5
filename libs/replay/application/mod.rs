//! Application Layer
//!
//! Contains the merge engine and the use cases built on it.
//! This layer depends on domain and infrastructure layers.

pub mod analysis;
pub mod facade;
pub mod merger;
pub mod sources;

// Re-export application facade for binaries
pub use facade::{init_logging_with_level, ReplayApp};

pub use analysis::{AnalysisError, PositionBias, SideTotals, StrategyAnalysis};
pub use merger::{MergeError, MergeReport, MergeWarning, MergedSeries, TimeSeriesMerger};
pub use sources::{PriceSource, TradeSource};
