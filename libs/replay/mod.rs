//! Polymarket Position Replay
//!
//! Reconstructs a wallet's position in a binary Up/Down event second by
//! second and lines it up against a reference price series.
//!
//! ## Architecture
//!
//! - **domain**: fills, price points, event windows, display time
//! - **application**: the time-series merger, strategy analysis and the
//!   fetch / merge / analyze facade
//! - **infrastructure**: Gamma, Data API and Binance clients, config,
//!   logging, snapshot and CSV storage

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{
    init_logging_with_level, MergeError, MergedSeries, ReplayApp, StrategyAnalysis,
    TimeSeriesMerger,
};
pub use domain::{EventInfo, EventWindow, PricePoint, Side, TradeFill};
pub use infrastructure::{ConfigError, ReplayConfig};
