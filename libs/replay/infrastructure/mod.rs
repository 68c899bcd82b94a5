//! Infrastructure Layer
//!
//! Upstream HTTP clients, configuration, logging and file storage.
//! This layer depends on the domain layer but not on the application layer,
//! apart from the merged-table writer which renders merger output.

pub mod client;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types from client
pub use client::{
    BinanceClient, BinanceError, DataApiClient, DataApiError, GammaClient, GammaError, Kline,
    Trade, TradeCounts, TradeSide,
};

pub use config::{ConfigError, ReplayConfig};
pub use logging::init_tracing_with_level;
pub use storage::{CsvMetadata, StorageError, TradeSnapshot};
