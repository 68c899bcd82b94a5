//! HTTP clients for the upstream data sources
//!
//! - **data**: Polymarket Data API (wallet trades)
//! - **gamma**: Polymarket Gamma API (event metadata)
//! - **binance**: Binance REST (1s klines)

pub mod binance;
pub mod data;
pub mod gamma;

pub use binance::{BinanceClient, BinanceError, Kline};
pub use data::{trades_to_fills, DataApiClient, DataApiError, Trade, TradeCounts, TradeSide};
pub use gamma::{GammaClient, GammaError, GammaEvent, GammaMarket};
