//! Binance REST client
//!
//! Historical 1s klines used as the reference price series.
//!
//! ```rust,ignore
//! use replay::infrastructure::client::binance::BinanceClient;
//!
//! let client = BinanceClient::new();
//! let klines = client.get_klines_1s("BTCUSDT", start_ts, end_ts).await?;
//! let points: Vec<_> = klines.iter().map(|k| k.to_price_point()).collect();
//! ```

mod client;
mod types;

pub use client::{BinanceClient, BinanceError, Result, BINANCE_API_BASE_URL};
pub use types::{BinanceErrorBody, Kline, RawKline};
