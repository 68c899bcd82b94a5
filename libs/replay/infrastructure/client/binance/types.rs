//! Binance REST kline types
//!
//! `GET /api/v3/klines` returns each candle as a positional JSON array:
//!
//! ```json
//! [
//!     1766920500000,      // open time (ms)
//!     "87398.39000000",   // open
//!     "87400.00000000",   // high
//!     "87398.38000000",   // low
//!     "87399.99000000",   // close
//!     "1.20300000",       // volume
//!     1766920500999,      // close time (ms)
//!     "105143.12",        // quote asset volume
//!     42,                 // number of trades
//!     "0.60000000",       // taker buy base volume
//!     "52440.00",         // taker buy quote volume
//!     "0"                 // ignore
//! ]
//! ```

use crate::domain::PricePoint;
use serde::Deserialize;

/// Positional kline array as sent by Binance
#[derive(Debug, Clone, Deserialize)]
pub struct RawKline(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    pub String,
    pub u64,
    pub String,
    pub String,
    pub String,
);

/// Parsed 1-interval candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kline {
    /// Open time (ms since epoch)
    pub open_time_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Kline {
    /// Open time in unix seconds
    pub fn open_time_secs(&self) -> i64 {
        self.open_time_ms / 1000
    }

    /// Close price keyed by the candle's open second
    pub fn to_price_point(&self) -> PricePoint {
        PricePoint::new(self.open_time_secs(), self.close)
    }
}

impl TryFrom<RawKline> for Kline {
    type Error = String;

    fn try_from(raw: RawKline) -> Result<Self, Self::Error> {
        let parse = |field: &str, value: &str| -> Result<f64, String> {
            value
                .parse::<f64>()
                .map_err(|e| format!("invalid {} '{}': {}", field, value, e))
        };

        Ok(Kline {
            open_time_ms: raw.0,
            open: parse("open", &raw.1)?,
            high: parse("high", &raw.2)?,
            low: parse("low", &raw.3)?,
            close: parse("close", &raw.4)?,
            volume: parse("volume", &raw.5)?,
        })
    }
}

/// Binance REST error body
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorBody {
    pub code: i64,
    pub msg: String,
}
