//! Binance REST client for historical klines

use super::types::{BinanceErrorBody, Kline, RawKline};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default Binance REST base URL
pub const BINANCE_API_BASE_URL: &str = "https://api.binance.com";

/// Maximum klines per request
const KLINES_PAGE_LIMIT: usize = 1000;

/// One 1s candle, in milliseconds
const SECOND_MS: i64 = 1000;

#[derive(Error, Debug)]
pub enum BinanceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error ({code}): {msg}")]
    ApiError { code: i64, msg: String },

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

pub type Result<T> = std::result::Result<T, BinanceError>;

/// Binance spot REST client
pub struct BinanceClient {
    base_url: String,
    client: Client,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch one page of klines
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "BTCUSDT")
    /// * `interval` - Kline interval (e.g., "1s", "1m")
    /// * `start_ms` / `end_ms` - Open-time range in milliseconds
    pub async fn get_klines_page(
        &self,
        symbol: &str,
        interval: &str,
        start_ms: i64,
        end_ms: i64,
        limit: usize,
    ) -> Result<Vec<Kline>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let params = kline_query_params(symbol, interval, start_ms, end_ms, limit);

        debug!("GET {} with params {:?}", url, params);

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();

        if status == 429 || status == 418 {
            warn!("Rate limit exceeded on Binance");
            return Err(BinanceError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match serde_json::from_str::<BinanceErrorBody>(&body) {
                Ok(err) => BinanceError::ApiError {
                    code: err.code,
                    msg: err.msg,
                },
                Err(_) => BinanceError::HttpError(format!("{}: {}", status, body)),
            });
        }

        let raw: Vec<RawKline> = response
            .json()
            .await
            .map_err(|e| BinanceError::DeserializeFailed(e.to_string()))?;

        raw.into_iter()
            .map(|k| Kline::try_from(k).map_err(BinanceError::DeserializeFailed))
            .collect()
    }

    /// Fetch all 1s klines with open time in `[start_ts, end_ts]` (unix seconds)
    pub async fn get_klines_1s(&self, symbol: &str, start_ts: i64, end_ts: i64) -> Result<Vec<Kline>> {
        let mut all_klines = Vec::new();
        let end_ms = end_ts * SECOND_MS;
        let mut current_start = start_ts * SECOND_MS;

        info!("Fetching {} 1s klines...", symbol);

        while current_start <= end_ms {
            let klines = self
                .get_klines_page(symbol, "1s", current_start, end_ms, KLINES_PAGE_LIMIT)
                .await?;

            let count = klines.len();
            let last_open = klines.last().map(|k| k.open_time_ms);
            all_klines.extend(klines);
            info!("  Fetched {} klines...", all_klines.len());

            match last_open {
                Some(last_open) => current_start = last_open + SECOND_MS,
                None => break,
            }

            if count < KLINES_PAGE_LIMIT {
                break;
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        info!("Fetched total of {} klines", all_klines.len());
        Ok(all_klines)
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

fn kline_query_params(
    symbol: &str,
    interval: &str,
    start_ms: i64,
    end_ms: i64,
    limit: usize,
) -> Vec<(String, String)> {
    vec![
        ("symbol".to_string(), symbol.to_uppercase()),
        ("interval".to_string(), interval.to_string()),
        ("startTime".to_string(), start_ms.to_string()),
        ("endTime".to_string(), end_ms.to_string()),
        ("limit".to_string(), limit.to_string()),
    ]
}
