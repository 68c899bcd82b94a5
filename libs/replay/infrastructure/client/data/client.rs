//! Data API client for Polymarket
//!
//! Provides access to a user's trade history from the Data API.

use super::types::Trade;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default Data API base URL
pub const DATA_API_BASE_URL: &str = "https://data-api.polymarket.com";

/// Page size for trade pagination
const TRADES_PAGE_LIMIT: u32 = 100;

/// Maximum offset accepted by the Data API
const MAX_OFFSET: u32 = 10000;

#[derive(Error, Debug)]
pub enum DataApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, DataApiError>;

/// Data API client for fetching user trades
pub struct DataApiClient {
    base_url: String,
    client: Client,
}

impl DataApiClient {
    /// Create new Data API client with default base URL
    pub fn new() -> Self {
        Self::with_base_url(DATA_API_BASE_URL)
    }

    /// Create new Data API client with custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .tcp_keepalive(Duration::from_secs(15))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get one page of trades for a user in a market
    ///
    /// # Arguments
    /// * `user` - Wallet address (0x-prefixed)
    /// * `condition_id` - Market condition ID
    /// * `limit` / `offset` - Pagination window
    pub async fn get_trades_page(
        &self,
        user: &str,
        condition_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Trade>> {
        if user.is_empty() {
            return Err(DataApiError::InvalidParameter(
                "user address is required".to_string(),
            ));
        }
        if condition_id.is_empty() {
            return Err(DataApiError::InvalidParameter(
                "condition ID is required".to_string(),
            ));
        }

        let url = format!("{}/trades", self.base_url);
        let params = trade_query_params(user, condition_id, limit, offset);

        debug!("GET {} with params {:?}", url, params);

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();

        if status == 429 {
            warn!("Rate limit exceeded on Data API");
            return Err(DataApiError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DataApiError::ApiError(format!(
                "Failed to fetch trades ({}): {}",
                status, error_text
            )));
        }

        let trades: Vec<Trade> = response
            .json()
            .await
            .map_err(|e| DataApiError::DeserializeFailed(e.to_string()))?;

        Ok(trades)
    }

    /// Get all trades for a user in a market with automatic pagination
    pub async fn get_all_trades(&self, user: &str, condition_id: &str) -> Result<Vec<Trade>> {
        let mut all_trades = Vec::new();
        let mut offset: u32 = 0;

        info!("Starting paginated trade fetch for user {}", user);

        loop {
            if offset >= MAX_OFFSET {
                warn!(
                    "Reached maximum offset ({}) while fetching trades",
                    MAX_OFFSET
                );
                break;
            }

            let trades = self
                .get_trades_page(user, condition_id, TRADES_PAGE_LIMIT, offset)
                .await?;

            let count = trades.len();
            all_trades.extend(trades);
            info!("  Fetched {} trades...", all_trades.len());

            // If we got fewer than limit, we've reached the end
            if count < TRADES_PAGE_LIMIT as usize {
                debug!("Reached end of pagination (got {} < {})", count, TRADES_PAGE_LIMIT);
                break;
            }

            offset += TRADES_PAGE_LIMIT;

            // Rate limit protection: small delay between requests
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        info!(
            "Fetched total of {} trades for user {}",
            all_trades.len(),
            user
        );
        Ok(all_trades)
    }
}

impl Default for DataApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn trade_query_params(user: &str, condition_id: &str, limit: u32, offset: u32) -> Vec<(String, String)> {
    vec![
        ("user".to_string(), user.to_string()),
        ("market".to_string(), condition_id.to_string()),
        ("limit".to_string(), limit.to_string()),
        ("offset".to_string(), offset.to_string()),
    ]
}
