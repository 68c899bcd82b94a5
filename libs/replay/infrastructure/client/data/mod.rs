//! Data API client for Polymarket
//!
//! Provides access to a wallet's trade history.
//!
//! # Example
//!
//! ```rust,ignore
//! use replay::infrastructure::client::data::{DataApiClient, trades_to_fills};
//!
//! let client = DataApiClient::new();
//! let trades = client.get_all_trades("0x1234...", "0xcondition...").await?;
//! let fills = trades_to_fills(&trades);
//! ```

mod client;
mod types;

pub use client::{DataApiClient, DataApiError, Result, DATA_API_BASE_URL};
pub use types::{trades_to_fills, Trade, TradeCounts, TradeSide};
