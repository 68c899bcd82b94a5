//! Trade and price source seams
//!
//! The facade fetches trades and prices through these traits; the live
//! implementations are the Data API and Binance clients.

use crate::domain::{EventWindow, PricePoint};
use crate::infrastructure::client::data::Trade;
use crate::infrastructure::client::{BinanceClient, DataApiClient};
use async_trait::async_trait;

/// Provider of a wallet's trades in one market
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Raw trades as reported upstream
    async fn fetch_trades(&self, user: &str, condition_id: &str) -> anyhow::Result<Vec<Trade>>;
}

/// Provider of a reference price series
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(&self, symbol: &str, window: EventWindow) -> anyhow::Result<Vec<PricePoint>>;
}

#[async_trait]
impl TradeSource for DataApiClient {
    async fn fetch_trades(&self, user: &str, condition_id: &str) -> anyhow::Result<Vec<Trade>> {
        Ok(self.get_all_trades(user, condition_id).await?)
    }
}

#[async_trait]
impl PriceSource for BinanceClient {
    async fn fetch_prices(&self, symbol: &str, window: EventWindow) -> anyhow::Result<Vec<PricePoint>> {
        let klines = self.get_klines_1s(symbol, window.start, window.end).await?;
        Ok(klines.iter().map(|k| k.to_price_point()).collect())
    }
}
