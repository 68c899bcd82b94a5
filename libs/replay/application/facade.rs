//! Application Facade
//!
//! Public API for binaries (presentation layer).
//! Each step reads what the previous one wrote under `output_dir`.

use super::analysis::StrategyAnalysis;
use super::merger::{MergedSeries, TimeSeriesMerger};
use super::sources::{PriceSource, TradeSource};
use crate::domain::PricePoint;
use crate::infrastructure::storage::{
    merged_csv_path, read_price_column, read_snapshot, snapshot_path, write_merged_csv_file,
    write_snapshot, CsvMetadata, TradeSnapshot,
};
use crate::infrastructure::{
    init_tracing_with_level, BinanceClient, DataApiClient, GammaClient, ReplayConfig,
    TradeCounts,
};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Active seconds logged after a merge
const PREVIEW_ROWS: usize = 5;

/// Initialize logging at the configured level
pub fn init_logging_with_level(level: &str) {
    init_tracing_with_level(level);
}

/// Application facade for the fetch / merge / analyze pipeline
pub struct ReplayApp {
    pub config: ReplayConfig,
    gamma: GammaClient,
    trades: Arc<dyn TradeSource>,
    prices: Arc<dyn PriceSource>,
}

impl ReplayApp {
    /// Build the app with live API clients from configuration
    pub fn new(config: ReplayConfig) -> Self {
        let gamma = GammaClient::new(&config.gamma_api_url);
        let trades = Arc::new(DataApiClient::with_base_url(&config.data_api_url));
        let prices = Arc::new(BinanceClient::with_base_url(&config.binance_api_url));
        Self {
            config,
            gamma,
            trades,
            prices,
        }
    }

    /// Replace the trade and price sources
    pub fn with_sources(mut self, trades: Arc<dyn TradeSource>, prices: Arc<dyn PriceSource>) -> Self {
        self.trades = trades;
        self.prices = prices;
        self
    }

    pub fn snapshot_path(&self) -> PathBuf {
        snapshot_path(self.config.output_path(), &self.config.slug)
    }

    pub fn merged_csv_path(&self) -> PathBuf {
        merged_csv_path(self.config.output_path(), &self.config.slug)
    }

    /// Look up the event, fetch the wallet's trades and write the snapshot
    pub async fn fetch_trades(&self) -> anyhow::Result<TradeSnapshot> {
        let event = self
            .gamma
            .get_event_info(&self.config.slug)
            .await
            .with_context(|| format!("Failed to look up event '{}'", self.config.slug))?;

        let trades = self
            .trades
            .fetch_trades(&self.config.address, &event.condition_id)
            .await
            .context("Failed to fetch trades")?;

        let counts = TradeCounts::from_trades(&trades);
        info!("Trade summary ({} total):", trades.len());
        info!("  BUY Up:    {}", counts.buy_up);
        info!("  BUY Down:  {}", counts.buy_down);
        info!("  SELL Up:   {}", counts.sell_up);
        info!("  SELL Down: {}", counts.sell_down);
        if counts.unknown > 0 {
            warn!("  {} trade(s) with an unrecognized outcome", counts.unknown);
        }

        let snapshot = TradeSnapshot::new(event, self.config.address.clone(), trades);
        let path = self.snapshot_path();
        write_snapshot(&path, &snapshot)
            .with_context(|| format!("Failed to write snapshot {:?}", path))?;
        info!("Saved snapshot to {:?}", path);

        Ok(snapshot)
    }

    /// Fetch reference prices for the snapshot's event, merge and write the CSV
    pub async fn merge_prices(&self) -> anyhow::Result<MergedSeries> {
        let snapshot = self.load_snapshot()?;
        let window = snapshot.event.window();

        info!(
            "Fetching {} 1s klines for {} second(s)",
            self.config.price_symbol,
            window.len()
        );
        let points = self
            .prices
            .fetch_prices(&self.config.price_symbol, window)
            .await
            .context("Failed to fetch reference prices")?;
        info!("Fetched {} price point(s)", points.len());

        self.merge_snapshot(&snapshot, &points)
    }

    /// Merge a snapshot with price points and write the CSV
    pub fn merge_snapshot(&self, snapshot: &TradeSnapshot, points: &[PricePoint]) -> anyhow::Result<MergedSeries> {
        let offset = self.config.display_offset()?;
        let fills = snapshot.fills();
        if fills.len() < snapshot.trades.len() {
            info!(
                "Excluding {} non-buy or unrecognized trade(s)",
                snapshot.trades.len() - fills.len()
            );
        }

        let series = TimeSeriesMerger::new(snapshot.event.window())
            .with_display_offset(offset)
            .merge(&fills, points)
            .context("Failed to merge trades with prices")?;

        let meta = CsvMetadata {
            title: snapshot.event.title.clone(),
            slug: snapshot.event.slug.clone(),
            address: snapshot.address.clone(),
            start_ts: snapshot.event.start_ts,
            end_ts: snapshot.event.end_ts,
            price_symbol: self.config.price_symbol.clone(),
            total_trades: snapshot.trades.len(),
        };
        let path = self.merged_csv_path();
        write_merged_csv_file(&path, &meta, &series)
            .with_context(|| format!("Failed to write merged CSV {:?}", path))?;

        log_merge_summary(&series);
        info!("Saved merged table to {:?}", path);

        Ok(series)
    }

    /// Settle the snapshot against the merged table's price column
    pub fn analyze(&self) -> anyhow::Result<StrategyAnalysis> {
        let snapshot = self.load_snapshot()?;
        let path = self.merged_csv_path();
        let points = read_price_column(&path, &self.config.price_symbol)
            .with_context(|| format!("Failed to read merged CSV {:?}; run merge_prices first", path))?;

        let trade_times: Vec<i64> = snapshot.trades.iter().map(|t| t.timestamp).collect();
        let analysis =
            StrategyAnalysis::compute(&snapshot.event, &snapshot.fills(), &trade_times, &points)?;
        analysis.log();
        Ok(analysis)
    }

    fn load_snapshot(&self) -> anyhow::Result<TradeSnapshot> {
        let path = self.snapshot_path();
        read_snapshot(&path)
            .with_context(|| format!("Failed to read snapshot {:?}; run fetch_trades first", path))
    }
}

fn log_merge_summary(series: &MergedSeries) {
    let report = &series.report;
    info!("Merge summary:");
    info!("  Rows: {}", series.len());
    info!("  Fills included: {}", report.included_fills());
    info!("  Fills outside window: {}", report.excluded_fills);
    info!("  Active seconds: {}", report.active_seconds);
    if report.has_boundary_extrapolation() {
        warn!("  Leading seconds use the first available price");
    }

    let preview: Vec<_> = series.active_rows().take(PREVIEW_ROWS).collect();
    if preview.is_empty() {
        return;
    }
    info!("First {} active second(s):", preview.len());
    for row in preview {
        info!(
            "  {} | price {:.2} | up +{} down +{} | cum up {} down {}",
            row.display_time,
            row.reference_price,
            row.bucket.buy_up_size,
            row.bucket.buy_down_size,
            row.cum_up_size(),
            row.cum_down_size()
        );
    }
}
