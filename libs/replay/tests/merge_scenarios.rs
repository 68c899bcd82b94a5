//! Integration test: end-to-end merge scenarios
//!
//! Drives the merger, the CSV writer and the analysis through the facade
//! using on-disk snapshots in a temp directory.

mod common;

use common::fixtures::{self, down, up, EVENT_START};
use async_trait::async_trait;
use replay::application::{MergeError, MergeWarning, PriceSource, ReplayApp, TimeSeriesMerger, TradeSource};
use replay::domain::{EventWindow, PricePoint, Side};
use replay::infrastructure::client::data::Trade;
use replay::infrastructure::storage::{read_price_column, write_snapshot, TradeSnapshot};
use std::sync::Arc;

struct NoTrades;

#[async_trait]
impl TradeSource for NoTrades {
    async fn fetch_trades(&self, _user: &str, _condition_id: &str) -> anyhow::Result<Vec<Trade>> {
        Ok(Vec::new())
    }
}

/// Serves one price at the window start and one late in the window
struct TwoPrices;

#[async_trait]
impl PriceSource for TwoPrices {
    async fn fetch_prices(&self, symbol: &str, window: EventWindow) -> anyhow::Result<Vec<PricePoint>> {
        assert_eq!(symbol, "BTCUSDT");
        Ok(vec![
            PricePoint::new(window.start, 87000.0),
            PricePoint::new(window.end - 10, 87150.0),
        ])
    }
}

#[test]
fn test_single_second_hedge() {
    // Both sides bought in the first second against a flat price
    let window = EventWindow::new(0, 9);
    let fills = [up(0, 100.0, 0.55), down(0, 60.0, 0.40)];
    let series = TimeSeriesMerger::new(window)
        .merge(&fills, &fixtures::flat_prices(window, 50000.0))
        .unwrap();

    let row = &series.rows[0];
    assert_eq!(row.cum_up_size(), 100.0);
    assert!((row.cum_up_avg_cost().unwrap() - 0.55).abs() < 1e-12);
    assert_eq!(row.cum_down_size(), 60.0);
    assert!((row.cum_down_avg_cost().unwrap() - 0.40).abs() < 1e-12);
    assert_eq!(row.metrics.target_shares, Some(-40.0));
    assert!((row.metrics.target_price.unwrap() - 0.45).abs() < 1e-12);
    assert_eq!(row.metrics.cash_out_shares, Some(60.0));
    assert!((row.metrics.cash_out_price.unwrap() - 0.95).abs() < 1e-12);
    assert_eq!(row.price_delta, 0.0);
    assert_eq!(row.bucket.trade_count, 2);

    // Nothing changes afterwards
    assert_eq!(series.last().unwrap().position, row.position);
}

#[test]
fn test_late_first_price_is_extrapolated_backwards() {
    let window = EventWindow::new(0, 10);
    let fills = [up(3, 10.0, 0.5)];
    let series = TimeSeriesMerger::new(window)
        .merge(&fills, &[PricePoint::new(5, 100.0), PricePoint::new(8, 101.0)])
        .unwrap();

    for t in 0..=5 {
        assert_eq!(series.row_at(t).unwrap().reference_price, 100.0);
    }
    assert_eq!(series.row_at(8).unwrap().reference_price, 101.0);
    assert_eq!(series.row_at(10).unwrap().price_delta, 1.0);

    assert_eq!(series.report.warnings.len(), 1);
    assert!(matches!(
        series.report.warnings[0],
        MergeWarning::BoundaryExtrapolation { first_price_ts: 5, .. }
    ));
}

#[test]
fn test_fills_outside_window_leave_position_flat() {
    let window = EventWindow::new(100, 110);
    let fills = [up(99, 10.0, 0.5), down(111, 5.0, 0.4)];
    let series = TimeSeriesMerger::new(window)
        .merge(&fills, &fixtures::rising_prices(window, 100.0, 0.5))
        .unwrap();

    assert_eq!(series.len(), 11);
    assert_eq!(series.report.excluded_fills, 2);
    assert_eq!(series.report.included_fills(), 0);
    for row in &series.rows {
        assert!(row.position.is_flat());
        assert!(row.metrics.is_undefined());
        assert!(row.cum_up_avg_cost().is_none());
    }
    assert_eq!(series.row_at(110).unwrap().price_delta, 5.0);
}

#[test]
fn test_fatal_inputs() {
    let window = EventWindow::new(0, 5);
    assert_eq!(
        TimeSeriesMerger::new(window)
            .merge(&[], &fixtures::flat_prices(window, 1.0))
            .unwrap_err(),
        MergeError::EmptySeries(replay::application::merger::SeriesKind::Trades)
    );
    assert!(matches!(
        TimeSeriesMerger::new(EventWindow::new(5, 0)).merge(&[up(0, 1.0, 0.5)], &[]),
        Err(MergeError::InvalidWindow { .. })
    ));
}

fn write_fixture_snapshot(dir: &std::path::Path) -> (ReplayApp, TradeSnapshot) {
    let app = ReplayApp::new(fixtures::config(dir));
    let at = |offset: i64| EVENT_START + offset;
    let snapshot = TradeSnapshot::new(
        fixtures::event_info(),
        fixtures::WALLET,
        vec![
            fixtures::trade("BUY", "Up", 100.0, 0.55, at(12)),
            fixtures::trade("BUY", "Down", 60.0, 0.40, at(12)),
            fixtures::trade("BUY", "Up", 50.0, 0.62, at(300)),
            fixtures::trade("SELL", "Up", 20.0, 0.70, at(400)),
            fixtures::trade("BUY", "Down", 80.0, 0.25, at(600)),
        ],
    );
    write_snapshot(app.snapshot_path(), &snapshot).unwrap();
    (app, snapshot)
}

#[test]
fn test_merge_is_byte_identical_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let (app, snapshot) = write_fixture_snapshot(dir.path());
    let prices = fixtures::rising_prices(snapshot.event.window(), 87000.0, 0.25);

    app.merge_snapshot(&snapshot, &prices).unwrap();
    let first = std::fs::read(app.merged_csv_path()).unwrap();
    app.merge_snapshot(&snapshot, &prices).unwrap();
    let second = std::fs::read(app.merged_csv_path()).unwrap();

    assert_eq!(first, second);
    verbose_println!("{}", String::from_utf8_lossy(&first));
}

#[test]
fn test_merge_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let (app, snapshot) = write_fixture_snapshot(dir.path());
    let window = snapshot.event.window();
    let prices = fixtures::rising_prices(window, 87000.0, 0.25);

    let series = app.merge_snapshot(&snapshot, &prices).unwrap();
    assert_eq!(series.len(), 901);
    assert_eq!(series.report.total_fills, 4);
    assert_eq!(series.report.active_seconds, 3);

    let last = series.last().unwrap();
    assert_eq!(last.cum_up_size(), 150.0);
    assert_eq!(last.cum_down_size(), 140.0);
    assert!((last.metrics.target_shares.unwrap() + 10.0).abs() < 1e-9);

    let csv = std::fs::read_to_string(app.merged_csv_path()).unwrap();
    assert!(csv.starts_with("# Event: Bitcoin Up or Down"));
    assert!(csv.contains("# Total Trades: 5\n"));
    assert!(csv.contains("timestamp,time_utc8,btcusdt_close,btc_delta"));
    assert!(csv.contains("1766920512,2025-12-28 19:15:12,"));

    let read_back = read_price_column(app.merged_csv_path(), "BTCUSDT").unwrap();
    assert_eq!(read_back.len(), 901);

    let analysis = app.analyze().unwrap();
    assert_eq!(analysis.outcome, Side::Up);
    // 12, 300, 600 and the sell at 400
    assert_eq!(analysis.active_seconds, 4);
    assert!((analysis.price_change - 225.0).abs() < 1e-6);
    assert_eq!(analysis.up.shares, 150.0);
    assert_eq!(analysis.payout, 150.0);
    assert_eq!(analysis.entry_delay_secs, Some(12));
    assert_eq!(analysis.exit_lead_secs, Some(300));
    assert!((analysis.entry_price_delta.unwrap() - 3.0).abs() < 1e-6);
}

#[test]
fn test_analyze_without_merge_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = write_fixture_snapshot(dir.path());
    let err = app.analyze().unwrap_err();
    assert!(err.to_string().contains("run merge_prices first"));
}

#[tokio::test]
async fn test_merge_prices_reads_from_price_source() {
    let dir = tempfile::tempdir().unwrap();
    let (app, snapshot) = write_fixture_snapshot(dir.path());
    let app = app.with_sources(Arc::new(NoTrades), Arc::new(TwoPrices));

    let series = app.merge_prices().await.unwrap();
    let window = snapshot.event.window();

    assert_eq!(series.len(), window.len());
    assert_eq!(series.row_at(window.end - 11).unwrap().reference_price, 87000.0);
    assert_eq!(series.row_at(window.end).unwrap().price_delta, 150.0);
    assert!(!series.report.has_boundary_extrapolation());

    let analysis = app.analyze().unwrap();
    assert_eq!(analysis.close_price, 87150.0);
    assert_eq!(analysis.payout, 150.0);
}
