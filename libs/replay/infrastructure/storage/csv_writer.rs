//! Merged table CSV writer
//!
//! The file starts with `#` comment lines describing the event, followed by
//! one header row and one record per second. Missing values are empty cells.

use super::{Result, StorageError};
use crate::application::merger::{MergedSeries, OutputRow};
use crate::domain::{format_timestamp, offset_label, PricePoint, SIZE_DECIMALS};
use chrono::FixedOffset;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Columns after `timestamp`, the display-time column and `{symbol}_close`
pub const MERGED_COLUMNS: [&str; 16] = [
    "btc_delta",
    "buy_up_size",
    "buy_up_price",
    "buy_down_size",
    "buy_down_price",
    "cum_up_size",
    "cum_up_avg_cost",
    "cum_down_size",
    "cum_down_avg_cost",
    "target_shares",
    "target_price",
    "cash_out_shares",
    "cash_out_price",
    "hidden_lost",
    "hidden_profit",
    "trade_count",
];

const PRICE_DECIMALS: i32 = 4;
const DELTA_DECIMALS: i32 = 2;

/// Descriptive header written above the table
///
/// Times are rendered in the merged series' display offset.
#[derive(Debug, Clone)]
pub struct CsvMetadata {
    pub title: String,
    pub slug: String,
    pub address: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub price_symbol: String,
    pub total_trades: usize,
}

impl CsvMetadata {
    fn price_column(&self) -> String {
        format!("{}_close", self.price_symbol.to_lowercase())
    }

    fn header(&self, offset: &FixedOffset) -> Vec<String> {
        let mut header = vec![
            "timestamp".to_string(),
            offset_label(offset),
            self.price_column(),
        ];
        header.extend(MERGED_COLUMNS.iter().map(|c| c.to_string()));
        header
    }

    fn write_comments<W: Write>(&self, out: &mut W, offset: &FixedOffset) -> std::io::Result<()> {
        writeln!(out, "# Event: {}", self.title)?;
        writeln!(out, "# Slug: {}", self.slug)?;
        writeln!(out, "# Address: {}", self.address)?;
        writeln!(
            out,
            "# Time Range: {} ~ {}",
            format_timestamp(self.start_ts, offset),
            format_timestamp(self.end_ts, offset)
        )?;
        writeln!(out, "# Price Symbol: {}", self.price_symbol)?;
        writeln!(out, "# Total Trades: {}", self.total_trades)?;
        writeln!(out, "#")
    }
}

/// Write the merged table to any writer
pub fn write_merged_csv<W: Write>(mut out: W, meta: &CsvMetadata, series: &MergedSeries) -> Result<()> {
    meta.write_comments(&mut out, &series.display_offset)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(meta.header(&series.display_offset))?;
    for row in &series.rows {
        writer.write_record(format_row(row))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the merged table to a file, creating parent directories
pub fn write_merged_csv_file(path: impl AsRef<Path>, meta: &CsvMetadata, series: &MergedSeries) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_merged_csv(BufWriter::new(file), meta, series)?;
    debug!("Wrote {} rows to {:?}", series.len(), path);
    Ok(())
}

/// Read `timestamp` and `{symbol}_close` back from a merged table
pub fn read_price_column(path: impl AsRef<Path>, price_symbol: &str) -> Result<Vec<PricePoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_path(path)?;

    let price_column = format!("{}_close", price_symbol.to_lowercase());
    let headers = reader.headers()?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StorageError::MissingColumn(name.to_string()))
    };
    let ts_idx = column_index("timestamp")?;
    let price_idx = column_index(&price_column)?;

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (Some(ts), Some(close)) = (record.get(ts_idx), record.get(price_idx)) else {
            continue;
        };
        if close.is_empty() {
            continue;
        }
        let timestamp = ts.parse::<i64>().map_err(|_| StorageError::InvalidValue {
            column: "timestamp".to_string(),
            value: ts.to_string(),
        })?;
        let close = close.parse::<f64>().map_err(|_| StorageError::InvalidValue {
            column: price_column.clone(),
            value: close.to_string(),
        })?;
        points.push(PricePoint::new(timestamp, close));
    }
    Ok(points)
}

fn format_row(row: &OutputRow) -> Vec<String> {
    let bucket = &row.bucket;
    let metrics = &row.metrics;
    vec![
        row.timestamp.to_string(),
        row.display_time.clone(),
        row.reference_price.to_string(),
        rounded(row.price_delta, DELTA_DECIMALS),
        nonzero(bucket.buy_up_size),
        optional(row.buy_up_price(), PRICE_DECIMALS),
        nonzero(bucket.buy_down_size),
        optional(row.buy_down_price(), PRICE_DECIMALS),
        nonzero(row.cum_up_size()),
        optional(row.cum_up_avg_cost(), PRICE_DECIMALS),
        nonzero(row.cum_down_size()),
        optional(row.cum_down_avg_cost(), PRICE_DECIMALS),
        optional(metrics.target_shares, SIZE_DECIMALS),
        optional(metrics.target_price, PRICE_DECIMALS),
        optional(metrics.cash_out_shares, SIZE_DECIMALS),
        optional(metrics.cash_out_price, PRICE_DECIMALS),
        optional(metrics.hidden_lost, PRICE_DECIMALS),
        optional(metrics.hidden_profit, PRICE_DECIMALS),
        if bucket.trade_count > 0 {
            bucket.trade_count.to_string()
        } else {
            String::new()
        },
    ]
}

fn rounded(value: f64, decimals: i32) -> String {
    let factor = 10f64.powi(decimals);
    let value = (value * factor).round() / factor;
    // -0 prints as "-0"
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn optional(value: Option<f64>, decimals: i32) -> String {
    value.map(|v| rounded(v, decimals)).unwrap_or_default()
}

fn nonzero(value: f64) -> String {
    if value > 0.0 {
        rounded(value, SIZE_DECIMALS)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::merger::TimeSeriesMerger;
    use crate::domain::{display_offset, EventWindow, Side, TradeFill};

    fn render_series(meta: &CsvMetadata, series: &MergedSeries) -> Vec<String> {
        let mut buf = Vec::new();
        write_merged_csv(&mut buf, meta, series).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn metadata(window: EventWindow) -> CsvMetadata {
        CsvMetadata {
            title: "Bitcoin Up or Down".to_string(),
            slug: "btc-updown".to_string(),
            address: "0xabc".to_string(),
            start_ts: window.start,
            end_ts: window.end,
            price_symbol: "BTCUSDT".to_string(),
            total_trades: 2,
        }
    }

    fn series(window: EventWindow) -> MergedSeries {
        let fills = [
            TradeFill::new(window.start, Side::Up, 10.0, 0.55),
            TradeFill::new(window.start + 1, Side::Down, 10.0, 0.35),
        ];
        let prices = [
            PricePoint::new(window.start, 87000.5),
            PricePoint::new(window.start + 1, 87012.257),
        ];
        TimeSeriesMerger::new(window).merge(&fills, &prices).unwrap()
    }

    fn render(window: EventWindow) -> String {
        let mut buf = Vec::new();
        write_merged_csv(&mut buf, &metadata(window), &series(window)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_comment_lines_and_header() {
        let window = EventWindow::new(1766920500, 1766920502);
        let output = render(window);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "# Event: Bitcoin Up or Down");
        assert_eq!(lines[1], "# Slug: btc-updown");
        assert_eq!(lines[2], "# Address: 0xabc");
        assert_eq!(lines[3], "# Time Range: 2025-12-28 19:15:00 ~ 2025-12-28 19:15:02");
        assert_eq!(lines[4], "# Price Symbol: BTCUSDT");
        assert_eq!(lines[5], "# Total Trades: 2");
        assert_eq!(lines[6], "#");
        assert!(lines[7].starts_with("timestamp,time_utc8,btcusdt_close,btc_delta,buy_up_size"));
        assert!(lines[7].ends_with("hidden_lost,hidden_profit,trade_count"));
        assert_eq!(lines.len(), 8 + 3);
    }

    #[test]
    fn test_row_formatting() {
        let window = EventWindow::new(1766920500, 1766920502);
        let output = render(window);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[8],
            "1766920500,2025-12-28 19:15:00,87000.5,0,10,0.55,,,10,0.55,,,-10,0.45,0,,-5.5,,1"
        );
        assert_eq!(
            lines[9],
            "1766920501,2025-12-28 19:15:01,87012.257,11.76,,,10,0.35,10,0.55,10,0.35,0,0.65,10,0.9,0,1,1"
        );
        // Third second carries the position and price forward with no activity
        assert_eq!(
            lines[10],
            "1766920502,2025-12-28 19:15:02,87012.257,11.76,,,,,10,0.55,10,0.35,0,0.65,10,0.9,0,1,"
        );
    }

    #[test]
    fn test_flat_rows_render_empty_position_cells() {
        let window = EventWindow::new(0, 2);
        let fills = [
            TradeFill::new(-1, Side::Up, 10.0, 0.5),
            TradeFill::new(3, Side::Down, 10.0, 0.5),
        ];
        let series = TimeSeriesMerger::new(window)
            .merge(&fills, &[PricePoint::new(0, 50000.0)])
            .unwrap();
        let lines = render_series(&metadata(window), &series);

        assert_eq!(lines[8], "0,1970-01-01 08:00:00,50000,0,,,,,,,,,,,,,,,");
        assert_eq!(lines[9], "1,1970-01-01 08:00:01,50000,0,,,,,,,,,,,,,,,");
        assert_eq!(lines[10], "2,1970-01-01 08:00:02,50000,0,,,,,,,,,,,,,,,");
    }

    #[test]
    fn test_decimal_hedge_renders_down_break_even() {
        let window = EventWindow::new(0, 0);
        let fills = [
            TradeFill::new(0, Side::Up, 0.1, 0.30),
            TradeFill::new(0, Side::Up, 0.2, 0.30),
            TradeFill::new(0, Side::Down, 0.3, 0.60),
        ];
        let series = TimeSeriesMerger::new(window)
            .merge(&fills, &[PricePoint::new(0, 50000.0)])
            .unwrap();
        let lines = render_series(&metadata(window), &series);

        // target_shares 0 pairs with 1 - down cost
        assert_eq!(
            lines[8],
            "0,1970-01-01 08:00:00,50000,0,0.3,0.3,0.3,0.6,0.3,0.3,0.3,0.6,0,0.4,0.3,0.9,0,0.03,3"
        );
    }

    #[test]
    fn test_times_follow_series_offset() {
        let window = EventWindow::new(1766920500, 1766920501);
        let fills = [TradeFill::new(1766920500, Side::Up, 1.0, 0.5)];
        let series = TimeSeriesMerger::new(window)
            .with_display_offset(display_offset(0).unwrap())
            .merge(&fills, &[PricePoint::new(1766920500, 1.0)])
            .unwrap();
        let lines = render_series(&metadata(window), &series);

        assert_eq!(lines[3], "# Time Range: 2025-12-28 11:15:00 ~ 2025-12-28 11:15:01");
        assert!(lines[7].starts_with("timestamp,time_utc0,"));
        assert!(lines[8].starts_with("1766920500,2025-12-28 11:15:00,"));
    }

    #[test]
    fn test_read_price_column() {
        let window = EventWindow::new(1766920500, 1766920502);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("merged_btc-updown.csv");

        write_merged_csv_file(&path, &metadata(window), &series(window)).unwrap();
        let points = read_price_column(&path, "BTCUSDT").unwrap();

        assert_eq!(
            points,
            vec![
                PricePoint::new(1766920500, 87000.5),
                PricePoint::new(1766920501, 87012.257),
                PricePoint::new(1766920502, 87012.257),
            ]
        );
        assert!(matches!(
            read_price_column(&path, "ETHUSDT"),
            Err(StorageError::MissingColumn(c)) if c == "ethusdt_close"
        ));
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(rounded(0.123456, 4), "0.1235");
        assert_eq!(rounded(-0.00001, 4), "0");
        assert_eq!(rounded(12.345, 2), "12.35");
        assert_eq!(nonzero(0.0), "");
        assert_eq!(optional(None, 4), "");
    }
}
