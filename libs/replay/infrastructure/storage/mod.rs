//! File storage for snapshots and merged tables
//!
//! - `polymarket_{slug}.json`: event metadata plus raw wallet trades
//! - `merged_{slug}.csv`: the per-second merged table

mod csv_writer;
mod snapshot;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use csv_writer::{read_price_column, write_merged_csv, write_merged_csv_file, CsvMetadata, MERGED_COLUMNS};
pub use snapshot::{read_snapshot, write_snapshot, TradeSnapshot};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}' in merged CSV")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Path of the trade snapshot for an event
pub fn snapshot_path(output_dir: impl AsRef<Path>, slug: &str) -> PathBuf {
    output_dir.as_ref().join(format!("polymarket_{}.json", slug))
}

/// Path of the merged table for an event
pub fn merged_csv_path(output_dir: impl AsRef<Path>, slug: &str) -> PathBuf {
    output_dir.as_ref().join(format!("merged_{}.csv", slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        assert_eq!(
            snapshot_path("./output", "btc-updown"),
            PathBuf::from("./output/polymarket_btc-updown.json")
        );
        assert_eq!(
            merged_csv_path("./output", "btc-updown"),
            PathBuf::from("./output/merged_btc-updown.csv")
        );
    }
}
