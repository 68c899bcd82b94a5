//! Merge errors and warnings

use std::fmt;
use thiserror::Error;

/// Which input collection was empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Trades,
    Prices,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Trades => write!(f, "trades"),
            SeriesKind::Prices => write!(f, "prices"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error("Input series is empty: {0}")]
    EmptySeries(SeriesKind),

    #[error("Invalid event window: start {start} is after end {end}")]
    InvalidWindow { start: i64, end: i64 },

    #[error("Second {got} processed after {last}: seconds must be strictly ascending")]
    OutOfOrder { last: i64, got: i64 },
}

pub type Result<T> = std::result::Result<T, MergeError>;

/// Non-fatal conditions recorded while merging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeWarning {
    /// No price at or before the window start; the first later price was used
    /// for the leading seconds.
    BoundaryExtrapolation {
        window_start: i64,
        first_price_ts: i64,
        price: f64,
    },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeWarning::BoundaryExtrapolation {
                window_start,
                first_price_ts,
                price,
            } => write!(
                f,
                "no price at or before window start {}; using first price {} from {} for {} leading second(s)",
                window_start,
                price,
                first_price_ts,
                first_price_ts - window_start
            ),
        }
    }
}
