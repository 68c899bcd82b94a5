use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places share sizes are reported with
pub const SIZE_DECIMALS: i32 = 6;

/// Round a share size to [`SIZE_DECIMALS`], normalizing `-0` to `0`
pub fn round_size(size: f64) -> f64 {
    let factor = 10f64.powi(SIZE_DECIMALS);
    let rounded = (size * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Outcome side of a binary Up/Down market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// Parse an outcome label (e.g., "Up", "down")
    pub fn from_outcome(outcome: &str) -> Option<Self> {
        match outcome.trim().to_lowercase().as_str() {
            "up" => Some(Side::Up),
            "down" => Some(Side::Down),
            _ => None,
        }
    }

    /// Map an outcome index (0 = Up, 1 = Down)
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Side::Up),
            1 => Some(Side::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Up => "Up",
            Side::Down => "Down",
        }
    }

    /// The complementary side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single buy fill on one outcome token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeFill {
    /// Unix seconds
    pub timestamp: i64,
    pub side: Side,
    /// Shares bought
    pub size: f64,
    /// Cost per share, in (0, 1)
    pub price: f64,
}

impl TradeFill {
    pub fn new(timestamp: i64, side: Side, size: f64, price: f64) -> Self {
        Self {
            timestamp,
            side,
            size,
            price,
        }
    }

    /// Total cost of the fill
    pub fn notional(&self) -> f64 {
        self.size * self.price
    }
}

/// Reference price observation (close price at a second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Inclusive second-granularity window of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    pub start: i64,
    pub end: i64,
}

impl EventWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// A window is valid when it spans at least one second
    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Number of seconds in the window (both ends included)
    pub fn len(&self) -> usize {
        if self.is_valid() {
            (self.end - self.start + 1) as usize
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of a timestamp from the window start, if inside the window
    pub fn offset_of(&self, timestamp: i64) -> Option<usize> {
        self.contains(timestamp)
            .then(|| (timestamp - self.start) as usize)
    }

    /// Iterate over every second in ascending order
    pub fn seconds(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }

    /// Duration as reported by the event (end - start)
    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }
}

/// Event metadata used to correlate inputs and label outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    pub title: String,
    pub slug: String,
    /// Raw start time string (ISO 8601)
    pub start_time: String,
    /// Raw end time string (ISO 8601)
    pub end_time: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub condition_id: String,
}

impl EventInfo {
    pub fn window(&self) -> EventWindow {
        EventWindow::new(self.start_ts, self.end_ts)
    }
}
