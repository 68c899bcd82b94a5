//! Groups trade fills into per-second buckets

use crate::application::merger::types::SecondBucket;
use crate::domain::{EventWindow, Side, TradeFill};
use tracing::debug;

/// Dense per-second buckets covering an event window
#[derive(Debug, Clone)]
pub struct BucketedTrades {
    window: EventWindow,
    buckets: Vec<SecondBucket>,
    excluded: usize,
}

impl BucketedTrades {
    pub fn window(&self) -> EventWindow {
        self.window
    }

    /// Bucket for a second, `None` outside the window
    pub fn get(&self, timestamp: i64) -> Option<&SecondBucket> {
        self.window
            .offset_of(timestamp)
            .and_then(|offset| self.buckets.get(offset))
    }

    /// Buckets in ascending second order
    pub fn iter(&self) -> impl Iterator<Item = &SecondBucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Fills dropped because they fell outside the window
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Seconds with at least one fill
    pub fn active_seconds(&self) -> usize {
        self.buckets.iter().filter(|b| b.has_trades()).count()
    }

    /// Total bucketed size for a side
    pub fn total_size(&self, side: Side) -> f64 {
        self.buckets.iter().map(|b| b.size(side)).sum()
    }
}

/// Buckets fills by second and side for a fixed window
pub struct TradeBucketizer {
    window: EventWindow,
}

impl TradeBucketizer {
    pub fn new(window: EventWindow) -> Self {
        Self { window }
    }

    /// Bucketize fills; fills outside the window are counted as excluded
    pub fn bucketize(&self, fills: &[TradeFill]) -> BucketedTrades {
        let mut buckets: Vec<SecondBucket> =
            self.window.seconds().map(SecondBucket::empty).collect();
        let mut excluded = 0;

        for fill in fills {
            match self.window.offset_of(fill.timestamp) {
                Some(offset) => buckets[offset].add(fill),
                None => excluded += 1,
            }
        }

        if excluded > 0 {
            debug!(
                "Excluded {} fill(s) outside window {}..={}",
                excluded, self.window.start, self.window.end
            );
        }

        BucketedTrades {
            window: self.window,
            buckets,
            excluded,
        }
    }
}
