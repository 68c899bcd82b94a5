//! Forward fold of per-second buckets into a running position

use crate::application::merger::error::{MergeError, Result};
use crate::application::merger::types::{RunningPosition, SecondBucket};

/// Owns the running position of one event replay
///
/// Seconds must be fed strictly ascending; the state at a second depends only
/// on seconds at or before it.
#[derive(Debug, Default)]
pub struct PositionAccumulator {
    position: RunningPosition,
    last_timestamp: Option<i64>,
}

impl PositionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one second and return the position after it
    pub fn advance(&mut self, bucket: &SecondBucket) -> Result<RunningPosition> {
        if let Some(last) = self.last_timestamp {
            if bucket.timestamp <= last {
                return Err(MergeError::OutOfOrder {
                    last,
                    got: bucket.timestamp,
                });
            }
        }

        self.position = self.position.step(bucket);
        self.last_timestamp = Some(bucket.timestamp);
        Ok(self.position)
    }

    /// Current position
    pub fn position(&self) -> RunningPosition {
        self.position
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }
}
