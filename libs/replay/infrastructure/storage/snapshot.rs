//! JSON snapshot of an event's wallet trades

use super::Result;
use crate::domain::{EventInfo, TradeFill};
use crate::infrastructure::client::data::{trades_to_fills, Trade};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Event metadata plus the raw trades fetched for a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSnapshot {
    pub event: EventInfo,
    pub address: String,
    pub trades: Vec<Trade>,
}

impl TradeSnapshot {
    pub fn new(event: EventInfo, address: impl Into<String>, trades: Vec<Trade>) -> Self {
        Self {
            event,
            address: address.into(),
            trades,
        }
    }

    /// Buy fills on Up/Down outcomes
    pub fn fills(&self) -> Vec<TradeFill> {
        trades_to_fills(&self.trades)
    }
}

/// Write a snapshot as pretty JSON, creating parent directories
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &TradeSnapshot) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    debug!("Wrote snapshot with {} trades to {:?}", snapshot.trades.len(), path);
    Ok(())
}

pub fn read_snapshot(path: impl AsRef<Path>) -> Result<TradeSnapshot> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
