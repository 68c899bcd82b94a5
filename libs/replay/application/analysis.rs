//! Post-event strategy analysis
//!
//! Settles the wallet's position against the reference price move and
//! summarizes timing, density and directional bias.

use crate::domain::{EventInfo, PricePoint, Side, TradeFill};
use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

/// Share of one side above which the position counts as biased
const BIAS_THRESHOLD_PCT: f64 = 60.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No reference prices to settle against")]
    NoPrices,

    #[error("Open price is zero")]
    ZeroOpenPrice,
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Directional lean of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionBias {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for PositionBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionBias::Bullish => write!(f, "Bullish"),
            PositionBias::Bearish => write!(f, "Bearish"),
            PositionBias::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Per-side totals of the fills
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SideTotals {
    pub shares: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyAnalysis {
    pub title: String,

    // Price move
    pub open_price: f64,
    pub close_price: f64,
    pub price_change: f64,
    pub price_change_pct: f64,
    /// Up when the close is strictly above the open
    pub outcome: Side,

    // Settlement
    pub up: SideTotals,
    pub down: SideTotals,
    pub total_cost: f64,
    pub payout: f64,
    pub profit: f64,
    pub roi_pct: f64,

    // Timing
    /// Seconds from event start to the first trade
    pub entry_delay_secs: Option<i64>,
    /// Seconds from the last trade to event end
    pub exit_lead_secs: Option<i64>,
    /// Reference price at the first trade minus the open price
    pub entry_price_delta: Option<f64>,

    // Density
    pub active_seconds: usize,
    pub total_seconds: i64,
    pub density_pct: f64,

    // Bias (None without any shares)
    pub up_share_pct: Option<f64>,
    pub down_share_pct: Option<f64>,
    pub bias: Option<PositionBias>,
    pub direction_correct: Option<bool>,
}

impl StrategyAnalysis {
    /// Analyze fills against the reference price series of the event
    ///
    /// Settlement uses the buy fills. Timing and density use
    /// `trade_times`, the timestamps of every reported trade including sells.
    pub fn compute(
        event: &EventInfo,
        fills: &[TradeFill],
        trade_times: &[i64],
        prices: &[PricePoint],
    ) -> Result<Self> {
        let mut prices = prices.to_vec();
        prices.sort_by_key(|p| p.timestamp);

        let open_price = prices.first().ok_or(AnalysisError::NoPrices)?.close;
        let close_price = prices.last().ok_or(AnalysisError::NoPrices)?.close;
        if open_price == 0.0 {
            return Err(AnalysisError::ZeroOpenPrice);
        }

        let price_change = close_price - open_price;
        let price_change_pct = price_change / open_price * 100.0;
        let outcome = if price_change > 0.0 { Side::Up } else { Side::Down };

        let totals = |side: Side| {
            fills
                .iter()
                .filter(|f| f.side == side)
                .fold(SideTotals::default(), |acc, f| SideTotals {
                    shares: acc.shares + f.size,
                    cost: acc.cost + f.notional(),
                })
        };
        let up = totals(Side::Up);
        let down = totals(Side::Down);

        let total_cost = up.cost + down.cost;
        let payout = match outcome {
            Side::Up => up.shares,
            Side::Down => down.shares,
        };
        let profit = payout - total_cost;
        let roi_pct = if total_cost > 0.0 {
            profit / total_cost * 100.0
        } else {
            0.0
        };

        let first_ts = trade_times.iter().copied().min();
        let last_ts = trade_times.iter().copied().max();
        let entry_price_delta = first_ts.and_then(|ts| {
            prices
                .iter()
                .find(|p| p.timestamp == ts)
                .map(|p| p.close - open_price)
        });

        let active_seconds = trade_times.iter().collect::<HashSet<_>>().len();
        let total_seconds = event.end_ts - event.start_ts;
        let density_pct = if total_seconds > 0 {
            active_seconds as f64 / total_seconds as f64 * 100.0
        } else {
            0.0
        };

        let total_shares = up.shares + down.shares;
        let (up_share_pct, down_share_pct) = if total_shares > 0.0 {
            (
                Some(up.shares / total_shares * 100.0),
                Some(down.shares / total_shares * 100.0),
            )
        } else {
            (None, None)
        };
        let bias = up_share_pct.zip(down_share_pct).map(|(up_pct, down_pct)| {
            if up_pct > BIAS_THRESHOLD_PCT {
                PositionBias::Bullish
            } else if down_pct > BIAS_THRESHOLD_PCT {
                PositionBias::Bearish
            } else {
                PositionBias::Neutral
            }
        });
        let direction_correct = up_share_pct.zip(down_share_pct).map(|(up_pct, down_pct)| {
            (up_pct > 50.0 && outcome == Side::Up) || (down_pct > 50.0 && outcome == Side::Down)
        });

        Ok(Self {
            title: event.title.clone(),
            open_price,
            close_price,
            price_change,
            price_change_pct,
            outcome,
            up,
            down,
            total_cost,
            payout,
            profit,
            roi_pct,
            entry_delay_secs: first_ts.map(|ts| ts - event.start_ts),
            exit_lead_secs: last_ts.map(|ts| event.end_ts - ts),
            entry_price_delta,
            active_seconds,
            total_seconds,
            density_pct,
            up_share_pct,
            down_share_pct,
            bias,
            direction_correct,
        })
    }

    /// Log the analysis report
    pub fn log(&self) {
        info!("======================================================================");
        info!("Event: {}", self.title);
        info!("======================================================================");

        info!("[Price]");
        info!("  Open:   ${:.2}", self.open_price);
        info!("  Close:  ${:.2}", self.close_price);
        info!("  Change: ${:+.2} ({:+.4}%)", self.price_change, self.price_change_pct);
        info!("  Outcome: {}", self.outcome);

        info!("[Trades]");
        info!("  Bought Up:   {:.2} shares, cost ${:.2}", self.up.shares, self.up.cost);
        info!("  Bought Down: {:.2} shares, cost ${:.2}", self.down.shares, self.down.cost);
        info!("  Total cost:  ${:.2}", self.total_cost);

        info!("[Settlement]");
        info!("  Payout: ${:.2}", self.payout);
        info!("  Profit: ${:+.2}", self.profit);
        info!("  ROI:    {:+.2}%", self.roi_pct);

        info!("[Timing]");
        if let (Some(delay), Some(lead)) = (self.entry_delay_secs, self.exit_lead_secs) {
            info!("  First trade: {}s after start", delay);
            info!("  Last trade:  {}s before end", lead);
        }
        if let Some(delta) = self.entry_price_delta {
            info!("  Price at entry: ${:+.2} vs open", delta);
        }

        info!("[Density]");
        info!("  Active seconds: {} / {}", self.active_seconds, self.total_seconds);
        info!("  Density: {:.2}%", self.density_pct);

        if let (Some(up_pct), Some(down_pct), Some(bias), Some(correct)) = (
            self.up_share_pct,
            self.down_share_pct,
            self.bias,
            self.direction_correct,
        ) {
            info!("[Position bias]");
            info!("  Up share:   {:.1}%", up_pct);
            info!("  Down share: {:.1}%", down_pct);
            info!("  Bias: {}", bias);
            info!("  Direction correct: {}", if correct { "yes" } else { "no" });
        }
    }
}
