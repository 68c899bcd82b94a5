//! Common test utilities for replay integration tests
//!
//! Shared fixtures for events, fills and price series.

#![allow(dead_code)]

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

pub mod fixtures {
    //! Test fixtures for common data types

    use replay::domain::{EventInfo, EventWindow, PricePoint, Side, TradeFill};
    use replay::infrastructure::client::data::Trade;
    use replay::infrastructure::ReplayConfig;

    /// 2025-12-28T11:15:00Z
    pub const EVENT_START: i64 = 1766920500;

    pub const WALLET: &str = "0x1234567890abcdef1234567890abcdef12345678";

    /// A 15-minute event
    pub fn event_info() -> EventInfo {
        EventInfo {
            title: "Bitcoin Up or Down - December 28, 6:15AM-6:30AM ET".to_string(),
            slug: "btc-updown-15m-1766920500".to_string(),
            start_time: "2025-12-28T11:15:00Z".to_string(),
            end_time: "2025-12-28T11:30:00Z".to_string(),
            start_ts: EVENT_START,
            end_ts: EVENT_START + 900,
            condition_id: "0xc2d728a0c634f0b453d51e61759041cd054706ca808041a44ed07a7986946479"
                .to_string(),
        }
    }

    /// One price per second at a constant level
    pub fn flat_prices(window: EventWindow, close: f64) -> Vec<PricePoint> {
        window.seconds().map(|t| PricePoint::new(t, close)).collect()
    }

    /// Prices drifting up by `step` every second from `open`
    pub fn rising_prices(window: EventWindow, open: f64, step: f64) -> Vec<PricePoint> {
        window
            .seconds()
            .enumerate()
            .map(|(i, t)| PricePoint::new(t, open + step * i as f64))
            .collect()
    }

    pub fn up(timestamp: i64, size: f64, price: f64) -> TradeFill {
        TradeFill::new(timestamp, Side::Up, size, price)
    }

    pub fn down(timestamp: i64, size: f64, price: f64) -> TradeFill {
        TradeFill::new(timestamp, Side::Down, size, price)
    }

    /// Raw Data API trade
    pub fn trade(side: &str, outcome: &str, size: f64, price: f64, timestamp: i64) -> Trade {
        serde_json::from_value(serde_json::json!({
            "proxyWallet": WALLET,
            "side": side,
            "size": size,
            "price": price,
            "timestamp": timestamp,
            "outcome": outcome,
        }))
        .expect("fixture trade should deserialize")
    }

    /// Valid config writing into `output_dir`
    pub fn config(output_dir: &std::path::Path) -> ReplayConfig {
        let mut config = ReplayConfig::from_yaml(&format!(
            "address: \"{}\"\nslug: btc-updown-15m-1766920500\n",
            WALLET
        ))
        .expect("fixture config should parse");
        config.output_dir = output_dir.to_string_lossy().into_owned();
        config
    }
}
