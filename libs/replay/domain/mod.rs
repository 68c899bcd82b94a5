//! Domain Layer
//!
//! Pure entities shared by the merge engine and its collaborators.
//! This layer has no dependencies on infrastructure or application layers.

pub mod models;
pub mod time;

pub use models::{round_size, EventInfo, EventWindow, PricePoint, Side, TradeFill, SIZE_DECIMALS};
pub use time::{default_display_offset, display_offset, format_timestamp, offset_label, parse_event_time};
