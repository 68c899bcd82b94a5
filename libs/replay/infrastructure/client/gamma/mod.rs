//! Gamma API client and types
//!
//! The Gamma API provides event and market metadata.

pub mod client;
pub mod types;

pub use client::{GammaClient, GammaError, GAMMA_API_BASE_URL};

// Re-export types with Gamma prefix
pub use types::Event as GammaEvent;
pub use types::Market as GammaMarket;
pub use types::EventInfoError;
