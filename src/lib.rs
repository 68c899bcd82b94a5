//! Polymarket Position Replay - Main Library
//!
//! This crate provides the binaries' shared plumbing for replaying a
//! wallet's position in a Polymarket Up/Down event.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI)
//! - **replay**: Core merge engine and collaborators (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use polymarket_position_replay::bin_common::{load_config_from_env, ConfigType};
//! use polymarket_position_replay::replay::application::ReplayApp;
//! ```

// Re-export workspace libraries for convenience
pub use replay;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables
    //!
    //! Provides shared functionality for the presentation layer (binaries).

    pub mod cli;

    pub use cli::{load_config_from_env, load_replay_config, print_banner, print_shutdown, ConfigType};
}
