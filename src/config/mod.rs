//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (canary values, timeouts, batch sizes)
//! - Library configuration types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, MassResolverConfig};
