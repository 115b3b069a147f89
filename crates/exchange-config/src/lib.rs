// exchange-config/src/lib.rs

//! # Exchange Configuration Library
//!
//! Configuration types and loading for the asset-exchange router: the path
//! budget and depth bound, tie-break precedence, per-venue-family cost
//! weights for pre-quote ranking, and sync timing.

pub mod loader;
pub mod types;

pub use loader::{load_config, ConfigError, ConfigLoader};
pub use types::*;
