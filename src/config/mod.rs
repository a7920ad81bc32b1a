//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, endpoints, reference thresholds)
//! - The overridable feature policy
//! - CLI option types and parsing

mod constants;
mod policy;
mod types;

pub use constants::*;
pub use policy::FeaturePolicy;
pub use types::{Config, LogFormat, LogLevel};
