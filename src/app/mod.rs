//! Application support utilities.
//!
//! This module provides progress logging used by the dataset builder.

pub mod logging;

// Re-export public API
pub use logging::log_progress;
