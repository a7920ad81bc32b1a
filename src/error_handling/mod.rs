//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, configuration, schema)
//! - Lookup statistics tracking (attempts and fallbacks per external service)
//!
//! Lookup failures are never errors here: they degrade to per-signal fallback
//! values and are only counted. Schema errors are the one correctness-critical
//! failure and are surfaced as `SchemaError`.

mod stats;
mod types;

pub use stats::ProcessingStats;
pub use types::{ConfigError, InitializationError, LookupKind, SchemaError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for kind in LookupKind::iter() {
            assert_eq!(stats.attempts(kind), 0);
            assert_eq!(stats.failures(kind), 0);
            assert_eq!(stats.failure_ratio(kind), 0.0);
        }
    }

    #[test]
    fn test_processing_stats_record() {
        let stats = ProcessingStats::new();
        stats.record(LookupKind::PageFetch, true);
        stats.record(LookupKind::PageFetch, false);
        stats.record(LookupKind::Registration, false);

        assert_eq!(stats.attempts(LookupKind::PageFetch), 2);
        assert_eq!(stats.failures(LookupKind::PageFetch), 1);
        assert_eq!(stats.failure_ratio(LookupKind::PageFetch), 0.5);
        assert_eq!(stats.attempts(LookupKind::Registration), 1);
        assert_eq!(stats.attempts(LookupKind::TrafficRank), 0);
    }

    #[test]
    fn test_exhaustion_needs_enough_attempts() {
        let stats = ProcessingStats::new();
        for _ in 0..3 {
            stats.record(LookupKind::Registration, false);
        }
        assert!(stats.exhausted_services().is_empty());

        for _ in 0..20 {
            stats.record(LookupKind::Registration, false);
        }
        assert_eq!(stats.exhausted_services(), vec![LookupKind::Registration]);
    }

    #[test]
    fn test_exhaustion_ignores_healthy_services() {
        let stats = ProcessingStats::new();
        for i in 0..20 {
            stats.record(LookupKind::TrafficRank, i % 2 == 0);
        }
        assert!(stats.exhausted_services().is_empty());
    }

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::Cardinality {
            expected: 16,
            actual: 15,
        };
        assert_eq!(err.to_string(), "expected 16 features, got 15");
    }
}
