//! Processing statistics tracking.
//!
//! Thread-safe counters of lookup attempts and failures, shared across the
//! extraction workers of one run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::config::{EXHAUSTION_MIN_ATTEMPTS, EXHAUSTION_WARN_RATIO};

use super::types::LookupKind;

#[derive(Default)]
struct Counter {
    attempts: AtomicUsize,
    failures: AtomicUsize,
}

/// Thread-safe lookup statistics tracker.
///
/// Every `LookupKind` is initialized to zero on creation, so the counters can
/// be shared across tasks with `Arc` without further locking.
pub struct ProcessingStats {
    lookups: HashMap<LookupKind, Counter>,
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let lookups = LookupKind::iter()
            .map(|kind| (kind, Counter::default()))
            .collect();
        ProcessingStats { lookups }
    }

    /// Records the outcome of one lookup.
    pub fn record(&self, kind: LookupKind, succeeded: bool) {
        if let Some(counter) = self.lookups.get(&kind) {
            counter.attempts.fetch_add(1, Ordering::Relaxed);
            if !succeeded {
                counter.failures.fetch_add(1, Ordering::Relaxed);
            }
        } else {
            log::error!(
                "Attempted to record lookup {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Lookups of `kind` recorded so far.
    pub fn attempts(&self, kind: LookupKind) -> usize {
        self.lookups
            .get(&kind)
            .map(|c| c.attempts.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Lookups of `kind` that produced no value.
    pub fn failures(&self, kind: LookupKind) -> usize {
        self.lookups
            .get(&kind)
            .map(|c| c.failures.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Failure ratio for a lookup kind, or 0.0 if nothing was attempted.
    pub fn failure_ratio(&self, kind: LookupKind) -> f64 {
        let attempts = self.attempts(kind);
        if attempts == 0 {
            return 0.0;
        }
        self.failures(kind) as f64 / attempts as f64
    }

    /// Lookup kinds whose failure ratio suggests the service is throttling or
    /// has banned us, rather than individual hosts being unreachable.
    pub fn exhausted_services(&self) -> Vec<LookupKind> {
        LookupKind::iter()
            .filter(|&kind| {
                self.attempts(kind) >= EXHAUSTION_MIN_ATTEMPTS
                    && self.failure_ratio(kind) >= EXHAUSTION_WARN_RATIO
            })
            .collect()
    }

    /// Logs one summary line per lookup kind plus any exhaustion warnings.
    pub fn log_summary(&self) {
        for kind in LookupKind::iter() {
            let attempts = self.attempts(kind);
            if attempts == 0 {
                continue;
            }
            log::info!(
                "{}: {} lookups, {} fell back ({:.1}%)",
                kind.as_ref(),
                attempts,
                self.failures(kind),
                self.failure_ratio(kind) * 100.0
            );
        }
        for kind in self.exhausted_services() {
            log::warn!(
                "{} lookups failed for {:.0}% of URLs; the service may be throttling or blocking requests. \
                 Rows were still emitted with fallback values.",
                kind.as_ref(),
                self.failure_ratio(kind) * 100.0
            );
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
