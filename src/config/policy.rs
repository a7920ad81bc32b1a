//! Feature extraction policy.
//!
//! Thresholds and pattern lists that decide where a heuristic flips from
//! "safe" to "suspicious". The defaults reproduce the values the reference
//! classifier was trained with; tests and experiments override them.

use regex::Regex;

use super::constants::{
    DAYS_PER_MONTH, LONG_URL_THRESHOLD, MAX_WEB_FORWARDS, MIN_REGISTRATION_MONTHS,
    SHORTENING_SERVICES, TRAFFIC_RANK_THRESHOLD,
};

/// Overridable thresholds used by the extractors.
#[derive(Debug, Clone)]
pub struct FeaturePolicy {
    /// `URL_Length` is 1 when the raw URL has at least this many characters.
    pub long_url_threshold: usize,
    /// `Web_Traffic` is 1 when the reported rank exceeds this value.
    pub traffic_rank_threshold: u64,
    /// `Web_Forwards` is 1 when the redirect history is longer than this.
    pub max_web_forwards: usize,
    /// Minimum registration span / remaining lifetime in months.
    pub min_registration_months: i64,
    /// Length of a "month" in days.
    pub days_per_month: i64,
    pub(crate) shortener: Regex,
}

impl FeaturePolicy {
    /// Replaces the shortener pattern.
    ///
    /// The pattern is compiled case-insensitively and matched anywhere in the host.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error if `pattern` is invalid.
    pub fn with_shortener_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.shortener = compile_shortener(pattern)?;
        Ok(self)
    }

    /// Returns true if `host` matches a known URL shortening service.
    pub fn is_shortener(&self, host: &str) -> bool {
        self.shortener.is_match(host)
    }

    /// The span, in days, below which a registration is considered short-lived.
    pub fn min_registration_days(&self) -> i64 {
        self.min_registration_months * self.days_per_month
    }
}

fn compile_shortener(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){pattern}"))
}

impl Default for FeaturePolicy {
    fn default() -> Self {
        Self {
            long_url_threshold: LONG_URL_THRESHOLD,
            traffic_rank_threshold: TRAFFIC_RANK_THRESHOLD,
            max_web_forwards: MAX_WEB_FORWARDS,
            min_registration_months: MIN_REGISTRATION_MONTHS,
            days_per_month: DAYS_PER_MONTH,
            shortener: compile_shortener(SHORTENING_SERVICES)
                .expect("built-in shortener pattern is valid"),
        }
    }
}
