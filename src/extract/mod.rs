//! Feature assembly for a single URL.
//!
//! `FeatureExtractor` runs the lexical extractors, issues the three external
//! lookups concurrently and assembles the results in schema order. Each lookup
//! is guarded on its own: a timeout or a panic inside a port degrades that
//! lookup to its absent state and is counted in `ProcessingStats`, the row is
//! still produced.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;

use crate::classify::ModelInput;
use crate::config::{
    FeaturePolicy, PAGE_FETCH_TIMEOUT_SECS, REGISTRATION_BUDGET, TRAFFIC_RANK_TIMEOUT_SECS,
};
use crate::domain::{parse, registrable_domain};
use crate::error_handling::{LookupKind, ProcessingStats, SchemaError};
use crate::features::content::{iframe, mouse_over, right_click, web_forwards, web_traffic};
use crate::features::lexical::LexicalSignals;
use crate::features::registration::{domain_age, domain_end};
use crate::features::{Feature, FeatureRow, FeatureVector, Label};
use crate::fetch::{PageFetchResult, PageFetcher, TrafficRanker};
use crate::whois::{RegistrationLookup, RegistrationRecord};

/// Upper bound on each external lookup, enforced around the port call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTimeouts {
    /// Page fetch, including all redirect hops
    pub page_fetch: Duration,
    /// Traffic ranking request
    pub traffic_rank: Duration,
    /// Overall registration lookup budget
    pub registration: Duration,
}

impl Default for LookupTimeouts {
    fn default() -> Self {
        Self {
            page_fetch: Duration::from_secs(PAGE_FETCH_TIMEOUT_SECS),
            traffic_rank: Duration::from_secs(TRAFFIC_RANK_TIMEOUT_SECS),
            registration: REGISTRATION_BUDGET,
        }
    }
}

/// The three external services used per URL.
#[derive(Clone)]
pub struct LookupPorts {
    /// Page content
    pub pages: Arc<dyn PageFetcher>,
    /// Popularity rank
    pub ranker: Arc<dyn TrafficRanker>,
    /// Registration dates
    pub registry: Arc<dyn RegistrationLookup>,
}

/// Lookup outcomes for one URL; `None` is the absent state.
#[derive(Debug, Default)]
struct Lookups {
    page: Option<PageFetchResult>,
    rank: Option<u64>,
    registration: Option<RegistrationRecord>,
}

/// Assembles schema-ordered feature rows.
pub struct FeatureExtractor {
    ports: Option<LookupPorts>,
    policy: FeaturePolicy,
    timeouts: LookupTimeouts,
    stats: Arc<ProcessingStats>,
    clock: Option<DateTime<Utc>>,
}

impl FeatureExtractor {
    /// Creates an extractor backed by the given lookup services.
    pub fn new(
        pages: Arc<dyn PageFetcher>,
        ranker: Arc<dyn TrafficRanker>,
        registry: Arc<dyn RegistrationLookup>,
    ) -> Self {
        Self::with_ports(Some(LookupPorts {
            pages,
            ranker,
            registry,
        }))
    }

    /// Creates an extractor that performs no lookups.
    ///
    /// Every network and registration signal takes its fallback value and
    /// nothing is recorded in the statistics.
    pub fn offline() -> Self {
        Self::with_ports(None)
    }

    fn with_ports(ports: Option<LookupPorts>) -> Self {
        Self {
            ports,
            policy: FeaturePolicy::default(),
            timeouts: LookupTimeouts::default(),
            stats: Arc::new(ProcessingStats::new()),
            clock: None,
        }
    }

    /// Replaces the thresholds used by the extractors.
    pub fn with_policy(mut self, policy: FeaturePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the per-lookup time budgets.
    pub fn with_timeouts(mut self, timeouts: LookupTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Pins "now" for `Domain_End`. Without it the wall clock is read per row.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    /// Shares an existing statistics tracker.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Lookup counters shared with whoever built this extractor.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Thresholds in use.
    pub fn policy(&self) -> &FeaturePolicy {
        &self.policy
    }

    /// True when built by [`FeatureExtractor::offline`].
    pub fn is_offline(&self) -> bool {
        self.ports.is_none()
    }

    /// Extracts the full feature row for `url`.
    ///
    /// Lookup failures never surface here; they become fallback values.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` only if the assembled row does not match the
    /// feature schema.
    pub async fn extract_all(&self, url: &str, label: Label) -> Result<FeatureVector, SchemaError> {
        let parsed = parse(url);
        let domain = parsed.host.clone();
        let lexical = LexicalSignals::compute(url, &parsed, &self.policy);
        let lookups = self.lookups(url, &domain).await;
        self.assemble(&lexical, &lookups).finish(domain, label)
    }

    /// Row built from lexical signals with every lookup in its absent state.
    ///
    /// Used when the worker extracting `url` died before producing a row.
    pub fn fallback_row(&self, url: &str, label: Label) -> Result<FeatureVector, SchemaError> {
        let parsed = parse(url);
        let domain = parsed.host.clone();
        let lexical = LexicalSignals::compute(url, &parsed, &self.policy);
        self.assemble(&lexical, &Lookups::default())
            .finish(domain, label)
    }

    /// Extracts the 16 classifier inputs for `url`, whose label is unknown.
    pub async fn extract_input(&self, url: &str) -> Result<ModelInput, SchemaError> {
        // Label is not a model input; any value works here.
        let row = self.extract_all(url, Label::Legitimate).await?;
        Ok(ModelInput::from(&row))
    }

    async fn lookups(&self, url: &str, host: &str) -> Lookups {
        let Some(ports) = &self.ports else {
            return Lookups::default();
        };
        // Registries answer for the registrable domain only, never for a
        // subdomain or an IP literal.
        let registered = registrable_domain(host);
        let (page, rank, registration) = tokio::join!(
            self.guarded(
                LookupKind::PageFetch,
                self.timeouts.page_fetch,
                url,
                async { ports.pages.fetch(url).await },
            ),
            self.guarded(
                LookupKind::TrafficRank,
                self.timeouts.traffic_rank,
                url,
                async { ports.ranker.rank(url).await },
            ),
            self.guarded(
                LookupKind::Registration,
                self.timeouts.registration,
                url,
                async {
                    match registered.as_deref() {
                        Some(domain) => ports.registry.lookup(domain).await,
                        None => {
                            log::debug!("No registrable domain in {host:?}; registration skipped");
                            None
                        }
                    }
                },
            ),
        );
        Lookups {
            page,
            rank,
            registration,
        }
    }

    /// Runs one lookup under its time budget, catching panics.
    async fn guarded<T, F>(&self, kind: LookupKind, budget: Duration, url: &str, lookup: F) -> Option<T>
    where
        F: Future<Output = Option<T>>,
    {
        let value = match tokio::time::timeout(budget, AssertUnwindSafe(lookup).catch_unwind()).await {
            Ok(Ok(value)) => value,
            Ok(Err(_)) => {
                log::warn!("{} lookup panicked for {}", kind.as_ref(), url);
                None
            }
            Err(_) => {
                log::debug!(
                    "{} lookup timed out after {:?} for {}",
                    kind.as_ref(),
                    budget,
                    url
                );
                None
            }
        };
        self.stats.record(kind, value.is_some());
        value
    }

    fn assemble(&self, lexical: &LexicalSignals, lookups: &Lookups) -> FeatureRow {
        let page = lookups.page.as_ref();
        let (dns_record, age, end) = match &lookups.registration {
            Some(record) => {
                let now = self.clock.unwrap_or_else(Utc::now);
                (
                    0,
                    domain_age(record, &self.policy),
                    domain_end(record, now, &self.policy),
                )
            }
            None => (1, 1, 1),
        };

        let mut row = FeatureRow::new();
        row.push(Feature::HaveIp, lexical.have_ip)
            .push(Feature::HaveAt, lexical.have_at)
            .push(Feature::UrlLength, lexical.url_length)
            .push(Feature::UrlDepth, lexical.url_depth)
            .push(Feature::Redirection, lexical.redirection)
            .push(Feature::HttpsDomain, lexical.https_domain)
            .push(Feature::TinyUrl, lexical.tiny_url)
            .push(Feature::PrefixSuffix, lexical.prefix_suffix)
            .push(Feature::DnsRecord, dns_record)
            .push(Feature::WebTraffic, web_traffic(lookups.rank, &self.policy))
            .push(Feature::DomainAge, age)
            .push(Feature::DomainEnd, end)
            .push(Feature::IFrame, iframe(page))
            .push(Feature::MouseOver, mouse_over(page))
            .push(Feature::RightClick, right_click(page))
            .push(Feature::WebForwards, web_forwards(page, &self.policy));
        row
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
