//! Domain registration lookup.
//!
//! Registration data comes from RDAP (the structured successor of WHOIS),
//! queried through an RDAP bootstrap service. Any failure, whether throttling,
//! an unknown domain or a malformed answer, yields `None`; the feature
//! assembler turns that into `DNS_Record = 1`.

mod parse;
mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;

pub use types::{DateField, DateValue, RegistrationRecord};

/// Source of registration records.
pub trait RegistrationLookup: Send + Sync {
    /// Looks up registration data for `host`; `None` on any failure.
    fn lookup<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Option<RegistrationRecord>>;
}

/// RDAP-backed registration lookup.
pub struct RdapLookup {
    client: Arc<reqwest::Client>,
    base: String,
}

impl RdapLookup {
    /// Creates a lookup against the RDAP service at `base` (e.g. `https://rdap.org`).
    pub fn new(client: Arc<reqwest::Client>, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    async fn query(&self, host: &str) -> Result<RegistrationRecord> {
        if host.is_empty() {
            anyhow::bail!("URL has no host to look up");
        }
        // RDAP paths carry A-labels
        let name = idna::domain_to_ascii(host)
            .with_context(|| format!("Host {host:?} is not a valid domain name"))?;
        let url = format!("{}/domain/{}", self.base.trim_end_matches('/'), name);
        let body = self
            .client
            .get(&url)
            .header(ACCEPT, "application/rdap+json, application/json")
            .send()
            .await
            .with_context(|| format!("RDAP request failed for {host}"))?
            .error_for_status()
            .with_context(|| format!("RDAP service refused {host}"))?
            .text()
            .await
            .context("Failed to read RDAP response body")?;
        parse::record_from_rdap(&body)
    }
}

impl RegistrationLookup for RdapLookup {
    fn lookup<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Option<RegistrationRecord>> {
        Box::pin(async move {
            match self.query(host).await {
                Ok(record) => {
                    log::debug!("Registration lookup succeeded for {host}");
                    Some(record)
                }
                Err(e) => {
                    log::debug!("Registration lookup failed for {host}: {e:#}");
                    None
                }
            }
        })
    }
}
