//! Web traffic ranking lookup.
//!
//! The ranking service answers an Alexa-style XML document; the rank is the
//! `RANK` attribute of the `<REACH>` element.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use scraper::{Html, Selector};
use url::Url;

/// Source of popularity ranks.
pub trait TrafficRanker: Send + Sync {
    /// Returns the popularity rank of `url`; `None` on failure or if unranked.
    fn rank<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<u64>>;
}

/// HTTP ranking service client.
pub struct HttpTrafficRanker {
    client: Arc<reqwest::Client>,
    endpoint: String,
}

impl HttpTrafficRanker {
    /// Creates a ranker querying `endpoint` (e.g. `http://data.alexa.com/data`).
    pub fn new(client: Arc<reqwest::Client>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn query(&self, url: &str) -> Result<u64> {
        let mut request_url = Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid ranking endpoint {}", self.endpoint))?;
        request_url
            .query_pairs_mut()
            .append_pair("cli", "10")
            .append_pair("dat", "s")
            .append_pair("url", url);

        let body = self
            .client
            .get(request_url)
            .send()
            .await
            .context("Ranking request failed")?
            .error_for_status()
            .context("Ranking service returned an error status")?
            .text()
            .await
            .context("Failed to read ranking response")?;

        parse_reach_rank(&body).context("Ranking response has no REACH rank")
    }
}

impl TrafficRanker for HttpTrafficRanker {
    fn rank<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<u64>> {
        Box::pin(async move {
            match self.query(url).await {
                Ok(rank) => Some(rank),
                Err(e) => {
                    log::debug!("Traffic rank unavailable for {url}: {e:#}");
                    None
                }
            }
        })
    }
}

/// Extracts the `RANK` attribute of the first `<REACH>` element.
///
/// html5ever lowercases element and attribute names, so the selector is lowercase.
pub(crate) fn parse_reach_rank(xml: &str) -> Option<u64> {
    let document = Html::parse_document(xml);
    let selector = Selector::parse("reach[rank]").ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("rank")?
        .trim()
        .parse()
        .ok()
}
