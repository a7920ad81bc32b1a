//! Network lookups: page content and traffic rank.
//!
//! Both are modeled as ports (`PageFetcher`, `TrafficRanker`) so the feature
//! assembler can be driven by deterministic mocks. The HTTP implementations
//! never return errors: every failure is logged and mapped to `None`.

mod rank;
mod redirects;

use std::sync::Arc;

use futures::future::BoxFuture;

pub use rank::{HttpTrafficRanker, TrafficRanker};
pub use redirects::fetch_following_redirects;

/// A fetched page: final response body plus the redirects that led to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFetchResult {
    /// URL of the final (non-redirect) response
    pub final_url: String,
    /// HTTP status of the final response
    pub status: u16,
    /// Decoded response body
    pub text: String,
    /// URLs that answered with a redirect, in order
    pub history: Vec<String>,
}

/// Source of page content.
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`; `None` on transport failure, refusal or timeout.
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<PageFetchResult>>;
}

/// HTTP page fetcher backed by a redirect-disabled `reqwest::Client`.
pub struct HttpPageFetcher {
    client: Arc<reqwest::Client>,
    max_hops: usize,
}

impl HttpPageFetcher {
    /// `client` must have redirects disabled (see `init_redirect_client`).
    pub fn new(client: Arc<reqwest::Client>, max_hops: usize) -> Self {
        Self { client, max_hops }
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<PageFetchResult>> {
        Box::pin(async move {
            match fetch_following_redirects(url, self.max_hops, &self.client).await {
                Ok(page) => {
                    log::debug!(
                        "Fetched {} ({} redirects, status {})",
                        url,
                        page.history.len(),
                        page.status
                    );
                    Some(page)
                }
                Err(e) => {
                    log::debug!("Page fetch failed for {url}: {e:#}");
                    None
                }
            }
        })
    }
}
