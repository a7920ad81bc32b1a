//! Page fetch with manual redirect tracking.
//!
//! The client has redirects disabled so that every hop is recorded; the
//! history length feeds `Web_Forwards`.

use anyhow::{Context, Result};
use reqwest::header::LOCATION;
use reqwest::Url;

use super::PageFetchResult;

/// Fetches `start_url`, following up to `max_hops` redirects.
///
/// The returned history holds one entry (the redirecting URL) per redirect
/// followed. A non-success final status is still a result: its body is what
/// the content signals inspect.
///
/// # Errors
///
/// Returns an error if the URL is invalid, a request fails or times out, a
/// `Location` header is unusable, the body cannot be read, or the chain is
/// longer than `max_hops`.
pub async fn fetch_following_redirects(
    start_url: &str,
    max_hops: usize,
    client: &reqwest::Client,
) -> Result<PageFetchResult> {
    let mut history: Vec<String> = Vec::new();
    let mut current = Url::parse(start_url).with_context(|| format!("Invalid URL: {start_url}"))?;

    loop {
        let resp = client
            .get(current.clone())
            .send()
            .await
            .with_context(|| format!("Request to {current} failed"))?;

        let status = resp.status();
        if status.is_redirection() {
            if let Some(loc) = resp.headers().get(LOCATION) {
                if history.len() >= max_hops {
                    anyhow::bail!("Exceeded {max_hops} redirects starting at {start_url}");
                }
                let loc = loc
                    .to_str()
                    .context("Location header is not valid UTF-8")?;
                let next = current
                    .join(loc)
                    .with_context(|| format!("Invalid redirect target {loc:?}"))?;
                history.push(current.to_string());
                current = next;
                continue;
            }
            log::debug!(
                "Redirect status {} for {} but no Location header",
                status.as_u16(),
                current
            );
        }

        let text = resp
            .text()
            .await
            .with_context(|| format!("Failed to read body of {current}"))?;
        return Ok(PageFetchResult {
            final_url: current.to_string(),
            status: status.as_u16(),
            text,
            history,
        });
    }
}
