//! URL parsing and host normalization.
//!
//! `parse()` splits a raw URL into the structural parts the extractors need.
//! It never fails: input the `url` crate rejects yields a degraded value with
//! empty fields, so every extractor always receives something well-typed.

use std::net::{IpAddr, Ipv4Addr};

use psl::Psl;
use url::Url;

/// Structural parts of a raw URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Scheme without `:` (empty if the input had none)
    pub scheme: String,
    /// Lowercased Unicode host with a leading `www.` removed; no port
    pub host: String,
    /// Path text as written, dot segments included (empty when absent)
    pub path: String,
    /// Query string without `?`
    pub query: String,
}

impl ParsedUrl {
    /// Returns the host as an IPv4 address if it is a dotted-quad literal.
    pub fn ipv4_host(&self) -> Option<Ipv4Addr> {
        self.host.parse::<Ipv4Addr>().ok()
    }
}

/// Parses a raw URL string into its structural parts.
///
/// Scheme-less input such as `example.com/a/b` is treated as a relative
/// reference: scheme and host stay empty and the text is kept as the path.
pub fn parse(raw: &str) -> ParsedUrl {
    match Url::parse(raw) {
        Ok(url) => ParsedUrl {
            scheme: url.scheme().to_string(),
            host: normalize_host(&unicode_host(url.host_str().unwrap_or_default())),
            path: raw_path(
                raw.trim_matches(|c: char| c <= ' '),
                url.scheme().len(),
            )
            .to_string(),
            query: url.query().unwrap_or_default().to_string(),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => parse_relative(raw),
        Err(e) => {
            log::debug!("Unparsable URL {raw:?}: {e}");
            ParsedUrl::default()
        }
    }
}

/// Lowercases a host and strips a single leading `www.`.
///
/// Only the literal `www.` label is removed; other subdomains are kept.
pub fn normalize_host(host: &str) -> String {
    let lowered = host.to_ascii_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Registrable domain of `host` according to the Public Suffix List.
///
/// `mail.example.co.uk` gives `example.co.uk`. IP literals, empty hosts and
/// hosts that are themselves a public suffix have none.
pub fn registrable_domain(host: &str) -> Option<String> {
    if host.is_empty() || host.starts_with('[') || host.parse::<IpAddr>().is_ok() {
        return None;
    }
    let domain = psl::List.domain(host.as_bytes())?;
    std::str::from_utf8(domain.as_bytes())
        .ok()
        .map(str::to_string)
}

/// `url` serializes IDN hosts as punycode; features look at the Unicode form.
fn unicode_host(host: &str) -> String {
    let (decoded, result) = idna::domain_to_unicode(host);
    if let Err(e) = result {
        log::debug!("Keeping undecodable host {host:?}: {e:?}");
        return host.to_string();
    }
    decoded
}

/// Path as it appears in `raw`, before the `url` crate resolves `.` and `..`.
fn raw_path(raw: &str, scheme_len: usize) -> &str {
    let rest = raw.get(scheme_len + 1..).unwrap_or_default();
    let rest = rest.find(['?', '#']).map_or(rest, |end| &rest[..end]);
    match rest.strip_prefix("//") {
        Some(authority) => authority.find('/').map_or("", |start| &authority[start..]),
        None => rest,
    }
}

fn parse_relative(raw: &str) -> ParsedUrl {
    let without_fragment = raw.split_once('#').map_or(raw, |(before, _)| before);
    let (path, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));
    ParsedUrl {
        path: path.to_string(),
        query: query.to_string(),
        ..Default::default()
    }
}
