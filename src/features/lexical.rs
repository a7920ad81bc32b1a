//! Lexical features: signals derived from the URL text alone.
//!
//! Every function here is pure and total. No I/O, no error paths.

use crate::config::FeaturePolicy;
use crate::domain::ParsedUrl;

use super::flag;

/// 1 if the host is a dotted-quad IPv4 literal.
pub fn has_ip_literal(url: &ParsedUrl) -> u32 {
    flag(url.ipv4_host().is_some())
}

/// 1 if `@` appears anywhere in the raw URL.
///
/// Browsers ignore everything before an `@` in the authority, which is used to
/// disguise the real destination.
pub fn has_at_sign(raw: &str) -> u32 {
    flag(raw.contains('@'))
}

/// 1 if the raw URL has at least `policy.long_url_threshold` characters.
pub fn is_long(raw: &str, policy: &FeaturePolicy) -> u32 {
    flag(raw.chars().count() >= policy.long_url_threshold)
}

/// Number of non-empty path segments.
///
/// `.` and `..` count as segments; the path is taken as written.
pub fn path_depth(url: &ParsedUrl) -> u32 {
    let depth = url.path.split('/').filter(|s| !s.is_empty()).count();
    u32::try_from(depth).unwrap_or(u32::MAX)
}

/// 1 if the last `//` in the raw URL sits past the scheme prefix.
///
/// `http://` puts its `//` at position 5 and `https://` at 6; anything after
/// position 7 is an embedded redirect. Positions are in characters.
pub fn has_suspicious_redirect(raw: &str) -> u32 {
    match raw.rfind("//") {
        Some(pos) if raw[..pos].chars().count() > 7 => 1,
        _ => 0,
    }
}

/// 1 if the literal `https` appears in the host (cosmetic, not TLS usage).
pub fn https_in_host(url: &ParsedUrl) -> u32 {
    flag(url.host.contains("https"))
}

/// 1 if the host matches the shortener pattern of `policy`.
pub fn matches_shortener(url: &ParsedUrl, policy: &FeaturePolicy) -> u32 {
    flag(policy.is_shortener(&url.host))
}

/// 1 if the host contains `-`.
pub fn host_has_hyphen(url: &ParsedUrl) -> u32 {
    flag(url.host.contains('-'))
}

/// All lexical signals of one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalSignals {
    /// `Have_IP`
    pub have_ip: u32,
    /// `Have_At`
    pub have_at: u32,
    /// `URL_Length`
    pub url_length: u32,
    /// `URL_Depth`, a count rather than a flag
    pub url_depth: u32,
    /// `Redirection`
    pub redirection: u32,
    /// `https_Domain`
    pub https_domain: u32,
    /// `TinyURL`
    pub tiny_url: u32,
    /// `Prefix/Suffix`
    pub prefix_suffix: u32,
}

impl LexicalSignals {
    /// Runs every lexical extractor over `raw` and its parsed form.
    pub fn compute(raw: &str, url: &ParsedUrl, policy: &FeaturePolicy) -> Self {
        Self {
            have_ip: has_ip_literal(url),
            have_at: has_at_sign(raw),
            url_length: is_long(raw, policy),
            url_depth: path_depth(url),
            redirection: has_suspicious_redirect(raw),
            https_domain: https_in_host(url),
            tiny_url: matches_shortener(url, policy),
            prefix_suffix: host_has_hyphen(url),
        }
    }
}
