//! Configuration constants.
//!
//! This module defines the constants used throughout the pipeline: lookup
//! timeouts, service endpoints, batch reporting thresholds and the reference
//! feature policy values the classifier was trained against.

use std::time::Duration;

/// Default maximum number of URLs extracted concurrently.
/// Kept low because the registration and ranking services are third-party and throttle.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
/// Upper bound accepted by `Config::validate`.
pub const MAX_CONCURRENCY_LIMIT: usize = 500;
/// Log a progress line every this many completed rows.
pub const LOGGING_INTERVAL: usize = 50;

// Lookup timeouts
/// Page fetch timeout in seconds (reference policy: 5)
pub const PAGE_FETCH_TIMEOUT_SECS: u64 = 5;
/// Traffic ranking request timeout in seconds
pub const TRAFFIC_RANK_TIMEOUT_SECS: u64 = 5;
/// Overall budget for one registration lookup, including connection setup.
/// The registry itself enforces nothing, so a pathological host is cut off here.
pub const REGISTRATION_BUDGET: Duration = Duration::from_secs(20);
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for page fetches.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Redirect handling
/// Maximum number of redirect hops to follow during a page fetch
pub const MAX_REDIRECT_HOPS: usize = 10;

// External services
/// RDAP bootstrap service used for registration lookups.
pub const DEFAULT_RDAP_BASE: &str = "https://rdap.org";
/// Traffic ranking endpoint (Alexa-compatible XML API).
pub const DEFAULT_RANK_ENDPOINT: &str = "http://data.alexa.com/data";

// Batch-level exhaustion reporting
/// Failure ratio above which a service is reported as exhausted/throttling.
pub const EXHAUSTION_WARN_RATIO: f64 = 0.9;
/// Minimum number of lookups before the exhaustion ratio is meaningful.
pub const EXHAUSTION_MIN_ATTEMPTS: usize = 10;

// Feature policy defaults
/// URLs with at least this many characters are flagged as long.
pub const LONG_URL_THRESHOLD: usize = 54;
/// Ranks above this are treated as low-traffic.
pub const TRAFFIC_RANK_THRESHOLD: u64 = 100_000;
/// More redirects than this flag excessive forwarding.
pub const MAX_WEB_FORWARDS: usize = 2;
/// Registration spans shorter than this many months are suspicious.
pub const MIN_REGISTRATION_MONTHS: i64 = 6;
/// Months are counted as 30-day blocks.
pub const DAYS_PER_MONTH: i64 = 30;

/// Known URL shortening services, matched against the host.
pub const SHORTENING_SERVICES: &str = concat!(
    r"bit\.ly|goo\.gl|shorte\.st|go2l\.ink|x\.co|ow\.ly|t\.co|tinyurl|tr\.im|is\.gd|cli\.gs|",
    r"yfrog\.com|migre\.me|ff\.im|tiny\.cc|url4\.eu|twit\.ac|su\.pr|twurl\.nl|snipurl\.com|",
    r"short\.to|BudURL\.com|ping\.fm|post\.ly|Just\.as|bkite\.com|snipr\.com|fic\.kr|loopt\.us|",
    r"doiop\.com|short\.ie|kl\.am|wp\.me|rubyurl\.com|om\.ly|to\.ly|bit\.do|t\.co|lnkd\.in|db\.tt|",
    r"qr\.ae|adf\.ly|goo\.gl|bitly\.com|cur\.lv|tinyurl\.com|ow\.ly|bit\.ly|ity\.im|q\.gs|is\.gd|",
    r"po\.st|bc\.vc|twitthis\.com|u\.to|j\.mp|buzurl\.com|cutt\.us|u\.bb|yourls\.org|x\.co|",
    r"prettylinkpro\.com|scrnch\.me|filoops\.info|vzturl\.com|qr\.net|1url\.com|tweez\.me|v\.gd|",
    r"tr\.im|link\.zip\.net"
);
