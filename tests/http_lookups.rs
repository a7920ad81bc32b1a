//! HTTP lookup tests against local mock servers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use futures::future::BoxFuture;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use phish_features::features::content::{iframe, web_forwards};
use phish_features::fetch::{HttpPageFetcher, HttpTrafficRanker};
use phish_features::whois::RdapLookup;
use phish_features::{
    Feature, FeatureExtractor, FeaturePolicy, Label, PageFetchResult, PageFetcher,
    RegistrationLookup, TrafficRanker,
};

fn redirect_client() -> Arc<reqwest::Client> {
    Arc::new(
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client"),
    )
}

fn plain_client() -> Arc<reqwest::Client> {
    Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("client"),
    )
}

/// Page and rank services that never answer.
struct Unreachable;

impl PageFetcher for Unreachable {
    fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Option<PageFetchResult>> {
        Box::pin(async { None })
    }
}

impl TrafficRanker for Unreachable {
    fn rank<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Option<u64>> {
        Box::pin(async { None })
    }
}

const EXAMPLE_RDAP: &str = r#"{
    "objectClassName": "domain",
    "ldhName": "EXAMPLE.COM",
    "events": [
        {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
        {"eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z"}
    ]
}"#;

async fn mount_redirect(server: &MockServer, from: &str, to: &str) {
    Mock::given(method("GET"))
        .and(path(from))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", to))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_page_fetch_records_each_redirect() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/r1", "/r2").await;
    mount_redirect(&server, "/r2", "/r3").await;
    mount_redirect(&server, "/r3", "/final").await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>landing</html>"))
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(redirect_client(), 10);
    let page = fetcher
        .fetch(&format!("{}/r1", server.uri()))
        .await
        .expect("page");

    assert_eq!(page.status, 200);
    assert_eq!(page.history.len(), 3);
    assert!(page.final_url.ends_with("/final"));
    assert_eq!(page.text, "<html>landing</html>");
    assert_eq!(web_forwards(Some(&page), &FeaturePolicy::default()), 1);
}

#[tokio::test]
async fn test_page_fetch_two_redirects_is_not_forwarding() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/a", "/b").await;
    mount_redirect(&server, "/b", "/c").await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(redirect_client(), 10);
    let page = fetcher.fetch(&format!("{}/a", server.uri())).await;
    assert_eq!(page.as_ref().map(|p| p.history.len()), Some(2));
    assert_eq!(web_forwards(page.as_ref(), &FeaturePolicy::default()), 0);
}

#[tokio::test]
async fn test_page_fetch_gives_up_past_hop_limit() {
    let server = MockServer::start().await;
    mount_redirect(&server, "/loop", "/loop").await;

    let fetcher = HttpPageFetcher::new(redirect_client(), 3);
    assert!(fetcher
        .fetch(&format!("{}/loop", server.uri()))
        .await
        .is_none());
}

#[tokio::test]
async fn test_page_fetch_keeps_error_page_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("<IFRAME src=\"x\" frameBorder=0>"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(redirect_client(), 10);
    let page = fetcher
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .expect("error pages are still content");
    assert_eq!(page.status, 404);
    assert_eq!(iframe(Some(&page)), 0);
}

#[tokio::test]
async fn test_page_fetch_unreachable_host() {
    let fetcher = HttpPageFetcher::new(redirect_client(), 10);
    assert!(fetcher.fetch("http://127.0.0.1:1/").await.is_none());
    assert!(fetcher.fetch("not a url").await.is_none());
}

#[tokio::test]
async fn test_traffic_rank_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("cli", "10"))
        .and(query_param("dat", "s"))
        .and(query_param("url", "https://example.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8"?><ALEXA><SD><REACH RANK="250000"/></SD></ALEXA>"#,
        ))
        .mount(&server)
        .await;

    let ranker = HttpTrafficRanker::new(plain_client(), format!("{}/data", server.uri()));
    assert_eq!(ranker.rank("https://example.com/").await, Some(250_000));
    assert_eq!(ranker.rank("https://unranked.example/").await, None);
}

#[tokio::test]
async fn test_rdap_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "objectClassName": "domain",
                "ldhName": "EXAMPLE.COM",
                "events": [
                    {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
                    {"eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z"},
                    {"eventAction": "last update of RDAP database", "eventDate": "2025-01-01T00:00:00Z"}
                ]
            }"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain/unknown.example"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let lookup = RdapLookup::new(plain_client(), format!("{}/", server.uri()));
    let record = lookup.lookup("example.com").await.expect("record");
    assert_eq!(
        record.creation_date.resolve(),
        Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).single()
    );
    assert_eq!(
        record.expiration_date.resolve(),
        Utc.with_ymd_and_hms(2030, 8, 13, 4, 0, 0).single()
    );

    assert!(lookup.lookup("unknown.example").await.is_none());
    assert!(lookup.lookup("").await.is_none());
}

#[tokio::test]
async fn test_extractor_over_http_services() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><script>document.onmousedown=function(e){if(event.button==2){return false}}</script></html>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<ALEXA><SD><REACH RANK="42"/></SD></ALEXA>"#),
        )
        .mount(&server)
        .await;
    // IP literals never reach the registration service.
    Mock::given(method("GET"))
        .and(path("/rdap/domain/127.0.0.1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let extractor = FeatureExtractor::new(
        Arc::new(HttpPageFetcher::new(redirect_client(), 10)),
        Arc::new(HttpTrafficRanker::new(plain_client(), format!("{}/data", server.uri()))),
        Arc::new(RdapLookup::new(plain_client(), format!("{}/rdap", server.uri()))),
    );

    let url = format!("{}/login", server.uri());
    let row = extractor
        .extract_all(&url, Label::Phishing)
        .await
        .expect("schema-valid row");

    assert_eq!(row.domain(), "127.0.0.1");
    assert_eq!(row.get(Feature::HaveIp), Some(1));
    assert_eq!(row.get(Feature::RightClick), Some(0));
    assert_eq!(row.get(Feature::IFrame), Some(1));
    assert_eq!(row.get(Feature::WebForwards), Some(0));
    assert_eq!(row.get(Feature::WebTraffic), Some(0));
    assert_eq!(row.get(Feature::DnsRecord), Some(1));
    assert_eq!(row.get(Feature::DomainAge), Some(1));
    assert_eq!(row.get(Feature::DomainEnd), Some(1));
}

#[tokio::test]
async fn test_subdomain_is_registered_under_its_registrable_domain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EXAMPLE_RDAP))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain/mail.example.com"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    let now = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    let extractor = FeatureExtractor::new(
        Arc::new(Unreachable),
        Arc::new(Unreachable),
        Arc::new(RdapLookup::new(plain_client(), server.uri())),
    )
    .with_clock(now);

    for url in ["https://example.com/", "https://mail.example.com/"] {
        let row = extractor
            .extract_all(url, Label::Legitimate)
            .await
            .expect("schema-valid row");
        assert_eq!(row.get(Feature::DnsRecord), Some(0), "{url}");
        assert_eq!(row.get(Feature::DomainAge), Some(0), "{url}");
        assert_eq!(row.get(Feature::DomainEnd), Some(1), "{url}");
    }
}

#[tokio::test]
async fn test_rdap_lookup_sends_ascii_name_for_unicode_domain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/xn--bcher-kva.de"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EXAMPLE_RDAP))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = RdapLookup::new(plain_client(), server.uri());
    assert!(lookup.lookup("bücher.de").await.is_some());
}
