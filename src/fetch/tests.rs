//! Fetch module tests.

use super::scope::port_in_scope;
use super::*;
use crate::initialization::init_probe_client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url(s: &str) -> Url {
    Url::parse(s).expect("valid test URL")
}

fn create_test_config() -> Config {
    Config {
        http_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn client(config: &Config) -> reqwest::Client {
    init_probe_client(config).expect("probe client")
}

async fn probe(
    client: &reqwest::Client,
    config: &Config,
    hostname: &str,
    open_ports: &BTreeSet<u16>,
) -> Result<Resolution, ResolveError> {
    let cancel = CancellationToken::new();
    probe_http(
        client,
        &cancel,
        config,
        "resolver-test/1.0",
        hostname,
        &HashMap::new(),
        open_ports,
    )
    .await
}

#[test]
fn test_candidate_urls_scheme_policy() {
    assert_eq!(candidate_urls("example.com", 80), vec!["http://example.com/"]);
    assert_eq!(candidate_urls("example.com", 443), vec!["https://example.com/"]);
    assert_eq!(
        candidate_urls("example.com", 8080),
        vec!["http://example.com:8080/", "https://example.com:8080/"]
    );
}

#[test]
fn test_port_in_scope_uses_scheme_defaults() {
    let open = BTreeSet::from([80, 8443]);
    assert!(port_in_scope(&url("http://example.com/"), &open));
    assert!(!port_in_scope(&url("https://example.com/"), &open));
    assert!(port_in_scope(&url("https://example.com:8443/"), &open));
    assert!(!port_in_scope(&url("http://example.com:8080/"), &open));
}

#[test]
fn test_any_within_scope() {
    let open = BTreeSet::from([443]);

    let mut probed = ProbedUrls::new();
    probed.record(url("https://other.com/"), Duration::from_millis(10));
    assert!(!any_within_scope(&probed, "example.com", &open));

    probed.record(url("https://www.example.com/"), Duration::from_millis(10));
    assert!(any_within_scope(&probed, "example.com", &open));

    // Right host, wrong port
    let mut probed = ProbedUrls::new();
    probed.record(url("http://example.com/"), Duration::from_millis(10));
    assert!(!any_within_scope(&probed, "example.com", &open));
}

#[test]
fn test_any_within_time_limit() {
    let threshold = Duration::from_secs(4);
    let mut probed = ProbedUrls::new();
    probed.record(url("https://example.com/"), Duration::from_secs(4));
    assert!(!any_within_time_limit(&probed, threshold));

    probed.record(url("http://example.com:8080/"), Duration::from_millis(3999));
    assert!(any_within_time_limit(&probed, threshold));
}

#[test]
fn test_build_headers() {
    let mut custom = HashMap::new();
    custom.insert("X-Scan-Id".to_string(), "42".to_string());
    custom.insert("User-Agent".to_string(), "overridden".to_string());
    custom.insert("Bad Header".to_string(), "x".to_string());
    custom.insert("X-Bad-Value".to_string(), "line\nbreak".to_string());

    let headers = build_headers("scanner/1.0", &custom);
    assert_eq!(headers.get("x-scan-id").unwrap(), "42");
    assert_eq!(headers.get_all(USER_AGENT).iter().count(), 1);
    assert_eq!(headers.get(USER_AGENT).unwrap(), "scanner/1.0");
    assert!(headers.get("x-bad-value").is_none());
    assert_eq!(headers.len(), 2);
}

#[tokio::test]
async fn test_probe_http_fast_in_scope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;
    let port = server.address().port();
    let config = create_test_config();

    let resolution = probe(&client(&config), &config, "127.0.0.1", &BTreeSet::from([port]))
        .await
        .unwrap();
    // The https candidate fails the TLS handshake against a plain HTTP server
    assert_eq!(resolution.urls, vec![format!("http://127.0.0.1:{port}/")]);
    assert_eq!(resolution.warning, None);
}

#[tokio::test]
async fn test_probe_http_any_status_counts_as_reached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let port = server.address().port();
    let config = create_test_config();

    let resolution = probe(&client(&config), &config, "127.0.0.1", &BTreeSet::from([port]))
        .await
        .unwrap();
    assert_eq!(resolution.urls.len(), 1);
}

#[tokio::test]
async fn test_probe_http_slow_responses_warn() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    let port = server.address().port();
    let config = Config {
        slow_response_threshold: Duration::from_millis(200),
        ..create_test_config()
    };

    let resolution = probe(&client(&config), &config, "127.0.0.1", &BTreeSet::from([port]))
        .await
        .unwrap();
    assert_eq!(resolution.urls, vec![format!("http://127.0.0.1:{port}/")]);
    assert_eq!(resolution.warning, Some(Warning::HttpTimeout));
}

#[tokio::test]
async fn test_probe_http_redirect_out_of_scope_is_not_followed() {
    let server = MockServer::start().await;
    let port = server.address().port();
    let elsewhere = format!("http://localhost:{port}/elsewhere");
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", elsewhere.as_str()))
        .mount(&server)
        .await;
    // Out-of-scope and slow at once: scope wins
    let config = Config {
        slow_response_threshold: Duration::ZERO,
        ..create_test_config()
    };

    let resolution = probe(&client(&config), &config, "127.0.0.1", &BTreeSet::from([port]))
        .await
        .unwrap();
    assert_eq!(resolution.urls, vec![elsewhere]);
    assert_eq!(resolution.warning, Some(Warning::RedirectedOutOfScope));

    // The out-of-scope target itself was never requested
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/"));
}

#[tokio::test]
async fn test_probe_http_redirect_to_unprobed_port_is_out_of_scope() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&target)
        .await;
    let target_url = format!("http://127.0.0.1:{}/landing", target.address().port());

    let origin = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", target_url.as_str()))
        .mount(&origin)
        .await;
    let config = create_test_config();

    // Same host, so the redirect is followed, but its port was never found open
    let resolution = probe(
        &client(&config),
        &config,
        "127.0.0.1",
        &BTreeSet::from([origin.address().port()]),
    )
    .await
    .unwrap();
    assert_eq!(resolution.urls, vec![target_url]);
    assert_eq!(resolution.warning, Some(Warning::RedirectedOutOfScope));
}

#[tokio::test]
async fn test_probe_http_redirect_within_parent_domain_is_followed() {
    let server = MockServer::start().await;
    let port = server.address().port();
    let home = format!("http://example.test:{port}/home");
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", home.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = create_test_config();
    let client = reqwest::Client::builder()
        .redirect(scoped_redirect_policy(config.max_redirects))
        .resolve("app.example.test", *server.address())
        .resolve("example.test", *server.address())
        .build()
        .unwrap();

    let resolution = probe(&client, &config, "app.example.test", &BTreeSet::from([port]))
        .await
        .unwrap();
    assert_eq!(resolution.urls, vec![home]);
    assert_eq!(resolution.warning, None);
}

#[tokio::test]
async fn test_probe_http_redirect_chain_is_capped() {
    let server = MockServer::start().await;
    let port = server.address().port();
    for (from, to) in [("/", "/r1"), ("/r1", "/r2"), ("/r2", "/r3"), ("/r3", "/r4")] {
        Mock::given(method("GET"))
            .and(path(from))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", to))
            .mount(&server)
            .await;
    }
    let config = create_test_config();

    let resolution = probe(&client(&config), &config, "127.0.0.1", &BTreeSet::from([port]))
        .await
        .unwrap();
    // Three redirects followed; the response pointing at /r4 is the last one
    assert_eq!(resolution.urls, vec![format!("http://127.0.0.1:{port}/r3")]);
    assert_eq!(resolution.warning, None);
}

#[tokio::test]
async fn test_probe_http_deduplicates_final_urls() {
    let primary = MockServer::start().await;
    let primary_port = primary.address().port();
    let landing = format!("http://127.0.0.1:{primary_port}/landing");
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/landing"))
        .mount(&primary)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&primary)
        .await;

    let secondary = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", landing.as_str()))
        .mount(&secondary)
        .await;
    let config = create_test_config();

    // Both open ports end up at the same landing page
    let resolution = probe(
        &client(&config),
        &config,
        "127.0.0.1",
        &BTreeSet::from([primary_port, secondary.address().port()]),
    )
    .await
    .unwrap();
    assert_eq!(resolution.urls, vec![landing]);
    assert_eq!(resolution.warning, None);
}

#[tokio::test]
async fn test_probe_http_no_connection() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = listener.local_addr().unwrap().port();
    drop(listener);
    let config = create_test_config();

    let result = probe(&client(&config), &config, "127.0.0.1", &BTreeSet::from([closed])).await;
    assert_eq!(result, Err(ResolveError::NoHttpConnection));
}

#[tokio::test]
async fn test_probe_http_precancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let config = create_test_config();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = probe_http(
        &client(&config),
        &cancel,
        &config,
        "resolver-test/1.0",
        "127.0.0.1",
        &HashMap::new(),
        &BTreeSet::from([server.address().port()]),
    )
    .await;
    assert_eq!(result, Err(ResolveError::Cancelled));
    assert!(server.received_requests().await.unwrap().is_empty());
}
