//! End-to-end tests for the per-domain pipeline: fetch, then detect, then
//! build exactly one result row.

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use logocrawl_core::results::RequestMode;
use logocrawl_scraper::{crawl_domain, DetectConfig, FetchConfig, LogoDetector, SiteFetcher};

fn domain_of(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

fn http_fetcher() -> SiteFetcher {
    let config = FetchConfig {
        protocol_prefixes: vec!["http://".to_string()],
        ..FetchConfig::default()
    };
    SiteFetcher::new(config).expect("failed to build SiteFetcher")
}

fn detector() -> LogoDetector {
    LogoDetector::new(DetectConfig::default()).expect("failed to build LogoDetector")
}

#[tokio::test]
async fn successful_crawl_builds_a_full_result_row() {
    let server = MockServer::start().await;

    // GET serves a page advertising an og:image; HEAD probes all 404.
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<meta property="og:image" content="/brand.png">"#),
        )
        .mount(&server)
        .await;

    let result = crawl_domain(&http_fetcher(), &detector(), &domain_of(&server)).await;

    assert_eq!(result.url, server.uri());
    assert_eq!(
        result.logo_link,
        Some(format!("{}/brand.png", server.uri()))
    );
    assert!(result.success);
    assert_eq!(result.request_type, Some(RequestMode::Headed));
    assert_eq!(result.message, "og_image");
}

#[tokio::test]
async fn fetched_page_without_candidates_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>bare</body></html>"))
        .mount(&server)
        .await;

    let result = crawl_domain(&http_fetcher(), &detector(), &domain_of(&server)).await;

    assert!(!result.success);
    assert_eq!(result.logo_link, None);
    assert_eq!(
        result.request_type,
        Some(RequestMode::Headed),
        "an extraction miss still records which attempt fetched the page"
    );
    assert_eq!(
        result.message, "not_found",
        "an extraction miss must not leak a fetch failure reason"
    );
}

#[tokio::test]
async fn unreachable_domain_reports_the_fetch_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let domain = domain_of(&server);
    let result = crawl_domain(&http_fetcher(), &detector(), &domain).await;

    assert_eq!(result.url, domain, "a failed crawl reports the bare domain");
    assert_eq!(result.logo_link, None);
    assert!(!result.success);
    assert_eq!(result.request_type, None);
    assert_eq!(result.message, "500");
}

#[tokio::test]
async fn success_invariant_holds_on_every_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<link rel="icon" href="/favicon.ico">"#),
        )
        .mount(&server)
        .await;

    let result = crawl_domain(&http_fetcher(), &detector(), &domain_of(&server)).await;

    assert_eq!(
        result.success,
        result.logo_link.is_some() && result.request_type.is_some(),
        "success must hold exactly when a logo link and a request type are present"
    );
    assert!(result.success);
    assert_eq!(result.message, "favicon");
}
