//! Per-domain pipeline composing the fetch fallback and the detection chain.

use logocrawl_core::results::DomainResult;

use crate::detect::LogoDetector;
use crate::fetch::{FetchOutcome, SiteFetcher};

/// Crawls one domain end to end, producing exactly one result row.
///
/// Failures never propagate: an unreachable domain yields a row carrying
/// the last captured fetch reason, and a fetched page without a logo
/// candidate yields a `not_found` row.
pub async fn crawl_domain(
    fetcher: &SiteFetcher,
    detector: &LogoDetector,
    domain: &str,
) -> DomainResult {
    tracing::debug!(domain, "crawling domain");

    let page = match fetcher.fetch(domain).await {
        FetchOutcome::Page(page) => page,
        FetchOutcome::Unreachable { error } => {
            tracing::warn!(domain, reason = %error, "domain unreachable");
            return DomainResult {
                url: domain.to_string(),
                logo_link: None,
                success: false,
                request_type: None,
                message: error,
            };
        }
    };

    match detector.detect(&page).await {
        Some(logo) => DomainResult {
            url: page.requested_url,
            logo_link: Some(logo.url),
            success: true,
            request_type: Some(page.mode),
            message: logo.source.as_str().to_string(),
        },
        None => DomainResult {
            url: page.requested_url,
            logo_link: None,
            success: false,
            request_type: Some(page.mode),
            message: "not_found".to_string(),
        },
    }
}
