//! Bounded-concurrency fan-out over the domain list.

use futures::stream::{self, StreamExt};

use logocrawl_core::results::DomainResult;
use logocrawl_scraper::{crawl_domain, LogoDetector, SiteFetcher};

/// Crawls every domain with at most `concurrency` pipelines in flight and
/// returns one result per domain in input order, regardless of completion
/// order. A `concurrency` of zero is clamped to one.
pub async fn run_crawl(
    fetcher: &SiteFetcher,
    detector: &LogoDetector,
    domains: &[String],
    concurrency: usize,
) -> Vec<DomainResult> {
    let mut indexed: Vec<(usize, DomainResult)> = stream::iter(domains.iter().enumerate())
        .map(|(index, domain)| async move {
            (index, crawl_domain(fetcher, detector, domain).await)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    // Completion order is arbitrary; the output contract is input order.
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
