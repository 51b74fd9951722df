//! Protocol and header fallback for resolving a bare domain to a fetched page.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};

use logocrawl_core::results::RequestMode;

use crate::error::ScrapeError;

/// Desktop browser User-Agent sent on headed attempts.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Fetch behavior knobs. The prefix and header lists are ordered data, not
/// control flow: callers can substitute entries without touching the
/// fallback algorithm.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-attempt timeout; applies to each network request individually,
    /// not cumulatively across the fallback loop.
    pub timeout: Duration,
    /// Candidate URL prefixes, tried strictly in order.
    pub protocol_prefixes: Vec<String>,
    /// Browser-like header set attached to headed attempts only.
    pub headed_headers: Vec<(String, String)>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            protocol_prefixes: vec![
                "https://www.".to_string(),
                "http://www.".to_string(),
                "www.".to_string(),
            ],
            headed_headers: vec![
                ("User-Agent".to_string(), BROWSER_USER_AGENT.to_string()),
                (
                    "Accept".to_string(),
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                        .to_string(),
                ),
                ("Connection".to_string(), "keep-alive".to_string()),
                ("DNT".to_string(), "1".to_string()),
            ],
        }
    }
}

impl FetchConfig {
    /// Replaces the headed User-Agent in place, keeping its position in the
    /// header list; appends one when the list has none.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        if let Some(entry) = self
            .headed_headers
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
        {
            entry.1 = user_agent.to_string();
        } else {
            self.headed_headers
                .push(("User-Agent".to_string(), user_agent.to_string()));
        }
        self
    }
}

/// A successfully fetched landing page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The candidate URL (`prefix + domain`) that produced the response.
    pub requested_url: String,
    /// Final post-redirect URL; relative logo candidates join against this.
    pub base_url: Url,
    /// Response body as text.
    pub body: String,
    /// Which attempt kind produced the response.
    pub mode: RequestMode,
}

/// Outcome of the full fallback loop for one domain.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Some prefix/mode combination yielded a usable response.
    Page(FetchedPage),
    /// Every attempt failed; `error` is the last captured failure reason,
    /// or `not_attempted` when no attempt ran.
    Unreachable { error: String },
}

/// Resolves bare domains to fetched pages via the prefix and header
/// fallback chain.
///
/// For each configured prefix, in order, a headed request (browser header
/// set) is attempted first, then a headless request (no custom headers) on
/// the same URL. The first usable response wins outright and remaining
/// prefixes are not tried; a response with a client or server error status
/// counts as a failed attempt.
pub struct SiteFetcher {
    client: Client,
    protocol_prefixes: Vec<String>,
    headed_headers: HeaderMap,
}

impl SiteFetcher {
    /// Creates a fetcher with the configured per-attempt timeout, prefix
    /// order, and headed header set.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::InvalidHeader`] if a configured header name or value
    ///   is not valid HTTP header syntax.
    /// - [`ScrapeError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(config: FetchConfig) -> Result<Self, ScrapeError> {
        let mut headed_headers = HeaderMap::new();
        for (name, value) in &config.headed_headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScrapeError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ScrapeError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headed_headers.insert(header_name, header_value);
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            protocol_prefixes: config.protocol_prefixes,
            headed_headers,
        })
    }

    /// Runs the full fallback loop for one bare domain.
    ///
    /// Never errors: exhausting every attempt returns
    /// [`FetchOutcome::Unreachable`] carrying the most recent failure
    /// reason (earlier reasons are overwritten).
    pub async fn fetch(&self, domain: &str) -> FetchOutcome {
        let mut last_failure = String::from("not_attempted");

        for prefix in &self.protocol_prefixes {
            let candidate = format!("{prefix}{domain}");
            for mode in [RequestMode::Headed, RequestMode::Headless] {
                match self.attempt(&candidate, mode).await {
                    Ok(page) => {
                        tracing::debug!(url = %candidate, mode = %mode, "fetched page");
                        return FetchOutcome::Page(page);
                    }
                    Err(reason) => {
                        tracing::debug!(
                            url = %candidate,
                            mode = %mode,
                            %reason,
                            "fetch attempt failed"
                        );
                        last_failure = reason;
                    }
                }
            }
        }

        FetchOutcome::Unreachable {
            error: last_failure,
        }
    }

    async fn attempt(&self, candidate: &str, mode: RequestMode) -> Result<FetchedPage, String> {
        let mut request = self.client.get(candidate);
        if mode == RequestMode::Headed {
            request = request.headers(self.headed_headers.clone());
        }

        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| classify_failure(&e))?;

        let base_url = response.url().clone();
        let body = response.text().await.map_err(|e| classify_failure(&e))?;

        Ok(FetchedPage {
            requested_url: candidate.to_string(),
            base_url,
            body,
            mode,
        })
    }
}

/// Short failure class for one attempt: the bare status code when the error
/// carries one, otherwise the transport error kind.
fn classify_failure(error: &reqwest::Error) -> String {
    if let Some(status) = error.status() {
        return status.as_u16().to_string();
    }
    if error.is_timeout() {
        "Error Timeout".to_string()
    } else if error.is_connect() {
        "Error Connect".to_string()
    } else if error.is_builder() {
        "Error InvalidUrl".to_string()
    } else if error.is_redirect() {
        "Error TooManyRedirects".to_string()
    } else if error.is_decode() {
        "Error Decode".to_string()
    } else {
        "Error Request".to_string()
    }
}
