/// Which request style produced a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Browser-like header set attached.
    Headed,
    /// No custom headers.
    Headless,
}

impl RequestMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestMode::Headed => "headed",
            RequestMode::Headless => "headless",
        }
    }
}

impl std::fmt::Display for RequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome row for one input domain.
///
/// Invariant: `success == true` iff `logo_link` is present, and a present
/// `logo_link` implies a present `request_type` (a logo can only come from
/// a fetched page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResult {
    /// The candidate URL that produced a response, or the bare input domain
    /// when every fetch attempt failed.
    pub url: String,
    /// Discovered logo URL, when any detection strategy matched.
    pub logo_link: Option<String>,
    /// Whether a logo link was found.
    pub success: bool,
    /// Request style that fetched the page; `None` when unreachable.
    pub request_type: Option<RequestMode>,
    /// Logo source name on success, `not_found` on an extraction miss, or
    /// the last captured fetch failure reason.
    pub message: String,
}
