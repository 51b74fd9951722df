//! Ordered logo-detection strategy chain over a fetched page.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode, Url};

use crate::error::ScrapeError;
use crate::fetch::FetchedPage;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b[^>]*>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));

/// Detection strategy that produced a logo candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSource {
    CommonPath,
    OgImage,
    ImgLogo,
    Favicon,
}

impl LogoSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogoSource::CommonPath => "common_path",
            LogoSource::OgImage => "og_image",
            LogoSource::ImgLogo => "img_logo",
            LogoSource::Favicon => "favicon",
        }
    }
}

impl std::fmt::Display for LogoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed strategy priority; the first strategy that yields a candidate wins
/// and later ones are not evaluated.
pub const STRATEGY_ORDER: [LogoSource; 4] = [
    LogoSource::CommonPath,
    LogoSource::OgImage,
    LogoSource::ImgLogo,
    LogoSource::Favicon,
];

/// A discovered logo URL tagged with the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoMatch {
    pub url: String,
    pub source: LogoSource,
}

/// Detection knobs. The probe path list is ordered data; entries can be
/// added without touching the strategy chain.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    /// Timeout for each common-path existence probe.
    pub timeout: Duration,
    /// Conventional logo paths probed against the page base URL, in order.
    pub probe_paths: Vec<String>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            probe_paths: vec![
                "/logo.png".to_string(),
                "/images/logo.png".to_string(),
                "/static/logo.svg".to_string(),
                "/assets/logo.png".to_string(),
                "/img/logo.png".to_string(),
            ],
        }
    }
}

/// Runs the strategy chain: common-path probe, then `og:image`, then
/// logo-flagged `<img>`, then icon `<link>`.
pub struct LogoDetector {
    client: Client,
    probe_paths: Vec<String>,
}

impl LogoDetector {
    /// Creates a detector whose probe client uses the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: DetectConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            probe_paths: config.probe_paths,
        })
    }

    /// Returns the first match in strategy priority order, or `None` when no
    /// strategy yields a candidate. Holds no mutable state: detecting twice
    /// on the same page gives the same answer.
    pub async fn detect(&self, page: &FetchedPage) -> Option<LogoMatch> {
        for source in STRATEGY_ORDER {
            if let Some(url) = self.try_strategy(source, page).await {
                tracing::debug!(url = %url, source = %source, "logo candidate found");
                return Some(LogoMatch { url, source });
            }
        }
        tracing::debug!(url = %page.base_url, "no strategy matched");
        None
    }

    async fn try_strategy(&self, source: LogoSource, page: &FetchedPage) -> Option<String> {
        match source {
            LogoSource::CommonPath => self.probe_common_paths(&page.base_url).await,
            LogoSource::OgImage => find_og_image(&page.body, &page.base_url),
            LogoSource::ImgLogo => find_logo_image(&page.body, &page.base_url),
            LogoSource::Favicon => find_icon_link(&page.body, &page.base_url),
        }
    }

    /// HEAD-probes each configured path against the page base URL. A path
    /// matches iff the probe answers 200 with an image content type; any
    /// probe error is a non-match for that path only.
    async fn probe_common_paths(&self, base_url: &Url) -> Option<String> {
        for path in &self.probe_paths {
            let Ok(probe_url) = base_url.join(path) else {
                continue;
            };
            let Ok(response) = self.client.head(probe_url.clone()).send().await else {
                continue;
            };
            if response.status() != StatusCode::OK {
                continue;
            }
            let is_image = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.contains("image"));
            if is_image {
                return Some(probe_url.to_string());
            }
        }
        None
    }
}

fn find_og_image(html: &str, base_url: &Url) -> Option<String> {
    find_meta_content(html, "property", "og:image")
        .and_then(|content| absolutize(base_url, &content))
}

/// First `<img>` in document order whose `id` equals `logo` exactly or
/// whose class list contains a class with the case-insensitive substring
/// `logo`, and which carries a non-empty `src`. A flagged img without a
/// usable `src` does not stop the scan.
fn find_logo_image(html: &str, base_url: &Url) -> Option<String> {
    IMG_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let id_is_logo = extract_attr(tag, "id").is_some_and(|id| id == "logo");
        let class_has_logo = extract_attr(tag, "class").is_some_and(|classes| {
            classes
                .split_whitespace()
                .any(|class| class.to_ascii_lowercase().contains("logo"))
        });
        if !id_is_logo && !class_has_logo {
            return None;
        }
        extract_attr(tag, "src").and_then(|src| absolutize(base_url, &src))
    })
}

/// First `<link>` in document order whose `rel` contains the
/// case-insensitive substring `icon` and which carries a non-empty `href`.
fn find_icon_link(html: &str, base_url: &Url) -> Option<String> {
    LINK_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let rel = extract_attr(tag, "rel")?;
        if !rel.to_ascii_lowercase().contains("icon") {
            return None;
        }
        extract_attr(tag, "href").and_then(|href| absolutize(base_url, &href))
    })
}

fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(r#"(?is)\b{}\s*=\s*["']([^"']+)["']"#, regex::escape(attr));
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty())
}

fn absolutize(base_url: &Url, candidate: &str) -> Option<String> {
    let candidate = candidate.replace("&amp;", "&");
    base_url.join(&candidate).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.example.com/shop/").expect("valid base url")
    }

    #[test]
    fn og_image_resolves_relative_content() {
        let html = r#"<head><meta property="og:image" content="/brand.png"></head>"#;
        let got = find_og_image(html, &base());
        assert_eq!(got.as_deref(), Some("https://www.example.com/brand.png"));
    }

    #[test]
    fn og_image_property_is_case_insensitive() {
        let html = r#"<meta PROPERTY="OG:IMAGE" content="https://cdn.example.com/hero.jpg">"#;
        let got = find_og_image(html, &base());
        assert_eq!(got.as_deref(), Some("https://cdn.example.com/hero.jpg"));
    }

    #[test]
    fn og_image_requires_non_empty_content() {
        let html = r#"<meta property="og:image" content=" ">"#;
        assert_eq!(find_og_image(html, &base()), None);
    }

    #[test]
    fn img_with_exact_logo_id_matches() {
        let html = r#"<body><img id="logo" src="/assets/logo.svg"></body>"#;
        let got = find_logo_image(html, &base());
        assert_eq!(
            got.as_deref(),
            Some("https://www.example.com/assets/logo.svg")
        );
    }

    #[test]
    fn img_id_match_is_case_sensitive() {
        let html = r#"<img id="Logo" src="/assets/logo.svg">"#;
        assert_eq!(find_logo_image(html, &base()), None);
    }

    #[test]
    fn img_class_substring_is_case_insensitive() {
        let html = r#"<img class="header Site-LOGO small" src="/brand.png">"#;
        let got = find_logo_image(html, &base());
        assert_eq!(got.as_deref(), Some("https://www.example.com/brand.png"));
    }

    #[test]
    fn flagged_img_without_src_does_not_stop_the_scan() {
        let html = r#"
            <img id="logo" alt="placeholder">
            <img class="footer-logo" src="/footer.png">
        "#;
        let got = find_logo_image(html, &base());
        assert_eq!(got.as_deref(), Some("https://www.example.com/footer.png"));
    }

    #[test]
    fn unflagged_img_is_ignored() {
        let html = r#"<img class="hero" src="/hero.jpg">"#;
        assert_eq!(find_logo_image(html, &base()), None);
    }

    #[test]
    fn icon_link_rel_substring_matches() {
        let html = r#"<link rel="Shortcut Icon" href="/favicon.ico">"#;
        let got = find_icon_link(html, &base());
        assert_eq!(got.as_deref(), Some("https://www.example.com/favicon.ico"));
    }

    #[test]
    fn icon_link_without_href_is_skipped() {
        let html = r#"
            <link rel="icon">
            <link rel="apple-touch-icon" href="/touch.png">
        "#;
        let got = find_icon_link(html, &base());
        assert_eq!(got.as_deref(), Some("https://www.example.com/touch.png"));
    }

    #[test]
    fn non_icon_link_is_ignored() {
        let html = r#"<link rel="stylesheet" href="/style.css">"#;
        assert_eq!(find_icon_link(html, &base()), None);
    }

    #[test]
    fn absolutize_unescapes_entities_and_keeps_absolute_urls() {
        let got = absolutize(&base(), "https://cdn.example.com/logo.png?v=1&amp;w=2");
        assert_eq!(got.as_deref(), Some("https://cdn.example.com/logo.png?v=1&w=2"));
    }

    #[test]
    fn absolutize_resolves_protocol_relative_urls() {
        let got = absolutize(&base(), "//cdn.example.com/logo.png");
        assert_eq!(got.as_deref(), Some("https://cdn.example.com/logo.png"));
    }

    #[test]
    fn strategy_order_is_fixed() {
        assert_eq!(
            STRATEGY_ORDER.map(LogoSource::as_str),
            ["common_path", "og_image", "img_logo", "favicon"]
        );
    }
}
