pub mod detect;
pub mod error;
pub mod fetch;
pub mod pipeline;

pub use detect::{DetectConfig, LogoDetector, LogoMatch, LogoSource, STRATEGY_ORDER};
pub use error::ScrapeError;
pub use fetch::{FetchConfig, FetchOutcome, FetchedPage, SiteFetcher, BROWSER_USER_AGENT};
pub use pipeline::crawl_domain;
