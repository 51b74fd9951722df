pub mod app_config;
pub mod config;
pub mod domains;
pub mod metrics;
pub mod results;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use domains::load_domains;
pub use metrics::{summarize, MetricsSummary};
pub use results::{DomainResult, RequestMode};

/// Pre-dispatch configuration failures: bad env values or an unusable
/// input file. Anything that happens after dispatch starts is folded into
/// per-domain result rows instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unsupported input extension `{extension}` for {path}; expected one of: txt, csv, dat")]
    UnsupportedExtension { path: String, extension: String },

    #[error("failed to read domains file {path}: {source}")]
    DomainsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
