use std::path::PathBuf;

/// Process-level settings resolved from `LOGOCRAWL_*` environment
/// variables, before CLI flag overrides are applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_domains: usize,
    pub output_dir: PathBuf,
    pub results_file: String,
    pub metrics_file: String,
    pub log_level: String,
}
