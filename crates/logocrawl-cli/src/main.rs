mod crawl;
mod report;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logocrawl_core::{load_app_config, load_domains, summarize};
use logocrawl_scraper::{DetectConfig, FetchConfig, LogoDetector, SiteFetcher};

#[derive(Debug, Parser)]
#[command(name = "logocrawl")]
#[command(about = "Crawls a domain list and extracts best-guess logo URLs")]
struct Cli {
    /// Input file with one domain per line (txt, csv, or dat)
    input: PathBuf,

    /// Directory the result and metrics files are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of domains crawled concurrently
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-attempt network timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// User-Agent sent on headed requests
    #[arg(long)]
    user_agent: Option<String>,

    /// List the domains that would be crawled, then exit
    #[arg(long)]
    dry_run: bool,

    /// Raise the default log level to debug
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_app_config()?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(concurrency) = cli.concurrency {
        config.max_concurrent_domains = concurrency;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }
    if let Some(user_agent) = cli.user_agent {
        config.user_agent = user_agent;
    }

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let domains = load_domains(&cli.input)?;

    if cli.dry_run {
        println!("dry-run: would crawl {} domain(s):", domains.len());
        for domain in &domains {
            println!("  {domain}");
        }
        return Ok(());
    }

    tracing::info!(
        domains = domains.len(),
        concurrency = config.max_concurrent_domains,
        "starting crawl"
    );
    let started = Instant::now();

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let fetch_config = FetchConfig {
        timeout,
        ..FetchConfig::default()
    }
    .with_user_agent(&config.user_agent);
    let detect_config = DetectConfig {
        timeout,
        ..DetectConfig::default()
    };
    let fetcher = SiteFetcher::new(fetch_config)?;
    let detector = LogoDetector::new(detect_config)?;

    let results = crawl::run_crawl(
        &fetcher,
        &detector,
        &domains,
        config.max_concurrent_domains,
    )
    .await;
    let summary = summarize(&results);

    report::write_results_csv(&config.output_dir, &config.results_file, &results)?;
    report::write_metrics_report(&config.output_dir, &config.metrics_file, &summary)?;

    println!(
        "processed {} domain(s): {} logos found, {} failed",
        summary.total, summary.successful, summary.failed
    );
    println!("finished in {}", format_elapsed(started.elapsed()));
    Ok(())
}

/// Renders an elapsed duration as `{h}h {m}m {s:.2}s`.
fn format_elapsed(elapsed: Duration) -> String {
    let whole_secs = elapsed.as_secs();
    let hours = whole_secs / 3600;
    let minutes = (whole_secs % 3600) / 60;
    let seconds = elapsed.as_secs_f64() % 60.0;
    format!("{hours}h {minutes}m {seconds:.2}s")
}
