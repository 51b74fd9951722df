//! Result CSV and metrics report writers.

use std::fs;
use std::path::Path;

use anyhow::Context;

use logocrawl_core::results::{DomainResult, RequestMode};
use logocrawl_core::MetricsSummary;

/// Writes one CSV row per domain, in input order, creating `output_dir`
/// first when missing.
///
/// # Errors
///
/// Fails only on filesystem errors (directory creation or file write).
pub fn write_results_csv(
    output_dir: &Path,
    file_name: &str,
    results: &[DomainResult],
) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join(file_name);
    fs::write(&path, render_results_csv(results))
        .with_context(|| format!("failed to write results to {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = results.len(), "wrote results");
    Ok(())
}

fn render_results_csv(results: &[DomainResult]) -> String {
    let mut out = String::from("url, success, logo_link, request_type, message\n");
    for result in results {
        // An absent logo link renders as the quoted literal "None", not as
        // an empty field; an absent request type as a bare None.
        let logo_link = result.logo_link.as_deref().unwrap_or("None");
        let request_type = result.request_type.map_or("None", RequestMode::as_str);
        out.push_str(&format!(
            "{}, {}, \"{}\", {}, \"{}\"\n",
            result.url, result.success, logo_link, request_type, result.message
        ));
    }
    out
}

/// Writes the human-readable metrics report, creating `output_dir` first
/// when missing.
///
/// # Errors
///
/// Fails only on filesystem errors (directory creation or file write).
pub fn write_metrics_report(
    output_dir: &Path,
    file_name: &str,
    summary: &MetricsSummary,
) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join(file_name);
    fs::write(&path, render_metrics(summary))
        .with_context(|| format!("failed to write metrics to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote metrics");
    Ok(())
}

fn render_metrics(summary: &MetricsSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total domains processed: {}\n", summary.total));
    out.push_str(&format!(
        "Successful logo extractions: {} ({:.2}%)\n",
        summary.successful,
        summary.success_rate()
    ));
    out.push_str(&format!(
        "Failed extractions: {} ({:.2}%)\n\n",
        summary.failed,
        summary.failure_rate()
    ));

    out.push_str("Failure Breakdown:\n");
    out.push_str(&format!(
        "- Connection failures: {} ({:.2}%)\n",
        summary.connection_failures,
        summary.percentage(summary.connection_failures)
    ));
    out.push_str(&format!(
        "- Logo not found: {} ({:.2}%)\n",
        summary.not_found_failures,
        summary.percentage(summary.not_found_failures)
    ));
    out.push_str(&format!(
        "- Other failures: {} ({:.2}%)\n\n",
        summary.other_failures,
        summary.percentage(summary.other_failures)
    ));

    out.push_str("Request Types:\n");
    out.push_str(&format!(
        "- Headed requests: {} ({:.2}%)\n",
        summary.headed_requests,
        summary.percentage(summary.headed_requests)
    ));
    out.push_str(&format!(
        "- Headless requests: {} ({:.2}%)\n",
        summary.headless_requests,
        summary.percentage(summary.headless_requests)
    ));
    out.push_str(&format!(
        "- Failed requests: {} ({:.2}%)\n\n",
        summary.failed_requests,
        summary.percentage(summary.failed_requests)
    ));

    out.push_str("Logo sources:\n");
    for (message, count) in &summary.success_messages {
        out.push_str(&format!(
            "- {message}: {count} ({:.2}%)\n",
            summary.percentage(*count)
        ));
    }
    out.push('\n');

    out.push_str("Common error messages:\n");
    for (message, count) in &summary.failure_messages {
        out.push_str(&format!(
            "- {message}: {count} ({:.2}%)\n",
            summary.percentage(*count)
        ));
    }
    out
}
