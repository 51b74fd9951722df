use crate::results::{DomainResult, RequestMode};

/// Aggregate statistics over a full crawl's outcome rows.
///
/// Failure categories are mutually exclusive: a failed row is a connection
/// failure when no request mode is recorded, a not-found when the page was
/// fetched but no strategy matched, and otherwise an "other" failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub connection_failures: usize,
    pub not_found_failures: usize,
    pub other_failures: usize,
    pub headed_requests: usize,
    pub headless_requests: usize,
    pub failed_requests: usize,
    /// Per-message success counts (logo source names), sorted by descending
    /// count; ties keep first-seen order.
    pub success_messages: Vec<(String, usize)>,
    /// Per-message failure counts, sorted the same way.
    pub failure_messages: Vec<(String, usize)>,
}

impl MetricsSummary {
    /// Percentage of `count` against the processed total; `0.0` for an
    /// empty run rather than a division by zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // counts stay far below f64's exact-integer range
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (count as f64 / self.total as f64) * 100.0
        }
    }

    #[must_use]
    pub fn success_rate(&self) -> f64 {
        self.percentage(self.successful)
    }

    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 - self.success_rate()
        }
    }
}

/// Summarize crawl outcomes into counts and message frequency tables.
///
/// Pure single-pass aggregation. Rows are scanned in order, so after the
/// stable descending sort equal-count messages keep first-seen ordering.
#[must_use]
pub fn summarize(results: &[DomainResult]) -> MetricsSummary {
    let mut summary = MetricsSummary {
        total: results.len(),
        ..MetricsSummary::default()
    };

    for result in results {
        match result.request_type {
            Some(RequestMode::Headed) => summary.headed_requests += 1,
            Some(RequestMode::Headless) => summary.headless_requests += 1,
            None => summary.failed_requests += 1,
        }

        if result.success {
            summary.successful += 1;
            bump(&mut summary.success_messages, &result.message);
            continue;
        }

        summary.failed += 1;
        if result.request_type.is_none() {
            summary.connection_failures += 1;
        } else if result.message == "not_found" {
            summary.not_found_failures += 1;
        } else {
            summary.other_failures += 1;
        }
        bump(&mut summary.failure_messages, &result.message);
    }

    summary.success_messages.sort_by(|a, b| b.1.cmp(&a.1));
    summary.failure_messages.sort_by(|a, b| b.1.cmp(&a.1));
    summary
}

fn bump(table: &mut Vec<(String, usize)>, message: &str) {
    if let Some(entry) = table.iter_mut().find(|(m, _)| m == message) {
        entry.1 += 1;
    } else {
        table.push((message.to_string(), 1));
    }
}
