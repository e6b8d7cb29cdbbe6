//! Scrape metrics, recorded through the `metrics` facade.
//!
//! Nothing here installs a recorder; without one every call is a no-op.

use std::fmt;

/// All metric names emitted by the scraper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    PagesFetched,
    PagesFailed,
    PageBytes,
    LinksFound,
    EventsExtracted,
    EventsSkipped,
    RunDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PagesFetched => "ilq_pages_fetched_total",
            MetricName::PagesFailed => "ilq_pages_failed_total",
            MetricName::PageBytes => "ilq_page_bytes",
            MetricName::LinksFound => "ilq_links_found_total",
            MetricName::EventsExtracted => "ilq_events_extracted_total",
            MetricName::EventsSkipped => "ilq_events_skipped_total",
            MetricName::RunDuration => "ilq_run_duration_seconds",
        }
    }

    pub fn all() -> &'static [MetricName] {
        &[
            MetricName::PagesFetched,
            MetricName::PagesFailed,
            MetricName::PageBytes,
            MetricName::LinksFound,
            MetricName::EventsExtracted,
            MetricName::EventsSkipped,
            MetricName::RunDuration,
        ]
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct ScrapeMetrics;

impl ScrapeMetrics {
    pub fn record_page_fetched(payload_bytes: usize) {
        ::metrics::counter!(MetricName::PagesFetched.as_str()).increment(1);
        ::metrics::histogram!(MetricName::PageBytes.as_str()).record(payload_bytes as f64);
    }

    pub fn record_page_failed() {
        ::metrics::counter!(MetricName::PagesFailed.as_str()).increment(1);
    }

    pub fn record_links_found(count: usize) {
        ::metrics::counter!(MetricName::LinksFound.as_str()).increment(count as u64);
    }

    pub fn record_event_extracted() {
        ::metrics::counter!(MetricName::EventsExtracted.as_str()).increment(1);
    }

    pub fn record_event_skipped() {
        ::metrics::counter!(MetricName::EventsSkipped.as_str()).increment(1);
    }

    pub fn record_run_duration(api: &str, duration_secs: f64) {
        ::metrics::histogram!(MetricName::RunDuration.as_str(), "api" => api.to_string())
            .record(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed_and_unique() {
        let names: std::collections::HashSet<&str> =
            MetricName::all().iter().map(|m| m.as_str()).collect();
        assert_eq!(names.len(), MetricName::all().len());
        assert!(names.iter().all(|n| n.starts_with("ilq_")));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        ScrapeMetrics::record_page_fetched(1024);
        ScrapeMetrics::record_page_failed();
        ScrapeMetrics::record_links_found(3);
        ScrapeMetrics::record_event_extracted();
        ScrapeMetrics::record_event_skipped();
        ScrapeMetrics::record_run_duration("iloveqatar", 0.5);
    }
}
