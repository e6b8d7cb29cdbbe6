use serde::{Deserialize, Serialize};

/// Outer HTML of the matched info blocks, kept for debugging only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

/// Field values pulled off a single detail page, before record assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventData {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    /// Time string as shown on the page, label removed
    pub time: String,
    pub location: String,
    pub tickets: String,
    pub prices: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub raw_data: RawSnapshot,
}

/// Normalized event record handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub time: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub tickets: String,
    pub link: String,
    pub source: String,
    pub raw_data: Option<RawSnapshot>,
}

/// Result of extracting one detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Parsed(Box<RawEventData>),
    Skipped { url: String, reason: String },
}

/// Everything a scrape run produced, including what it had to drop
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeReport {
    pub events: Vec<Event>,
    pub pages_requested: usize,
    pub pages_failed: usize,
    pub links_found: usize,
    pub events_skipped: usize,
}

/// Core trait every event listing source implements
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    /// Short identifier used for file names and metric labels
    fn api_name(&self) -> &'static str;

    /// Human readable tag stored on each event
    fn source_name(&self) -> &'static str;

    /// Walk the listing and collect events. Page and event faults are
    /// logged and counted, never returned.
    async fn scrape_events(&self) -> ScrapeReport;
}
