use crate::error::Result;
use crate::observability::metrics::ScrapeMetrics;
use crate::types::{Event, EventSource, ScrapeReport};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub api_name: String,
    pub report: ScrapeReport,
    pub duration_secs: f64,
    pub output_file: Option<String>,
}

impl PipelineResult {
    pub fn events(&self) -> &[Event] {
        &self.report.events
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Scrape one source and, when `output_dir` is given, write the events
    /// to a timestamped JSON file there. Scrape faults are already folded
    /// into the report; only persistence can fail here.
    #[instrument(skip(source), fields(api_name = %source.api_name()))]
    pub async fn run_for_source(
        source: &dyn EventSource,
        output_dir: Option<&str>,
    ) -> Result<PipelineResult> {
        let api_name = source.api_name().to_string();
        info!("Starting pipeline for {}", api_name);
        let t_pipeline = std::time::Instant::now();

        let report = source.scrape_events().await;

        if report.pages_requested > 0 && report.pages_failed == report.pages_requested {
            warn!("Every index page failed for {}", api_name);
        }

        let output_file = match output_dir {
            Some(dir) => {
                let path = Self::persist_to_json(&report.events, &api_name, dir)?;
                info!("Saved {} events to {}", report.events.len(), path);
                Some(path)
            }
            None => None,
        };

        let duration_secs = t_pipeline.elapsed().as_secs_f64();
        ScrapeMetrics::record_run_duration(&api_name, duration_secs);

        Ok(PipelineResult {
            api_name,
            report,
            duration_secs,
            output_file,
        })
    }

    /// Persist events to a JSON file
    pub fn persist_to_json(events: &[Event], api_name: &str, output_dir: &str) -> Result<String> {
        fs::create_dir_all(output_dir)?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{api_name}_{timestamp}.json");
        let filepath = Path::new(output_dir).join(&filename);

        let json_content = serde_json::to_string_pretty(events)?;
        fs::write(&filepath, json_content)?;

        Ok(filepath.to_string_lossy().to_string())
    }
}
