use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use iloveqatar_scraper::config::ScraperConfig;
use iloveqatar_scraper::infra::ReqwestHttp;
use iloveqatar_scraper::observability::init_logging;
use iloveqatar_scraper::pipeline::Pipeline;
use iloveqatar_scraper::ILoveQatarCrawler;

#[derive(Parser)]
#[command(name = "iloveqatar_scraper")]
#[command(about = "I Love Qatar event listing scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Number of index pages to walk (overrides config and ILQ_PAGES)
    #[arg(long, allow_negative_numbers = true)]
    pages: Option<i64>,

    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Directory for the JSON output file (overrides config)
    #[arg(long)]
    output_dir: Option<String>,

    /// Print events as JSON to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ScraperConfig::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config))?;
    init_logging(&config.log_dir);
    if let Some(pages) = cli.pages {
        config.pages = pages;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let http = Arc::new(ReqwestHttp::new(&config).context("building HTTP client")?);
    let crawler = ILoveQatarCrawler::new(http, &config)?;

    info!("Running scraper for {} page(s)", config.pages);
    let output_dir = (!cli.stdout).then_some(config.output_dir.as_str());
    let result = match Pipeline::run_for_source(&crawler, output_dir).await {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(e.into());
        }
    };

    if cli.stdout {
        println!("{}", serde_json::to_string_pretty(result.events())?);
        return Ok(());
    }

    let report = &result.report;
    println!("\n📊 Pipeline Results for {}:", result.api_name);
    println!("   Pages requested: {}", report.pages_requested);
    println!("   Pages failed: {}", report.pages_failed);
    println!("   Links found: {}", report.links_found);
    println!("   Events: {}", report.events.len());
    println!("   Skipped: {}", report.events_skipped);
    if let Some(file) = &result.output_file {
        println!("   Output file: {}", file);
    }
    Ok(())
}
