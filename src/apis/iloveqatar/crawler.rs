use std::sync::Arc;

use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument, warn};

use super::normalizer::ILoveQatarNormalizer;
use super::parser::{compile_selector, ILoveQatarParser};
use crate::app::ports::HttpClientPort;
use crate::config::ScraperConfig;
use crate::constants::{
    EVENT_LINK_SELECTOR, ILOVEQATAR_API, ILOVEQATAR_SOURCE_NAME, PAGE_NUM_PLACEHOLDER,
};
use crate::error::Result;
use crate::observability::metrics::ScrapeMetrics;
use crate::types::{DetailOutcome, EventSource, ScrapeReport};

/// Walks the paginated listing, then every detail page it links to.
pub struct ILoveQatarCrawler {
    http: Arc<dyn HttpClientPort>,
    parser: ILoveQatarParser,
    normalizer: ILoveQatarNormalizer,
    link_selector: Selector,
    base_url: String,
    pages: i64,
}

impl ILoveQatarCrawler {
    pub fn new(http: Arc<dyn HttpClientPort>, config: &ScraperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http,
            parser: ILoveQatarParser::new()?,
            normalizer: ILoveQatarNormalizer::new(ILOVEQATAR_SOURCE_NAME),
            link_selector: compile_selector(EVENT_LINK_SELECTOR)?,
            base_url: config.base_url.clone(),
            pages: config.pages,
        })
    }

    pub fn page_url(&self, page: i64) -> String {
        self.base_url.replace(PAGE_NUM_PLACEHOLDER, &page.to_string())
    }

    /// Hrefs of article-title anchors in document order. Anchors without a
    /// usable href (missing, empty, fragment-only) are skipped; absolute
    /// hrefs pass through verbatim, relative ones are resolved against the
    /// page URL.
    pub fn extract_event_links(&self, html: &str, page_url: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let base = Url::parse(page_url).ok();
        document
            .select(&self.link_selector)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty() && !href.starts_with('#'))
            .map(|href| resolve_href(base.as_ref(), href))
            .collect()
    }

    /// Fetch and extract one detail page. Every failure becomes a skip.
    #[instrument(skip(self))]
    pub async fn scrape_event_page(&self, url: &str) -> DetailOutcome {
        let response = match self.http.get(url).await {
            Ok(response) => response,
            Err(e) => {
                return DetailOutcome::Skipped {
                    url: url.to_string(),
                    reason: format!("fetch failed: {}", e),
                }
            }
        };

        match self.parser.parse_detail(&response.body_text(), url) {
            Ok(raw) => DetailOutcome::Parsed(Box::new(raw)),
            Err(e) => DetailOutcome::Skipped {
                url: url.to_string(),
                reason: e.to_string(),
            },
        }
    }

    /// Links found on one index page, or `None` if the page could not be fetched.
    async fn scrape_index_page(&self, page: i64) -> Option<Vec<String>> {
        let url = self.page_url(page);
        info!("Scraping page {} ({})", page, url);
        match self.http.get(&url).await {
            Ok(response) => {
                ScrapeMetrics::record_page_fetched(response.bytes.len());
                let links = self.extract_event_links(&response.body_text(), &url);
                debug!("Found {} event links on page {}", links.len(), page);
                Some(links)
            }
            Err(e) => {
                error!("Error scraping page {}: {}", page, e);
                ScrapeMetrics::record_page_failed();
                None
            }
        }
    }
}

fn resolve_href(base: Option<&Url>, href: &str) -> String {
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    match base.and_then(|b| b.join(href).ok()) {
        Some(resolved) => resolved.to_string(),
        None => href.to_string(),
    }
}

#[async_trait::async_trait]
impl EventSource for ILoveQatarCrawler {
    fn api_name(&self) -> &'static str {
        ILOVEQATAR_API
    }

    fn source_name(&self) -> &'static str {
        ILOVEQATAR_SOURCE_NAME
    }

    #[instrument(skip(self))]
    async fn scrape_events(&self) -> ScrapeReport {
        let mut report = ScrapeReport::default();

        for page in 1..=self.pages {
            report.pages_requested += 1;
            let Some(links) = self.scrape_index_page(page).await else {
                report.pages_failed += 1;
                continue;
            };
            report.links_found += links.len();
            ScrapeMetrics::record_links_found(links.len());

            for link in links {
                match self.scrape_event_page(&link).await {
                    DetailOutcome::Parsed(raw) => {
                        debug!("Extracted event '{}' from {}", raw.title, link);
                        report.events.push(self.normalizer.normalize(*raw));
                        ScrapeMetrics::record_event_extracted();
                    }
                    DetailOutcome::Skipped { url, reason } => {
                        warn!("Error scraping event {}: {}", url, reason);
                        report.events_skipped += 1;
                        ScrapeMetrics::record_event_skipped();
                    }
                }
            }
        }

        info!(
            "Collected {} events from {} pages ({} failed pages, {} skipped events)",
            report.events.len(),
            report.pages_requested,
            report.pages_failed,
            report.events_skipped
        );
        report
    }
}
