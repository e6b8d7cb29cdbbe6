use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use iloveqatar_scraper::app::ports::{HttpClientPort, HttpGetResult};
use iloveqatar_scraper::config::ScraperConfig;
use iloveqatar_scraper::error::{Result, ScraperError};
use iloveqatar_scraper::pipeline::Pipeline;
use iloveqatar_scraper::types::DetailOutcome;
use iloveqatar_scraper::{EventSource, ILoveQatarCrawler};
use tempfile::tempdir;

const BASE: &str = "https://www.iloveqatar.net";

/// Serves canned HTML by URL; unknown URLs fail like a 404.
#[derive(Default)]
struct FakeHttp {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeHttp {
    fn with(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClientPort for FakeHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(html) => Ok(HttpGetResult {
                bytes: html.as_bytes().to_vec(),
            }),
            None => Err(ScraperError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn index_page(slugs: &[&str]) -> String {
    let anchors: String = slugs
        .iter()
        .map(|s| format!(r#"<a class="article-block__title" href="{BASE}/events/{s}">{s}</a>"#))
        .collect();
    format!(
        r#"<html><body>{anchors}<a class="article-block__title">no href</a><a href="/elsewhere">other</a></body></html>"#
    )
}

fn detail_page(title: &str, date: &str) -> String {
    format!(
        r#"<html><body><h1>{title}</h1>
        <div class="events-page-info">
          <div class="events-page-info__item _date">Date: {date}</div>
          <div class="events-page-info__item _time">Time: 08:30 am - 04:00 pm</div>
          <div class="events-page-info__item _location">Location: Doha</div>
          <p>About {title}.</p>
        </div></body></html>"#
    )
}

fn config(pages: i64) -> ScraperConfig {
    ScraperConfig {
        pages,
        base_url: format!("{BASE}/events/p{{page_num}}"),
        ..ScraperConfig::default()
    }
}

fn detail_url(slug: &str) -> String {
    format!("{BASE}/events/{slug}")
}

#[tokio::test]
async fn test_zero_or_negative_pages_yield_nothing() {
    for pages in [0, -3] {
        let http = Arc::new(FakeHttp::default());
        let crawler = ILoveQatarCrawler::new(http.clone(), &config(pages)).unwrap();
        let report = crawler.scrape_events().await;
        assert!(report.events.is_empty());
        assert_eq!(report.pages_requested, 0);
        assert!(http.requested().is_empty());
    }
}

#[tokio::test]
async fn test_single_page_collects_events_in_order() {
    let http = Arc::new(
        FakeHttp::default()
            .with(&format!("{BASE}/events/p1"), &index_page(&["music/a", "sports/b"]))
            .with(&detail_url("music/a"), &detail_page("A", "4 May 2025 - 7 May 2025"))
            .with(&detail_url("sports/b"), &detail_page("B", "25 - 26 December 2023")),
    );
    let crawler = ILoveQatarCrawler::new(http, &config(1)).unwrap();
    let report = crawler.scrape_events().await;

    assert_eq!(report.links_found, 2);
    let titles: Vec<&str> = report.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);

    let a = &report.events[0];
    assert_eq!(a.category, "music");
    assert_eq!(a.start_date, "4 May 2025");
    assert_eq!(a.end_date, "7 May 2025");
    assert_eq!(a.start_time, "08:30 am");
    assert_eq!(a.end_time, "04:00 pm");
    assert_eq!(a.location, "Doha");
    assert_eq!(a.tickets, "no tickets");
    assert_eq!(a.price, "no prices");
    assert_eq!(a.description, "About A.");
    assert_eq!(a.source, "ILoveQatar");
    assert_eq!(a.link, detail_url("music/a"));

    let b = &report.events[1];
    assert_eq!(b.category, "sports");
    assert_eq!(b.start_date, "25 December 2023");
    assert_eq!(b.end_date, "26 December 2023");
}

#[tokio::test]
async fn test_failed_page_does_not_stop_run() {
    // page 2 is missing from the fake and fails to fetch
    let http = Arc::new(
        FakeHttp::default()
            .with(&format!("{BASE}/events/p1"), &index_page(&["music/one"]))
            .with(&format!("{BASE}/events/p3"), &index_page(&["music/three"]))
            .with(&detail_url("music/one"), &detail_page("One", "10 June 2025"))
            .with(&detail_url("music/three"), &detail_page("Three", "11 June 2025")),
    );
    let crawler = ILoveQatarCrawler::new(http.clone(), &config(3)).unwrap();
    let report = crawler.scrape_events().await;

    let titles: Vec<&str> = report.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Three"]);
    assert_eq!(report.pages_requested, 3);
    assert_eq!(report.pages_failed, 1);
    assert!(http.requested().contains(&format!("{BASE}/events/p2")));

    let one = &report.events[0];
    assert_eq!(one.start_date, "10 June 2025");
    assert_eq!(one.end_date, "10 June 2025");
}

#[tokio::test]
async fn test_missing_description_skips_only_that_event() {
    let broken = r#"<html><body><h1>Broken</h1>
        <div class="events-page-info__item _date">Date: 1 July 2025</div></body></html>"#;
    let http = Arc::new(
        FakeHttp::default()
            .with(
                &format!("{BASE}/events/p1"),
                &index_page(&["music/ok", "music/broken", "music/gone"]),
            )
            .with(&detail_url("music/ok"), &detail_page("Ok", "1 July 2025"))
            .with(&detail_url("music/broken"), broken),
    );
    let crawler = ILoveQatarCrawler::new(http, &config(1)).unwrap();
    let report = crawler.scrape_events().await;

    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].title, "Ok");
    assert_eq!(report.links_found, 3);
    assert_eq!(report.events_skipped, 2);
}

#[tokio::test]
async fn test_scrape_event_page_reports_skip_reason() {
    let http = Arc::new(FakeHttp::default());
    let crawler = ILoveQatarCrawler::new(http, &config(1)).unwrap();
    match crawler.scrape_event_page(&detail_url("music/nowhere")).await {
        DetailOutcome::Skipped { url, reason } => {
            assert_eq!(url, detail_url("music/nowhere"));
            assert!(reason.contains("404"));
        }
        DetailOutcome::Parsed(_) => panic!("expected a skip"),
    }
}

#[tokio::test]
async fn test_duplicate_links_are_not_filtered() {
    let http = Arc::new(
        FakeHttp::default()
            .with(&format!("{BASE}/events/p1"), &index_page(&["music/same"]))
            .with(&format!("{BASE}/events/p2"), &index_page(&["music/same"]))
            .with(&detail_url("music/same"), &detail_page("Same", "2 Aug 2025")),
    );
    let crawler = ILoveQatarCrawler::new(http, &config(2)).unwrap();
    let report = crawler.scrape_events().await;
    assert_eq!(report.events.len(), 2);
}

#[test]
fn test_relative_links_are_resolved() {
    let crawler = ILoveQatarCrawler::new(Arc::new(FakeHttp::default()), &config(1)).unwrap();
    let html = r#"<a class="article-block__title" href="/events/music/rel">x</a>"#;
    let links = crawler.extract_event_links(html, &format!("{BASE}/events/p1"));
    assert_eq!(links, vec![detail_url("music/rel")]);
    assert_eq!(crawler.page_url(7), format!("{BASE}/events/p7"));
}

#[test]
fn test_empty_and_fragment_hrefs_are_dropped() {
    let crawler = ILoveQatarCrawler::new(Arc::new(FakeHttp::default()), &config(1)).unwrap();
    let html = r##"
        <a class="article-block__title" href="">empty</a>
        <a class="article-block__title" href="  ">blank</a>
        <a class="article-block__title" href="#top">fragment</a>
        <a class="article-block__title" href="/events/music/kept">kept</a>"##;
    let links = crawler.extract_event_links(html, &format!("{BASE}/events/p1"));
    assert_eq!(links, vec![detail_url("music/kept")]);
}

#[test]
fn test_absolute_hrefs_pass_through_verbatim() {
    let crawler = ILoveQatarCrawler::new(Arc::new(FakeHttp::default()), &config(1)).unwrap();
    let href = "https://WWW.iloveqatar.net/events/music/a b";
    let html = format!(r#"<a class="article-block__title" href="{href}">s</a>"#);
    let links = crawler.extract_event_links(&html, &format!("{BASE}/events/p1"));
    assert_eq!(links, vec![href.to_string()]);
}

#[tokio::test]
async fn test_empty_href_does_not_refetch_index_page() {
    // the index page itself carries a description container
    let index = format!(
        r#"<html><body><div class="events-page-info"><p>listing</p></div>
        <a class="article-block__title" href="">e</a>{}</body></html>"#,
        r#"<a class="article-block__title" href="/events/music/a">a</a>"#
    );
    let http = Arc::new(
        FakeHttp::default()
            .with(&format!("{BASE}/events/p1"), &index)
            .with(&detail_url("music/a"), &detail_page("A", "4 May 2025")),
    );
    let crawler = ILoveQatarCrawler::new(http.clone(), &config(1)).unwrap();
    let report = crawler.scrape_events().await;

    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].link, detail_url("music/a"));
    let index_fetches = http
        .requested()
        .iter()
        .filter(|u| **u == format!("{BASE}/events/p1"))
        .count();
    assert_eq!(index_fetches, 1);
}

#[tokio::test]
async fn test_pipeline_persists_json() {
    let http = Arc::new(
        FakeHttp::default()
            .with(&format!("{BASE}/events/p1"), &index_page(&["music/a"]))
            .with(&detail_url("music/a"), &detail_page("A", "4 May 2025")),
    );
    let crawler = ILoveQatarCrawler::new(http, &config(1)).unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().to_str().unwrap();

    let result = Pipeline::run_for_source(&crawler, Some(out)).await.unwrap();
    let path = result.output_file.clone().expect("output file");
    assert!(path.contains("iloveqatar_"));

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0]["title"], "A");
    assert_eq!(written[0]["price"], "no prices");
    assert!(written[0]["raw_data"]["date"].is_string());
    assert!(written[0]["raw_data"]["location"].is_string());
}

#[tokio::test]
async fn test_pipeline_without_output_dir_writes_nothing() {
    let crawler = ILoveQatarCrawler::new(Arc::new(FakeHttp::default()), &config(1)).unwrap();
    let result = Pipeline::run_for_source(&crawler, None).await.unwrap();
    assert!(result.output_file.is_none());
    assert!(result.events().is_empty());
    assert_eq!(result.report.pages_failed, 1);
}
