use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use super::normalizer::parse_date_time;
use crate::constants::*;
use crate::error::{Result, ScraperError};
use crate::types::{RawEventData, RawSnapshot};

pub(crate) fn compile_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector(format!("{}: {:?}", css, e)))
}

/// Text of every descendant text node, each trimmed, joined with nothing.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Drop a leading label such as "Date:" and surrounding whitespace.
pub fn clean_text(text: &str, prefix: Option<&str>) -> String {
    let text = text.trim();
    match prefix.and_then(|p| text.strip_prefix(p)) {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}

/// The path segment right after `events`, lowercased. Listing pages
/// (`/events/p<N>`) and URLs without that segment fall back to "general".
pub fn category_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return DEFAULT_CATEGORY.to_string();
    };
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.iter().position(|seg| *seg == EVENTS_PATH_SEGMENT) {
        Some(idx) if segments.len() > idx + 1 && !is_index_page(segments[idx + 1]) => {
            segments[idx + 1].to_lowercase()
        }
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

fn is_index_page(segment: &str) -> bool {
    segment
        .strip_prefix('p')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Reads fixed-position fields off an event detail page.
pub struct ILoveQatarParser {
    title: Selector,
    date_item: Selector,
    time_item: Selector,
    location_item: Selector,
    tickets_item: Selector,
    description: Selector,
    paragraph: Selector,
}

impl ILoveQatarParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: compile_selector(TITLE_SELECTOR)?,
            date_item: compile_selector(DATE_ITEM_SELECTOR)?,
            time_item: compile_selector(TIME_ITEM_SELECTOR)?,
            location_item: compile_selector(LOCATION_ITEM_SELECTOR)?,
            tickets_item: compile_selector(TICKETS_ITEM_SELECTOR)?,
            description: compile_selector(DESCRIPTION_SELECTOR)?,
            paragraph: compile_selector(PARAGRAPH_SELECTOR)?,
        })
    }

    /// Pull every field out of a detail page. Missing info blocks become
    /// sentinel strings; a missing description container is an error and
    /// the caller drops the event.
    pub fn parse_detail(&self, html: &str, url: &str) -> Result<RawEventData> {
        let document = Html::parse_document(html);

        let category = category_from_url(url);

        let title = document
            .select(&self.title)
            .next()
            .map(stripped_text)
            .unwrap_or_else(|| NO_TITLE.to_string());

        let date_item = document.select(&self.date_item).next();
        let date = labelled_or(date_item, DATE_LABEL, NO_DATE);

        let time_item = document.select(&self.time_item).next();
        let time = labelled_or(time_item, TIME_LABEL, NO_TIME);

        let range = parse_date_time(&date, &time);

        let location_item = document.select(&self.location_item).next();
        let location = labelled_or(location_item, LOCATION_LABEL, NO_LOCATION);

        // first block is the ticket description, second (if any) the price
        let mut tickets_items = document.select(&self.tickets_item);
        let tickets = labelled_or(tickets_items.next(), TICKETS_LABEL, NO_TICKETS);
        let prices = labelled_or(tickets_items.next(), PRICES_LABEL, NO_PRICES);

        let description_div = document.select(&self.description).next().ok_or_else(|| {
            ScraperError::MissingElement(format!("{} on {}", DESCRIPTION_SELECTOR, url))
        })?;
        let description = description_div
            .select(&self.paragraph)
            .map(stripped_text)
            .collect::<Vec<_>>()
            .join(DESCRIPTION_PARAGRAPH_SEPARATOR);

        Ok(RawEventData {
            title,
            start_date: range.start_date,
            end_date: range.end_date,
            start_time: range.start_time,
            end_time: range.end_time,
            time,
            location,
            tickets,
            prices,
            description,
            category,
            link: url.to_string(),
            raw_data: RawSnapshot {
                date: date_item.map(|e| e.html()),
                time: time_item.map(|e| e.html()),
                location: location_item.map(|e| e.html()),
            },
        })
    }
}

fn labelled_or(element: Option<ElementRef<'_>>, label: &str, sentinel: &str) -> String {
    element
        .map(|e| clean_text(&stripped_text(e), Some(label)))
        .unwrap_or_else(|| sentinel.to_string())
}
