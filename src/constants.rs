/// Source tag attached to every event this crate produces
pub const ILOVEQATAR_SOURCE_NAME: &str = "ILoveQatar";

/// Short name used for output files and metric labels
pub const ILOVEQATAR_API: &str = "iloveqatar";

/// Index page template; `{page_num}` is replaced with the 1-based page number
pub const ILOVEQATAR_BASE_URL: &str = "https://www.iloveqatar.net/events/p{page_num}";
pub const PAGE_NUM_PLACEHOLDER: &str = "{page_num}";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_DIR: &str = "logs";

// Selectors
pub const EVENT_LINK_SELECTOR: &str = "a.article-block__title";
pub const TITLE_SELECTOR: &str = "h1";
pub const DATE_ITEM_SELECTOR: &str = "div.events-page-info__item._date";
pub const TIME_ITEM_SELECTOR: &str = "div.events-page-info__item._time";
pub const LOCATION_ITEM_SELECTOR: &str = "div.events-page-info__item._location";
pub const TICKETS_ITEM_SELECTOR: &str = "div.events-page-info__item._tickets";
pub const DESCRIPTION_SELECTOR: &str = "div.events-page-info";
pub const PARAGRAPH_SELECTOR: &str = "p";

// Label prefixes carried inside info item blocks
pub const DATE_LABEL: &str = "Date:";
pub const TIME_LABEL: &str = "Time:";
pub const LOCATION_LABEL: &str = "Location:";
pub const TICKETS_LABEL: &str = "Tickets:";
pub const PRICES_LABEL: &str = "Prices:";

// Sentinels for structurally absent fields
pub const NO_TITLE: &str = "no title";
pub const NO_DATE: &str = "no date";
pub const NO_TIME: &str = "no time";
pub const NO_LOCATION: &str = "no location";
pub const NO_TICKETS: &str = "no tickets";
pub const NO_PRICES: &str = "no prices";

pub const DEFAULT_CATEGORY: &str = "general";
/// Path segment that precedes the category in detail URLs
pub const EVENTS_PATH_SEGMENT: &str = "events";

pub const DESCRIPTION_PARAGRAPH_SEPARATOR: &str = "\n\n";
