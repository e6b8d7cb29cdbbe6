pub mod crawler;
pub mod normalizer;
pub mod parser;

pub use crawler::ILoveQatarCrawler;
pub use normalizer::{parse_date_time, DateTimeRange, ILoveQatarNormalizer};
pub use parser::ILoveQatarParser;
