pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use crate::core::{ErrorKind, JobScraper, ScrapeConfig, ScraperError, ScraperResult};
pub use http::{FetchedPage, RenderMode};
pub use parser::{JobParser, JobRecord, Parser};
pub use scrapers::{Fetcher, Scraper};
pub use stats::StatsTracker;
