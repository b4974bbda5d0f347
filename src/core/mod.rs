pub mod config;
mod errors;
mod job_scraper;

pub use config::{BrowserOptions, CourtesyDelay, ScrapeConfig};
pub use errors::{ErrorKind, ScraperError, ScraperResult};
pub use job_scraper::{parse_target, JobScraper};
