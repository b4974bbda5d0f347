pub mod browser_scraper;
pub mod fetcher;
pub mod http_scraper;
pub mod mock_scraper;

mod scraper;
pub use browser_scraper::BrowserScraper;
pub use fetcher::Fetcher;
pub use http_scraper::HttpScraper;
pub use mock_scraper::{MockResponse, MockScraper};
pub use scraper::Scraper;
