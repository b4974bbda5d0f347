use crate::core::config::ScrapeConfig;
use crate::http::RenderMode;
use crate::parser::{JobParser, JobRecord, Parser};
use crate::scrapers::Fetcher;
use crate::stats::StatsTracker;
use crate::{ScraperError, ScraperResult};
use log::{debug, info, warn};
use std::sync::Arc;
use url::Url;

/// One fetch followed by one extraction. Each call stands alone: results go
/// back to the caller and nothing but the stats outlives it.
pub struct JobScraper {
    fetcher: Fetcher,
    parser: Box<dyn Parser>,
    stats: Arc<StatsTracker>,
}

impl JobScraper {
    pub fn new(config: &ScrapeConfig) -> ScraperResult<Self> {
        let fetcher = Fetcher::from_config(config)?;
        let parser = JobParser::new()?.with_container_classes(&config.container_classes)?;
        Ok(Self::with_parts(fetcher, Box::new(parser)))
    }

    pub fn with_parts(mut fetcher: Fetcher, parser: Box<dyn Parser>) -> Self {
        info!("Initializing job scraper");
        let stats = Arc::new(StatsTracker::new());
        fetcher.set_stats(Arc::clone(&stats));

        Self {
            fetcher,
            parser,
            stats,
        }
    }

    pub async fn scrape(&self, url: &str, mode: RenderMode) -> ScraperResult<Vec<JobRecord>> {
        let url = parse_target(url)?;
        let page = self.fetcher.fetch(&url, mode).await?;
        debug!("Fetched {} bytes from {}", page.body.len(), page.url);

        match self.parser.parse(&page.body) {
            Ok(jobs) => {
                info!("Extracted {} jobs from {}", jobs.len(), url);
                self.stats.record_extraction(jobs.len());
                Ok(jobs)
            }
            Err(err) => {
                if matches!(err, ScraperError::NoMatch) {
                    warn!("No job containers found on {} (mode={:?})", url, mode);
                    self.stats.record_no_match();
                }
                Err(err)
            }
        }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}

pub fn parse_target(input: &str) -> ScraperResult<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScraperError::EmptyUrl);
    }
    Ok(Url::parse(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::scrapers::{MockResponse, MockScraper};

    const LISTING: &str = r#"
        <html><body>
          <div class="job-listing"><h3>Acme</h3><span class="skills">Rust</span><a href="/a">a</a></div>
          <div class="job-listing"><h3>Globex</h3></div>
        </body></html>
    "#;

    fn scraper_with(
        static_pages: Vec<MockResponse>,
        rendered_pages: Vec<MockResponse>,
    ) -> (JobScraper, MockScraper, MockScraper) {
        let static_mock = MockScraper::new(RenderMode::Static, static_pages);
        let rendered_mock = MockScraper::new(RenderMode::Rendered, rendered_pages);
        let fetcher = Fetcher::new(
            Box::new(static_mock.clone()),
            Box::new(rendered_mock.clone()),
        );
        let scraper = JobScraper::with_parts(fetcher, Box::new(JobParser::new().unwrap()));
        (scraper, static_mock, rendered_mock)
    }

    #[tokio::test]
    async fn test_scrape_static_page() {
        let (scraper, static_mock, rendered_mock) =
            scraper_with(vec![MockResponse::page(LISTING)], vec![MockResponse::page("")]);

        let jobs = scraper
            .scrape("https://jobs.example.com/", RenderMode::Static)
            .await
            .unwrap();

        assert_eq!(
            jobs,
            vec![
                JobRecord::new("Acme", "Rust", "/a"),
                JobRecord::new("Globex", "N/A", "No Link"),
            ]
        );
        assert_eq!(static_mock.calls(), 1);
        assert_eq!(rendered_mock.calls(), 0);

        let stats = scraper.stats().get_stats();
        assert_eq!(stats.static_fetches, 1);
        assert_eq!(stats.jobs_extracted, 2);
    }

    #[tokio::test]
    async fn test_rendered_mode_uses_browser_backend() {
        let (scraper, static_mock, rendered_mock) = scraper_with(
            vec![MockResponse::page("<div id=\"app\"></div>")],
            vec![MockResponse::page(LISTING)],
        );

        let jobs = scraper
            .scrape("https://jobs.example.com/", RenderMode::from(true))
            .await
            .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(static_mock.calls(), 0);
        assert_eq!(rendered_mock.calls(), 1);
        assert_eq!(scraper.stats().get_stats().rendered_fetches, 1);
    }

    #[tokio::test]
    async fn test_no_match_is_reported() {
        let (scraper, _, _) =
            scraper_with(vec![MockResponse::page("<div id=\"app\"></div>")], vec![]);

        let err = scraper
            .scrape("https://jobs.example.com/", RenderMode::Static)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoMatch);
        assert_eq!(scraper.stats().get_stats().pages_without_match, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_produces_no_records() {
        let (scraper, _, _) = scraper_with(vec![], vec![MockResponse::failing("tab crashed")]);

        let err = scraper
            .scrape("https://jobs.example.com/", RenderMode::Rendered)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.to_string(), "Unexpected Error: tab crashed");
        let stats = scraper.stats().get_stats();
        assert_eq!(stats.failed_fetches, 1);
        assert_eq!(stats.jobs_extracted, 0);
    }

    #[tokio::test]
    async fn test_invalid_input_skips_fetch() {
        let (scraper, static_mock, _) = scraper_with(vec![MockResponse::page(LISTING)], vec![]);

        let err = scraper.scrape("   ", RenderMode::Static).await.unwrap_err();
        assert!(matches!(err, ScraperError::EmptyUrl));

        let err = scraper
            .scrape("jobs.example.com", RenderMode::Static)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(static_mock.calls(), 0);
    }

    #[test]
    fn test_parse_target_trims() {
        let url = parse_target("  https://jobs.example.com/list \n").unwrap();
        assert_eq!(url.as_str(), "https://jobs.example.com/list");
    }
}
