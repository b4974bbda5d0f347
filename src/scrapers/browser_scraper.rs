use async_trait::async_trait;
use chrono::Utc;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, info};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use super::Scraper;
use crate::core::config::{BrowserOptions, CourtesyDelay, ScrapeConfig};
use crate::http::{FetchedPage, RenderMode};
use crate::{ScraperError, ScraperResult, StatsTracker};

/// Renders the page in a headless Chrome so client-side listings exist
/// before the DOM is captured. One browser process per fetch.
#[derive(Clone)]
pub struct BrowserScraper {
    options: BrowserOptions,
    delay: CourtesyDelay,
    stats: Arc<StatsTracker>,
}

impl BrowserScraper {
    pub fn new(options: BrowserOptions) -> Self {
        Self {
            options,
            delay: CourtesyDelay::default(),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            delay: config.delay,
            ..Self::new(config.browser.clone())
        }
    }

    pub fn options(&self) -> &BrowserOptions {
        &self.options
    }
}

#[async_trait]
impl Scraper for BrowserScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<FetchedPage> {
        let options = self.options.clone();
        let target = url.clone();
        let timestamp = Utc::now();
        let start = Instant::now();

        let body = tokio::task::spawn_blocking(move || render_page(&options, &target)).await??;

        Ok(FetchedPage {
            url: url.clone(),
            status: None,
            headers: HashMap::new(),
            body,
            render_mode: RenderMode::Rendered,
            timestamp,
            elapsed: start.elapsed(),
        })
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Rendered
    }

    fn courtesy_delay(&self) -> CourtesyDelay {
        self.delay
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}

fn render_page(options: &BrowserOptions, url: &Url) -> ScraperResult<String> {
    let session = BrowserSession::launch(options)?;
    let result = session.capture(url, options.settle_duration);
    session.close();
    result
}

/// Owns the browser process for the span of one capture. Dropping the
/// session kills the process, so every exit path (errors and panics on the
/// blocking thread included) releases it.
struct BrowserSession {
    browser: Option<Browser>,
}

impl BrowserSession {
    fn launch(options: &BrowserOptions) -> ScraperResult<Self> {
        let launch_options = LaunchOptions::default_builder()
            .headless(options.headless)
            .sandbox(options.sandbox)
            .path(options.executable.clone())
            .idle_browser_timeout(options.effective_idle_timeout())
            .build()
            .map_err(browser_error)?;

        let browser = Browser::new(launch_options).map_err(browser_error)?;
        info!(
            "Launched headless browser (pid={:?})",
            browser.get_process_id()
        );

        Ok(Self {
            browser: Some(browser),
        })
    }

    fn capture(&self, url: &Url, settle: Duration) -> ScraperResult<String> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserError("browser already closed".to_string()))?;

        let tab = browser.new_tab().map_err(browser_error)?;
        tab.navigate_to(url.as_str())
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(browser_error)?;

        debug!("Waiting {:?} for {} to settle", settle, url);
        std::thread::sleep(settle);

        let html = tab.get_content().map_err(browser_error)?;
        if let Err(e) = tab.close(true) {
            debug!("Ignoring tab close failure: {}", e);
        }
        Ok(html)
    }

    fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(browser) = self.browser.take() {
            debug!(
                "Terminating headless browser (pid={:?})",
                browser.get_process_id()
            );
            drop(browser);
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn browser_error(err: impl Display) -> ScraperError {
    ScraperError::BrowserError(err.to_string())
}
