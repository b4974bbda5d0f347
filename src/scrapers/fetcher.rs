use log::debug;
use std::sync::Arc;
use url::Url;

use super::{BrowserScraper, HttpScraper, Scraper};
use crate::core::config::ScrapeConfig;
use crate::http::{FetchedPage, RenderMode};
use crate::{ScraperResult, StatsTracker};

/// Dispatches a fetch to the static or the rendering backend.
pub struct Fetcher {
    static_scraper: Box<dyn Scraper>,
    rendered_scraper: Box<dyn Scraper>,
}

impl Fetcher {
    pub fn new(static_scraper: Box<dyn Scraper>, rendered_scraper: Box<dyn Scraper>) -> Self {
        Self {
            static_scraper,
            rendered_scraper,
        }
    }

    pub fn from_config(config: &ScrapeConfig) -> ScraperResult<Self> {
        Ok(Self::new(
            Box::new(HttpScraper::from_config(config)?),
            Box::new(BrowserScraper::from_config(config)),
        ))
    }

    pub fn scraper(&self, mode: RenderMode) -> &dyn Scraper {
        match mode {
            RenderMode::Static => self.static_scraper.as_ref(),
            RenderMode::Rendered => self.rendered_scraper.as_ref(),
        }
    }

    pub fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.static_scraper.set_stats(Arc::clone(&stats));
        self.rendered_scraper.set_stats(stats);
    }

    pub async fn fetch(&self, url: &Url, mode: RenderMode) -> ScraperResult<FetchedPage> {
        debug!("Dispatching {} to {:?} backend", url, mode);
        self.scraper(mode).fetch(url).await
    }
}
