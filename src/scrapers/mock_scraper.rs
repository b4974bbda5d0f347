use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::Scraper;
use crate::core::config::CourtesyDelay;
use crate::http::{FetchedPage, RenderMode};
use crate::{ScraperError, ScraperResult, StatsTracker};

#[derive(Clone, Debug)]
pub struct MockResponse {
    pub body: String,
    pub failure: Option<String>,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn page(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            failure: None,
            delay: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            body: String::new(),
            failure: Some(message.into()),
            delay: None,
        }
    }
}

/// Replays canned responses in order, cycling when exhausted.
#[derive(Clone)]
pub struct MockScraper {
    mode: RenderMode,
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new(mode: RenderMode, responses: Vec<MockResponse>) -> Self {
        Self {
            mode,
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.current_response.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<FetchedPage> {
        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .get(index % self.responses.len().max(1))
            .cloned()
            .ok_or_else(|| ScraperError::Unexpected("no mock responses configured".into()))?;

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }
        if let Some(message) = response.failure {
            return Err(ScraperError::Unexpected(message));
        }

        Ok(FetchedPage {
            url: url.clone(),
            status: (self.mode == RenderMode::Static).then_some(200),
            headers: HashMap::new(),
            body: response.body,
            render_mode: self.mode,
            timestamp: Utc::now(),
            elapsed: response.delay.unwrap_or_default(),
        })
    }

    fn render_mode(&self) -> RenderMode {
        self.mode
    }

    fn courtesy_delay(&self) -> CourtesyDelay {
        CourtesyDelay::none()
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
