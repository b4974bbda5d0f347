use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rand::seq::IndexedRandom;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

use super::Scraper;
use crate::core::config::{CourtesyDelay, ScrapeConfig, DEFAULT_USER_AGENTS};
use crate::http::{FetchedPage, RenderMode};
use crate::{ScraperResult, StatsTracker};

/// Plain GET with a rotating user-agent. Anything outside 2xx is an error.
#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    user_agents: Vec<String>,
    delay: CourtesyDelay,
    stats: Arc<StatsTracker>,
}

impl HttpScraper {
    pub fn new() -> ScraperResult<Self> {
        Self::from_config(&ScrapeConfig::default())
    }

    pub fn from_config(config: &ScrapeConfig) -> ScraperResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
            delay: config.delay,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<FetchedPage> {
        let user_agent = self.pick_user_agent();
        debug!("Using user-agent: {}", user_agent);

        let timestamp = Utc::now();
        let start = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, user_agent)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(FetchedPage {
            url: final_url,
            status: Some(status),
            headers,
            body,
            render_mode: RenderMode::Static,
            timestamp,
            elapsed: start.elapsed(),
        })
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Static
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
