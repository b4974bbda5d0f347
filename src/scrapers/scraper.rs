use crate::core::config::CourtesyDelay;
use crate::http::{FetchedPage, RenderMode};
use crate::{ScraperResult, StatsTracker};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::sleep;
use url::Url;

#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<FetchedPage>;
    fn render_mode(&self) -> RenderMode;
    fn courtesy_delay(&self) -> CourtesyDelay;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    /// Waits out the courtesy delay, then fetches once. Failures are recorded
    /// and returned as-is; nothing is retried.
    async fn fetch(&self, url: &Url) -> ScraperResult<FetchedPage> {
        let delay = self.courtesy_delay().sample();
        if !delay.is_zero() {
            debug!("Sleeping {:?} before fetching {}", delay, url);
            sleep(delay).await;
        }

        info!("Fetching URL: {} (mode={:?})", url, self.render_mode());
        match self.fetch_single(url).await {
            Ok(page) => {
                debug!(
                    "Received page: status={:?}, body_length={}, elapsed={:?}",
                    page.status,
                    page.body.len(),
                    page.elapsed
                );
                self.stats()
                    .record_fetch(page.render_mode, page.status, page.body.len(), page.elapsed);
                Ok(page)
            }
            Err(err) => {
                warn!("Fetch failed for URL: {} ({})", url, err);
                self.stats().record_failure(self.render_mode(), err.status());
                Err(err)
            }
        }
    }
}
