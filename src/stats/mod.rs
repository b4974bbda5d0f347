use crate::http::RenderMode;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_fetches: usize,
    pub successful_fetches: usize,
    pub failed_fetches: usize,
    pub static_fetches: usize,
    pub rendered_fetches: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
    pub jobs_extracted: usize,
    pub pages_without_match: usize,
    pub average_fetch_time: f64, // in milliseconds
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                total_fetches: 0,
                successful_fetches: 0,
                failed_fetches: 0,
                static_fetches: 0,
                rendered_fetches: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
                jobs_extracted: 0,
                pages_without_match: 0,
                average_fetch_time: 0.0,
            })),
        }
    }

    pub fn record_fetch(
        &self,
        mode: RenderMode,
        status: Option<u16>,
        size: usize,
        duration: Duration,
    ) {
        let mut stats = self.stats.write();
        Self::count_attempt(&mut stats, mode);
        stats.successful_fetches += 1;
        stats.bytes_downloaded += size;
        if let Some(status) = status {
            *stats.status_codes.entry(status).or_insert(0) += 1;
        }

        let current_total = stats.average_fetch_time * (stats.successful_fetches - 1) as f64;
        let new_duration = duration.as_secs_f64() * 1000.0;
        stats.average_fetch_time = (current_total + new_duration) / stats.successful_fetches as f64;
    }

    pub fn record_failure(&self, mode: RenderMode, status: Option<u16>) {
        let mut stats = self.stats.write();
        Self::count_attempt(&mut stats, mode);
        stats.failed_fetches += 1;
        if let Some(status) = status {
            *stats.status_codes.entry(status).or_insert(0) += 1;
        }
    }

    pub fn record_extraction(&self, jobs: usize) {
        self.stats.write().jobs_extracted += jobs;
    }

    pub fn record_no_match(&self) {
        self.stats.write().pages_without_match += 1;
    }

    fn count_attempt(stats: &mut ScrapingStats, mode: RenderMode) {
        stats.total_fetches += 1;
        match mode {
            RenderMode::Static => stats.static_fetches += 1,
            RenderMode::Rendered => stats.rendered_fetches += 1,
        }
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nScraping Statistics:");
        println!("===================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!(
            "Fetches: {} ({} static, {} rendered)",
            stats.total_fetches, stats.static_fetches, stats.rendered_fetches
        );
        println!("Successful Fetches: {}", stats.successful_fetches);
        println!("Failed Fetches: {}", stats.failed_fetches);
        println!("Jobs Extracted: {}", stats.jobs_extracted);
        println!("Pages Without Listings: {}", stats.pages_without_match);
        println!(
            "Data Downloaded: {:.2} MB",
            stats.bytes_downloaded as f64 / 1_000_000.0
        );
        println!("Average Fetch Time: {:.2}ms", stats.average_fetch_time);

        if !stats.status_codes.is_empty() {
            println!("\nStatus Codes:");
            for (code, count) in &stats.status_codes {
                println!("  {}: {}", code, count);
            }
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
