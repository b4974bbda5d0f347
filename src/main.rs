use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use jobscraper::core::{BrowserOptions, CourtesyDelay};
use jobscraper::storage;
use jobscraper::{JobRecord, JobScraper, RenderMode, ScrapeConfig};

/// Scrape a job-listing page and list company, skills and link for each job.
#[derive(Parser, Debug)]
#[command(name = "jobscraper", version, about)]
struct Cli {
    /// Job listing page to scrape
    url: String,

    /// Render the page in headless Chrome before extracting (JavaScript mode)
    #[arg(long)]
    render: bool,

    /// Save the results; `.json` writes JSON, anything else CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seconds to let the page settle after navigation in render mode
    #[arg(long, default_value_t = 4)]
    settle_secs: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Skip the randomized pause before fetching
    #[arg(long)]
    no_delay: bool,

    /// Path to the Chrome/Chromium executable
    #[arg(long)]
    chrome: Option<PathBuf>,

    /// Comma-separated container classes, highest priority first
    #[arg(long, value_delimiter = ',')]
    classes: Vec<String>,

    /// Print fetch statistics when done
    #[arg(long)]
    stats: bool,
}

impl Cli {
    fn config(&self) -> ScrapeConfig {
        let mut config = ScrapeConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_browser(BrowserOptions {
                executable: self.chrome.clone(),
                settle_duration: Duration::from_secs(self.settle_secs),
                ..BrowserOptions::default()
            });
        if self.no_delay {
            config = config.with_delay(CourtesyDelay::none());
        }
        if !self.classes.is_empty() {
            config = config.with_container_classes(self.classes.iter().cloned());
        }
        config
    }
}

fn display_results(jobs: &[JobRecord]) {
    for (idx, job) in jobs.iter().enumerate() {
        println!("#{} {}", idx + 1, job.company);
        println!("   Skills: {}", job.skills);
        println!("   Link: {}", job.link);
        println!("{}", "-".repeat(60));
    }
}

fn export_results(jobs: &[JobRecord], path: &Path) -> anyhow::Result<()> {
    storage::save(jobs, path).context("failed to save results")?;
    println!("Data saved to {}", path.display());
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let scraper = JobScraper::new(&cli.config()).context("failed to set up scraper")?;

    let outcome = scraper
        .scrape(&cli.url, RenderMode::from(cli.render))
        .await;

    let succeeded = match outcome {
        Ok(jobs) => {
            display_results(&jobs);
            match &cli.output {
                Some(path) => match export_results(&jobs, path) {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        false
                    }
                },
                None => true,
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    };

    if cli.stats {
        scraper.stats().finish();
        scraper.stats().print_summary();
    }
    Ok(succeeded)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_maps_onto_config() {
        let cli = Cli::parse_from([
            "jobscraper",
            "https://jobs.example.com",
            "--render",
            "--settle-secs",
            "7",
            "--no-delay",
            "--classes",
            "vacancy,posting",
        ]);
        assert!(cli.render);
        let config = cli.config();
        assert_eq!(config.browser.settle_duration, Duration::from_secs(7));
        assert_eq!(config.delay, CourtesyDelay::none());
        assert_eq!(config.container_classes, vec!["vacancy", "posting"]);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["jobscraper", "https://jobs.example.com"]);
        let config = cli.config();
        assert!(!cli.render);
        assert_eq!(config.delay, CourtesyDelay::default());
        assert_eq!(config.container_classes[0], "job-bx");
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();
        let jobs = vec![JobRecord::new("Acme", "Rust", "https://acme.example/1")];

        let err = export_results(&jobs, &blocker.join("jobs.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to save results"));

        let out = dir.path().join("jobs.csv");
        export_results(&jobs, &out).unwrap();
        assert!(out.exists());
    }
}
