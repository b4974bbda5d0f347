use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)",
    "Mozilla/5.0 (X11; Linux x86_64)",
];

pub const DEFAULT_CONTAINER_CLASSES: [&str; 4] = ["job-bx", "job-listing", "job-card", "job-result"];

/// Randomized pause taken before every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourtesyDelay {
    pub min: Duration,
    pub max: Duration,
}

impl CourtesyDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

impl Default for CourtesyDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(2))
    }
}

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    pub sandbox: bool,
    pub executable: Option<PathBuf>,
    /// Fixed wait after navigation so client-side scripts can render.
    pub settle_duration: Duration,
    pub idle_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            executable: None,
            settle_duration: Duration::from_secs(4),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

impl BrowserOptions {
    /// Headroom kept past the settle wait before the connection counts as idle.
    pub const IDLE_MARGIN: Duration = Duration::from_secs(30);

    /// Idle timeout handed to the browser; never shorter than the settle
    /// wait plus [`Self::IDLE_MARGIN`].
    pub fn effective_idle_timeout(&self) -> Duration {
        self.idle_timeout
            .max(self.settle_duration.saturating_add(Self::IDLE_MARGIN))
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub request_timeout: Duration,
    pub delay: CourtesyDelay,
    pub user_agents: Vec<String>,
    pub container_classes: Vec<String>,
    pub browser: BrowserOptions,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            delay: CourtesyDelay::default(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            container_classes: DEFAULT_CONTAINER_CLASSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            browser: BrowserOptions::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: CourtesyDelay) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_user_agents<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_agents = agents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_container_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.container_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_settle_duration(mut self, settle: Duration) -> Self {
        self.browser.settle_duration = settle;
        self
    }

    pub fn with_browser(mut self, browser: BrowserOptions) -> Self {
        self.browser = browser;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agents.len(), 3);
        assert_eq!(config.container_classes[0], "job-bx");
        assert_eq!(config.browser.settle_duration, Duration::from_secs(4));
        assert!(config.browser.headless);
    }

    #[test]
    fn test_delay_sample_within_bounds() {
        let delay = CourtesyDelay::new(Duration::from_millis(20), Duration::from_millis(40));
        for _ in 0..50 {
            let d = delay.sample();
            assert!(d >= Duration::from_millis(20) && d <= Duration::from_millis(40));
        }
        assert_eq!(CourtesyDelay::none().sample(), Duration::ZERO);
    }

    #[test]
    fn test_idle_timeout_outlasts_settle() {
        let options = BrowserOptions::default();
        assert_eq!(options.effective_idle_timeout(), Duration::from_secs(60));

        let long_settle = BrowserOptions {
            settle_duration: Duration::from_secs(120),
            ..BrowserOptions::default()
        };
        assert_eq!(long_settle.effective_idle_timeout(), Duration::from_secs(150));
        assert!(long_settle.effective_idle_timeout() > long_settle.settle_duration);
    }

    #[test]
    fn test_delay_bounds_are_ordered() {
        let delay = CourtesyDelay::new(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(delay.min, Duration::from_secs(1));
        assert_eq!(delay.max, Duration::from_secs(3));
    }
}
