use super::JobRecord;
use crate::ScraperResult;

pub trait Parser: Send + Sync {
    fn parse(&self, html: &str) -> ScraperResult<Vec<JobRecord>>;
}
