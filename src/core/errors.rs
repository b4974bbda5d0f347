use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Request Error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Please enter a valid job website URL.")]
    EmptyUrl,

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No jobs found. Try enabling JavaScript Mode.")]
    NoMatch,

    #[error("Unexpected Error: browser failure: {0}")]
    BrowserError(String),

    #[error("No jobs to save.")]
    NothingToSave,

    #[error("Unexpected Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected Error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unexpected Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

/// Coarse classification surfaced to callers; none of these are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    NoMatch,
    InvalidInput,
    Unexpected,
}

impl ScraperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScraperError::HttpError(_) => ErrorKind::Network,
            ScraperError::NoMatch => ErrorKind::NoMatch,
            ScraperError::UrlError(_)
            | ScraperError::EmptyUrl
            | ScraperError::InvalidSelector { .. }
            | ScraperError::NothingToSave => ErrorKind::InvalidInput,
            ScraperError::BrowserError(_)
            | ScraperError::IoError(_)
            | ScraperError::CsvError(_)
            | ScraperError::JsonError(_)
            | ScraperError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScraperError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for ScraperError {
    fn from(err: tokio::task::JoinError) -> Self {
        ScraperError::Unexpected(format!("background task failed: {}", err))
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
