use chrono::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum RenderMode {
    #[default]
    Static,
    Rendered,
}

impl From<bool> for RenderMode {
    fn from(use_rendered: bool) -> Self {
        if use_rendered {
            RenderMode::Rendered
        } else {
            RenderMode::Static
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    /// Only known for static fetches.
    pub status: Option<u16>,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub render_mode: RenderMode,
    pub timestamp: DateTime<Utc>,
    pub elapsed: Duration,
}
