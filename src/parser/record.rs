use serde::{Deserialize, Serialize};

/// Placeholder for a company or skills field the listing did not carry.
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_LINK: &str = "No Link";

/// Column order of every export.
pub const CSV_HEADERS: [&str; 3] = ["Company Name", "Required Skills", "More Info"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Company Name")]
    pub company: String,
    #[serde(rename = "Required Skills")]
    pub skills: String,
    #[serde(rename = "More Info")]
    pub link: String,
}

impl JobRecord {
    pub fn new(
        company: impl Into<String>,
        skills: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            skills: skills.into(),
            link: link.into(),
        }
    }

    pub(crate) fn from_parts(
        company: Option<String>,
        skills: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            company: company.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            skills: skills.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            link: link.unwrap_or_else(|| NO_LINK.to_string()),
        }
    }

    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }
}
