//! Export configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::templates::EXAMPLE_BASE_URL;

/// Settings for CSV serialization and the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Final URL for synthesized default ads when the campaign has no landing page.
    pub default_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    /// Append UTM tracking parameters to ad final URLs.
    pub add_utm: bool,
    /// Date stamped into the export file name.
    pub date: Option<NaiveDate>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            default_url: std::env::var("ADFORGE_DEFAULT_URL")
                .unwrap_or_else(|_| EXAMPLE_BASE_URL.to_string()),
            utm_source: std::env::var("ADFORGE_UTM_SOURCE")
                .unwrap_or_else(|_| "google".to_string()),
            utm_medium: std::env::var("ADFORGE_UTM_MEDIUM").unwrap_or_else(|_| "cpc".to_string()),
            add_utm: true,
            date: None,
        }
    }
}

impl ExportOptions {
    /// Create options from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Built-in defaults, ignoring the environment.
    pub fn new() -> Self {
        ExportOptions {
            default_url: EXAMPLE_BASE_URL.to_string(),
            utm_source: "google".to_string(),
            utm_medium: "cpc".to_string(),
            add_utm: true,
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_default_url(mut self, url: &str) -> Self {
        self.default_url = url.to_string();
        self
    }

    /// Disable UTM rewriting of final URLs
    pub fn without_utm(mut self) -> Self {
        self.add_utm = false;
        self
    }
}
