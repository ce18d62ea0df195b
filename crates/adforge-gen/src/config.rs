//! Generation service configuration.

use std::time::Duration;

const DEFAULT_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_NUM_ADS: u32 = 3;

/// Where and how to reach the ad-copy generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Ads requested per ad group and ad kind.
    pub num_ads: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            base_url: std::env::var("ADFORGE_GEN_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            timeout_ms: std::env::var("ADFORGE_GEN_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            num_ads: DEFAULT_NUM_ADS,
        }
    }
}

impl GenerationConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific service
    pub fn new(base_url: &str) -> Self {
        GenerationConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            num_ads: DEFAULT_NUM_ADS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_num_ads(mut self, num_ads: u32) -> Self {
        self.num_ads = num_ads;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the generation endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/generate-ads", self.base_url.trim_end_matches('/'))
    }
}
