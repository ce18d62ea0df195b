//! The ad-copy producer seam.

use adforge_core::templates::TemplateInput;
use adforge_core::{Ad, AdKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One generation call: ads of `kind` for a single ad group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopyRequest {
    pub keywords: Vec<String>,
    pub kind: AdKind,
    #[serde(default)]
    pub ad_group: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub num_ads: u32,
}

impl AdCopyRequest {
    pub fn new(keywords: Vec<String>, kind: AdKind) -> Self {
        Self {
            keywords,
            kind,
            ad_group: None,
            business_name: None,
            location: None,
            industry: String::new(),
            base_url: None,
            phone: None,
            num_ads: 1,
        }
    }

    pub fn with_ad_group(mut self, name: impl Into<String>) -> Self {
        self.ad_group = Some(name.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn template_input(&self) -> TemplateInput {
        TemplateInput {
            keywords: self.keywords.clone(),
            industry: self.industry.clone(),
            business_name: self.business_name.clone(),
            location: self.location.clone(),
            base_url: self.base_url.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Source of ad copy.
///
/// Implementations return finished [`Ad`] values; callers never see whether
/// they came from a remote service or the local templates.
#[async_trait]
pub trait AdCopyProducer: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Produce ads for one request.
    async fn generate(&self, request: &AdCopyRequest) -> Result<Vec<Ad>>;
}
