//! HTTP client for the ad-copy generation service.

use adforge_core::templates::{detect_business_type, BusinessType};
use adforge_core::{Ad, AdKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::{GenError, Result};
use crate::producer::{AdCopyProducer, AdCopyRequest};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    keywords: &'a [String],
    business_type: Option<BusinessType>,
    business_name: &'a str,
    location: &'a str,
    industry: &'a str,
    base_url: &'a str,
    ad_type: &'static str,
    num_ads: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    success: bool,
    #[serde(default)]
    ads: Vec<ServiceAd>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceAd {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    headline1: Option<String>,
    #[serde(default)]
    headline2: Option<String>,
    #[serde(default)]
    headline3: Option<String>,
    #[serde(default)]
    headline4: Option<String>,
    #[serde(default)]
    headline5: Option<String>,
    #[serde(default)]
    description1: Option<String>,
    #[serde(default)]
    description2: Option<String>,
    #[serde(default)]
    path1: Option<String>,
    #[serde(default)]
    path2: Option<String>,
    #[serde(default)]
    final_url: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    business_name: Option<String>,
}

fn wire_ad_type(kind: AdKind) -> &'static str {
    match kind {
        AdKind::Rsa => "RSA",
        AdKind::Dki => "DKI",
        AdKind::CallOnly => "CALL_ONLY",
    }
}

fn present(values: &[&Option<String>]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect()
}

impl ServiceAd {
    /// Convert to an [`Ad`]; ads arriving without an id get a fresh UUID.
    fn into_ad(self, request: &AdCopyRequest) -> Ad {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let headlines = present(&[
            &self.headline1,
            &self.headline2,
            &self.headline3,
            &self.headline4,
            &self.headline5,
        ]);
        let descriptions = present(&[&self.description1, &self.description2]);
        let final_url = self
            .final_url
            .or_else(|| request.base_url.clone())
            .unwrap_or_default();

        let mut ad = Ad::new(id, request.kind)
            .with_headlines(headlines)
            .with_descriptions(descriptions)
            .with_final_url(final_url);
        ad.path1 = self.path1;
        ad.path2 = self.path2;
        ad.phone = self.phone_number.or_else(|| request.phone.clone());
        ad.business_name = self.business_name.or_else(|| request.business_name.clone());
        if let Some(group) = &request.ad_group {
            ad.ad_group_ref = Some(group.clone());
        }
        ad
    }
}

/// Calls `POST {base}/generate-ads`.
pub struct HttpAdCopyClient {
    config: GenerationConfig,
    http_client: reqwest::Client,
}

impl HttpAdCopyClient {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("adforge-gen/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpAdCopyClient {
            config,
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GenerationConfig::from_env())
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

#[async_trait]
impl AdCopyProducer for HttpAdCopyClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, request: &AdCopyRequest) -> Result<Vec<Ad>> {
        let body = GenerateRequest {
            keywords: &request.keywords,
            business_type: detect_business_type(&request.keywords, &request.industry),
            business_name: request.business_name.as_deref().unwrap_or(""),
            location: request.location.as_deref().unwrap_or(""),
            industry: &request.industry,
            base_url: request.base_url.as_deref().unwrap_or(""),
            ad_type: wire_ad_type(request.kind),
            num_ads: request.num_ads,
        };
        let url = self.config.endpoint();
        debug!(url = %url, kind = request.kind.label(), "requesting ad copy");

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenError::Status {
                status: status.as_u16(),
            });
        }
        let parsed: GenerateResponse = response.json().await?;
        if !parsed.success || parsed.ads.is_empty() {
            return Err(GenError::Empty {
                message: parsed.message,
            });
        }
        Ok(parsed
            .ads
            .into_iter()
            .map(|ad| ad.into_ad(request))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_ad_conversion() {
        let wire: ServiceAd = serde_json::from_value(serde_json::json!({
            "headline1": "Fast Plumber",
            "headline2": "",
            "headline3": "Call Now",
            "description1": "We fix leaks.",
            "finalUrl": "https://plumb.example",
            "path1": "services"
        }))
        .unwrap();
        let request = AdCopyRequest::new(vec!["plumber".to_string()], AdKind::Rsa)
            .with_ad_group("Ad Group 1");
        let ad = wire.into_ad(&request);

        assert_eq!(ad.headlines, vec!["Fast Plumber", "Call Now"]);
        assert_eq!(ad.descriptions, vec!["We fix leaks."]);
        assert_eq!(ad.final_url, "https://plumb.example");
        assert_eq!(ad.path1.as_deref(), Some("services"));
        assert_eq!(ad.ad_group_ref.as_deref(), Some("Ad Group 1"));
        assert!(uuid::Uuid::parse_str(&ad.id).is_ok());
    }

    #[test]
    fn existing_ids_are_kept() {
        let wire = ServiceAd {
            id: Some("svc-1".to_string()),
            ..ServiceAd::default()
        };
        let request =
            AdCopyRequest::new(Vec::new(), AdKind::CallOnly).with_base_url("https://b.example");
        let ad = wire.into_ad(&request);
        assert_eq!(ad.id, "svc-1");
        assert_eq!(ad.final_url, "https://b.example");
        assert_eq!(ad.kind, AdKind::CallOnly);
    }

    #[test]
    fn wire_ad_types() {
        assert_eq!(wire_ad_type(AdKind::Rsa), "RSA");
        assert_eq!(wire_ad_type(AdKind::Dki), "DKI");
        assert_eq!(wire_ad_type(AdKind::CallOnly), "CALL_ONLY");
    }
}
