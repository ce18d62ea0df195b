//! Local template producer and the timeout/fallback wrapper.

use std::time::Duration;

use adforge_core::templates::{slugify, template_ad};
use adforge_core::Ad;
use async_trait::async_trait;
use tracing::info;

use crate::error::{GenError, Result};
use crate::producer::{AdCopyProducer, AdCopyRequest};

/// Deterministic offline producer built on the core templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTemplateProducer;

impl LocalTemplateProducer {
    /// Same request, same ad.
    pub fn produce(&self, request: &AdCopyRequest) -> Vec<Ad> {
        let subject = request
            .ad_group
            .as_deref()
            .or_else(|| request.keywords.first().map(String::as_str))
            .unwrap_or("campaign");
        let id = format!("local-{}-{}", slugify(request.kind.label()), slugify(subject));
        let mut ad = template_ad(id, request.kind, &request.template_input());
        if let Some(group) = &request.ad_group {
            ad.ad_group_ref = Some(group.clone());
        }
        vec![ad]
    }
}

#[async_trait]
impl AdCopyProducer for LocalTemplateProducer {
    fn name(&self) -> &str {
        "local"
    }

    async fn generate(&self, request: &AdCopyRequest) -> Result<Vec<Ad>> {
        Ok(self.produce(request))
    }
}

/// Runs a primary producer under a timeout and substitutes the local
/// templates when it times out, fails, or returns nothing.
pub struct FallbackProducer<P> {
    primary: P,
    local: LocalTemplateProducer,
    timeout: Duration,
}

impl<P: AdCopyProducer> FallbackProducer<P> {
    pub fn new(primary: P, timeout: Duration) -> Self {
        Self {
            primary,
            local: LocalTemplateProducer,
            timeout,
        }
    }

    async fn try_primary(&self, request: &AdCopyRequest) -> Result<Vec<Ad>> {
        match tokio::time::timeout(self.timeout, self.primary.generate(request)).await {
            Ok(Ok(ads)) if ads.is_empty() => Err(GenError::Empty { message: None }),
            Ok(result) => result,
            Err(_) => Err(GenError::Timeout {
                ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

#[async_trait]
impl<P: AdCopyProducer> AdCopyProducer for FallbackProducer<P> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    async fn generate(&self, request: &AdCopyRequest) -> Result<Vec<Ad>> {
        match self.try_primary(request).await {
            Ok(ads) => Ok(ads),
            Err(err) => {
                info!(
                    event = "generation.fallback",
                    producer = self.primary.name(),
                    kind = request.kind.label(),
                    error = %err,
                );
                Ok(self.local.produce(request))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adforge_core::AdKind;

    #[test]
    fn local_ids_are_stable() {
        let request = AdCopyRequest::new(vec!["plumber".to_string()], AdKind::CallOnly)
            .with_ad_group("Ad Group 1");
        let first = LocalTemplateProducer.produce(&request);
        let second = LocalTemplateProducer.produce(&request);
        assert_eq!(first, second);
        assert_eq!(first[0].id, "local-call-only-ad-group-1");
        assert_eq!(first[0].ad_group_ref.as_deref(), Some("Ad Group 1"));
    }
}
