//! Sequential generation across ad groups.

use adforge_core::locations::LocationCatalog;
use adforge_core::{build_from_draft, Ad, AdGroupSpec, AdKind, CampaignDraft};
use tracing::info;

use crate::error::Result;
use crate::producer::{AdCopyProducer, AdCopyRequest};

/// Request fields shared by every group.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub business_name: Option<String>,
    pub location: Option<String>,
    pub industry: String,
    pub base_url: Option<String>,
    pub phone: Option<String>,
    pub num_ads: u32,
}

impl GenerationContext {
    fn request(&self, group: &AdGroupSpec, kind: AdKind) -> AdCopyRequest {
        AdCopyRequest {
            keywords: group.keywords.iter().map(|k| k.text.clone()).collect(),
            kind,
            ad_group: Some(group.name.clone()),
            business_name: self.business_name.clone(),
            location: self.location.clone(),
            industry: self.industry.clone(),
            base_url: self.base_url.clone(),
            phone: self.phone.clone(),
            num_ads: self.num_ads.max(1),
        }
    }
}

/// Generate ads for each group and kind, one call at a time, in order.
///
/// Every returned ad has `ad_group_ref` set to its group.
pub async fn generate_for_groups(
    producer: &dyn AdCopyProducer,
    groups: &[AdGroupSpec],
    kinds: &[AdKind],
    context: &GenerationContext,
) -> Result<Vec<Ad>> {
    let mut out = Vec::new();
    for group in groups {
        for &kind in kinds {
            let request = context.request(group, kind);
            let ads = producer.generate(&request).await?;
            info!(
                event = "generation.completed",
                producer = producer.name(),
                ad_group = %group.name,
                kind = kind.label(),
                ads = ads.len(),
            );
            out.extend(ads.into_iter().map(|ad| ad.with_group_ref(group.name.clone())));
        }
    }
    Ok(out)
}

/// Build the draft's ad groups and return a copy of the draft whose ads are
/// freshly generated for them.
pub async fn generate_for_draft(
    producer: &dyn AdCopyProducer,
    draft: &CampaignDraft,
    catalog: &dyn LocationCatalog,
    kinds: &[AdKind],
    context: &GenerationContext,
) -> Result<CampaignDraft> {
    let campaigns = build_from_draft(draft, catalog)?;
    let groups = campaigns
        .first()
        .map(|c| c.ad_groups.as_slice())
        .unwrap_or_default();
    let context = GenerationContext {
        base_url: context.base_url.clone().or_else(|| draft.landing_url.clone()),
        ..context.clone()
    };
    let ads = generate_for_groups(producer, groups, kinds, &context).await?;
    Ok(draft.clone().with_ads(ads))
}
