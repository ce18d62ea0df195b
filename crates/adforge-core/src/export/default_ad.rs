//! Placeholder ads for ad groups that reach export without any.

use crate::config::ExportOptions;
use crate::domain::ad::{Ad, AdKind};
use crate::domain::campaign::{AdGroupSpec, CampaignStructure};
use crate::templates::{slugify, template_ad, TemplateInput};

/// Template RSA for `group`, linked to the campaign landing page or the
/// configured default URL.
pub fn default_ad(
    campaign: &CampaignStructure,
    group: &AdGroupSpec,
    options: &ExportOptions,
) -> Ad {
    let base_url = campaign
        .landing_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(&options.default_url);
    let input = TemplateInput {
        keywords: group.keywords.iter().map(|k| k.text.clone()).collect(),
        base_url: Some(base_url.to_string()),
        ..TemplateInput::default()
    };
    template_ad(format!("default-{}", slugify(&group.name)), AdKind::Rsa, &input)
        .with_group_ref(group.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::{Keyword, MatchType};

    #[test]
    fn prefers_landing_url() {
        let group = AdGroupSpec::new("Ad Group 1", vec![Keyword::new("plumber", MatchType::Broad)]);
        let mut campaign = CampaignStructure::new("Plumbing");
        let options = ExportOptions::new();

        let ad = default_ad(&campaign, &group, &options);
        assert_eq!(ad.final_url, "https://www.example.com");
        assert_eq!(ad.id, "default-ad-group-1");
        assert_eq!(ad.ad_group_ref.as_deref(), Some("Ad Group 1"));

        campaign.landing_url = Some("https://plumb.example".to_string());
        let ad = default_ad(&campaign, &group, &options);
        assert_eq!(ad.final_url, "https://plumb.example");
        assert_eq!(ad.headline(1), Some("Professional plumber"));
    }
}
