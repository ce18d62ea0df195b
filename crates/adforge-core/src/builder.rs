//! Campaign structure builder.
//!
//! Turns partitioned ad-group specs plus the draft's ads, negatives and geo
//! selection into complete [`CampaignStructure`] trees.

use crate::classify::classify_if_missing;
use crate::domain::ad::Ad;
use crate::domain::campaign::{AdGroupSpec, CampaignSettings, CampaignStructure, NegativeKeywordSet};
use crate::domain::draft::CampaignDraft;
use crate::domain::error::Result;
use crate::domain::geo::GeoTarget;
use crate::domain::strategy::{AuxSets, Strategy};
use crate::keyword_format::format_keywords;
use crate::locations::{country_target, resolve_locations, LocationCatalog};
use crate::obs;
use crate::partition::partition;

/// Ads handed to the first group when nothing else reached it.
pub const FIRST_GROUP_FALLBACK_ADS: usize = 5;

/// Everything the builder needs besides the specs themselves.
#[derive(Debug, Clone)]
pub struct BuildInput<'a> {
    pub campaign_name: &'a str,
    pub strategy: Option<Strategy>,
    pub specs: &'a [AdGroupSpec],
    pub ads: &'a [Ad],
    pub negatives: &'a NegativeKeywordSet,
    /// Resolved locations; empty means "target the country".
    pub locations: &'a [GeoTarget],
    pub country: GeoTarget,
    pub landing_url: Option<&'a str>,
    pub settings: &'a CampaignSettings,
}

fn assign(ads: &[&Ad], group: &str) -> Vec<Ad> {
    ads.iter()
        .map(|ad| {
            let mut ad = (*ad).clone();
            ad.ad_group_ref = Some(group.to_string());
            ad
        })
        .collect()
}

/// Map ads onto the ad groups in `specs`.
///
/// Each group takes, in order:
/// 1. ads whose `ad_group_ref` equals the group name;
/// 2. otherwise its chunk of the unassigned ads. The pool is split over the
///    groups without an exact match: chunk size `ceil(unassigned / eligible)`,
///    chunk index equal to the group's position among the eligible groups.
///    When every group has an exact match the pool is split over all groups;
/// 3. if the first group is still empty and any ads exist, the first five ads.
///
/// Every unassigned ad ends up in some group. Returned ads are copies with
/// `ad_group_ref` set to the owning group.
pub fn reconcile_ads(specs: &[AdGroupSpec], ads: &[Ad]) -> Vec<Ad> {
    if specs.is_empty() || ads.is_empty() {
        return Vec::new();
    }
    let unassigned: Vec<&Ad> = ads.iter().filter(|ad| ad.is_unassigned()).collect();
    let exact: Vec<Vec<&Ad>> = specs
        .iter()
        .map(|spec| {
            ads.iter()
                .filter(|ad| ad.ad_group_ref.as_deref() == Some(spec.name.as_str()))
                .collect()
        })
        .collect();

    let mut eligible: Vec<usize> = (0..specs.len()).filter(|&i| exact[i].is_empty()).collect();
    if eligible.is_empty() {
        eligible = (0..specs.len()).collect();
    }
    let per_spec = unassigned.len().div_ceil(eligible.len());
    let mut slots = vec![None; specs.len()];
    for (slot, &idx) in eligible.iter().enumerate() {
        slots[idx] = Some(slot);
    }

    let mut out = Vec::new();
    for (idx, spec) in specs.iter().enumerate() {
        let mut mine = exact[idx].clone();
        if let Some(slot) = slots[idx] {
            let start = (slot * per_spec).min(unassigned.len());
            let end = (start + per_spec).min(unassigned.len());
            mine.extend_from_slice(&unassigned[start..end]);
        }
        if mine.is_empty() && idx == 0 {
            mine = ads.iter().take(FIRST_GROUP_FALLBACK_ADS).collect();
            obs::emit_ads_fallback_assigned(&spec.name, mine.len());
        }
        out.extend(assign(&mine, &spec.name));
    }
    out
}

fn with_landing_url(mut ads: Vec<Ad>, landing_url: Option<&str>) -> Vec<Ad> {
    if let Some(url) = landing_url.filter(|u| !u.trim().is_empty()) {
        for ad in ads.iter_mut().filter(|ad| ad.final_url.trim().is_empty()) {
            ad.final_url = url.to_string();
        }
    }
    ads
}

/// Per-group negatives with the global fallback applied.
fn resolve_negatives(specs: &[AdGroupSpec], negatives: &NegativeKeywordSet) -> NegativeKeywordSet {
    specs.iter().fold(
        NegativeKeywordSet::global(negatives.global.clone()),
        |set, spec| {
            let list = negatives.for_group(&spec.name).to_vec();
            set.with_group(spec.name.clone(), list)
        },
    )
}

/// Build campaign trees. The geo strategy yields one campaign per location.
pub fn build_campaigns(input: &BuildInput<'_>) -> Vec<CampaignStructure> {
    let ads = with_landing_url(reconcile_ads(input.specs, input.ads), input.landing_url);
    let template = CampaignStructure {
        name: input.campaign_name.to_string(),
        geo_targets: Vec::new(),
        ad_groups: input.specs.to_vec(),
        ads,
        negatives: resolve_negatives(input.specs, input.negatives),
        landing_url: input.landing_url.map(str::to_string),
        settings: input.settings.clone(),
    };

    let is_geo = input.strategy.is_some_and(Strategy::is_geo);
    let campaigns: Vec<CampaignStructure> = if is_geo && !input.locations.is_empty() {
        input
            .locations
            .iter()
            .map(|loc| CampaignStructure {
                name: format!("{} - {}", input.campaign_name, loc.name),
                geo_targets: vec![loc.clone()],
                ..template.clone()
            })
            .collect()
    } else {
        let geo_targets = if input.locations.is_empty() {
            vec![input.country.clone()]
        } else {
            input.locations.to_vec()
        };
        vec![CampaignStructure {
            geo_targets,
            ..template
        }]
    };

    obs::emit_structure_built(
        input.campaign_name,
        campaigns.len(),
        input.specs.len(),
        campaigns.first().map_or(0, |c| c.ads.len()),
    );
    campaigns
}

/// Run formatting, classification, partitioning, location resolution and
/// building for a draft.
pub fn build_from_draft(
    draft: &CampaignDraft,
    catalog: &dyn LocationCatalog,
) -> Result<Vec<CampaignStructure>> {
    draft.match_type_weights.validate()?;
    let keywords = format_keywords(&draft.selected_keywords, &draft.match_type_weights);
    let aux = match draft.strategy {
        Some(strategy) => classify_if_missing(&draft.aux, strategy, &draft.selected_keywords),
        None => AuxSets::default(),
    };
    let specs = partition(draft.strategy, &keywords, &aux);
    let locations = resolve_locations(&draft.geo, catalog)?;

    Ok(build_campaigns(&BuildInput {
        campaign_name: &draft.campaign_name,
        strategy: draft.strategy,
        specs: &specs,
        ads: &draft.ads,
        negatives: &draft.negatives,
        locations: &locations,
        country: country_target(&draft.geo),
        landing_url: draft.landing_url.as_deref(),
        settings: &draft.settings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ad::AdKind;
    use crate::domain::geo::GeoLevel;
    use crate::domain::keyword::{Keyword, MatchType};

    fn spec(name: &str) -> AdGroupSpec {
        AdGroupSpec::new(name, vec![Keyword::new(name, MatchType::Broad)])
    }

    fn ad(id: &str, group: Option<&str>) -> Ad {
        let ad = Ad::new(id, AdKind::Rsa);
        match group {
            Some(g) => ad.with_group_ref(g),
            None => ad,
        }
    }

    fn ids_for(ads: &[Ad], group: &str) -> Vec<String> {
        ads.iter()
            .filter(|a| a.ad_group_ref.as_deref() == Some(group))
            .map(|a| a.id.clone())
            .collect()
    }

    #[test]
    fn exact_names_win() {
        let specs = [spec("A"), spec("B")];
        let ads = [ad("1", Some("B")), ad("2", Some("A"))];
        let out = reconcile_ads(&specs, &ads);
        assert_eq!(ids_for(&out, "A"), vec!["2"]);
        assert_eq!(ids_for(&out, "B"), vec!["1"]);
    }

    #[test]
    fn unassigned_pool_split_over_groups_without_exact_match() {
        let specs = [spec("A"), spec("B"), spec("C")];
        let ads = [
            ad("1", None),
            ad("2", Some("ALL")),
            ad("3", None),
            ad("4", None),
            ad("5", Some("C")),
        ];
        // C matched exactly, so A and B share the pool: ceil(4 / 2) = 2 each
        let out = reconcile_ads(&specs, &ads);
        assert_eq!(ids_for(&out, "A"), vec!["1", "2"]);
        assert_eq!(ids_for(&out, "B"), vec!["3", "4"]);
        assert_eq!(ids_for(&out, "C"), vec!["5"]);
    }

    #[test]
    fn exact_match_does_not_swallow_a_pool_chunk() {
        let specs = [spec("A"), spec("B"), spec("C")];
        let ads = [
            ad("exact-a", Some("A")),
            ad("u1", None),
            ad("u2", None),
            ad("u3", None),
        ];
        let out = reconcile_ads(&specs, &ads);
        assert_eq!(out.len(), 4);
        assert_eq!(ids_for(&out, "A"), vec!["exact-a"]);
        assert_eq!(ids_for(&out, "B"), vec!["u1", "u2"]);
        assert_eq!(ids_for(&out, "C"), vec!["u3"]);
    }

    #[test]
    fn pool_is_shared_when_every_group_matched_exactly() {
        let specs = [spec("A"), spec("B")];
        let ads = [
            ad("a", Some("A")),
            ad("b", Some("B")),
            ad("u1", None),
            ad("u2", Some("ALL")),
        ];
        let out = reconcile_ads(&specs, &ads);
        assert_eq!(ids_for(&out, "A"), vec!["a", "u1"]);
        assert_eq!(ids_for(&out, "B"), vec!["b", "u2"]);
    }

    #[test]
    fn first_spec_falls_back_to_first_five_ads() {
        let specs = [spec("New Name")];
        let ads: Vec<Ad> = (0..7).map(|i| ad(&i.to_string(), Some("Old Name"))).collect();
        let out = reconcile_ads(&specs, &ads);
        assert_eq!(ids_for(&out, "New Name"), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn later_specs_do_not_fall_back() {
        let specs = [spec("A"), spec("B")];
        let ads = [ad("1", Some("A"))];
        let out = reconcile_ads(&specs, &ads);
        assert!(ids_for(&out, "B").is_empty());
    }

    #[test]
    fn geo_builds_one_campaign_per_location() {
        let specs = [spec("All Keywords")];
        let locations = [
            GeoTarget::new(GeoLevel::City, "Austin"),
            GeoTarget::new(GeoLevel::City, "Dallas"),
        ];
        let negatives = NegativeKeywordSet::global(vec!["free".to_string()]);
        let settings = CampaignSettings::default();
        let input = BuildInput {
            campaign_name: "Plumbing",
            strategy: Some(Strategy::Geo),
            specs: &specs,
            ads: &[],
            negatives: &negatives,
            locations: &locations,
            country: GeoTarget::new(GeoLevel::Country, "United States"),
            landing_url: None,
            settings: &settings,
        };
        let campaigns = build_campaigns(&input);
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].name, "Plumbing - Austin");
        assert_eq!(campaigns[1].geo_targets, vec![locations[1].clone()]);
        assert_eq!(campaigns[0].ad_groups, campaigns[1].ad_groups);
        assert_eq!(campaigns[0].negatives.for_group("All Keywords"), ["free"]);
    }

    #[test]
    fn no_locations_targets_country() {
        let specs = [spec("A")];
        let negatives = NegativeKeywordSet::default();
        let settings = CampaignSettings::default();
        let input = BuildInput {
            campaign_name: "Plumbing",
            strategy: Some(Strategy::Geo),
            specs: &specs,
            ads: &[],
            negatives: &negatives,
            locations: &[],
            country: GeoTarget::new(GeoLevel::Country, "United States"),
            landing_url: None,
            settings: &settings,
        };
        let campaigns = build_campaigns(&input);
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].name, "Plumbing");
        assert_eq!(campaigns[0].geo_targets[0].level, GeoLevel::Country);
    }

    #[test]
    fn blank_final_urls_take_landing_url() {
        let ads = with_landing_url(
            vec![ad("1", None), ad("2", None).with_final_url("https://a.example")],
            Some("https://landing.example"),
        );
        assert_eq!(ads[0].final_url, "https://landing.example");
        assert_eq!(ads[1].final_url, "https://a.example");
    }
}
