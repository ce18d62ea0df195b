//! Campaign trees produced by the structure builder.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ad::Ad;
use super::geo::GeoTarget;
use super::keyword::Keyword;

/// Name and keyword list of one ad group, as emitted by the partitioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGroupSpec {
    pub name: String,
    pub keywords: Vec<Keyword>,
}

impl AdGroupSpec {
    pub fn new(name: impl Into<String>, keywords: Vec<Keyword>) -> Self {
        Self {
            name: name.into(),
            keywords,
        }
    }
}

/// Two-tier negative keyword store.
///
/// `per_group` entries override `global` for the named ad group; groups with
/// no entry fall back to `global`. An explicit empty entry disables negatives
/// for that group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeKeywordSet {
    #[serde(default)]
    pub global: Vec<String>,
    #[serde(default)]
    pub per_group: BTreeMap<String, Vec<String>>,
}

impl NegativeKeywordSet {
    pub fn global(negatives: Vec<String>) -> Self {
        Self {
            global: negatives,
            per_group: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>, negatives: Vec<String>) -> Self {
        self.per_group.insert(group.into(), negatives);
        self
    }

    /// Negatives that apply to `group`.
    pub fn for_group(&self, group: &str) -> &[String] {
        self.per_group
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(self.global.as_slice())
    }
}

/// Campaign-level settings written to the campaign row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSettings {
    #[serde(default)]
    pub daily_budget: Option<f64>,
    #[serde(default = "default_bidding_strategy")]
    pub bidding_strategy: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

fn default_bidding_strategy() -> String {
    "MANUAL_CPC".to_string()
}

fn default_country_code() -> String {
    "US".to_string()
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            daily_budget: None,
            bidding_strategy: default_bidding_strategy(),
            start_date: None,
            end_date: None,
            country_code: default_country_code(),
        }
    }
}

/// A complete campaign tree, ready for validation and export.
///
/// Derived from a draft on every export attempt; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignStructure {
    pub name: String,
    pub geo_targets: Vec<GeoTarget>,
    pub ad_groups: Vec<AdGroupSpec>,
    /// Ads with `ad_group_ref` resolved to one of `ad_groups`.
    pub ads: Vec<Ad>,
    pub negatives: NegativeKeywordSet,
    /// Landing page used for synthesized default ads.
    #[serde(default)]
    pub landing_url: Option<String>,
    #[serde(default)]
    pub settings: CampaignSettings,
}

impl CampaignStructure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geo_targets: Vec::new(),
            ad_groups: Vec::new(),
            ads: Vec::new(),
            negatives: NegativeKeywordSet::default(),
            landing_url: None,
            settings: CampaignSettings::default(),
        }
    }

    /// Ads assigned to the ad group named `group`.
    pub fn ads_for<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Ad> + 'a {
        self.ads
            .iter()
            .filter(move |ad| ad.ad_group_ref.as_deref() == Some(group))
    }

    /// Total keyword count across ad groups.
    pub fn keyword_count(&self) -> usize {
        self.ad_groups.iter().map(|g| g.keywords.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ad::AdKind;

    #[test]
    fn negatives_fall_back_to_global() {
        let set = NegativeKeywordSet::global(vec!["free".to_string()])
            .with_group("Brand", vec!["jobs".to_string()])
            .with_group("Competitor", vec![]);
        assert_eq!(set.for_group("Brand"), ["jobs".to_string()]);
        assert_eq!(set.for_group("Ad Group 1"), ["free".to_string()]);
        assert!(set.for_group("Competitor").is_empty());
    }

    #[test]
    fn ads_for_filters_by_group_ref() {
        let mut c = CampaignStructure::new("Search");
        c.ads.push(Ad::new("a1", AdKind::Rsa).with_group_ref("G1"));
        c.ads.push(Ad::new("a2", AdKind::Rsa).with_group_ref("G2"));
        let ids: Vec<&str> = c.ads_for("G1").map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1"]);
    }
}
