//! The immutable campaign draft every pipeline stage is computed from.

use serde::{Deserialize, Serialize};

use super::ad::Ad;
use super::campaign::{CampaignSettings, NegativeKeywordSet};
use super::geo::GeoSelection;
use super::keyword::MatchTypeWeights;
use super::strategy::{AuxSets, Strategy};

/// Raw wizard inputs for one campaign.
///
/// A draft is replaced, never edited in place: every change produces a new
/// value and the structure is recomputed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub campaign_name: String,
    #[serde(default)]
    pub landing_url: Option<String>,
    #[serde(default)]
    pub selected_keywords: Vec<String>,
    /// `None` until the user picks a structure.
    #[serde(default)]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub aux: AuxSets,
    #[serde(default)]
    pub ads: Vec<Ad>,
    #[serde(default)]
    pub negatives: NegativeKeywordSet,
    #[serde(default)]
    pub geo: GeoSelection,
    #[serde(default)]
    pub settings: CampaignSettings,
    #[serde(default)]
    pub match_type_weights: MatchTypeWeights,
}

impl CampaignDraft {
    pub fn new(campaign_name: impl Into<String>) -> Self {
        Self {
            campaign_name: campaign_name.into(),
            landing_url: None,
            selected_keywords: Vec::new(),
            strategy: None,
            aux: AuxSets::default(),
            ads: Vec::new(),
            negatives: NegativeKeywordSet::default(),
            geo: GeoSelection::default(),
            settings: CampaignSettings::default(),
            match_type_weights: MatchTypeWeights::default(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_landing_url(mut self, url: impl Into<String>) -> Self {
        self.landing_url = Some(url.into());
        self
    }

    pub fn with_ads(mut self, ads: Vec<Ad>) -> Self {
        self.ads = ads;
        self
    }

    pub fn with_aux(mut self, aux: AuxSets) -> Self {
        self.aux = aux;
        self
    }

    pub fn with_negatives(mut self, negatives: NegativeKeywordSet) -> Self {
        self.negatives = negatives;
        self
    }

    pub fn with_geo(mut self, geo: GeoSelection) -> Self {
        self.geo = geo;
        self
    }

    /// Parse a draft from its JSON form.
    pub fn from_json(json: &str) -> super::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let draft = CampaignDraft::from_json(r#"{"campaign_name":"Plumbing"}"#).expect("parse");
        assert_eq!(draft.campaign_name, "Plumbing");
        assert!(draft.strategy.is_none());
        assert_eq!(draft.match_type_weights, MatchTypeWeights::default());
        assert_eq!(draft.geo.country, "United States");
    }

    #[test]
    fn strategy_reads_from_id() {
        let draft = CampaignDraft::from_json(r#"{"campaign_name":"x","strategy":"stag_plus"}"#)
            .expect("parse");
        assert_eq!(draft.strategy, Some(Strategy::StagPlus));
    }
}
