//! Bucket-driven partitioners. Groups come from pre-classified keyword sets
//! and have fixed names.

use super::resolve_bucket;
use crate::domain::campaign::AdGroupSpec;
use crate::domain::keyword::{Keyword, MatchType};
use crate::domain::strategy::{AuxSets, IntentBucket};

/// Layout group used by the geo strategy; the builder replicates it per location.
pub const ALL_KEYWORDS_GROUP: &str = "All Keywords";

fn bucket_spec(name: &str, entries: &[String], keywords: &[Keyword]) -> Option<AdGroupSpec> {
    if entries.is_empty() {
        return None;
    }
    Some(AdGroupSpec::new(name, resolve_bucket(entries, keywords)))
}

/// High Intent, Research, Brand, Competitor: selected and non-empty only.
pub fn partition_intent(keywords: &[Keyword], aux: &AuxSets) -> Vec<AdGroupSpec> {
    IntentBucket::ALL
        .into_iter()
        .filter(|b| aux.intent.is_selected(*b))
        .filter_map(|b| bucket_spec(b.group_name(), aux.intent.bucket(b), keywords))
        .collect()
}

pub fn partition_alpha_beta(keywords: &[Keyword], aux: &AuxSets) -> Vec<AdGroupSpec> {
    [
        bucket_spec("Alpha Winners", &aux.alpha, keywords),
        bucket_spec("Beta Discovery", &aux.beta, keywords),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Broad, Phrase, Exact groups, each holding every keyword re-encoded.
pub fn partition_match_type(keywords: &[Keyword], _aux: &AuxSets) -> Vec<AdGroupSpec> {
    MatchType::ALL
        .into_iter()
        .map(|mt| {
            AdGroupSpec::new(
                mt.label(),
                keywords.iter().map(|kw| kw.with_match_type(mt)).collect(),
            )
        })
        .collect()
}

/// A single layout group holding the full keyword set.
pub fn partition_geo(keywords: &[Keyword], _aux: &AuxSets) -> Vec<AdGroupSpec> {
    vec![AdGroupSpec::new(ALL_KEYWORDS_GROUP, keywords.to_vec())]
}

pub fn partition_funnel(keywords: &[Keyword], aux: &AuxSets) -> Vec<AdGroupSpec> {
    [
        bucket_spec("TOF", &aux.funnel.tof, keywords),
        bucket_spec("MOF", &aux.funnel.mof, keywords),
        bucket_spec("BOF", &aux.funnel.bof, keywords),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn partition_brand_split(keywords: &[Keyword], aux: &AuxSets) -> Vec<AdGroupSpec> {
    [
        bucket_spec("Brand", &aux.brand, keywords),
        bucket_spec("Non-Brand", &aux.non_brand, keywords),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn partition_competitor(keywords: &[Keyword], aux: &AuxSets) -> Vec<AdGroupSpec> {
    bucket_spec("Competitor", &aux.competitor, keywords)
        .into_iter()
        .collect()
}
