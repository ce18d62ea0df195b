//! Keyword partitioning: one pure function per structure strategy.
//!
//! [`partition`] looks the strategy up in [`PARTITIONERS`] and filters empty
//! groups from the result. Every partitioner receives the keyword list after
//! match types have been assigned.

mod buckets;
mod chunked;

pub use buckets::{
    partition_alpha_beta, partition_brand_split, partition_competitor, partition_funnel,
    partition_geo, partition_intent, partition_match_type, ALL_KEYWORDS_GROUP,
};
pub use chunked::{
    chunk_size, partition_mix, partition_skag, partition_stag, MAX_CHUNKED_GROUPS,
    MIX_SINGLETONS, SKAG_LIMIT,
};

use std::collections::HashSet;

use crate::domain::campaign::AdGroupSpec;
use crate::domain::keyword::{Keyword, MatchTypeWeights};
use crate::domain::strategy::{AuxSets, Strategy};
use crate::keyword_format::{clean_keyword, format_keywords, match_type_display};

/// Signature shared by every partitioner.
pub type PartitionFn = fn(&[Keyword], &AuxSets) -> Vec<AdGroupSpec>;

/// Strategy dispatch table.
pub const PARTITIONERS: [(Strategy, PartitionFn); 12] = [
    (Strategy::Skag, partition_skag),
    (Strategy::Stag, partition_stag),
    (Strategy::StagPlus, partition_stag),
    (Strategy::Ngram, partition_stag),
    (Strategy::Intent, partition_intent),
    (Strategy::AlphaBeta, partition_alpha_beta),
    (Strategy::MatchType, partition_match_type),
    (Strategy::Geo, partition_geo),
    (Strategy::Funnel, partition_funnel),
    (Strategy::BrandSplit, partition_brand_split),
    (Strategy::Competitor, partition_competitor),
    (Strategy::Mix, partition_mix),
];

/// Partitioner for `strategy`; MIX when the table has no entry.
pub fn partitioner(strategy: Strategy) -> PartitionFn {
    PARTITIONERS
        .iter()
        .find(|(s, _)| *s == strategy)
        .map(|(_, f)| *f)
        .unwrap_or(partition_mix)
}

/// Split `keywords` into ad groups according to `strategy`.
///
/// Returns an empty list when there are no keywords or no strategy. Groups
/// are never emitted empty and their names are unique.
pub fn partition(
    strategy: Option<Strategy>,
    keywords: &[Keyword],
    aux: &AuxSets,
) -> Vec<AdGroupSpec> {
    let Some(strategy) = strategy else {
        return Vec::new();
    };
    if keywords.is_empty() {
        return Vec::new();
    }
    let mut specs = partitioner(strategy)(keywords, aux);
    specs.retain(|spec| !spec.keywords.is_empty());
    let specs = unique_group_names(specs);
    tracing::debug!(
        strategy = %strategy,
        keywords = keywords.len(),
        groups = specs.len(),
        "partitioned keywords"
    );
    specs
}

/// Assign match types to raw keywords, then partition.
pub fn partition_raw<S: AsRef<str>>(
    strategy: Option<Strategy>,
    raw_keywords: &[S],
    aux: &AuxSets,
    weights: &MatchTypeWeights,
) -> Vec<AdGroupSpec> {
    partition(strategy, &format_keywords(raw_keywords, weights), aux)
}

/// Rename repeated group names to `{name} 2`, `{name} 3`, ...
///
/// The first occurrence keeps its name. Ads and negatives are bound to
/// groups by name, so two groups may never share one.
pub fn unique_group_names(specs: Vec<AdGroupSpec>) -> Vec<AdGroupSpec> {
    let originals: HashSet<String> = specs.iter().map(|s| s.name.clone()).collect();
    let mut used: HashSet<String> = HashSet::new();
    specs
        .into_iter()
        .map(|mut spec| {
            if !used.insert(spec.name.clone()) {
                let name = (2..)
                    .map(|n| format!("{} {n}", spec.name))
                    .find(|candidate| !originals.contains(candidate) && !used.contains(candidate))
                    .unwrap_or_default();
                used.insert(name.clone());
                spec.name = name;
            }
            spec
        })
        .collect()
}

/// Map bucket entries back onto the formatted keyword list.
///
/// Entries are matched by cleaned text so they inherit the match type the
/// formatter assigned; unmatched entries keep their own decoration.
pub(crate) fn resolve_bucket(entries: &[String], keywords: &[Keyword]) -> Vec<Keyword> {
    entries
        .iter()
        .map(|entry| {
            let text = clean_keyword(entry);
            keywords
                .iter()
                .find(|kw| kw.text == text)
                .cloned()
                .unwrap_or_else(|| Keyword::new(text, match_type_display(entry)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::MatchType;

    #[test]
    fn unset_strategy_or_empty_keywords_yield_nothing() {
        let kws = vec![Keyword::new("a", MatchType::Broad)];
        assert!(partition(None, &kws, &AuxSets::default()).is_empty());
        assert!(partition(Some(Strategy::Skag), &[], &AuxSets::default()).is_empty());
    }

    #[test]
    fn table_covers_every_strategy() {
        for st in Strategy::ALL {
            assert!(PARTITIONERS.iter().any(|(s, _)| *s == st), "{st} missing");
        }
    }

    #[test]
    fn repeated_names_get_numeric_suffixes() {
        let group = |name: &str| AdGroupSpec::new(name, vec![Keyword::new(name, MatchType::Broad)]);
        let specs = vec![group("plumber"), group("plumber"), group("plumber 2"), group("plumber")];
        let names: Vec<String> = unique_group_names(specs).into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["plumber", "plumber 3", "plumber 2", "plumber 4"]);
    }

    #[test]
    fn bucket_entries_inherit_formatted_match_type() {
        let kws = vec![
            Keyword::new("buy pipes", MatchType::Exact),
            Keyword::new("pipe guide", MatchType::Phrase),
        ];
        let resolved = resolve_bucket(
            &["buy pipes".to_string(), "\"unknown\"".to_string()],
            &kws,
        );
        assert_eq!(resolved[0], Keyword::new("buy pipes", MatchType::Exact));
        assert_eq!(resolved[1], Keyword::new("unknown", MatchType::Phrase));
    }
}
