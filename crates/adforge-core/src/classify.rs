//! Heuristic keyword classification for the bucket strategies.
//!
//! Used when a draft carries no pre-classified sets. Matching is a
//! case-insensitive substring test against fixed term lists, so a keyword can
//! land in several buckets.

use crate::domain::strategy::{AuxSets, FunnelBuckets, IntentBucket, IntentBuckets, Strategy};
use crate::keyword_format::strip_decoration;

const HIGH_INTENT_TERMS: &[&str] = &["call", "buy", "get", "purchase", "order", "now"];
const RESEARCH_TERMS: &[&str] = &["info", "compare", "best", "review", "guide", "how"];
const BRAND_TERMS: &[&str] = &["your", "company", "brand", "official"];
const COMPETITOR_TERMS: &[&str] = &[
    "nextiva",
    "hubspot",
    "clickcease",
    "semrush",
    "competitor",
    "alternative",
];
const TOF_TERMS: &[&str] = &["what", "how", "info", "guide", "learn"];
const MOF_TERMS: &[&str] = &["compare", "best", "review", "vs", "alternative"];
const BOF_TERMS: &[&str] = &["buy", "call", "get", "purchase", "order"];

fn contains_any(keyword: &str, terms: &[&str]) -> bool {
    let lower = strip_decoration(keyword).to_lowercase();
    terms.iter().any(|t| lower.contains(t))
}

fn matching<S: AsRef<str>>(keywords: &[S], terms: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .map(|kw| kw.as_ref())
        .filter(|kw| contains_any(kw, terms))
        .map(str::to_string)
        .collect()
}

/// Whether a keyword names a known competitor.
pub fn is_competitor(keyword: &str) -> bool {
    contains_any(keyword, COMPETITOR_TERMS)
}

/// Whether a keyword reads as a brand search.
pub fn is_brand(keyword: &str) -> bool {
    contains_any(keyword, BRAND_TERMS)
}

/// Classify by intent. Only non-empty buckets are selected.
pub fn classify_intent<S: AsRef<str>>(keywords: &[S]) -> IntentBuckets {
    let mut buckets = IntentBuckets {
        high_intent: matching(keywords, HIGH_INTENT_TERMS),
        research: matching(keywords, RESEARCH_TERMS),
        brand: matching(keywords, BRAND_TERMS),
        competitor: matching(keywords, COMPETITOR_TERMS),
        selected: Vec::new(),
    };
    buckets.selected = IntentBucket::ALL
        .into_iter()
        .filter(|b| !buckets.bucket(*b).is_empty())
        .collect();
    buckets
}

/// Classify by funnel stage.
pub fn classify_funnel<S: AsRef<str>>(keywords: &[S]) -> FunnelBuckets {
    FunnelBuckets {
        tof: matching(keywords, TOF_TERMS),
        mof: matching(keywords, MOF_TERMS),
        bof: matching(keywords, BOF_TERMS),
    }
}

/// Fill every bucket from `keywords`.
///
/// Alpha/beta starts with every keyword in discovery (beta) and no winners;
/// promotion to alpha is a manual step.
pub fn classify_keywords<S: AsRef<str>>(keywords: &[S]) -> AuxSets {
    let all: Vec<String> = keywords.iter().map(|k| k.as_ref().to_string()).collect();
    let (brand, non_brand): (Vec<String>, Vec<String>) =
        all.iter().cloned().partition(|kw| is_brand(kw));
    AuxSets {
        intent: classify_intent(keywords),
        funnel: classify_funnel(keywords),
        alpha: Vec::new(),
        beta: all.clone(),
        brand,
        non_brand,
        competitor: all.into_iter().filter(|kw| is_competitor(kw)).collect(),
    }
}

/// Whether `aux` carries no classification for the buckets `strategy` reads.
pub fn is_unclassified(aux: &AuxSets, strategy: Strategy) -> bool {
    match strategy {
        Strategy::Intent => IntentBucket::ALL
            .into_iter()
            .all(|b| aux.intent.bucket(b).is_empty()),
        Strategy::AlphaBeta => aux.alpha.is_empty() && aux.beta.is_empty(),
        Strategy::Funnel => {
            aux.funnel.tof.is_empty() && aux.funnel.mof.is_empty() && aux.funnel.bof.is_empty()
        }
        Strategy::BrandSplit => aux.brand.is_empty() && aux.non_brand.is_empty(),
        Strategy::Competitor => aux.competitor.is_empty(),
        _ => false,
    }
}

/// `aux` as given, or the heuristic classification of `keywords` when `aux`
/// holds nothing for `strategy`.
pub fn classify_if_missing<S: AsRef<str>>(
    aux: &AuxSets,
    strategy: Strategy,
    keywords: &[S],
) -> AuxSets {
    if is_unclassified(aux, strategy) {
        tracing::debug!(strategy = %strategy, "classifying keywords heuristically");
        classify_keywords(keywords)
    } else {
        aux.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_buckets_follow_term_lists() {
        let kws = [
            "call plumber now",
            "best plumber reviews",
            "your company plumbing",
            "hubspot alternative",
            "pipe fittings",
        ];
        let intent = classify_intent(&kws);
        assert_eq!(intent.high_intent, vec!["call plumber now"]);
        assert_eq!(intent.research, vec!["best plumber reviews"]);
        assert_eq!(intent.brand, vec!["your company plumbing"]);
        assert_eq!(intent.competitor, vec!["hubspot alternative"]);
        assert_eq!(intent.selected, IntentBucket::ALL.to_vec());
    }

    #[test]
    fn empty_intent_buckets_not_selected() {
        let intent = classify_intent(&["call now"]);
        assert_eq!(intent.selected, vec![IntentBucket::HighIntent]);
    }

    #[test]
    fn brand_split_is_a_partition() {
        let kws = ["Official Acme store", "[acme brand]", "hammer"];
        let aux = classify_keywords(&kws);
        assert_eq!(aux.brand, vec!["Official Acme store", "[acme brand]"]);
        assert_eq!(aux.non_brand, vec!["hammer"]);
        assert!(aux.alpha.is_empty());
        assert_eq!(aux.beta.len(), 3);
    }

    #[test]
    fn provided_buckets_are_kept() {
        let aux = AuxSets {
            competitor: vec!["rival".to_string()],
            ..AuxSets::default()
        };
        let out = classify_if_missing(&aux, Strategy::Competitor, &["hubspot alternative"]);
        assert_eq!(out.competitor, vec!["rival"]);

        let out = classify_if_missing(
            &AuxSets::default(),
            Strategy::Competitor,
            &["hubspot alternative"],
        );
        assert_eq!(out.competitor, vec!["hubspot alternative"]);
        assert!(!is_unclassified(&AuxSets::default(), Strategy::Skag));
    }

    #[test]
    fn funnel_stages() {
        let f = classify_funnel(&["how to fix a leak", "plumber vs handyman", "buy pipe"]);
        assert_eq!(f.tof, vec!["how to fix a leak"]);
        assert_eq!(f.mof, vec!["plumber vs handyman"]);
        assert_eq!(f.bof, vec!["buy pipe"]);
    }
}
