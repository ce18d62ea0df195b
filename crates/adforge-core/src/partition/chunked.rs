//! Size-driven partitioners: SKAG, STAG (and its smart-cluster variants), MIX.

use crate::domain::campaign::AdGroupSpec;
use crate::domain::keyword::Keyword;
use crate::domain::strategy::AuxSets;

/// SKAG emits at most this many single-keyword groups.
pub const SKAG_LIMIT: usize = 20;

/// Upper bound on groups for the chunked strategies.
pub const MAX_CHUNKED_GROUPS: usize = 10;

/// MIX turns this many leading keywords into single-keyword groups.
pub const MIX_SINGLETONS: usize = 5;

/// `max(3, ceil(len / divisor))`.
pub fn chunk_size(len: usize, divisor: usize) -> usize {
    len.div_ceil(divisor).max(3)
}

/// One group per keyword, named by the keyword, first 20 keywords only.
pub fn partition_skag(keywords: &[Keyword], _aux: &AuxSets) -> Vec<AdGroupSpec> {
    keywords
        .iter()
        .take(SKAG_LIMIT)
        .map(|kw| AdGroupSpec::new(kw.text.clone(), vec![kw.clone()]))
        .collect()
}

/// Sequential chunks of `max(3, ceil(n/5))` keywords named `Ad Group {n}`.
pub fn partition_stag(keywords: &[Keyword], _aux: &AuxSets) -> Vec<AdGroupSpec> {
    let size = chunk_size(keywords.len(), 5);
    keywords
        .chunks(size)
        .take(MAX_CHUNKED_GROUPS)
        .enumerate()
        .map(|(i, chunk)| AdGroupSpec::new(format!("Ad Group {}", i + 1), chunk.to_vec()))
        .collect()
}

/// Five single-keyword groups, then `Mixed Group {n}` chunks of the rest.
pub fn partition_mix(keywords: &[Keyword], _aux: &AuxSets) -> Vec<AdGroupSpec> {
    let split = keywords.len().min(MIX_SINGLETONS);
    let (head, rest) = keywords.split_at(split);

    let mut specs: Vec<AdGroupSpec> = head
        .iter()
        .map(|kw| AdGroupSpec::new(kw.text.clone(), vec![kw.clone()]))
        .collect();

    if !rest.is_empty() {
        let size = chunk_size(rest.len(), 3);
        let room = MAX_CHUNKED_GROUPS.saturating_sub(specs.len());
        specs.extend(
            rest.chunks(size)
                .take(room)
                .enumerate()
                .map(|(n, chunk)| {
                    AdGroupSpec::new(format!("Mixed Group {}", n + 1), chunk.to_vec())
                }),
        );
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keyword::MatchType;

    fn kws(n: usize) -> Vec<Keyword> {
        (0..n)
            .map(|i| Keyword::new(format!("kw {i}"), MatchType::Phrase))
            .collect()
    }

    #[test]
    fn chunk_size_has_floor_of_three() {
        assert_eq!(chunk_size(0, 5), 3);
        assert_eq!(chunk_size(12, 5), 3);
        assert_eq!(chunk_size(16, 5), 4);
        assert_eq!(chunk_size(50, 5), 10);
    }

    #[test]
    fn skag_caps_at_twenty() {
        let specs = partition_skag(&kws(25), &AuxSets::default());
        assert_eq!(specs.len(), SKAG_LIMIT);
        assert_eq!(specs[19].name, "kw 19");
    }

    #[test]
    fn stag_twelve_keywords_gives_four_groups_of_three() {
        let specs = partition_stag(&kws(12), &AuxSets::default());
        assert_eq!(specs.len(), 4);
        assert!(specs.iter().all(|s| s.keywords.len() == 3));
        assert_eq!(specs[3].name, "Ad Group 4");
    }

    #[test]
    fn mix_numbers_overflow_groups_from_one() {
        let specs = partition_mix(&kws(11), &AuxSets::default());
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["kw 0", "kw 1", "kw 2", "kw 3", "kw 4", "Mixed Group 1", "Mixed Group 2"]
        );
        assert_eq!(specs[5].keywords.len(), 3);
        assert_eq!(specs[6].keywords.len(), 3);
    }

    #[test]
    fn mix_with_few_keywords_is_all_singletons() {
        let specs = partition_mix(&kws(3), &AuxSets::default());
        assert_eq!(specs.len(), 3);
        assert!(specs.iter().all(|s| s.keywords.len() == 1));
    }
}
