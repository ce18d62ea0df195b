//! Match-type decoration: applying, stripping and reading it back.
//!
//! Keywords travel through the wizard as plain strings where the match type
//! is encoded by punctuation: `kw` (broad), `"kw"` (phrase), `[kw]` (exact).
//! Negative keywords additionally carry a leading `-`.

use crate::domain::error::ConfigError;
use crate::domain::keyword::{Keyword, MatchType, MatchTypeWeights};

/// Placeholder returned by [`clean_keyword`] when nothing is left after
/// stripping. Ad-copy templates rely on a non-empty keyword.
pub const FALLBACK_KEYWORD: &str = "your service";

/// Deterministic draw in `0..100` for the keyword at `index`.
///
/// Equal to `(index * 37) % 100` without overflowing on large indices.
pub fn match_type_draw(index: usize) -> u32 {
    ((index % 100) * 37 % 100) as u32
}

fn strip_once(s: &str) -> &str {
    let s = s.trim().trim_start_matches('-').trim_start();
    let s = s
        .strip_prefix('[')
        .or_else(|| s.strip_prefix('"'))
        .unwrap_or(s);
    let s = s
        .strip_suffix(']')
        .or_else(|| s.strip_suffix('"'))
        .unwrap_or(s);
    s.trim()
}

/// Remove match-type decoration and the negative marker, without a fallback.
///
/// Stripping repeats until nothing changes, so the result is stable:
/// `strip_decoration(strip_decoration(s)) == strip_decoration(s)`.
pub fn strip_decoration(raw: &str) -> String {
    let mut current = raw;
    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

/// Strip decoration; `"your service"` when the result would be empty.
pub fn clean_keyword(raw: &str) -> String {
    let stripped = strip_decoration(raw);
    if stripped.is_empty() {
        FALLBACK_KEYWORD.to_string()
    } else {
        stripped
    }
}

/// Read the match type encoded in a decorated keyword.
pub fn match_type_display(raw: &str) -> MatchType {
    let s = raw.trim();
    if s.len() >= 2 && s.starts_with('[') && s.ends_with(']') {
        MatchType::Exact
    } else if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        MatchType::Phrase
    } else {
        MatchType::Broad
    }
}

/// Parse a decorated keyword into a typed [`Keyword`].
pub fn parse_keyword(raw: &str) -> Keyword {
    Keyword::parse(raw)
}

/// Parse a negative keyword: `-[x]` exact, `-"x"` phrase, `-x` or `x` broad.
pub fn parse_negative(raw: &str) -> Keyword {
    let body = raw.trim().trim_start_matches('-');
    Keyword::new(strip_decoration(body), match_type_display(body))
}

/// Assign match types with the given weights, returning typed keywords.
///
/// Pure in `(index, keyword)`: the match type depends only on the position.
pub fn format_keywords<S: AsRef<str>>(keywords: &[S], weights: &MatchTypeWeights) -> Vec<Keyword> {
    keywords
        .iter()
        .enumerate()
        .map(|(i, kw)| Keyword::new(clean_keyword(kw.as_ref()), weights.pick(match_type_draw(i))))
        .collect()
}

/// Decorate each keyword with a match type chosen by custom weights.
pub fn format_with_weights<S: AsRef<str>>(
    keywords: &[S],
    weights: &MatchTypeWeights,
) -> Result<Vec<String>, ConfigError> {
    weights.validate()?;
    Ok(format_keywords(keywords, weights)
        .iter()
        .map(Keyword::decorated)
        .collect())
}

/// Decorate each keyword with the default 70/20/10 phrase/exact/broad split.
pub fn apply_match_type_formatting<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    format_keywords(keywords, &MatchTypeWeights::default())
        .iter()
        .map(Keyword::decorated)
        .collect()
}
