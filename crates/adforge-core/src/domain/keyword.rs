//! Keywords and match types.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::keyword_format::{match_type_display, strip_decoration};

/// Keyword matching mode, encoded in keyword text via punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Broad,
    Phrase,
    Exact,
}

impl MatchType {
    /// All match types in export order.
    pub const ALL: [MatchType; 3] = [MatchType::Broad, MatchType::Phrase, MatchType::Exact];

    /// Human-readable name, also used for match-type split group names.
    pub fn label(self) -> &'static str {
        match self {
            MatchType::Broad => "Broad",
            MatchType::Phrase => "Phrase",
            MatchType::Exact => "Exact",
        }
    }

    /// Value of the `Match Type` column for keyword rows.
    pub fn csv_value(self) -> &'static str {
        match self {
            MatchType::Broad => "BROAD",
            MatchType::Phrase => "PHRASE",
            MatchType::Exact => "EXACT",
        }
    }

    /// Value of the `Match Type` column for negative keyword rows.
    pub fn negative_csv_value(self) -> &'static str {
        match self {
            MatchType::Broad => "NEGATIVE_BROAD",
            MatchType::Phrase => "NEGATIVE_PHRASE",
            MatchType::Exact => "NEGATIVE_EXACT",
        }
    }

    /// Wrap `text` in this match type's decoration.
    pub fn decorate(self, text: &str) -> String {
        match self {
            MatchType::Broad => text.to_string(),
            MatchType::Phrase => format!("\"{}\"", text),
            MatchType::Exact => format!("[{}]", text),
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A keyword with its match type. `text` never carries decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub match_type: MatchType,
}

impl Keyword {
    pub fn new(text: impl Into<String>, match_type: MatchType) -> Self {
        Self {
            text: text.into(),
            match_type,
        }
    }

    /// Parse a possibly decorated keyword (`kw`, `"kw"`, `[kw]`).
    pub fn parse(raw: &str) -> Self {
        Self {
            text: strip_decoration(raw),
            match_type: match_type_display(raw),
        }
    }

    /// The keyword rendered with its match-type decoration.
    pub fn decorated(&self) -> String {
        self.match_type.decorate(&self.text)
    }

    /// Same text, different match type.
    pub fn with_match_type(&self, match_type: MatchType) -> Self {
        Self {
            text: self.text.clone(),
            match_type,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.decorated())
    }
}

/// Percentage split used when assigning match types to a flat keyword list.
///
/// Each keyword at index `i` draws `(i * 37) % 100`; draws below `phrase` are
/// phrase match, the next `exact` points are exact match, the rest broad.
/// The default (70/20/10) reproduces exports produced before the split was
/// configurable, byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTypeWeights {
    pub phrase: u32,
    pub exact: u32,
    pub broad: u32,
}

impl Default for MatchTypeWeights {
    fn default() -> Self {
        Self {
            phrase: 70,
            exact: 20,
            broad: 10,
        }
    }
}

impl MatchTypeWeights {
    /// Reject weights that do not cover the full 0..100 draw range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.phrase + self.exact + self.broad;
        if total != 100 {
            return Err(ConfigError::WeightsNotNormalized { total });
        }
        Ok(())
    }

    /// Match type for a draw in `0..100`.
    pub fn pick(&self, draw: u32) -> MatchType {
        if draw < self.phrase {
            MatchType::Phrase
        } else if draw < self.phrase + self.exact {
            MatchType::Exact
        } else {
            MatchType::Broad
        }
    }
}
