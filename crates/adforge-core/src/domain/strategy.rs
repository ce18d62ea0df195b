//! Structure strategies and the pre-classified keyword buckets some of them consume.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AdforgeError;

/// How a flat keyword list is organized into ad groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Skag,
    Stag,
    StagPlus,
    Ngram,
    Intent,
    AlphaBeta,
    MatchType,
    Geo,
    Funnel,
    BrandSplit,
    Competitor,
    Mix,
}

impl Strategy {
    pub const ALL: [Strategy; 12] = [
        Strategy::Skag,
        Strategy::Stag,
        Strategy::StagPlus,
        Strategy::Ngram,
        Strategy::Intent,
        Strategy::AlphaBeta,
        Strategy::MatchType,
        Strategy::Geo,
        Strategy::Funnel,
        Strategy::BrandSplit,
        Strategy::Competitor,
        Strategy::Mix,
    ];

    /// Stable identifier used in drafts and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Strategy::Skag => "skag",
            Strategy::Stag => "stag",
            Strategy::StagPlus => "stag_plus",
            Strategy::Ngram => "ngram",
            Strategy::Intent => "intent",
            Strategy::AlphaBeta => "alpha_beta",
            Strategy::MatchType => "match_type",
            Strategy::Geo => "geo",
            Strategy::Funnel => "funnel",
            Strategy::BrandSplit => "brand_split",
            Strategy::Competitor => "competitor",
            Strategy::Mix => "mix",
        }
    }

    /// Whether the strategy yields one campaign per location.
    pub fn is_geo(self) -> bool {
        matches!(self, Strategy::Geo)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Strategy {
    type Err = AdforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['-', '+'], "_");
        let norm = match norm.as_str() {
            // "stag+" normalizes to "stag_"
            "stag_" | "stagplus" => "stag_plus".to_string(),
            "n_gram" => "ngram".to_string(),
            "alphabeta" => "alpha_beta".to_string(),
            _ => norm,
        };
        Strategy::ALL
            .into_iter()
            .find(|st| st.id() == norm)
            .ok_or_else(|| AdforgeError::UnknownStrategy(s.to_string()))
    }
}

/// Search-intent bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentBucket {
    HighIntent,
    Research,
    Brand,
    Competitor,
}

impl IntentBucket {
    /// Emission order.
    pub const ALL: [IntentBucket; 4] = [
        IntentBucket::HighIntent,
        IntentBucket::Research,
        IntentBucket::Brand,
        IntentBucket::Competitor,
    ];

    pub fn group_name(self) -> &'static str {
        match self {
            IntentBucket::HighIntent => "High Intent",
            IntentBucket::Research => "Research",
            IntentBucket::Brand => "Brand",
            IntentBucket::Competitor => "Competitor",
        }
    }
}

fn all_intents() -> Vec<IntentBucket> {
    IntentBucket::ALL.to_vec()
}

/// Keywords classified by search intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentBuckets {
    #[serde(default)]
    pub high_intent: Vec<String>,
    #[serde(default)]
    pub research: Vec<String>,
    #[serde(default)]
    pub brand: Vec<String>,
    #[serde(default)]
    pub competitor: Vec<String>,
    /// Buckets the user chose to emit.
    #[serde(default = "all_intents")]
    pub selected: Vec<IntentBucket>,
}

impl Default for IntentBuckets {
    fn default() -> Self {
        Self {
            high_intent: Vec::new(),
            research: Vec::new(),
            brand: Vec::new(),
            competitor: Vec::new(),
            selected: all_intents(),
        }
    }
}

impl IntentBuckets {
    pub fn bucket(&self, which: IntentBucket) -> &[String] {
        match which {
            IntentBucket::HighIntent => &self.high_intent,
            IntentBucket::Research => &self.research,
            IntentBucket::Brand => &self.brand,
            IntentBucket::Competitor => &self.competitor,
        }
    }

    pub fn is_selected(&self, which: IntentBucket) -> bool {
        self.selected.contains(&which)
    }
}

/// Keywords classified by funnel stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelBuckets {
    #[serde(default)]
    pub tof: Vec<String>,
    #[serde(default)]
    pub mof: Vec<String>,
    #[serde(default)]
    pub bof: Vec<String>,
}

/// Pre-classified keyword sets consumed by the bucket strategies.
///
/// Entries are raw keyword strings; they are matched back to the formatted
/// keyword list by cleaned text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxSets {
    #[serde(default)]
    pub intent: IntentBuckets,
    #[serde(default)]
    pub funnel: FunnelBuckets,
    #[serde(default)]
    pub alpha: Vec<String>,
    #[serde(default)]
    pub beta: Vec<String>,
    #[serde(default)]
    pub brand: Vec<String>,
    #[serde(default)]
    pub non_brand: Vec<String>,
    #[serde(default)]
    pub competitor: Vec<String>,
}
