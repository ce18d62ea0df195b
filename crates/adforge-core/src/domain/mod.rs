//! Domain models for adforge.
//!
//! - `CampaignDraft`: raw inputs, the only persisted state
//! - `CampaignStructure`: derived campaign tree
//! - `Keyword`, `Ad`, `Extension`: the leaves of that tree

pub mod ad;
pub mod campaign;
pub mod digest;
pub mod draft;
pub mod error;
pub mod geo;
pub mod keyword;
pub mod strategy;

pub use ad::{Ad, AdKind, Extension, MAX_DESCRIPTIONS, MAX_HEADLINES, UNASSIGNED_GROUP_REF};
pub use campaign::{AdGroupSpec, CampaignSettings, CampaignStructure, NegativeKeywordSet};
pub use digest::{canonical_json, compute_digest, draft_digest};
pub use draft::CampaignDraft;
pub use error::{AdforgeError, ConfigError, Result};
pub use geo::{GeoLevel, GeoSelection, GeoTarget, SHOW_ALL_PRESET};
pub use keyword::{Keyword, MatchType, MatchTypeWeights};
pub use strategy::{AuxSets, FunnelBuckets, IntentBucket, IntentBuckets, Strategy};
