//! adforge Core Library
//!
//! Keyword formatting and partitioning, campaign structure building, export
//! validation and bulk-import CSV serialization.

pub mod autosave;
pub mod builder;
pub mod classify;
pub mod config;
pub mod domain;
pub mod export;
pub mod keyword_format;
pub mod locations;
pub mod obs;
pub mod partition;
pub mod pipeline;
pub mod telemetry;
pub mod templates;
pub mod validate;

pub use domain::{
    canonical_json, compute_digest, draft_digest, Ad, AdGroupSpec, AdKind, AdforgeError, AuxSets,
    CampaignDraft, CampaignSettings, CampaignStructure, ConfigError, Extension, FunnelBuckets,
    GeoLevel, GeoSelection, GeoTarget, IntentBucket, IntentBuckets, Keyword, MatchType,
    MatchTypeWeights, NegativeKeywordSet, Result, Strategy, MAX_DESCRIPTIONS, MAX_HEADLINES,
    SHOW_ALL_PRESET, UNASSIGNED_GROUP_REF,
};

pub use autosave::DraftObserver;
pub use builder::{build_campaigns, build_from_draft, reconcile_ads, BuildInput};
pub use classify::{classify_if_missing, classify_keywords};
pub use config::ExportOptions;
pub use export::{export_rows, serialize, Row, RowType, HEADERS};
pub use keyword_format::{
    apply_match_type_formatting, clean_keyword, format_keywords, format_with_weights,
    parse_keyword, parse_negative, strip_decoration,
};
pub use locations::{resolve_locations, BuiltinCatalog, LocationCatalog};
pub use obs::{
    emit_export_blocked, emit_export_completed, emit_structure_built, emit_validation_completed,
    ExportSpan,
};
pub use partition::{partition, partition_raw, partitioner, PartitionFn, PARTITIONERS};
pub use pipeline::{export, export_structures, ExportArtifact, ExportError};
pub use telemetry::init_tracing;
pub use templates::{detect_business_type, template_ad, BusinessType, TemplateInput};
pub use validate::{
    format_report, validate_campaigns, Entity, IssueKind, Severity, ValidationIssue,
    ValidationReport,
};

/// adforge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
