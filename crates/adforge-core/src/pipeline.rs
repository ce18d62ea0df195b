//! End-to-end export: build, validate, serialize.

use crate::builder::build_from_draft;
use crate::config::ExportOptions;
use crate::domain::campaign::CampaignStructure;
use crate::domain::draft::CampaignDraft;
use crate::domain::error::AdforgeError;
use crate::export::{export_rows, render};
use crate::locations::LocationCatalog;
use crate::obs::{self, ExportSpan};
use crate::validate::{validate_campaigns, ValidationReport};

/// Why an export produced no file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export blocked by {} validation error(s)", .0.errors.len())]
    Blocked(ValidationReport),

    #[error(transparent)]
    Build(#[from] AdforgeError),
}

/// A successful export.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub csv: String,
    /// Validation result; holds warnings only.
    pub report: ValidationReport,
    pub campaign_count: usize,
    /// Data rows, header excluded.
    pub row_count: usize,
    pub file_name: String,
}

/// File-system safe campaign name: runs of anything but ASCII letters,
/// digits, `-` and `_` collapse to one `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let mut out = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() {
        "campaign".to_string()
    } else {
        out.to_string()
    }
}

/// `{stem}_{YYYY-MM-DD}.csv`, or `{stem}.csv` without a date.
pub fn export_file_name(campaign: &str, options: &ExportOptions) -> String {
    let stem = sanitize_file_stem(campaign);
    match options.date {
        Some(date) => format!("{stem}_{}.csv", date.format("%Y-%m-%d")),
        None => format!("{stem}.csv"),
    }
}

/// Validate and serialize already-built campaigns.
pub fn export_structures(
    campaign_name: &str,
    campaigns: &[CampaignStructure],
    options: &ExportOptions,
) -> Result<ExportArtifact, ExportError> {
    let report = validate_campaigns(campaigns);
    if !report.is_valid() {
        obs::emit_export_blocked(campaign_name, report.errors.len());
        return Err(ExportError::Blocked(report));
    }

    let rows = export_rows(campaigns, options);
    let csv = render(&rows);
    let file_name = export_file_name(campaign_name, options);
    obs::emit_export_completed(campaign_name, &file_name, rows.len(), csv.len());

    Ok(ExportArtifact {
        csv,
        report,
        campaign_count: campaigns.len(),
        row_count: rows.len(),
        file_name,
    })
}

/// Run the whole pipeline for a draft. No CSV is produced when validation
/// finds errors.
pub fn export(
    draft: &CampaignDraft,
    catalog: &dyn LocationCatalog,
    options: &ExportOptions,
) -> Result<ExportArtifact, ExportError> {
    let _span = ExportSpan::enter(&draft.campaign_name);
    let campaigns = build_from_draft(draft, catalog)?;
    export_structures(&draft.campaign_name, &campaigns, options)
}
