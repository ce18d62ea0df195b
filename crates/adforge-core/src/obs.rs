//! Structured observability hooks for the export pipeline.
//!
//! Events are emitted at `info!` with an `event` field so they can be
//! filtered in JSON output. Configure verbosity with `RUST_LOG`.

use tracing::info;

/// RAII guard that enters an export-scoped span.
///
/// ```ignore
/// let _span = ExportSpan::enter("Plumbing");
/// // events below carry campaign = "Plumbing"
/// ```
pub struct ExportSpan {
    _span: tracing::span::EnteredSpan,
}

impl ExportSpan {
    pub fn enter(campaign: &str) -> Self {
        let span = tracing::info_span!("adforge.export", campaign = %campaign);
        Self {
            _span: span.entered(),
        }
    }
}

/// Campaign trees built from a draft.
pub fn emit_structure_built(campaign: &str, campaigns: usize, ad_groups: usize, ads: usize) {
    info!(
        event = "structure.built",
        campaign = %campaign,
        campaigns = campaigns,
        ad_groups = ad_groups,
        ads = ads,
    );
}

/// The first ad group received the last-resort ad fallback.
pub fn emit_ads_fallback_assigned(ad_group: &str, ads: usize) {
    info!(event = "structure.ads_fallback", ad_group = %ad_group, ads = ads);
}

pub fn emit_validation_completed(errors: usize, warnings: usize) {
    info!(
        event = "validation.completed",
        errors = errors,
        warnings = warnings,
        valid = errors == 0,
    );
}

/// Export refused because validation found errors.
pub fn emit_export_blocked(campaign: &str, errors: usize) {
    tracing::warn!(event = "export.blocked", campaign = %campaign, errors = errors);
}

pub fn emit_export_completed(campaign: &str, file_name: &str, rows: usize, bytes: usize) {
    info!(
        event = "export.completed",
        campaign = %campaign,
        file_name = %file_name,
        rows = rows,
        bytes = bytes,
    );
}

/// A default ad was synthesized for an ad group without ads.
pub fn emit_default_ad_synthesized(campaign: &str, ad_group: &str) {
    info!(event = "export.default_ad", campaign = %campaign, ad_group = %ad_group);
}

/// The observed draft changed.
pub fn emit_draft_changed(digest: &str) {
    info!(event = "draft.changed", digest = %digest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_span_enter() {
        let _span = ExportSpan::enter("test-campaign");
        emit_validation_completed(0, 1);
    }
}
