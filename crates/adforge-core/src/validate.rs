//! Export validation against the bulk-import schema.
//!
//! [`validate_campaigns`] walks every campaign tree and collects the complete
//! set of violations in one pass. Errors block export; warnings never do.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::ad::{Ad, AdKind, Extension, MAX_DESCRIPTIONS, MAX_HEADLINES};
use crate::domain::campaign::{AdGroupSpec, CampaignStructure};
use crate::domain::geo::GeoLevel;
use crate::keyword_format::strip_decoration;
use crate::obs;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_KEYWORD_LEN: usize = 80;
pub const MAX_HEADLINE_LEN: usize = 30;
pub const MAX_DESCRIPTION_LEN: usize = 90;
pub const MAX_PATH_LEN: usize = 15;
pub const MAX_SITELINK_TEXT_LEN: usize = 25;
pub const MAX_SITELINK_DESCRIPTION_LEN: usize = 35;
pub const MAX_CALLOUT_LEN: usize = 25;
pub const MAX_SNIPPET_VALUE_LEN: usize = 25;
pub const MAX_MESSAGE_LEN: usize = 35;
pub const MAX_LEAD_FORM_HEADLINE_LEN: usize = 30;
pub const MAX_PROMOTION_ITEM_LEN: usize = 20;
/// Hard limit on location targets per campaign.
pub const MAX_LOCATION_TARGETS: usize = 25_000;
/// Above this many targets the import tool slows down noticeably.
pub const LOCATION_TARGET_WARNING: usize = 5_000;
/// Invalid ZIP codes reported one by one before summarizing the rest.
const MAX_LISTED_INVALID_ZIPS: usize = 10;

static HTTP_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme pattern"));
static ZIP_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NoCampaigns,
    MissingRequiredField,
    LengthExceeded,
    InvalidUrl,
    EmptyAdGroup,
    /// Warning only: a default ad is synthesized at export.
    MissingAdsInGroup,
    InvalidLocation,
    LocationLimit,
    DuplicateLocation,
    InvalidDateRange,
    /// Two ad groups in one campaign share a name.
    DuplicateAdGroup,
    /// Warning only: the ad names no ad group of its campaign and is not exported.
    UnassignedAd,
}

/// Which part of the campaign tree an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Campaign,
    AdGroup,
    Keyword,
    Ad,
    Extension,
    NegativeKeyword,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub entity: Entity,
    /// Schema field name, e.g. `headline1` or `final_url`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(kind: IssueKind, entity: Entity, field: &str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            entity,
            field: field.to_string(),
            message,
        }
    }

    pub fn warning(kind: IssueKind, entity: Entity, field: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, entity, field, message)
        }
    }
}

/// All issues found for a set of campaigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when nothing blocks export.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    fn record(&mut self, issue: Option<ValidationIssue>) {
        if let Some(issue) = issue {
            self.push(issue);
        }
    }

    /// Errors of the given kind.
    pub fn errors_of(&self, kind: IssueKind) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().filter(move |i| i.kind == kind)
    }
}

/// Whether `url` is an absolute http(s) URL with a host.
pub fn is_valid_url(url: &str) -> bool {
    let url = url.trim();
    HTTP_SCHEME.is_match(url)
        && Url::parse(url)
            .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
            .unwrap_or(false)
}

/// Whether `zip` is a US ZIP or ZIP+4 code.
pub fn is_valid_zip(zip: &str) -> bool {
    ZIP_CODE.is_match(zip.trim())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn preview(s: &str, max: usize) -> String {
    if char_len(s) <= max {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max).collect::<String>())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn check_required(
    value: Option<&str>,
    entity: Entity,
    field: &str,
    ctx: &str,
    label: &str,
) -> Option<ValidationIssue> {
    is_blank(value).then(|| {
        ValidationIssue::error(
            IssueKind::MissingRequiredField,
            entity,
            field,
            format!("{ctx}: {label} is required"),
        )
    })
}

fn check_max_len(
    value: Option<&str>,
    max: usize,
    entity: Entity,
    field: &str,
    ctx: &str,
    label: &str,
) -> Option<ValidationIssue> {
    let value = value?;
    let len = char_len(value);
    (len > max).then(|| {
        ValidationIssue::error(
            IssueKind::LengthExceeded,
            entity,
            field,
            format!(
                "{ctx}: {label} \"{}\" exceeds {max} characters ({len} chars)",
                preview(value, 30)
            ),
        )
    })
}

fn check_url(value: &str, entity: Entity, field: &str, ctx: &str) -> Option<ValidationIssue> {
    (!is_valid_url(value)).then(|| {
        ValidationIssue::error(
            IssueKind::InvalidUrl,
            entity,
            field,
            format!("{ctx}: Invalid URL format \"{value}\""),
        )
    })
}

/// Validate every campaign. Never fails fast.
pub fn validate_campaigns(campaigns: &[CampaignStructure]) -> ValidationReport {
    let mut report = ValidationReport::default();
    if campaigns.is_empty() {
        report.push(ValidationIssue::error(
            IssueKind::NoCampaigns,
            Entity::Campaign,
            "campaigns",
            "No campaigns found. At least one campaign is required.".to_string(),
        ));
    }
    for (index, campaign) in campaigns.iter().enumerate() {
        validate_campaign(campaign, index, &mut report);
    }
    obs::emit_validation_completed(report.errors.len(), report.warnings.len());
    report
}

fn validate_campaign(campaign: &CampaignStructure, index: usize, report: &mut ValidationReport) {
    let ctx = if campaign.name.trim().is_empty() {
        format!("Campaign #{}", index + 1)
    } else {
        format!("Campaign \"{}\"", campaign.name)
    };

    report.record(check_required(
        Some(campaign.name.as_str()),
        Entity::Campaign,
        "campaign_name",
        &ctx,
        "Campaign name",
    ));
    report.record(check_max_len(
        Some(campaign.name.as_str()),
        MAX_NAME_LEN,
        Entity::Campaign,
        "campaign_name",
        &ctx,
        "Campaign name",
    ));

    if let (Some(start), Some(end)) = (campaign.settings.start_date, campaign.settings.end_date) {
        if end < start {
            report.push(ValidationIssue::error(
                IssueKind::InvalidDateRange,
                Entity::Campaign,
                "end_date",
                format!("{ctx}: End date {end} is before start date {start}"),
            ));
        }
    }

    if campaign.ad_groups.is_empty() {
        report.push(ValidationIssue::error(
            IssueKind::MissingRequiredField,
            Entity::Campaign,
            "ad_groups",
            format!("{ctx}: No ad groups found. At least one ad group is required."),
        ));
    }
    let mut names = HashSet::new();
    for (i, group) in campaign.ad_groups.iter().enumerate() {
        let group_ctx = format!("{ctx} > Ad Group #{}", i + 1);
        if !names.insert(group.name.as_str()) {
            report.push(ValidationIssue::error(
                IssueKind::DuplicateAdGroup,
                Entity::AdGroup,
                "ad_group_name",
                format!(
                    "{group_ctx}: Ad group name \"{}\" is already used in this campaign",
                    group.name
                ),
            ));
        }
        validate_ad_group(campaign, group, &group_ctx, report);
    }

    validate_ads(campaign, &ctx, report);
    validate_locations(campaign, &ctx, report);
}

fn validate_ad_group(
    campaign: &CampaignStructure,
    group: &AdGroupSpec,
    ctx: &str,
    report: &mut ValidationReport,
) {
    report.record(check_required(
        Some(group.name.as_str()),
        Entity::AdGroup,
        "ad_group_name",
        ctx,
        "Ad group name",
    ));
    report.record(check_max_len(
        Some(group.name.as_str()),
        MAX_NAME_LEN,
        Entity::AdGroup,
        "ad_group_name",
        ctx,
        "Ad group name",
    ));

    let ctx = format!("{ctx} \"{}\"", group.name);

    if group.keywords.is_empty() {
        report.push(ValidationIssue::error(
            IssueKind::EmptyAdGroup,
            Entity::AdGroup,
            "keywords",
            format!("{ctx}: No keywords found. At least one keyword is required."),
        ));
    }
    for (i, keyword) in group.keywords.iter().enumerate() {
        let text = strip_decoration(&keyword.text);
        if text.is_empty() {
            report.push(ValidationIssue::error(
                IssueKind::MissingRequiredField,
                Entity::Keyword,
                "keyword",
                format!("{ctx}: Keyword #{} is empty", i + 1),
            ));
        }
        report.record(check_max_len(
            Some(text.as_str()),
            MAX_KEYWORD_LEN,
            Entity::Keyword,
            "keyword",
            &ctx,
            "Keyword",
        ));
    }

    if campaign.ads_for(&group.name).next().is_none() {
        report.push(ValidationIssue::warning(
            IssueKind::MissingAdsInGroup,
            Entity::AdGroup,
            "ads",
            format!("{ctx}: No ads found. A default ad will be created."),
        ));
    }

    for negative in campaign.negatives.for_group(&group.name) {
        let text = strip_decoration(negative);
        report.record(check_max_len(
            Some(text.as_str()),
            MAX_KEYWORD_LEN,
            Entity::NegativeKeyword,
            "negative_keyword",
            &ctx,
            "Negative keyword",
        ));
    }
}

/// Every ad in the campaign is checked exactly once, bound to a group or not.
fn validate_ads(campaign: &CampaignStructure, ctx: &str, report: &mut ValidationReport) {
    let groups: HashSet<&str> = campaign.ad_groups.iter().map(|g| g.name.as_str()).collect();
    let mut ordinals: HashMap<&str, usize> = HashMap::new();
    let mut unbound = 0usize;

    for ad in &campaign.ads {
        let group = ad
            .ad_group_ref
            .as_deref()
            .filter(|name| !ad.is_unassigned() && groups.contains(name));
        let ad_ctx = match group {
            Some(name) => {
                let n = ordinals.entry(name).or_default();
                *n += 1;
                format!("{ctx} > Ad Group \"{name}\" > Ad #{n}")
            }
            None => {
                unbound += 1;
                let ad_ctx = format!("{ctx} > Unassigned Ad #{unbound}");
                report.push(ValidationIssue::warning(
                    IssueKind::UnassignedAd,
                    Entity::Ad,
                    "ad_group",
                    format!(
                        "{ad_ctx}: Ad \"{}\" is not in any ad group and will not be exported",
                        ad.id
                    ),
                ));
                ad_ctx
            }
        };
        validate_ad(ad, &ad_ctx, report);
    }
}

fn validate_ad(ad: &Ad, ctx: &str, report: &mut ValidationReport) {
    report.record(check_required(
        Some(ad.final_url.as_str()),
        Entity::Ad,
        "final_url",
        ctx,
        "Final URL",
    ));
    if !ad.final_url.trim().is_empty() {
        report.record(check_url(&ad.final_url, Entity::Ad, "final_url", ctx));
    }

    report.record(check_required(
        ad.headline(1),
        Entity::Ad,
        "headline1",
        ctx,
        "Headline 1",
    ));
    for (i, headline) in ad.headlines.iter().enumerate() {
        report.record(check_max_len(
            Some(headline.as_str()),
            MAX_HEADLINE_LEN,
            Entity::Ad,
            &format!("headline{}", i + 1),
            ctx,
            &format!("Headline {}", i + 1),
        ));
    }
    if ad.headlines.len() > MAX_HEADLINES {
        report.push(ValidationIssue::error(
            IssueKind::LengthExceeded,
            Entity::Ad,
            "headlines",
            format!(
                "{ctx}: {} headlines given, at most {MAX_HEADLINES} are allowed",
                ad.headlines.len()
            ),
        ));
    }

    report.record(check_required(
        ad.description(1),
        Entity::Ad,
        "description1",
        ctx,
        "Description 1",
    ));
    for (i, description) in ad.descriptions.iter().enumerate() {
        report.record(check_max_len(
            Some(description.as_str()),
            MAX_DESCRIPTION_LEN,
            Entity::Ad,
            &format!("description{}", i + 1),
            ctx,
            &format!("Description {}", i + 1),
        ));
    }
    if ad.descriptions.len() > MAX_DESCRIPTIONS {
        report.push(ValidationIssue::error(
            IssueKind::LengthExceeded,
            Entity::Ad,
            "descriptions",
            format!(
                "{ctx}: {} descriptions given, at most {MAX_DESCRIPTIONS} are allowed",
                ad.descriptions.len()
            ),
        ));
    }

    report.record(check_max_len(
        ad.path1.as_deref(),
        MAX_PATH_LEN,
        Entity::Ad,
        "path1",
        ctx,
        "Path 1",
    ));
    report.record(check_max_len(
        ad.path2.as_deref(),
        MAX_PATH_LEN,
        Entity::Ad,
        "path2",
        ctx,
        "Path 2",
    ));

    if ad.kind == AdKind::CallOnly {
        report.record(check_required(
            ad.phone.as_deref(),
            Entity::Ad,
            "phone_number",
            ctx,
            "Phone number for a call-only ad",
        ));
    }

    for (i, extension) in ad.extensions.iter().enumerate() {
        let ext_ctx = format!("{ctx} > Extension #{} ({})", i + 1, extension.label());
        validate_extension(extension, &ext_ctx, report);
    }
}

fn validate_extension(extension: &Extension, ctx: &str, report: &mut ValidationReport) {
    let e = Entity::Extension;
    match extension {
        Extension::Sitelink {
            text,
            final_url,
            description1,
            description2,
        } => {
            report.record(check_required(
                Some(text.as_str()),
                e,
                "sitelink_text",
                ctx,
                "Sitelink text",
            ));
            report.record(check_max_len(
                Some(text.as_str()),
                MAX_SITELINK_TEXT_LEN,
                e,
                "sitelink_text",
                ctx,
                "Sitelink text",
            ));
            report.record(check_required(
                Some(final_url.as_str()),
                e,
                "sitelink_url",
                ctx,
                "Sitelink URL",
            ));
            for (field, label, value) in [
                ("sitelink_description1", "Sitelink description 1", description1),
                ("sitelink_description2", "Sitelink description 2", description2),
            ] {
                report.record(check_max_len(
                    value.as_deref(),
                    MAX_SITELINK_DESCRIPTION_LEN,
                    e,
                    field,
                    ctx,
                    label,
                ));
            }
        }
        Extension::Callout { text } => {
            report.record(check_required(
                Some(text.as_str()),
                e,
                "callout_text",
                ctx,
                "Callout text",
            ));
            report.record(check_max_len(
                Some(text.as_str()),
                MAX_CALLOUT_LEN,
                e,
                "callout_text",
                ctx,
                "Callout text",
            ));
        }
        Extension::Call { phone, .. } => {
            report.record(check_required(
                Some(phone.as_str()),
                e,
                "phone_number",
                ctx,
                "Phone number",
            ));
        }
        Extension::Snippet { header, values } => {
            report.record(check_required(
                Some(header.as_str()),
                e,
                "snippet_header",
                ctx,
                "Snippet header",
            ));
            if values.iter().all(|v| v.trim().is_empty()) {
                report.push(ValidationIssue::error(
                    IssueKind::MissingRequiredField,
                    e,
                    "snippet_values",
                    format!("{ctx}: At least one snippet value is required"),
                ));
            }
            for value in values {
                report.record(check_max_len(
                    Some(value.as_str()),
                    MAX_SNIPPET_VALUE_LEN,
                    e,
                    "snippet_values",
                    ctx,
                    "Snippet value",
                ));
            }
        }
        Extension::Price { amount, .. } => {
            report.record(check_required(
                Some(amount.as_str()),
                e,
                "price_amount",
                ctx,
                "Price amount",
            ));
        }
        Extension::App { app_id, .. } => {
            report.record(check_required(Some(app_id.as_str()), e, "app_id", ctx, "App ID"));
        }
        Extension::Location { address, .. } => {
            report.record(check_required(Some(address.as_str()), e, "address", ctx, "Address"));
        }
        Extension::Message { text, phone } => {
            report.record(check_required(
                Some(text.as_str()),
                e,
                "message_text",
                ctx,
                "Message text",
            ));
            report.record(check_max_len(
                Some(text.as_str()),
                MAX_MESSAGE_LEN,
                e,
                "message_text",
                ctx,
                "Message text",
            ));
            report.record(check_required(
                Some(phone.as_str()),
                e,
                "phone_number",
                ctx,
                "Phone number",
            ));
        }
        Extension::LeadForm { headline, .. } => {
            report.record(check_required(
                Some(headline.as_str()),
                e,
                "lead_form_headline",
                ctx,
                "Lead form headline",
            ));
            report.record(check_max_len(
                Some(headline.as_str()),
                MAX_LEAD_FORM_HEADLINE_LEN,
                e,
                "lead_form_headline",
                ctx,
                "Lead form headline",
            ));
        }
        Extension::Promotion { item, .. } => {
            report.record(check_required(
                Some(item.as_str()),
                e,
                "promotion_item",
                ctx,
                "Promotion item",
            ));
            report.record(check_max_len(
                Some(item.as_str()),
                MAX_PROMOTION_ITEM_LEN,
                e,
                "promotion_item",
                ctx,
                "Promotion item",
            ));
        }
        Extension::Image { image_url, .. } => {
            report.record(check_required(
                Some(image_url.as_str()),
                e,
                "image_url",
                ctx,
                "Image URL",
            ));
            if !image_url.trim().is_empty() {
                report.record(check_url(image_url, e, "image_url", ctx));
            }
        }
    }
}

fn validate_locations(campaign: &CampaignStructure, ctx: &str, report: &mut ValidationReport) {
    let mut invalid_zips = Vec::new();
    let mut unique = HashSet::new();

    for target in &campaign.geo_targets {
        let name = target.name.trim();
        if name.is_empty() {
            report.push(ValidationIssue::error(
                IssueKind::MissingRequiredField,
                Entity::Location,
                "location",
                format!("{ctx}: Location target name is required"),
            ));
            continue;
        }
        if target.level == GeoLevel::Zip && !is_valid_zip(name) {
            invalid_zips.push(name);
        }
        unique.insert((target.level, name.to_lowercase()));
    }

    for zip in invalid_zips.iter().take(MAX_LISTED_INVALID_ZIPS) {
        report.push(ValidationIssue::error(
            IssueKind::InvalidLocation,
            Entity::Location,
            "zip_code",
            format!(
                "{ctx}: Invalid ZIP code format \"{zip}\". ZIP codes must be 5 digits \
                 (e.g., 12345) or 5+4 format (e.g., 12345-6789)"
            ),
        ));
    }
    if invalid_zips.len() > MAX_LISTED_INVALID_ZIPS {
        report.push(ValidationIssue::error(
            IssueKind::InvalidLocation,
            Entity::Location,
            "zip_code",
            format!(
                "{ctx}: {} more invalid ZIP codes found",
                invalid_zips.len() - MAX_LISTED_INVALID_ZIPS
            ),
        ));
    }

    let count = unique.len();
    if count > MAX_LOCATION_TARGETS {
        report.push(ValidationIssue::error(
            IssueKind::LocationLimit,
            Entity::Location,
            "locations",
            format!(
                "{ctx}: Too many location targets ({count}). At most {MAX_LOCATION_TARGETS} \
                 are supported per campaign."
            ),
        ));
    } else if count > LOCATION_TARGET_WARNING {
        report.push(ValidationIssue::warning(
            IssueKind::LocationLimit,
            Entity::Location,
            "locations",
            format!(
                "{ctx}: Large number of location targets ({count}). Imports may be slow with \
                 more than {LOCATION_TARGET_WARNING}; consider splitting into multiple campaigns."
            ),
        ));
    }

    let named = campaign
        .geo_targets
        .iter()
        .filter(|t| !t.name.trim().is_empty())
        .count();
    let duplicates = named - count;
    if duplicates > 0 {
        report.push(ValidationIssue::warning(
            IssueKind::DuplicateLocation,
            Entity::Location,
            "locations",
            format!(
                "{ctx}: {duplicates} duplicate location target{} found. Duplicates will be \
                 removed during export.",
                if duplicates > 1 { "s" } else { "" }
            ),
        ));
    }
}

/// Numbered, human-readable listing of a report.
pub fn format_report(report: &ValidationReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    if !report.errors.is_empty() {
        lines.push("ERRORS (must fix before export):".to_string());
        lines.push(String::new());
        for (i, issue) in report.errors.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, issue.message));
        }
    }
    if !report.warnings.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("WARNINGS (recommended to fix):".to_string());
        lines.push(String::new());
        for (i, issue) in report.warnings.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, issue.message));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::GeoTarget;
    use crate::domain::keyword::{Keyword, MatchType};
    use chrono::NaiveDate;

    fn base_ad() -> Ad {
        Ad::new("ad-1", AdKind::Rsa)
            .with_headlines(["Fast Local Plumber", "Call Today"])
            .with_descriptions(["Leaks fixed the same day."])
            .with_final_url("https://plumb.example/")
            .with_group_ref("Ad Group 1")
    }

    fn base() -> CampaignStructure {
        let mut c = CampaignStructure::new("Plumbing");
        c.geo_targets = vec![GeoTarget::new(GeoLevel::Country, "United States")];
        c.ad_groups = vec![AdGroupSpec::new(
            "Ad Group 1",
            vec![Keyword::new("plumber", MatchType::Phrase)],
        )];
        c.ads = vec![base_ad()];
        c
    }

    fn with_extension(extension: Extension) -> CampaignStructure {
        let mut c = base();
        c.ads[0].extensions.push(extension);
        c
    }

    fn kinds(issues: &[ValidationIssue]) -> Vec<(IssueKind, &str)> {
        issues.iter().map(|i| (i.kind, i.field.as_str())).collect()
    }

    fn assert_errors(cases: Vec<(&str, CampaignStructure, Vec<(IssueKind, &str)>)>) {
        for (name, campaign, expected) in cases {
            let report = validate_campaigns(&[campaign]);
            assert_eq!(kinds(&report.errors), expected, "{name}");
        }
    }

    use super::IssueKind::{EmptyAdGroup, LengthExceeded, MissingRequiredField};

    #[test]
    fn base_structure_is_clean() {
        let report = validate_campaigns(&[base()]);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    fn edited(edit: impl FnOnce(&mut CampaignStructure)) -> CampaignStructure {
        let mut c = base();
        edit(&mut c);
        c
    }

    #[test]
    fn campaign_and_ad_group_rules() {
        let long_group = "g".repeat(256);
        assert_errors(vec![
            (
                "campaign name required",
                edited(|c| c.name = "  ".to_string()),
                vec![(MissingRequiredField, "campaign_name")],
            ),
            (
                "campaign name too long",
                edited(|c| c.name = "c".repeat(256)),
                vec![(LengthExceeded, "campaign_name")],
            ),
            (
                "ad group name too long",
                edited(|c| {
                    c.ad_groups[0].name = long_group.clone();
                    c.ads[0].ad_group_ref = Some(long_group.clone());
                }),
                vec![(LengthExceeded, "ad_group_name")],
            ),
            (
                "ad group without keywords",
                edited(|c| c.ad_groups[0].keywords.clear()),
                vec![(EmptyAdGroup, "keywords")],
            ),
            (
                "duplicate ad group names",
                edited(|c| c.ad_groups.push(c.ad_groups[0].clone())),
                vec![(IssueKind::DuplicateAdGroup, "ad_group_name")],
            ),
            (
                "end before start",
                edited(|c| {
                    c.settings.start_date = NaiveDate::from_ymd_opt(2026, 10, 18);
                    c.settings.end_date = NaiveDate::from_ymd_opt(2026, 10, 1);
                }),
                vec![(IssueKind::InvalidDateRange, "end_date")],
            ),
        ]);
    }

    #[test]
    fn keyword_rules() {
        let push = |text: String| {
            edited(move |c| c.ad_groups[0].keywords.push(Keyword::new(text, MatchType::Broad)))
        };
        assert_errors(vec![
            ("empty keyword", push(String::new()), vec![(MissingRequiredField, "keyword")]),
            ("keyword too long", push("k".repeat(81)), vec![(LengthExceeded, "keyword")]),
            ("keyword at limit", push("k".repeat(80)), vec![]),
        ]);
    }

    #[test]
    fn ad_rules() {
        assert_errors(vec![
            (
                "missing description1",
                edited(|c| c.ads[0].descriptions.clear()),
                vec![(MissingRequiredField, "description1")],
            ),
            (
                "missing headline1",
                edited(|c| c.ads[0].headlines.clear()),
                vec![(MissingRequiredField, "headline1")],
            ),
            (
                "missing final url",
                edited(|c| c.ads[0].final_url.clear()),
                vec![(MissingRequiredField, "final_url")],
            ),
            (
                "long path2",
                edited(|c| c.ads[0].path2 = Some("p".repeat(16))),
                vec![(LengthExceeded, "path2")],
            ),
            (
                "call-only without phone",
                edited(|c| c.ads[0].kind = AdKind::CallOnly),
                vec![(MissingRequiredField, "phone_number")],
            ),
            (
                "call-only with phone",
                edited(|c| {
                    c.ads[0].kind = AdKind::CallOnly;
                    c.ads[0].phone = Some("+1 512 555 0100".to_string());
                }),
                vec![],
            ),
        ]);
    }

    #[test]
    fn sitelink_callout_and_call_rules() {
        let sitelink = |text: &str, url: &str, d1: Option<&str>| Extension::Sitelink {
            text: text.to_string(),
            final_url: url.to_string(),
            description1: d1.map(str::to_string),
            description2: None,
        };
        let url = "https://plumb.example/offers";
        assert_errors(vec![
            ("sitelink ok", with_extension(sitelink("Offers", url, Some("Save today"))), vec![]),
            (
                "sitelink text required",
                with_extension(sitelink("", url, None)),
                vec![(MissingRequiredField, "sitelink_text")],
            ),
            (
                "sitelink text too long",
                with_extension(sitelink("s".repeat(26).as_str(), url, None)),
                vec![(LengthExceeded, "sitelink_text")],
            ),
            (
                "sitelink url required",
                with_extension(sitelink("Offers", "", None)),
                vec![(MissingRequiredField, "sitelink_url")],
            ),
            (
                "sitelink description too long",
                with_extension(sitelink("Offers", url, Some("d".repeat(36).as_str()))),
                vec![(LengthExceeded, "sitelink_description1")],
            ),
            (
                "callout text required",
                with_extension(Extension::Callout { text: String::new() }),
                vec![(MissingRequiredField, "callout_text")],
            ),
            (
                "callout text too long",
                with_extension(Extension::Callout { text: "c".repeat(26) }),
                vec![(LengthExceeded, "callout_text")],
            ),
            (
                "call phone required",
                with_extension(Extension::Call { phone: " ".to_string(), country_code: None }),
                vec![(MissingRequiredField, "phone_number")],
            ),
        ]);
    }

    #[test]
    fn location_rules() {
        let mut zips = base();
        zips.geo_targets = vec![
            GeoTarget::new(GeoLevel::Zip, "78701"),
            GeoTarget::new(GeoLevel::Zip, "78701-1234"),
            GeoTarget::new(GeoLevel::Zip, "7870"),
        ];
        let report = validate_campaigns(&[zips]);
        assert_eq!(kinds(&report.errors), vec![(IssueKind::InvalidLocation, "zip_code")]);

        let mut dupes = base();
        dupes.geo_targets = vec![
            GeoTarget::new(GeoLevel::City, "Austin"),
            GeoTarget::new(GeoLevel::City, "austin"),
        ];
        let report = validate_campaigns(&[dupes]);
        assert!(report.is_valid());
        assert_eq!(kinds(&report.warnings), vec![(IssueKind::DuplicateLocation, "locations")]);
    }

    #[test]
    fn ads_outside_any_group_are_still_checked() {
        for group_ref in [None, Some("ALL"), Some("Old Group")] {
            let mut c = base();
            let mut stray = base_ad();
            stray.ad_group_ref = group_ref.map(str::to_string);
            stray.headlines[0] = "h".repeat(31);
            stray.final_url = "ftp://plumb.example".to_string();
            c.ads.push(stray);

            let report = validate_campaigns(&[c]);
            assert!(!report.is_valid(), "{group_ref:?}");
            assert_eq!(
                kinds(&report.errors),
                vec![(IssueKind::InvalidUrl, "final_url"), (LengthExceeded, "headline1")]
            );
            assert_eq!(kinds(&report.warnings), vec![(IssueKind::UnassignedAd, "ad_group")]);
        }
    }

    #[test]
    fn duplicate_group_names_check_each_ad_once() {
        let mut c = base();
        c.ad_groups.push(c.ad_groups[0].clone());
        c.ads[0].headlines[0] = "h".repeat(31);
        let report = validate_campaigns(&[c]);
        assert_eq!(report.errors_of(LengthExceeded).count(), 1);
    }

    #[test]
    fn url_checks() {
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("HTTP://example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https:// bad host"));
    }

    #[test]
    fn zip_checks() {
        assert!(is_valid_zip("02101"));
        assert!(is_valid_zip("12345-6789"));
        assert!(!is_valid_zip("1234"));
        assert!(!is_valid_zip("12345-67"));
        assert!(!is_valid_zip("abcde"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let text = "é".repeat(30);
        let check = |text: &str| check_max_len(Some(text), 30, Entity::Ad, "headline1", "ctx", "H");
        assert!(check(&text).is_none());
        assert!(check(&"é".repeat(31)).is_some());
    }

    #[test]
    fn no_campaigns_is_an_error() {
        let report = validate_campaigns(&[]);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].kind, IssueKind::NoCampaigns);
    }

    #[test]
    fn format_report_numbers_each_section() {
        let mut report = ValidationReport::default();
        report.push(ValidationIssue::error(
            IssueKind::InvalidUrl,
            Entity::Ad,
            "final_url",
            "bad url".to_string(),
        ));
        report.push(ValidationIssue::warning(
            IssueKind::MissingAdsInGroup,
            Entity::AdGroup,
            "ads",
            "no ads".to_string(),
        ));
        let text = format_report(&report);
        assert_eq!(
            text,
            "ERRORS (must fix before export):\n\n1. bad url\n\nWARNINGS (recommended to fix):\n\n1. no ads"
        );
    }
}
