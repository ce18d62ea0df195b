//! CSV serialization in the bulk-import "Row Type" layout.
//!
//! Per campaign: the campaign row, location rows, then for every ad group
//! its ad group row, keyword rows, ad rows, asset rows and negative keyword
//! rows. Output is a pure function of the input.

pub mod csv;
pub mod default_ad;
pub mod rows;
pub mod utm;

use std::borrow::Cow;
use std::collections::HashSet;

use crate::config::ExportOptions;
use crate::domain::ad::{Ad, MAX_DESCRIPTIONS, MAX_HEADLINES};
use crate::domain::campaign::{AdGroupSpec, CampaignStructure};
use crate::keyword_format::parse_negative;
use crate::obs;

pub use default_ad::default_ad;
pub use rows::{Column, Row, RowType, HEADERS};
pub use utm::{append_utm, UtmContext};

fn campaign_row(campaign: &CampaignStructure) -> Row {
    let settings = &campaign.settings;
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());
    Row::new(RowType::Campaign)
        .set(Column::Campaign, campaign.name.clone())
        .set(Column::CampaignStatus, "ENABLED")
        .set(Column::CampaignType, "SEARCH")
        .set(
            Column::CampaignBudget,
            settings.daily_budget.map(|b| b.to_string()).unwrap_or_default(),
        )
        .set(Column::BudgetType, "DAILY")
        .set(Column::BiddingStrategyType, settings.bidding_strategy.clone())
        .set(Column::StartDate, date(settings.start_date).unwrap_or_default())
        .set(Column::EndDate, date(settings.end_date).unwrap_or_default())
        .set(Column::LocationType, "COUNTRY")
        .set(Column::LocationCode, settings.country_code.clone())
}

fn ad_row(
    campaign: &CampaignStructure,
    group: &AdGroupSpec,
    ad: &Ad,
    options: &ExportOptions,
) -> Row {
    let final_url = if options.add_utm {
        let ctx = UtmContext {
            source: &options.utm_source,
            medium: &options.utm_medium,
            campaign: &campaign.name,
            ad_group: &group.name,
            term: group.keywords.first().map_or("", |k| k.text.as_str()),
            content: &ad.id,
        };
        append_utm(&ad.final_url, &ctx)
    } else {
        ad.final_url.clone()
    };

    let mut row = Row::new(RowType::Ad)
        .set(Column::Campaign, campaign.name.clone())
        .set(Column::AdGroup, group.name.clone())
        .set(Column::AdType, ad.kind.csv_value())
        .set(Column::AdStatus, "ENABLED")
        .set(Column::FinalUrl, final_url)
        .set(Column::Path1, ad.path1.clone().unwrap_or_default())
        .set(Column::Path2, ad.path2.clone().unwrap_or_default());
    for (i, headline) in ad.headlines.iter().take(MAX_HEADLINES).enumerate() {
        row = row.set(Column::Headline(i + 1), headline.clone());
    }
    for (i, description) in ad.descriptions.iter().take(MAX_DESCRIPTIONS).enumerate() {
        row = row.set(Column::Description(i + 1), description.clone());
    }
    row
}

fn group_rows(
    campaign: &CampaignStructure,
    group: &AdGroupSpec,
    options: &ExportOptions,
    out: &mut Vec<Row>,
) {
    out.push(
        Row::new(RowType::AdGroup)
            .set(Column::Campaign, campaign.name.clone())
            .set(Column::AdGroup, group.name.clone())
            .set(Column::AdGroupStatus, "ENABLED"),
    );

    for keyword in &group.keywords {
        out.push(
            Row::new(RowType::Keyword)
                .set(Column::Campaign, campaign.name.clone())
                .set(Column::AdGroup, group.name.clone())
                .set(Column::Keyword, keyword.text.clone())
                .set(Column::MatchType, keyword.match_type.csv_value())
                .set(Column::KeywordStatus, "ENABLED"),
        );
    }

    let mut ads: Vec<Cow<'_, Ad>> = campaign.ads_for(&group.name).map(Cow::Borrowed).collect();
    if ads.is_empty() {
        obs::emit_default_ad_synthesized(&campaign.name, &group.name);
        ads.push(Cow::Owned(default_ad(campaign, group, options)));
    }
    for ad in &ads {
        out.push(ad_row(campaign, group, ad, options));
    }

    // Ads in one group often share extensions; emit each asset once.
    let mut seen = HashSet::new();
    for extension in ads.iter().flat_map(|ad| ad.extensions.iter()) {
        let name = extension.asset_name();
        let key = (extension.asset_type(), name.clone(), extension.asset_url().to_string());
        if !seen.insert(key) {
            continue;
        }
        out.push(
            Row::new(RowType::Asset)
                .set(Column::Campaign, campaign.name.clone())
                .set(Column::AdGroup, group.name.clone())
                .set(Column::AssetType, extension.asset_type())
                .set(Column::AssetName, name)
                .set(Column::AssetUrl, extension.asset_url()),
        );
    }

    for raw in campaign.negatives.for_group(&group.name) {
        if raw.trim().is_empty() {
            continue;
        }
        let negative = parse_negative(raw);
        out.push(
            Row::new(RowType::NegativeKeyword)
                .set(Column::Campaign, campaign.name.clone())
                .set(Column::AdGroup, group.name.clone())
                .set(Column::NegativeKeyword, negative.text)
                .set(Column::MatchType, negative.match_type.negative_csv_value()),
        );
    }
}

/// Flatten one campaign into rows, header excluded.
pub fn campaign_rows(campaign: &CampaignStructure, options: &ExportOptions) -> Vec<Row> {
    let mut out = vec![campaign_row(campaign)];
    for target in &campaign.geo_targets {
        out.push(
            Row::new(RowType::Location)
                .set(Column::Campaign, campaign.name.clone())
                .set(Column::LocationType, target.level.csv_value())
                .set(Column::LocationCode, target.name.clone()),
        );
    }
    for group in &campaign.ad_groups {
        group_rows(campaign, group, options, &mut out);
    }
    out
}

/// All data rows for `campaigns`, in export order.
pub fn export_rows(campaigns: &[CampaignStructure], options: &ExportOptions) -> Vec<Row> {
    campaigns
        .iter()
        .flat_map(|c| campaign_rows(c, options))
        .collect()
}

/// Render rows as CSV text with a header line.
pub fn render(rows: &[Row]) -> String {
    let mut out = String::new();
    csv::write_record(&mut out, &HEADERS);
    for row in rows {
        csv::write_record(&mut out, row.cells());
    }
    out
}

/// Serialize campaigns to CSV text. Identical inputs give identical bytes.
pub fn serialize(campaigns: &[CampaignStructure], options: &ExportOptions) -> String {
    render(&export_rows(campaigns, options))
}
