//! Bulk-import column layout and row construction.

/// Header row, in column order.
pub const HEADERS: [&str; 52] = [
    "Row Type",
    "Campaign",
    "Campaign ID",
    "Campaign Status",
    "Campaign Type",
    "Campaign Budget",
    "Budget Type",
    "Bidding Strategy Type",
    "Start Date",
    "End Date",
    "Location Type",
    "Location Code",
    "AdGroup",
    "AdGroup Status",
    "Default Max CPC",
    "Keyword",
    "Match Type",
    "Keyword Status",
    "Keyword Max CPC",
    "Keyword Final URL",
    "Ad Type",
    "Ad Status",
    "Headline 1",
    "Headline 2",
    "Headline 3",
    "Headline 4",
    "Headline 5",
    "Headline 6",
    "Headline 7",
    "Headline 8",
    "Headline 9",
    "Headline 10",
    "Headline 11",
    "Headline 12",
    "Headline 13",
    "Headline 14",
    "Headline 15",
    "Description 1",
    "Description 2",
    "Description 3",
    "Description 4",
    "Final URL",
    "Final Mobile URL",
    "Path1",
    "Path2",
    "Tracking Template",
    "Custom Parameters",
    "Asset Type",
    "Asset Name",
    "Asset URL",
    "Negative Keyword",
    "Operation",
];

const FIRST_HEADLINE: usize = 22;
const FIRST_DESCRIPTION: usize = 37;

/// Entity a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    Campaign,
    Location,
    AdGroup,
    Keyword,
    Ad,
    Asset,
    NegativeKeyword,
}

impl RowType {
    pub fn csv_value(self) -> &'static str {
        match self {
            RowType::Campaign => "CAMPAIGN",
            RowType::Location => "LOCATION",
            RowType::AdGroup => "ADGROUP",
            RowType::Keyword => "KEYWORD",
            RowType::Ad => "AD",
            RowType::Asset => "ASSET",
            RowType::NegativeKeyword => "NEGATIVE_KEYWORD",
        }
    }
}

/// A named column. Headline and description slots are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Campaign,
    CampaignStatus,
    CampaignType,
    CampaignBudget,
    BudgetType,
    BiddingStrategyType,
    StartDate,
    EndDate,
    LocationType,
    LocationCode,
    AdGroup,
    AdGroupStatus,
    Keyword,
    MatchType,
    KeywordStatus,
    AdType,
    AdStatus,
    Headline(usize),
    Description(usize),
    FinalUrl,
    Path1,
    Path2,
    AssetType,
    AssetName,
    AssetUrl,
    NegativeKeyword,
}

impl Column {
    pub fn index(self) -> usize {
        match self {
            Column::Campaign => 1,
            Column::CampaignStatus => 3,
            Column::CampaignType => 4,
            Column::CampaignBudget => 5,
            Column::BudgetType => 6,
            Column::BiddingStrategyType => 7,
            Column::StartDate => 8,
            Column::EndDate => 9,
            Column::LocationType => 10,
            Column::LocationCode => 11,
            Column::AdGroup => 12,
            Column::AdGroupStatus => 13,
            Column::Keyword => 15,
            Column::MatchType => 16,
            Column::KeywordStatus => 17,
            Column::AdType => 20,
            Column::AdStatus => 21,
            Column::Headline(n) => FIRST_HEADLINE + n - 1,
            Column::Description(n) => FIRST_DESCRIPTION + n - 1,
            Column::FinalUrl => 41,
            Column::Path1 => 43,
            Column::Path2 => 44,
            Column::AssetType => 47,
            Column::AssetName => 48,
            Column::AssetUrl => 49,
            Column::NegativeKeyword => 50,
        }
    }
}

const ROW_TYPE: usize = 0;
const OPERATION: usize = 51;

/// One CSV record, every column present; unset columns are blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// A row of `row_type` with `Operation = NEW`.
    pub fn new(row_type: RowType) -> Self {
        let mut cells = vec![String::new(); HEADERS.len()];
        cells[ROW_TYPE] = row_type.csv_value().to_string();
        cells[OPERATION] = "NEW".to_string();
        Self { cells }
    }

    pub fn set(mut self, column: Column, value: impl Into<String>) -> Self {
        self.cells[column.index()] = value.into();
        self
    }

    pub fn get(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    pub fn row_type(&self) -> &str {
        &self.cells[ROW_TYPE]
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_indices_match_headers() {
        let named = [
            (Column::Campaign, "Campaign"),
            (Column::CampaignBudget, "Campaign Budget"),
            (Column::LocationCode, "Location Code"),
            (Column::AdGroup, "AdGroup"),
            (Column::MatchType, "Match Type"),
            (Column::AdType, "Ad Type"),
            (Column::Headline(1), "Headline 1"),
            (Column::Headline(15), "Headline 15"),
            (Column::Description(1), "Description 1"),
            (Column::Description(4), "Description 4"),
            (Column::FinalUrl, "Final URL"),
            (Column::Path2, "Path2"),
            (Column::AssetUrl, "Asset URL"),
            (Column::NegativeKeyword, "Negative Keyword"),
        ];
        for (column, header) in named {
            assert_eq!(HEADERS[column.index()], header);
        }
        assert_eq!(HEADERS[ROW_TYPE], "Row Type");
        assert_eq!(HEADERS[OPERATION], "Operation");
    }

    #[test]
    fn new_row_is_full_width() {
        let row = Row::new(RowType::Keyword).set(Column::Keyword, "plumber");
        assert_eq!(row.cells().len(), HEADERS.len());
        assert_eq!(row.row_type(), "KEYWORD");
        assert_eq!(row.get(Column::Keyword), "plumber");
        assert_eq!(row.get(Column::AdGroup), "");
    }
}
