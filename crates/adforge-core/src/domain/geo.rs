//! Geo-targeting selection and resolved targets.

use serde::{Deserialize, Serialize};

/// Granularity of a location target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoLevel {
    #[default]
    Country,
    State,
    City,
    Zip,
}

impl GeoLevel {
    /// Value of the `Location Type` column.
    pub fn csv_value(self) -> &'static str {
        match self {
            GeoLevel::Country => "COUNTRY",
            GeoLevel::State => "STATE",
            GeoLevel::City => "CITY",
            GeoLevel::Zip => "POSTAL_CODE",
        }
    }
}

/// One resolved location target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoTarget {
    pub level: GeoLevel,
    pub name: String,
}

impl GeoTarget {
    pub fn new(level: GeoLevel, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }
}

/// Raw geo-targeting input as captured from the user.
///
/// `manual` holds comma- or newline-separated free text. `preset` selects the
/// top share of the reference list for `level`, as a percentage in `1..=100`;
/// `0` selects the whole list. Manual text wins when both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoSelection {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub level: GeoLevel,
    #[serde(default)]
    pub manual: Option<String>,
    #[serde(default)]
    pub preset: Option<u32>,
}

/// Preset value meaning "every location in the reference list".
pub const SHOW_ALL_PRESET: u32 = 0;

fn default_country() -> String {
    "United States".to_string()
}

impl Default for GeoSelection {
    fn default() -> Self {
        Self {
            country: default_country(),
            level: GeoLevel::Country,
            manual: None,
            preset: None,
        }
    }
}

impl GeoSelection {
    pub fn manual(level: GeoLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            manual: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn preset(level: GeoLevel, value: u32) -> Self {
        Self {
            level,
            preset: Some(value),
            ..Self::default()
        }
    }
}
