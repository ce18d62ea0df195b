//! Location resolution for geo targeting.
//!
//! A [`GeoSelection`] is either free text (comma or newline separated) or a
//! percentage preset over a reference list supplied by a [`LocationCatalog`].

use std::collections::HashSet;

use crate::domain::error::ConfigError;
use crate::domain::geo::{GeoLevel, GeoSelection, GeoTarget, SHOW_ALL_PRESET};

/// Source of reference location lists, ordered most important first.
pub trait LocationCatalog {
    fn locations(&self, level: GeoLevel) -> Vec<String>;
}

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "United Kingdom", "Australia", "Germany", "France",
    "Italy", "Spain", "Netherlands", "Belgium", "Switzerland", "Sweden", "Norway",
    "Denmark", "Finland", "Poland", "Austria", "Ireland", "Portugal", "Greece",
];

const STATES: &[&str] = &[
    "California", "Texas", "New York", "Florida", "Illinois", "Pennsylvania",
    "Ohio", "Georgia", "North Carolina", "Michigan", "New Jersey", "Virginia",
    "Washington", "Arizona", "Massachusetts", "Tennessee", "Indiana", "Missouri",
    "Maryland", "Wisconsin", "Colorado", "Minnesota", "South Carolina", "Alabama",
    "Louisiana", "Kentucky", "Oregon", "Oklahoma", "Connecticut", "Utah",
];

const CITIES: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia",
    "San Antonio", "San Diego", "Dallas", "San Jose", "Austin", "Jacksonville",
    "Fort Worth", "Columbus", "Charlotte", "San Francisco", "Indianapolis", "Seattle",
    "Denver", "Washington", "Boston", "El Paso", "Nashville", "Detroit", "Oklahoma City",
    "Portland", "Las Vegas", "Memphis", "Louisville", "Baltimore", "Milwaukee", "Albuquerque",
    "Tucson", "Fresno", "Sacramento", "Kansas City", "Mesa", "Atlanta", "Omaha", "Raleigh",
    "Miami", "Long Beach", "Virginia Beach", "Oakland", "Minneapolis", "Tulsa", "Tampa",
    "Arlington", "New Orleans", "Wichita", "Cleveland",
];

/// `(first ZIP, count)` blocks for major metro areas, by metro population.
const METRO_ZIP_BLOCKS: &[(u32, u32)] = &[
    (10001, 200), (90001, 300), (60601, 250), (77001, 200), (85001, 150),
    (19101, 200), (78201, 100), (92101, 150), (75201, 150), (95101, 100),
    (78701, 100), (32201, 100), (76101, 100), (43201, 100), (28201, 100),
    (94101, 100), (46201, 100), (98101, 100), (80201, 100), (20001, 100),
    (2101, 100), (79901, 50), (37201, 50), (48201, 100), (73101, 50),
    (97201, 50), (89101, 100), (38101, 50), (40201, 50), (21201, 100),
    (53201, 50), (87101, 50), (85701, 50), (93701, 50), (95814, 50),
    (64101, 50), (85201, 50), (30301, 100), (68101, 50), (27601, 50),
    (33101, 100), (90801, 50), (23451, 50), (94601, 50), (55401, 50),
    (74101, 50), (33601, 50), (76001, 50), (70112, 50), (67201, 50),
    (44101, 100),
];

const MAX_PRESET_ZIPS: usize = 5000;

/// Built-in US-centric reference lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    fn zip_codes() -> Vec<String> {
        let mut seen = HashSet::new();
        METRO_ZIP_BLOCKS
            .iter()
            .flat_map(|&(start, count)| start..start + count)
            .map(|zip| format!("{zip:05}"))
            .filter(|zip| seen.insert(zip.clone()))
            .take(MAX_PRESET_ZIPS)
            .collect()
    }
}

impl LocationCatalog for BuiltinCatalog {
    fn locations(&self, level: GeoLevel) -> Vec<String> {
        let names = match level {
            GeoLevel::Country => COUNTRIES,
            GeoLevel::State => STATES,
            GeoLevel::City => CITIES,
            GeoLevel::Zip => return Self::zip_codes(),
        };
        names.iter().map(|s| s.to_string()).collect()
    }
}

/// Split free text on commas and newlines; trimmed, non-empty, first
/// occurrence of each entry kept.
pub fn parse_manual_locations(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

/// Top `percent`% of `list`, rounded up; the whole list for the show-all preset.
pub fn apply_preset(list: &[String], percent: u32) -> Result<Vec<String>, ConfigError> {
    if percent > 100 {
        return Err(ConfigError::PresetOutOfRange { value: percent });
    }
    if percent == SHOW_ALL_PRESET {
        return Ok(list.to_vec());
    }
    let take = (list.len() * percent as usize).div_ceil(100);
    Ok(list[..take].to_vec())
}

/// Resolve a selection into concrete targets. Manual text wins over a preset.
///
/// Returns an empty list when neither is given.
pub fn resolve_locations(
    selection: &GeoSelection,
    catalog: &dyn LocationCatalog,
) -> Result<Vec<GeoTarget>, ConfigError> {
    let names = match (&selection.manual, selection.preset) {
        (Some(text), _) if !text.trim().is_empty() => parse_manual_locations(text),
        (_, Some(percent)) => apply_preset(&catalog.locations(selection.level), percent)?,
        _ => Vec::new(),
    };
    Ok(names
        .into_iter()
        .map(|name| GeoTarget::new(selection.level, name))
        .collect())
}

/// The single target used when a campaign has no explicit locations.
pub fn country_target(selection: &GeoSelection) -> GeoTarget {
    GeoTarget::new(GeoLevel::Country, selection.country.clone())
}
