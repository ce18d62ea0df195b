//! Ads and the ad extensions attached to them.

use serde::{Deserialize, Serialize};

/// `ad_group_ref` value meaning "not bound to a specific ad group".
pub const UNASSIGNED_GROUP_REF: &str = "ALL";

/// Maximum headline slots in the import schema.
pub const MAX_HEADLINES: usize = 15;

/// Maximum description slots in the import schema.
pub const MAX_DESCRIPTIONS: usize = 4;

/// Ad format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdKind {
    /// Responsive search ad.
    Rsa,
    /// Responsive search ad using `{KeyWord:...}` insertion.
    Dki,
    CallOnly,
}

impl AdKind {
    /// Value of the `Ad Type` column. DKI ads are responsive search ads whose
    /// text carries insertion syntax.
    pub fn csv_value(self) -> &'static str {
        match self {
            AdKind::Rsa | AdKind::Dki => "RESPONSIVE_SEARCH_AD",
            AdKind::CallOnly => "CALL_ONLY_AD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdKind::Rsa => "RSA",
            AdKind::Dki => "DKI",
            AdKind::CallOnly => "Call Only",
        }
    }
}

/// A single ad as authored or generated upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: String,
    pub kind: AdKind,
    /// Headline 1..=15, in slot order.
    pub headlines: Vec<String>,
    /// Description 1..=4, in slot order.
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub final_url: String,
    #[serde(default)]
    pub path1: Option<String>,
    #[serde(default)]
    pub path2: Option<String>,
    /// Name of the ad group this ad was written for, if any.
    #[serde(default)]
    pub ad_group_ref: Option<String>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    /// Phone number shown by call-only ads.
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
}

impl Ad {
    pub fn new(id: impl Into<String>, kind: AdKind) -> Self {
        Self {
            id: id.into(),
            kind,
            headlines: Vec::new(),
            descriptions: Vec::new(),
            final_url: String::new(),
            path1: None,
            path2: None,
            ad_group_ref: None,
            extensions: Vec::new(),
            phone: None,
            business_name: None,
        }
    }

    pub fn with_headlines<I, S>(mut self, headlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headlines = headlines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_descriptions<I, S>(mut self, descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptions = descriptions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_final_url(mut self, url: impl Into<String>) -> Self {
        self.final_url = url.into();
        self
    }

    pub fn with_paths(mut self, path1: &str, path2: &str) -> Self {
        self.path1 = Some(path1.to_string());
        self.path2 = Some(path2.to_string());
        self
    }

    pub fn with_group_ref(mut self, name: impl Into<String>) -> Self {
        self.ad_group_ref = Some(name.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Headline in 1-based slot `n`; `None` for unused slots.
    pub fn headline(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.headlines.get(i))
            .map(String::as_str)
    }

    /// Description in 1-based slot `n`; `None` for unused slots.
    pub fn description(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.descriptions.get(i))
            .map(String::as_str)
    }

    /// True when the ad is not bound to a named ad group.
    pub fn is_unassigned(&self) -> bool {
        match self.ad_group_ref.as_deref() {
            None => true,
            Some(r) => r.trim().is_empty() || r == UNASSIGNED_GROUP_REF,
        }
    }
}

/// Supplementary ad element. Each variant has its own required fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Extension {
    Sitelink {
        text: String,
        #[serde(default)]
        final_url: String,
        #[serde(default)]
        description1: Option<String>,
        #[serde(default)]
        description2: Option<String>,
    },
    Callout {
        text: String,
    },
    Call {
        phone: String,
        #[serde(default)]
        country_code: Option<String>,
    },
    Snippet {
        header: String,
        #[serde(default)]
        values: Vec<String>,
    },
    Price {
        #[serde(default)]
        header: String,
        #[serde(default)]
        amount: String,
        #[serde(default)]
        currency: String,
        #[serde(default)]
        unit: Option<String>,
    },
    App {
        app_id: String,
        #[serde(default)]
        store: String,
        #[serde(default)]
        link_text: String,
    },
    Location {
        #[serde(default)]
        business_name: String,
        address: String,
    },
    Message {
        text: String,
        #[serde(default)]
        phone: String,
    },
    LeadForm {
        headline: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        call_to_action: Option<String>,
    },
    Promotion {
        item: String,
        #[serde(default)]
        discount: String,
        #[serde(default)]
        occasion: Option<String>,
    },
    Image {
        image_url: String,
        #[serde(default)]
        alt_text: Option<String>,
    },
}

impl Extension {
    /// Value of the `Asset Type` column.
    pub fn asset_type(&self) -> &'static str {
        match self {
            Extension::Sitelink { .. } => "SITELINK",
            Extension::Callout { .. } => "CALLOUT",
            Extension::Call { .. } => "CALL",
            Extension::Snippet { .. } => "STRUCTURED_SNIPPET",
            Extension::Price { .. } => "PRICE",
            Extension::App { .. } => "APP",
            Extension::Location { .. } => "LOCATION",
            Extension::Message { .. } => "MESSAGE",
            Extension::LeadForm { .. } => "LEAD_FORM",
            Extension::Promotion { .. } => "PROMOTION",
            Extension::Image { .. } => "IMAGE",
        }
    }

    /// Value of the `Asset Name` column: the text a viewer sees.
    pub fn asset_name(&self) -> String {
        match self {
            Extension::Sitelink { text, .. }
            | Extension::Callout { text }
            | Extension::Message { text, .. } => text.clone(),
            Extension::Call {
                phone,
                country_code,
            } => match country_code.as_deref().filter(|c| !c.is_empty()) {
                Some(code) => format!("{code}: {phone}"),
                None => phone.clone(),
            },
            Extension::Snippet { header, values } => format!("{header}: {}", values.join("; ")),
            Extension::Price {
                header,
                amount,
                currency,
                unit,
            } => {
                let price = format!("{header} {amount} {currency}");
                match unit.as_deref().filter(|u| !u.is_empty()) {
                    Some(unit) => format!("{}/{unit}", price.trim()),
                    None => price.trim().to_string(),
                }
            }
            Extension::App {
                app_id,
                store,
                link_text,
            } => format!("{link_text} ({store}:{app_id})").trim().to_string(),
            Extension::Location {
                business_name,
                address,
            } if !business_name.is_empty() => format!("{business_name}, {address}"),
            Extension::Location { address, .. } => address.clone(),
            Extension::LeadForm { headline, .. } => headline.clone(),
            Extension::Promotion { item, discount, .. } => {
                format!("{discount} {item}").trim().to_string()
            }
            Extension::Image {
                image_url,
                alt_text,
            } => alt_text.clone().unwrap_or_else(|| image_url.clone()),
        }
    }

    /// Value of the `Asset URL` column, empty for kinds without a link.
    pub fn asset_url(&self) -> &str {
        match self {
            Extension::Sitelink { final_url, .. } => final_url,
            Extension::Image { image_url, .. } => image_url,
            _ => "",
        }
    }

    /// Human-readable kind used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Extension::Sitelink { .. } => "Sitelink",
            Extension::Callout { .. } => "Callout",
            Extension::Call { .. } => "Call extension",
            Extension::Snippet { .. } => "Structured snippet",
            Extension::Price { .. } => "Price extension",
            Extension::App { .. } => "App extension",
            Extension::Location { .. } => "Location extension",
            Extension::Message { .. } => "Message extension",
            Extension::LeadForm { .. } => "Lead form",
            Extension::Promotion { .. } => "Promotion",
            Extension::Image { .. } => "Image extension",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_slots_are_one_based() {
        let ad = Ad::new("a1", AdKind::Rsa).with_headlines(["one", "two"]);
        assert_eq!(ad.headline(1), Some("one"));
        assert_eq!(ad.headline(2), Some("two"));
        assert_eq!(ad.headline(3), None);
        assert_eq!(ad.headline(0), None);
    }

    #[test]
    fn unassigned_detection() {
        assert!(Ad::new("a", AdKind::Rsa).is_unassigned());
        assert!(Ad::new("a", AdKind::Rsa).with_group_ref("ALL").is_unassigned());
        assert!(Ad::new("a", AdKind::Rsa).with_group_ref("  ").is_unassigned());
        assert!(!Ad::new("a", AdKind::Rsa)
            .with_group_ref("Ad Group 1")
            .is_unassigned());
    }

    #[test]
    fn extension_json_is_tagged() {
        let ext = Extension::Callout {
            text: "Free Shipping".to_string(),
        };
        let json = serde_json::to_value(&ext).unwrap();
        assert_eq!(json["type"], "callout");
        let back: Extension = serde_json::from_value(json).unwrap();
        assert_eq!(back, ext);
    }

    #[test]
    fn asset_columns() {
        let snippet = Extension::Snippet {
            header: "Services".to_string(),
            values: vec!["Repair".to_string(), "Install".to_string()],
        };
        assert_eq!(snippet.asset_name(), "Services: Repair; Install");
        assert_eq!(snippet.asset_url(), "");

        let sitelink = Extension::Sitelink {
            text: "Contact".to_string(),
            final_url: "https://example.com/contact".to_string(),
            description1: None,
            description2: None,
        };
        assert_eq!(sitelink.asset_url(), "https://example.com/contact");

        let price = Extension::Price {
            header: "Drain cleaning".to_string(),
            amount: "99".to_string(),
            currency: "USD".to_string(),
            unit: Some("visit".to_string()),
        };
        assert_eq!(price.asset_name(), "Drain cleaning 99 USD/visit");
    }

    #[test]
    fn dki_exports_as_responsive_search_ad() {
        assert_eq!(AdKind::Dki.csv_value(), "RESPONSIVE_SEARCH_AD");
        assert_eq!(AdKind::CallOnly.csv_value(), "CALL_ONLY_AD");
    }
}
