//! Deterministic ad-copy templates.
//!
//! Used for default ads synthesized at export time and as the offline
//! substitute when the generation service is unavailable.

use serde::{Deserialize, Serialize};

use crate::domain::ad::{Ad, AdKind, MAX_DESCRIPTIONS, MAX_HEADLINES};
use crate::keyword_format::{clean_keyword, FALLBACK_KEYWORD};

/// Used when neither a landing page nor a configured default URL exists.
pub const EXAMPLE_BASE_URL: &str = "https://www.example.com";

const HEADLINE_LIMIT: usize = 30;
const DESCRIPTION_LIMIT: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Emergency,
    Local,
    Product,
    Service,
}

const EMERGENCY_TERMS: &[&str] = &["emergency", "24/7", "urgent"];
const LOCAL_TERMS: &[&str] = &["near me", "nearby", "local"];
const PRODUCT_TERMS: &[&str] = &[
    "buy", "shop", "purchase", "product", "order", "cart", "price", "sale",
];
const SERVICE_TERMS: &[&str] = &["service", "repair", "install", "fix", "hire", "book", "schedule"];
const SERVICE_INDUSTRIES: &[&str] =
    &["plumbing", "electrical", "hvac", "legal", "medical", "cleaning"];

/// Guess the business type from keywords, then industry. `None` when
/// neither says anything recognizable.
pub fn detect_business_type<S: AsRef<str>>(keywords: &[S], industry: &str) -> Option<BusinessType> {
    let text = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let has = |terms: &[&str]| terms.iter().any(|t| text.contains(t));

    if has(EMERGENCY_TERMS) {
        Some(BusinessType::Emergency)
    } else if has(LOCAL_TERMS) {
        Some(BusinessType::Local)
    } else if has(PRODUCT_TERMS) {
        Some(BusinessType::Product)
    } else if has(SERVICE_TERMS) {
        Some(BusinessType::Service)
    } else {
        let industry = industry.to_lowercase();
        SERVICE_INDUSTRIES
            .iter()
            .any(|i| industry.contains(i))
            .then_some(BusinessType::Service)
    }
}

/// Cut to `limit` characters, replacing the tail with `...` when too long.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Lowercase, whitespace runs replaced by `-`.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Inputs for a template ad.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInput {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl TemplateInput {
    fn main_keyword(&self) -> String {
        match self.keywords.first() {
            Some(kw) => clean_keyword(kw),
            None if !self.industry.trim().is_empty() => self.industry.trim().to_string(),
            None => FALLBACK_KEYWORD.to_string(),
        }
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }
}

fn product_copy(kw: &str) -> (Vec<String>, Vec<String>) {
    (
        vec![
            format!("Shop {kw} Deals"),
            format!("Buy {kw} Online"),
            format!("{kw} - Best Prices"),
            format!("Quality {kw} Products"),
            format!("Top Rated {kw}"),
            format!("Free Shipping on {kw}"),
            format!("{kw} - Next Day Delivery"),
            format!("Official {kw} Store"),
        ],
        vec![
            format!("Shop {kw} at unbeatable prices. Best prices guaranteed. Free shipping on orders over $50. Easy returns."),
            format!("Looking for {kw}? Browse our huge selection at competitive prices. Customer reviews, fast delivery."),
            format!("Get the best {kw} deals online. Quality products, verified sellers, secure checkout. Order now!"),
            format!("Quality {kw} with fast shipping and easy returns. Shop our latest collection. Secure checkout."),
        ],
    )
}

fn emergency_copy(kw: &str, location: Option<&str>) -> (Vec<String>, Vec<String>) {
    let in_location = location.map(|l| format!(" in {l}")).unwrap_or_default();
    (
        vec![
            format!("24/7 Emergency {kw}"),
            format!("{kw} - Open Now"),
            format!("Urgent {kw} Help"),
            format!("Fast {kw} Response"),
            format!("{kw} in 30 Minutes"),
            format!("Emergency {kw} Fix"),
            format!("Immediate {kw} Help"),
        ],
        vec![
            format!("{kw} emergency? We're here 24/7! Rapid response for all urgent issues. Call now - we're on our way!"),
            format!("Don't panic! Our emergency {kw} team is available around the clock. Fast arrival, expert repairs."),
            format!("24/7 emergency {kw} services{in_location}. We respond in 30 minutes or less."),
            format!("{kw} emergency? Licensed professionals ready to solve your crisis day or night. No extra fees!"),
        ],
    )
}

fn service_copy(kw: &str, location: Option<&str>) -> (Vec<String>, Vec<String>) {
    let in_location = location.map(|l| format!(" in {l}")).unwrap_or_default();
    let mut headlines = vec![
        format!("Professional {kw}"),
        format!("Expert {kw} Services"),
        format!("Licensed {kw}"),
        format!("Trusted {kw} Experts"),
        format!("Quality {kw} Service"),
        format!("Affordable {kw}"),
        format!("Fast {kw} Service"),
        format!("Same Day {kw}"),
    ];
    if let Some(loc) = location {
        headlines.push(format!("{kw} in {loc}"));
        headlines.push(format!("Local {kw} Near You"));
    }
    (
        headlines,
        vec![
            format!("Professional {kw} services you can trust. Licensed, insured & satisfaction guaranteed. Free estimates available."),
            format!("Looking for reliable {kw}? We provide fast, affordable services{in_location}. Call now or book online!"),
            format!("Expert {kw} at fair prices. Our certified technicians deliver quality workmanship. Same-day service available."),
            format!("Trusted {kw} professionals{in_location}. From repairs to installations, we handle it all. 5-star rated."),
        ],
    )
}

/// Build one ad of `kind` from the templates for the detected business type.
///
/// Headlines are cut to 30 characters and descriptions to 90, both ending in
/// `...` when cut. RSA ads carry up to 15 headlines and 4 descriptions, DKI
/// ads 3 and 2, call-only ads 2 and 2.
pub fn template_ad(id: impl Into<String>, kind: AdKind, input: &TemplateInput) -> Ad {
    let business = detect_business_type(&input.keywords, &input.industry)
        .unwrap_or(BusinessType::Service);
    let kw = input.main_keyword();
    let (headlines, descriptions) = match business {
        BusinessType::Product => product_copy(&kw),
        BusinessType::Emergency => emergency_copy(&kw, input.location()),
        BusinessType::Local | BusinessType::Service => service_copy(&kw, input.location()),
    };

    let (max_headlines, max_descriptions) = match kind {
        AdKind::Rsa => (MAX_HEADLINES, MAX_DESCRIPTIONS),
        AdKind::Dki => (3, 2),
        AdKind::CallOnly => (2, 2),
    };
    let headlines: Vec<String> = headlines
        .iter()
        .map(|h| truncate_with_ellipsis(h, HEADLINE_LIMIT))
        .take(max_headlines)
        .collect();
    let descriptions: Vec<String> = descriptions
        .iter()
        .map(|d| truncate_with_ellipsis(d, DESCRIPTION_LIMIT))
        .take(max_descriptions)
        .collect();

    let final_url = input
        .base_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{EXAMPLE_BASE_URL}/{}", slugify(&kw)));
    let (path1, path2) = match business {
        BusinessType::Product => ("shop", "now"),
        _ => ("services", "contact"),
    };

    let mut ad = Ad::new(id, kind)
        .with_headlines(headlines)
        .with_descriptions(descriptions)
        .with_final_url(final_url)
        .with_paths(path1, path2);
    if kind == AdKind::CallOnly {
        ad.phone = input.phone.clone();
        ad.business_name = Some(
            input
                .business_name
                .clone()
                .unwrap_or_else(|| "Business".to_string()),
        );
    }
    ad
}
