//! UTM tracking parameters for ad final URLs.

use url::form_urlencoded;

/// Context an ad is exported in.
#[derive(Debug, Clone, Copy)]
pub struct UtmContext<'a> {
    pub source: &'a str,
    pub medium: &'a str,
    pub campaign: &'a str,
    pub ad_group: &'a str,
    /// First keyword of the ad group, if any.
    pub term: &'a str,
    pub content: &'a str,
}

/// Append UTM parameters to `url`.
///
/// Uses `&` when the URL already has a query and `?` otherwise; a fragment
/// stays at the end. URLs that already carry `utm_source` and blank URLs are
/// returned unchanged.
pub fn append_utm(url: &str, ctx: &UtmContext<'_>) -> String {
    if url.trim().is_empty() {
        return url.to_string();
    }
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let has_query = base.contains('?');
    if has_query && base.contains("utm_source=") {
        return url.to_string();
    }

    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("utm_source", ctx.source)
        .append_pair("utm_medium", ctx.medium)
        .append_pair("utm_campaign", ctx.campaign)
        .append_pair("utm_adgroup", ctx.ad_group)
        .append_pair("utm_term", ctx.term)
        .append_pair("utm_content", ctx.content)
        .finish();

    let separator = if base.ends_with('?') || base.ends_with('&') {
        ""
    } else if has_query {
        "&"
    } else {
        "?"
    };
    match fragment {
        Some(fragment) => format!("{base}{separator}{params}#{fragment}"),
        None => format!("{base}{separator}{params}"),
    }
}
