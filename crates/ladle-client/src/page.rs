//! Document-level helpers shared by the extraction strategies.

use scraper::{Html, Selector};
use serde_json::{Value, json};
use url::Url;

/// Host name of the originating URL, with a leading `www.` stripped.
pub(crate) fn host_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// `<link rel="canonical">` target, resolved against the page URL.
pub(crate) fn canonical_link(document: &Html, base: &Url) -> Option<String> {
    let selector = Selector::parse("link[rel='canonical']").unwrap();
    let href = document.select(&selector).next()?.value().attr("href")?;
    match base.join(href) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(_) => Some(href.to_string()),
    }
}

/// All in-page anchor targets, as `{"href": ...}` objects.
pub(crate) fn collect_links(document: &Html) -> Vec<Value> {
    let selector = Selector::parse("a[href]").unwrap();
    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .map(|href| json!({ "href": href }))
        .collect()
}
