//! Request-body validation for the scrape endpoint.
//!
//! The body is taken as raw text rather than through an extractor so
//! each failure mode maps to its own fixed message, and so requests
//! without a JSON content-type still parse.

use ladle_core::AppError;
use url::Url;

/// Validate the raw body of `POST /scrape` into a fetchable URL.
///
/// Validation only: no trailing-slash stripping, no scheme coercion.
pub fn parse_scrape_request(body: &str) -> Result<Url, AppError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|err| {
        tracing::error!(%err, "JSON parsing error");
        AppError::InvalidJson
    })?;

    let url_value = match value.as_object() {
        Some(map) if !map.is_empty() => map.get("url").ok_or(AppError::MissingUrl)?,
        _ => return Err(AppError::MissingUrl),
    };
    let raw = url_value.as_str().ok_or(AppError::InvalidUrl)?;

    match Url::parse(raw) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => Ok(url),
        // Parsed, but without a network location ("mailto:a@b", "file:///x").
        Ok(_) => Err(AppError::InvalidUrlFormat),
        // A bare path like "not-a-url" has no scheme at all.
        Err(url::ParseError::RelativeUrlWithoutBase) => Err(AppError::InvalidUrlFormat),
        Err(_) => Err(AppError::InvalidUrl),
    }
}
