use serde_json::{Map, Value};

/// A fully assembled recipe extraction result.
///
/// The seven required fields are populated together or not at all; the
/// assembler never returns a partial required set. Optional fields live
/// in `extra` and are flattened into the same JSON object on
/// serialization, so an absent optional field produces no key rather
/// than a null.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Recipe {
    pub title: String,
    /// Total time in minutes.
    pub total_time: u64,
    /// Yield as reported by the site, e.g. "4 servings".
    pub yields: String,
    pub ingredients: Vec<String>,
    /// Newline-joined preparation steps.
    pub instructions: String,
    /// Host name of the originating site.
    pub host: String,
    /// Primary recipe image URL.
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
