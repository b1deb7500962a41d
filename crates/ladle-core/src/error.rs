use thiserror::Error;

/// Application-wide error types for Ladle.
///
/// Validation variants carry the exact messages the HTTP API returns;
/// transport variants display the bare underlying message because the
/// endpoint layer exposes it verbatim in the error body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body was not valid JSON.
    #[error("Invalid JSON format")]
    InvalidJson,

    /// Request body had no `url` field.
    #[error("No URL provided")]
    MissingUrl,

    /// The supplied URL lacks a scheme or host component.
    #[error("Invalid URL format")]
    InvalidUrlFormat,

    /// The supplied URL could not be parsed at all.
    #[error("Invalid URL")]
    InvalidUrl,

    /// One of the required recipe accessors failed.
    #[error("Failed to extract core recipe data")]
    CoreExtraction,

    /// HTTP request failed (fetching a page).
    #[error("{0}")]
    Http(String),

    /// Network/connection error.
    #[error("{0}")]
    Network(String),

    /// Outbound fetch timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The extraction engine failed before field assembly started.
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    /// Invalid process configuration.
    #[error("{0}")]
    Config(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true for request-validation failures, reported as HTTP 400.
    /// Everything else is a server-side failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidJson
                | AppError::MissingUrl
                | AppError::InvalidUrlFormat
                | AppError::InvalidUrl
        )
    }
}

/// Failures local to the extraction engine.
///
/// Any accessor may fail depending on what the site's markup carries;
/// the assembler decides whether a failure aborts the scrape (required
/// fields) or only suppresses one field (optional fields).
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The recipe markup carries no data for this field.
    #[error("field `{0}` not present in recipe markup")]
    FieldMissing(&'static str),

    /// The extractor that matched this document does not implement the accessor.
    #[error("accessor `{0}` not supported by this extractor")]
    NotSupported(&'static str),

    /// Markup was recognized but could not be interpreted.
    #[error("malformed recipe markup: {0}")]
    Malformed(String),

    /// No registered strategy recognized recipe markup in the document.
    #[error("no recipe markup recognized in document")]
    NoRecipe,
}
