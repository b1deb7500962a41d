use std::future::Future;

use serde_json::Value;
use url::Url;

use crate::error::{AppError, ExtractError};

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Field accessors over a recipe recognized in a fetched document.
///
/// The first seven accessors are the required set; the assembler calls
/// them as one group and aborts the scrape if any of them fails. The
/// rest are optional: a failure only suppresses that field. Optional
/// accessors default to `NotSupported` so a strategy implements only
/// what its markup can carry.
pub trait RecipeExtractor: Send + Sync {
    fn title(&self) -> Result<String, ExtractError>;
    /// Total time in minutes.
    fn total_time(&self) -> Result<u64, ExtractError>;
    fn yields(&self) -> Result<String, ExtractError>;
    fn ingredients(&self) -> Result<Vec<String>, ExtractError>;
    /// Newline-joined preparation steps.
    fn instructions(&self) -> Result<String, ExtractError>;
    fn host(&self) -> Result<String, ExtractError>;
    fn image(&self) -> Result<String, ExtractError>;

    fn ingredient_groups(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("ingredient_groups"))
    }

    fn instructions_list(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("instructions_list"))
    }

    fn canonical_url(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("canonical_url"))
    }

    fn keywords(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("keywords"))
    }

    fn nutrients(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("nutrients"))
    }

    fn equipment(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("equipment"))
    }

    fn cooking_method(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("cooking_method"))
    }

    fn dietary_restrictions(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("dietary_restrictions"))
    }

    fn links(&self) -> Result<Value, ExtractError> {
        Err(ExtractError::NotSupported("links"))
    }
}

/// Recognizes one flavor of recipe markup and builds an extractor over it.
///
/// A strategy that does not find its markup in the document returns an
/// error and the registry moves on to the next one.
pub trait ExtractorStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, html: &str, url: &Url) -> Result<Box<dyn RecipeExtractor>, ExtractError>;
}

/// Ordered set of extraction strategies, tried first to last.
#[derive(Default)]
pub struct ExtractorRegistry {
    strategies: Vec<Box<dyn ExtractorStrategy>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, strategy: impl ExtractorStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Returns the first extractor whose strategy recognizes the document.
    pub fn extract(
        &self,
        html: &str,
        url: &Url,
    ) -> Result<Box<dyn RecipeExtractor>, ExtractError> {
        for strategy in &self.strategies {
            match strategy.extract(html, url) {
                Ok(extractor) => {
                    tracing::debug!(strategy = strategy.name(), "recipe markup recognized");
                    return Ok(extractor);
                }
                Err(err) => {
                    tracing::debug!(strategy = strategy.name(), %err, "strategy declined document");
                }
            }
        }
        Err(ExtractError::NoRecipe)
    }
}
