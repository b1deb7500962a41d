//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests, also used
//! by the other crates' test suites.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use url::Url;

use crate::error::{AppError, ExtractError};
use crate::traits::{ExtractorStrategy, Fetcher, RecipeExtractor};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configured response once, then a default
/// HTML string.
#[derive(Clone)]
pub struct MockFetcher {
    response: Arc<Mutex<Option<Result<String, AppError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Some(Ok(html.to_string())))),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            response: Arc::new(Mutex::new(Some(Err(error)))),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("<html><body>default</body></html>".to_string()))
    }
}

// ---------------------------------------------------------------------------
// MockRecipeExtractor
// ---------------------------------------------------------------------------

/// Mock extractor with per-field configurable outcomes.
///
/// `complete()` answers every required accessor; `without` makes a named
/// accessor fail and `with_optional` supplies an optional field value.
#[derive(Clone, Default)]
pub struct MockRecipeExtractor {
    pub title: String,
    pub total_time: u64,
    pub yields: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub host: String,
    pub image: String,
    optional: HashMap<&'static str, Value>,
    failing: HashSet<&'static str>,
}

impl MockRecipeExtractor {
    /// An extractor whose seven required accessors all succeed.
    pub fn complete() -> Self {
        Self {
            title: "Test Recipe".into(),
            total_time: 45,
            yields: "4 servings".into(),
            ingredients: vec!["2 eggs".into(), "100g flour".into()],
            instructions: "Whisk the eggs.\nFold in the flour.".into(),
            host: "example.com".into(),
            image: "https://example.com/dish.jpg".into(),
            optional: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    /// Make the named accessor fail with `FieldMissing`.
    pub fn without(mut self, field: &'static str) -> Self {
        self.failing.insert(field);
        self
    }

    /// Supply a value for an optional accessor.
    pub fn with_optional(mut self, field: &'static str, value: Value) -> Self {
        self.optional.insert(field, value);
        self
    }

    fn required<T: Clone>(&self, field: &'static str, value: &T) -> Result<T, ExtractError> {
        if self.failing.contains(field) {
            Err(ExtractError::FieldMissing(field))
        } else {
            Ok(value.clone())
        }
    }

    fn opt(&self, field: &'static str) -> Result<Value, ExtractError> {
        if self.failing.contains(field) {
            return Err(ExtractError::FieldMissing(field));
        }
        self.optional
            .get(field)
            .cloned()
            .ok_or(ExtractError::NotSupported(field))
    }
}

impl RecipeExtractor for MockRecipeExtractor {
    fn title(&self) -> Result<String, ExtractError> {
        self.required("title", &self.title)
    }

    fn total_time(&self) -> Result<u64, ExtractError> {
        self.required("total_time", &self.total_time)
    }

    fn yields(&self) -> Result<String, ExtractError> {
        self.required("yields", &self.yields)
    }

    fn ingredients(&self) -> Result<Vec<String>, ExtractError> {
        self.required("ingredients", &self.ingredients)
    }

    fn instructions(&self) -> Result<String, ExtractError> {
        self.required("instructions", &self.instructions)
    }

    fn host(&self) -> Result<String, ExtractError> {
        self.required("host", &self.host)
    }

    fn image(&self) -> Result<String, ExtractError> {
        self.required("image", &self.image)
    }

    fn ingredient_groups(&self) -> Result<Value, ExtractError> {
        self.opt("ingredient_groups")
    }

    fn instructions_list(&self) -> Result<Value, ExtractError> {
        self.opt("instructions_list")
    }

    fn canonical_url(&self) -> Result<Value, ExtractError> {
        self.opt("canonical_url")
    }

    fn keywords(&self) -> Result<Value, ExtractError> {
        self.opt("keywords")
    }

    fn nutrients(&self) -> Result<Value, ExtractError> {
        self.opt("nutrients")
    }

    fn equipment(&self) -> Result<Value, ExtractError> {
        self.opt("equipment")
    }

    fn cooking_method(&self) -> Result<Value, ExtractError> {
        self.opt("cooking_method")
    }

    fn dietary_restrictions(&self) -> Result<Value, ExtractError> {
        self.opt("dietary_restrictions")
    }

    fn links(&self) -> Result<Value, ExtractError> {
        self.opt("links")
    }
}

// ---------------------------------------------------------------------------
// MockStrategy
// ---------------------------------------------------------------------------

/// Mock strategy that yields a configured extractor or declines every
/// document.
pub struct MockStrategy {
    extractor: Option<MockRecipeExtractor>,
}

impl MockStrategy {
    pub fn with_extractor(extractor: MockRecipeExtractor) -> Self {
        Self {
            extractor: Some(extractor),
        }
    }

    pub fn declining() -> Self {
        Self { extractor: None }
    }
}

impl ExtractorStrategy for MockStrategy {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn extract(&self, _html: &str, _url: &Url) -> Result<Box<dyn RecipeExtractor>, ExtractError> {
        match &self.extractor {
            Some(extractor) => Ok(Box::new(extractor.clone())),
            None => Err(ExtractError::NoRecipe),
        }
    }
}
