use serde_json::Value;
use url::Url;

use crate::error::{AppError, ExtractError};
use crate::model::Recipe;
use crate::traits::{ExtractorRegistry, Fetcher, RecipeExtractor};

type OptionalAccessor = fn(&dyn RecipeExtractor) -> Result<Value, ExtractError>;

/// Optional fields, applied uniformly by the assembler: each accessor
/// runs in its own failure boundary and its field is merged only when
/// it succeeds with a non-empty value.
pub const OPTIONAL_FIELDS: &[(&str, OptionalAccessor)] = &[
    ("ingredient_groups", |e| e.ingredient_groups()),
    ("instructions_list", |e| e.instructions_list()),
    ("canonical_url", |e| e.canonical_url()),
    ("keywords", |e| e.keywords()),
    ("nutrients", |e| e.nutrients()),
    ("equipment", |e| e.equipment()),
    ("cooking_method", |e| e.cooking_method()),
    ("dietary_restrictions", |e| e.dietary_restrictions()),
    ("links", |e| e.links()),
];

/// Orchestrates the scrape pipeline: fetch → recognize markup → assemble.
///
/// Generic over the fetcher via the `Fetcher` trait, enabling dependency
/// injection and testability without real HTTP calls.
pub struct ScrapeService<F: Fetcher> {
    fetcher: F,
    registry: ExtractorRegistry,
}

impl<F: Fetcher> ScrapeService<F> {
    pub fn new(fetcher: F, registry: ExtractorRegistry) -> Self {
        Self { fetcher, registry }
    }

    /// Run the full scrape pipeline for a validated URL.
    ///
    /// 1. Fetch HTML from the URL
    /// 2. Recognize recipe markup via the strategy registry
    /// 3. Assemble the required field group, then merge optional fields
    pub async fn scrape(&self, url: &Url) -> Result<Recipe, AppError> {
        tracing::info!(%url, "fetching recipe page");
        let html = self.fetcher.fetch(url.as_str()).await?;
        tracing::info!("fetched {} bytes of HTML", html.len());

        let extractor = self.registry.extract(&html, url)?;
        let recipe = assemble(extractor.as_ref())?;
        tracing::info!(title = %recipe.title, "recipe assembled");
        Ok(recipe)
    }
}

/// Two-phase field assembly.
///
/// Required phase: the seven required accessors are called as one group;
/// the first failure aborts the whole scrape and no partial required
/// fields survive. Optional phase: each entry of [`OPTIONAL_FIELDS`]
/// is tried independently and failures only suppress that field.
pub fn assemble(extractor: &dyn RecipeExtractor) -> Result<Recipe, AppError> {
    let mut recipe = required_fields(extractor).map_err(|err| {
        tracing::error!(%err, "required recipe field unavailable");
        AppError::CoreExtraction
    })?;

    for (name, accessor) in OPTIONAL_FIELDS {
        match accessor(extractor) {
            Ok(value) if !is_empty_value(&value) => {
                recipe.extra.insert((*name).to_string(), value);
            }
            Ok(_) => tracing::debug!(field = name, "optional field empty, omitted"),
            Err(err) => tracing::debug!(field = name, %err, "optional field unavailable"),
        }
    }

    Ok(recipe)
}

fn required_fields(extractor: &dyn RecipeExtractor) -> Result<Recipe, ExtractError> {
    Ok(Recipe {
        title: extractor.title()?,
        total_time: extractor.total_time()?,
        yields: extractor.yields()?,
        ingredients: extractor.ingredients()?,
        instructions: extractor.instructions()?,
        host: extractor.host()?,
        image: extractor.image()?,
        extra: serde_json::Map::new(),
    })
}

/// Emptiness rule for optional fields: null, false, empty string, empty
/// array, empty object, and zero all count as empty.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
