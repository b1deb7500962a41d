//! schema.org microdata recipe extraction.
//!
//! Fallback for sites that annotate their HTML with `itemscope` /
//! `itemprop` attributes instead of publishing JSON-LD. All reads are
//! scoped to the Recipe container; a global `itemprop` search would
//! pick up unrelated page content (site title, author bio, ads).

use scraper::{ElementRef, Html, Selector};
use serde_json::{Value, json};
use url::Url;

use ladle_core::error::ExtractError;
use ladle_core::traits::{ExtractorStrategy, RecipeExtractor};

use crate::duration::iso8601_minutes;
use crate::page::{canonical_link, host_name};

/// Fallback extraction strategy: schema.org microdata annotations.
pub struct MicrodataExtractor;

impl ExtractorStrategy for MicrodataExtractor {
    fn name(&self) -> &'static str {
        "microdata"
    }

    fn extract(&self, html: &str, url: &Url) -> Result<Box<dyn RecipeExtractor>, ExtractError> {
        let document = Html::parse_document(html);
        let container = find_recipe_container(&document).ok_or(ExtractError::NoRecipe)?;

        let title = itemprop_value(container, "name")
            .ok_or_else(|| ExtractError::Malformed("recipe item has no name".into()))?;

        let mut ingredients = itemprop_values(container, "recipeIngredient");
        if ingredients.is_empty() {
            // Legacy key used by data-vocabulary-era markup.
            ingredients = itemprop_values(container, "ingredients");
        }

        let view = MicrodataRecipeView {
            title,
            total_time: itemprop_value(container, "totalTime")
                .as_deref()
                .and_then(iso8601_minutes),
            yields: itemprop_value(container, "recipeYield"),
            ingredients,
            instructions: itemprop_values(container, "recipeInstructions"),
            host: host_name(url),
            image: itemprop_value(container, "image"),
            canonical_url: canonical_link(&document, url),
            keywords: itemprop_value(container, "keywords")
                .map(|joined| {
                    joined
                        .split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Box::new(view))
    }
}

fn find_recipe_container(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("[itemscope]").unwrap();
    document.select(&selector).find(|element| {
        element.value().attr("itemtype").is_some_and(|itemtype| {
            itemtype.contains("schema.org/Recipe")
                || itemtype.contains("data-vocabulary.org/Recipe")
        })
    })
}

/// Read one itemprop, preferring machine-readable attributes
/// (`content`, `datetime`, `src`, `href`) over element text.
fn itemprop_value(root: ElementRef<'_>, prop: &str) -> Option<String> {
    let selector = Selector::parse(&format!("[itemprop='{prop}']")).unwrap();
    let element = root.select(&selector).next()?;

    for attr in ["content", "datetime", "src", "href"] {
        if let Some(value) = element.value().attr(attr) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    let text = element.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Read every occurrence of an itemprop as element text.
fn itemprop_values(root: ElementRef<'_>, prop: &str) -> Vec<String> {
    let selector = Selector::parse(&format!("[itemprop='{prop}']")).unwrap();
    root.select(&selector)
        .filter_map(|element| {
            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

struct MicrodataRecipeView {
    title: String,
    total_time: Option<u64>,
    yields: Option<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    host: String,
    image: Option<String>,
    canonical_url: Option<String>,
    keywords: Vec<String>,
}

impl RecipeExtractor for MicrodataRecipeView {
    fn title(&self) -> Result<String, ExtractError> {
        Ok(self.title.clone())
    }

    fn total_time(&self) -> Result<u64, ExtractError> {
        self.total_time.ok_or(ExtractError::FieldMissing("total_time"))
    }

    fn yields(&self) -> Result<String, ExtractError> {
        self.yields
            .clone()
            .ok_or(ExtractError::FieldMissing("yields"))
    }

    fn ingredients(&self) -> Result<Vec<String>, ExtractError> {
        if self.ingredients.is_empty() {
            Err(ExtractError::FieldMissing("ingredients"))
        } else {
            Ok(self.ingredients.clone())
        }
    }

    fn instructions(&self) -> Result<String, ExtractError> {
        if self.instructions.is_empty() {
            Err(ExtractError::FieldMissing("instructions"))
        } else {
            Ok(self.instructions.join("\n"))
        }
    }

    fn host(&self) -> Result<String, ExtractError> {
        if self.host.is_empty() {
            Err(ExtractError::FieldMissing("host"))
        } else {
            Ok(self.host.clone())
        }
    }

    fn image(&self) -> Result<String, ExtractError> {
        self.image.clone().ok_or(ExtractError::FieldMissing("image"))
    }

    fn instructions_list(&self) -> Result<Value, ExtractError> {
        Ok(json!(self.instructions))
    }

    fn canonical_url(&self) -> Result<Value, ExtractError> {
        self.canonical_url
            .clone()
            .map(Value::String)
            .ok_or(ExtractError::FieldMissing("canonical_url"))
    }

    fn keywords(&self) -> Result<Value, ExtractError> {
        Ok(json!(self.keywords))
    }
}
