//! schema.org JSON-LD recipe extraction.
//!
//! Most recipe sites publish a `script[type="application/ld+json"]`
//! block with a `Recipe` node, either at the root, inside an array, or
//! inside an `@graph` container. Field shapes are polymorphic (string
//! vs array vs object) and are modeled with untagged enums.

use html_escape::decode_html_entities;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use ladle_core::error::ExtractError;
use ladle_core::traits::{ExtractorStrategy, RecipeExtractor};

use crate::duration::iso8601_minutes;
use crate::page::{canonical_link, collect_links, host_name};

/// Default extraction strategy: schema.org JSON-LD.
pub struct JsonLdExtractor;

impl ExtractorStrategy for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn extract(&self, html: &str, url: &Url) -> Result<Box<dyn RecipeExtractor>, ExtractError> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        for script in document.select(&selector) {
            let raw = script.inner_html();
            let parsed: Value = match serde_json::from_str(&raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::debug!(%err, "skipping unparseable JSON-LD block");
                    continue;
                }
            };

            let Some(node) = find_recipe_node(&parsed) else {
                continue;
            };
            match serde_json::from_value::<JsonLdRecipe>(node.clone()) {
                Ok(data) => return Ok(Box::new(JsonLdRecipeView::build(data, &document, url))),
                Err(err) => tracing::debug!(%err, "recipe node did not deserialize"),
            }
        }

        Err(ExtractError::NoRecipe)
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(ty)) => ty.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .any(|ty| ty.as_str().is_some_and(|s| s.eq_ignore_ascii_case("recipe"))),
        _ => false,
    }
}

/// Locate the Recipe node in a JSON-LD document: the root itself, an
/// element of a root array, or an element of `@graph`.
fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    if is_recipe_type(json_ld) {
        return Some(json_ld);
    }
    if let Some(items) = json_ld.as_array() {
        return items.iter().find(|item| is_recipe_type(item));
    }
    if let Some(graph) = json_ld.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|item| is_recipe_type(item));
    }
    None
}

// ---------------------------------------------------------------------------
// Wire model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    image: Option<ImageField>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<Vec<String>>,
    /// Legacy key used by older markup.
    ingredients: Option<Vec<String>>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<InstructionsField>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<YieldField>,
    #[serde(rename = "prepTime")]
    prep_time: Option<TimeField>,
    #[serde(rename = "cookTime")]
    cook_time: Option<TimeField>,
    #[serde(rename = "totalTime")]
    total_time: Option<TimeField>,
    keywords: Option<KeywordsField>,
    nutrition: Option<Value>,
    tool: Option<ToolField>,
    #[serde(rename = "cookingMethod")]
    cooking_method: Option<String>,
    #[serde(rename = "suitableForDiet")]
    suitable_for_diet: Option<DietField>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    Url(String),
    Object(ImageObject),
    Many(Vec<ImageField>),
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

impl ImageField {
    fn first_url(&self) -> Option<String> {
        match self {
            ImageField::Url(url) => Some(decode(url)),
            ImageField::Object(obj) => Some(obj.url.clone()),
            ImageField::Many(items) => items.iter().find_map(ImageField::first_url),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeField {
    Duration(String),
    Minutes(f64),
}

impl TimeField {
    fn minutes(&self) -> Option<u64> {
        match self {
            TimeField::Duration(raw) => iso8601_minutes(raw),
            TimeField::Minutes(n) if *n >= 0.0 => Some(n.round() as u64),
            TimeField::Minutes(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldField {
    Text(String),
    Count(f64),
    Many(Vec<YieldField>),
}

impl YieldField {
    fn display(&self) -> Option<String> {
        match self {
            YieldField::Text(text) => {
                let text = decode(text);
                (!text.is_empty()).then_some(text)
            }
            YieldField::Count(n) => Some(format!("{n} servings")),
            // Prefer the descriptive entry ("15 pieces") over a bare count.
            YieldField::Many(items) => {
                let displays: Vec<String> =
                    items.iter().filter_map(YieldField::display).collect();
                displays
                    .iter()
                    .find(|s| s.contains(char::is_alphabetic))
                    .or_else(|| displays.first())
                    .cloned()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionsField {
    Text(String),
    Steps(Vec<InstructionStep>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionStep {
    Text(String),
    // Section carries a required itemListElement, so it must be tried
    // before the catch-all Step shape.
    Section(HowToSection),
    Step(HowToStep),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<InstructionStep>,
}

impl InstructionsField {
    fn steps(&self) -> Vec<String> {
        match self {
            InstructionsField::Text(text) => text
                .split('\n')
                .map(|line| decode(line))
                .filter(|line| !line.is_empty())
                .collect(),
            InstructionsField::Steps(steps) => {
                let mut collected = Vec::new();
                for step in steps {
                    step.collect_into(&mut collected);
                }
                collected
            }
        }
    }
}

impl InstructionStep {
    fn collect_into(&self, out: &mut Vec<String>) {
        match self {
            InstructionStep::Text(text) => {
                let text = decode(text);
                if !text.is_empty() {
                    out.push(text);
                }
            }
            InstructionStep::Step(step) => {
                if let Some(text) = step.text.as_deref().or(step.name.as_deref()) {
                    let text = decode(text);
                    if !text.is_empty() {
                        out.push(text);
                    }
                }
            }
            InstructionStep::Section(section) => {
                for step in &section.item_list_element {
                    step.collect_into(out);
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordsField {
    Joined(String),
    Many(Vec<String>),
}

impl KeywordsField {
    fn list(&self) -> Vec<String> {
        match self {
            KeywordsField::Joined(joined) => joined
                .split(',')
                .map(|k| decode(k))
                .filter(|k| !k.is_empty())
                .collect(),
            KeywordsField::Many(many) => many
                .iter()
                .map(|k| decode(k))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolField {
    Name(String),
    Item(ToolItem),
    Many(Vec<ToolField>),
}

#[derive(Debug, Deserialize)]
struct ToolItem {
    name: String,
}

impl ToolField {
    fn collect_into(&self, out: &mut Vec<String>) {
        match self {
            ToolField::Name(name) => {
                let name = decode(name);
                if !name.is_empty() {
                    out.push(name);
                }
            }
            ToolField::Item(item) => {
                let name = decode(&item.name);
                if !name.is_empty() {
                    out.push(name);
                }
            }
            ToolField::Many(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DietField {
    One(String),
    Many(Vec<String>),
}

impl DietField {
    fn list(&self) -> Vec<String> {
        let clean = |diet: &str| {
            diet.trim_start_matches("https://schema.org/")
                .trim_start_matches("http://schema.org/")
                .trim_end_matches("Diet")
                .trim()
                .to_string()
        };
        match self {
            DietField::One(one) => vec![clean(one)],
            DietField::Many(many) => many.iter().map(|d| clean(d)).collect(),
        }
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Extractor view
// ---------------------------------------------------------------------------

/// Owned field view over one JSON-LD recipe node, built eagerly so the
/// accessors stay cheap and the parsed document is not retained.
struct JsonLdRecipeView {
    title: String,
    total_time: Option<u64>,
    yields: Option<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    host: String,
    image: Option<String>,
    canonical_url: Option<String>,
    keywords: Vec<String>,
    nutrients: Map<String, Value>,
    equipment: Vec<String>,
    cooking_method: Option<String>,
    dietary_restrictions: Vec<String>,
    links: Vec<Value>,
}

impl JsonLdRecipeView {
    fn build(data: JsonLdRecipe, document: &Html, url: &Url) -> Self {
        // totalTime, falling back to prepTime + cookTime.
        let total_time = data
            .total_time
            .as_ref()
            .and_then(TimeField::minutes)
            .or_else(|| {
                let prep = data.prep_time.as_ref().and_then(TimeField::minutes);
                let cook = data.cook_time.as_ref().and_then(TimeField::minutes);
                match (prep, cook) {
                    (None, None) => None,
                    (prep, cook) => Some(prep.unwrap_or(0) + cook.unwrap_or(0)),
                }
            });

        let ingredients: Vec<String> = data
            .recipe_ingredient
            .or(data.ingredients)
            .unwrap_or_default()
            .iter()
            .map(|i| decode(i))
            .filter(|i| !i.is_empty())
            .collect();

        let instructions = data
            .recipe_instructions
            .as_ref()
            .map(InstructionsField::steps)
            .unwrap_or_default();

        let nutrients: Map<String, Value> = data
            .nutrition
            .as_ref()
            .and_then(Value::as_object)
            .map(|nutrition| {
                nutrition
                    .iter()
                    .filter(|(key, value)| {
                        !key.starts_with('@') && value.as_str().is_some_and(|v| !v.is_empty())
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let mut equipment = Vec::new();
        if let Some(tool) = &data.tool {
            tool.collect_into(&mut equipment);
        }

        Self {
            title: decode(&data.name),
            total_time,
            yields: data.recipe_yield.as_ref().and_then(YieldField::display),
            ingredients,
            instructions,
            host: host_name(url),
            image: data.image.as_ref().and_then(ImageField::first_url),
            canonical_url: canonical_link(document, url).or(data.url),
            keywords: data.keywords.as_ref().map(KeywordsField::list).unwrap_or_default(),
            nutrients,
            equipment,
            cooking_method: data
                .cooking_method
                .as_deref()
                .map(decode)
                .filter(|m| !m.is_empty()),
            dietary_restrictions: data
                .suitable_for_diet
                .as_ref()
                .map(DietField::list)
                .unwrap_or_default(),
            links: collect_links(document),
        }
    }
}

impl RecipeExtractor for JsonLdRecipeView {
    fn title(&self) -> Result<String, ExtractError> {
        if self.title.is_empty() {
            Err(ExtractError::FieldMissing("title"))
        } else {
            Ok(self.title.clone())
        }
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

    fn ingredient_groups(&self) -> Result<Value, ExtractError> {
        // Plain JSON-LD carries no grouping; everything lands in one
        // unnamed group, the shape callers already consume.
        if self.ingredients.is_empty() {
            return Err(ExtractError::FieldMissing("ingredient_groups"));
        }
        Ok(json!([{ "ingredients": self.ingredients, "purpose": null }]))
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

    fn nutrients(&self) -> Result<Value, ExtractError> {
        Ok(Value::Object(self.nutrients.clone()))
    }

    fn equipment(&self) -> Result<Value, ExtractError> {
        Ok(json!(self.equipment))
    }

    fn cooking_method(&self) -> Result<Value, ExtractError> {
        self.cooking_method
            .clone()
            .map(Value::String)
            .ok_or(ExtractError::FieldMissing("cooking_method"))
    }

    fn dietary_restrictions(&self) -> Result<Value, ExtractError> {
        Ok(json!(self.dietary_restrictions))
    }

    fn links(&self) -> Result<Value, ExtractError> {
        Ok(Value::Array(self.links.clone()))
    }
}

/// Decode twice: double-encoded entities (`&amp;amp;`) show up in the
/// wild often enough to matter.
fn decode(text: &str) -> String {
    decode_html_entities(&decode_html_entities(text))
        .trim()
        .to_string()
}
