use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use ladle_client::{ReqwestFetcher, default_registry};
use ladle_core::ScrapeService;
use ladle_server::routes;
use ladle_server::state::AppState;

/// Router wired with a real fetcher. Tests point it at wiremock servers
/// on loopback, so the private-address guard is disabled.
pub fn setup_test_app() -> Router {
    let fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(5))
        .expect("fetcher builds")
        .allow_private_urls();
    let service = ScrapeService::new(fetcher, default_registry());
    routes::router(Arc::new(AppState { service }))
}

/// A complete JSON-LD recipe page: all seven required fields plus
/// keywords and a canonical link.
pub const RECIPE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <link rel="canonical" href="https://example.com/recipes/best-cookies">
  <script type="application/ld+json">
  {
    "@context": "https://schema.org/",
    "@type": "Recipe",
    "name": "Best Chocolate Chip Cookies",
    "image": "https://example.com/cookie.jpg",
    "recipeIngredient": ["225g flour", "150g sugar", "200g chocolate chips"],
    "recipeInstructions": [
      {"@type": "HowToStep", "text": "Cream the butter and sugar."},
      {"@type": "HowToStep", "text": "Fold in flour and chips."},
      {"@type": "HowToStep", "text": "Bake at 180C for 12 minutes."}
    ],
    "totalTime": "PT1H10M",
    "recipeYield": "24 cookies",
    "keywords": "cookies, chocolate, baking"
  }
  </script>
</head>
<body><h1>Best Chocolate Chip Cookies</h1></body>
</html>"#;

/// A recipe node that deserializes but cannot satisfy the required
/// field set: title only.
pub const SPARSE_RECIPE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <script type="application/ld+json">
  {"@context": "https://schema.org/", "@type": "Recipe", "name": "Title Only"}
  </script>
</head>
<body></body>
</html>"#;
