use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::{HealthResponse, ScrapeRequest};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::validate;

/// Build the full router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/scrape", post(scrape))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        message: "Recipe scraper API is running",
    })
}

#[utoipa::path(
    post,
    path = "/scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Extracted recipe data"),
        (status = 400, description = "Request validation failed", body = crate::dto::ErrorResponse),
        (status = 500, description = "Fetch or extraction failed", body = crate::dto::ErrorResponse),
    ),
    tag = "scrape"
)]
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let url = validate::parse_scrape_request(&body)?;
    tracing::info!(%url, "processing scrape request");

    let recipe = state.service.scrape(&url).await?;
    Ok(axum::Json(recipe))
}
