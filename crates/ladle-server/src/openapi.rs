use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ladle API",
        version = "0.1.0",
        description = "Recipe scraper API: fetch a recipe page and extract structured recipe data."
    ),
    paths(crate::routes::health, crate::routes::scrape),
    components(schemas(
        crate::dto::ScrapeRequest,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "scrape", description = "Recipe extraction"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
