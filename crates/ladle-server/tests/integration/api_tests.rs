use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::common::{RECIPE_PAGE, SPARSE_RECIPE_PAGE, setup_test_app};

async fn post_scrape(body: &str) -> (StatusCode, serde_json::Value) {
    let app = setup_test_app();
    let response = app
        .oneshot(
            Request::post("/scrape")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn serve_page(page: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;
    server
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_the_fixed_body() {
    let app = setup_test_app();

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["message"], "Recipe scraper API is running");
}

#[tokio::test]
async fn health_is_unaffected_by_failed_scrapes() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::post("/scrape")
                .body(Body::from(r#"{"url": "not-a-url"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_json_returns_400() {
    let (status, json) = post_scrape("{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid JSON format");
}

#[tokio::test]
async fn empty_object_returns_400() {
    let (status, json) = post_scrape("{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn missing_url_key_returns_400() {
    let (status, json) = post_scrape(r#"{"link": "https://example.com"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn non_object_body_returns_400() {
    let (status, json) = post_scrape("[1, 2, 3]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn bare_path_url_returns_invalid_format() {
    let (status, json) = post_scrape(r#"{"url": "not-a-url"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid URL format");
}

#[tokio::test]
async fn structurally_broken_url_returns_invalid_url() {
    let (status, json) = post_scrape(r#"{"url": "http://"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid URL");
}

#[tokio::test]
async fn non_string_url_returns_invalid_url() {
    let (status, json) = post_scrape(r#"{"url": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid URL");
}

#[tokio::test]
async fn missing_content_type_is_still_parsed() {
    let app = setup_test_app();

    let response = app
        .oneshot(Request::post("/scrape").body(Body::from("{}")).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "No URL provided");
}

// ---------------------------------------------------------------------------
// Scraping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scrape_returns_required_and_present_optional_fields() {
    let server = serve_page(RECIPE_PAGE).await;

    let body = format!(r#"{{"url": "{}/recipes/best-cookies"}}"#, server.uri());
    let (status, json) = post_scrape(&body).await;

    assert_eq!(status, StatusCode::OK);

    // Required fields.
    assert_eq!(json["title"], "Best Chocolate Chip Cookies");
    assert_eq!(json["total_time"], 70);
    assert_eq!(json["yields"], "24 cookies");
    assert_eq!(
        json["ingredients"],
        serde_json::json!(["225g flour", "150g sugar", "200g chocolate chips"])
    );
    assert_eq!(
        json["instructions"],
        "Cream the butter and sugar.\nFold in flour and chips.\nBake at 180C for 12 minutes."
    );
    assert_eq!(json["host"], "127.0.0.1");
    assert_eq!(json["image"], "https://example.com/cookie.jpg");

    // Optional fields present in the markup.
    assert_eq!(
        json["keywords"],
        serde_json::json!(["cookies", "chocolate", "baking"])
    );
    assert_eq!(
        json["canonical_url"],
        "https://example.com/recipes/best-cookies"
    );
    assert_eq!(
        json["instructions_list"],
        serde_json::json!([
            "Cream the butter and sugar.",
            "Fold in flour and chips.",
            "Bake at 180C for 12 minutes."
        ])
    );
    assert_eq!(
        json["ingredient_groups"],
        serde_json::json!([{
            "ingredients": ["225g flour", "150g sugar", "200g chocolate chips"],
            "purpose": null
        }])
    );

    // Optional fields without data are absent, not null or empty.
    for absent in [
        "nutrients",
        "equipment",
        "cooking_method",
        "dietary_restrictions",
        "links",
    ] {
        assert!(json.get(absent).is_none(), "{absent} should be absent");
    }
}

#[tokio::test]
async fn missing_required_field_returns_the_fixed_500() {
    let server = serve_page(SPARSE_RECIPE_PAGE).await;

    let body = format!(r#"{{"url": "{}/r/sparse"}}"#, server.uri());
    let (status, json) = post_scrape(&body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to extract core recipe data");
    // No partial required fields leak into the error body.
    assert!(json.get("title").is_none());
}

#[tokio::test]
async fn page_without_recipe_markup_returns_500() {
    let server = serve_page("<html><body><p>Just a blog post.</p></body></html>").await;

    let body = format!(r#"{{"url": "{}/post"}}"#, server.uri());
    let (status, json) = post_scrape(&body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "no recipe markup recognized in document");
}

#[tokio::test]
async fn upstream_error_status_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let body = format!(r#"{{"url": "{}/gone"}}"#, server.uri());
    let (status, json) = post_scrape(&body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("HTTP 404"), "unexpected error: {message}");
}

#[tokio::test]
async fn connection_refused_returns_500_with_the_reason() {
    // Bind to an ephemeral port, then drop the listener so nothing is
    // accepting there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let body = format!(r#"{{"url": "http://{addr}/recipe"}}"#);
    let (status, json) = post_scrape(&body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = json["error"].as_str().unwrap();
    assert!(
        message.contains("Connection failed"),
        "unexpected error: {message}"
    );
}
