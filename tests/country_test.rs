mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};
use hotel_listing::repositories::DeletePolicy;

#[tokio::test]
async fn test_list_countries_with_pagination_header() {
    let app = TestApp::seeded().await;

    let response = app
        .server
        .get("/api/countries")
        .add_query_param("page_number", 2)
        .add_query_param("page_size", 2)
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let countries = body.as_array().unwrap();
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0]["short_name"], "US");

    let header = response.header("x-pagination");
    let pagination: serde_json::Value = serde_json::from_str(header.to_str().unwrap()).unwrap();
    assert_eq!(pagination["total_count"], 3);
    assert_eq!(pagination["page_size"], 2);
    assert_eq!(pagination["current_page"], 2);
    assert_eq!(pagination["total_pages"], 2);
    assert_eq!(pagination["has_next"], false);
    assert_eq!(pagination["has_previous"], true);

    assert_eq!(response.header("cache-control"), "public, max-age=60");
}

#[tokio::test]
async fn test_list_countries_clamps_paging() {
    let app = TestApp::seeded().await;

    let response = app
        .server
        .get("/api/countries")
        .add_query_param("page_number", 0)
        .add_query_param("page_size", 1000)
        .await;

    response.assert_status(StatusCode::OK);

    let pagination: serde_json::Value =
        serde_json::from_str(response.header("x-pagination").to_str().unwrap()).unwrap();
    assert_eq!(pagination["current_page"], 1);
    assert_eq!(pagination["page_size"], 50);
    assert_eq!(response.json::<serde_json::Value>().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_countries_huge_page_number_is_empty() {
    let app = TestApp::seeded().await;

    let response = app
        .server
        .get("/api/countries")
        .add_query_param("page_number", i64::MAX)
        .add_query_param("page_size", 50)
        .await;

    response.assert_status(StatusCode::OK);

    let pagination: serde_json::Value =
        serde_json::from_str(response.header("x-pagination").to_str().unwrap()).unwrap();
    assert_eq!(pagination["total_count"], 3);
    assert_eq!(pagination["has_next"], false);
    assert!(response.json::<serde_json::Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_country_includes_hotels() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let mexico = factory.create_country("Mexico", "MX").await;
    factory.create_hotel("Hotel 1", 5.0, mexico.id).await;

    let response = app
        .server
        .get(&format!("/api/countries/{}", mexico.id))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Mexico");
    assert_eq!(body["hotels"].as_array().unwrap().len(), 1);
    assert_eq!(body["hotels"][0]["name"], "Hotel 1");
}

#[tokio::test]
async fn test_get_country_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/countries/99").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_country_as_admin() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .post("/api/countries")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "name": "Mexico",
            "short_name": "MX"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    let id = body["id"].as_i64().unwrap();
    assert!(id >= 1);

    let fetched = app.server.get(&format!("/api/countries/{}", id)).await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.json::<serde_json::Value>()["short_name"], "MX");
}

#[tokio::test]
async fn test_create_country_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/countries")
        .json(&json!({ "name": "Mexico", "short_name": "MX" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_country_requires_admin() {
    let app = TestApp::new().await;
    let user = Factory::new(&app.state).create_user().await;

    let response = app
        .server
        .post("/api/countries")
        .add_header("Authorization", user.auth_header())
        .json(&json!({ "name": "Mexico", "short_name": "MX" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/countries")
        .add_header("Authorization", "Bearer not-a-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_country_validation() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .post("/api/countries")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({ "name": "Mexico", "short_name": "MEX" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_country() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;

    let response = app
        .server
        .put(&format!("/api/countries/{}", mexico.id))
        .add_header("Authorization", admin.auth_header())
        .json(&json!({ "name": "México", "short_name": "MX" }))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    let fetched: serde_json::Value = app
        .server
        .get(&format!("/api/countries/{}", mexico.id))
        .await
        .json();
    assert_eq!(fetched["name"], "México");
}

#[tokio::test]
async fn test_update_country_bad_id() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .put("/api/countries/0")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({ "name": "Mexico", "short_name": "MX" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_country_not_found() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .put("/api/countries/42")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({ "name": "Mexico", "short_name": "MX" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_country_with_hotels_conflicts() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;
    factory.create_hotel("Hotel 1", 5.0, mexico.id).await;

    let response = app
        .server
        .delete(&format!("/api/countries/{}", mexico.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_country_cascades_when_configured() {
    let app = TestApp::with_policy(DeletePolicy::Cascade).await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;
    let hotel = factory.create_hotel("Hotel 1", 5.0, mexico.id).await;

    let response = app
        .server
        .delete(&format!("/api/countries/{}", mexico.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/hotels/{}", hotel.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_country_not_found() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .delete("/api/countries/42")
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
