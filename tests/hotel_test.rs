mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_list_hotels_ordered_by_id() {
    let app = TestApp::seeded().await;

    let response = app.server.get("/api/hotels").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let hotels = body.as_array().unwrap();
    let names: Vec<&str> = hotels.iter().map(|h| h["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Hotel 1", "Hotel 2", "Hotel 3"]);
    assert!(hotels.iter().all(|h| h.get("country").is_none()));
}

#[tokio::test]
async fn test_list_hotels_with_country_include() {
    let app = TestApp::seeded().await;

    let response = app
        .server
        .get("/api/hotels")
        .add_query_param("include", "country")
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    for hotel in body.as_array().unwrap() {
        assert_eq!(hotel["country"]["id"], hotel["country_id"]);
    }
    assert_eq!(body[0]["country"]["short_name"], "MX");
}

#[tokio::test]
async fn test_list_hotels_unknown_include() {
    let app = TestApp::seeded().await;

    let response = app
        .server
        .get("/api/hotels")
        .add_query_param("include", "Owner")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_hotel_includes_country() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let brazil = factory.create_country("Brazil", "BR").await;
    let hotel = factory.create_hotel("Hotel 2", 4.5, brazil.id).await;

    let response = app.server.get(&format!("/api/hotels/{}", hotel.id)).await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["rating"], 4.5);
    assert_eq!(body["country"]["name"], "Brazil");
}

#[tokio::test]
async fn test_create_hotel() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;

    let response = app
        .server
        .post("/api/hotels")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "name": "Hotel 1",
            "address": "Calle 1",
            "rating": 5.0,
            "country_id": mexico.id
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert!(body["id"].as_i64().unwrap() >= 1);
    assert_eq!(body["country_id"], mexico.id);
}

#[tokio::test]
async fn test_create_hotel_unknown_country_conflicts() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .post("/api/hotels")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "name": "Hotel 1",
            "address": "Calle 1",
            "rating": 5.0,
            "country_id": 77
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_hotel_rating_out_of_range() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;

    let response = app
        .server
        .post("/api/hotels")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "name": "Hotel 1",
            "address": "Calle 1",
            "rating": 6.0,
            "country_id": mexico.id
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_hotel_requires_admin() {
    let app = TestApp::new().await;
    let user = Factory::new(&app.state).create_user().await;

    let response = app
        .server
        .post("/api/hotels")
        .add_header("Authorization", user.auth_header())
        .json(&json!({
            "name": "Hotel 1",
            "address": "Calle 1",
            "rating": 5.0,
            "country_id": 1
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_hotel() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;
    let brazil = factory.create_country("Brazil", "BR").await;
    let hotel = factory.create_hotel("Hotel 1", 5.0, mexico.id).await;

    let response = app
        .server
        .put(&format!("/api/hotels/{}", hotel.id))
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "name": "Hotel Uno",
            "address": "Calle 1",
            "rating": 4.0,
            "country_id": brazil.id
        }))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    let body: serde_json::Value = app
        .server
        .get(&format!("/api/hotels/{}", hotel.id))
        .await
        .json();
    assert_eq!(body["name"], "Hotel Uno");
    assert_eq!(body["country"]["short_name"], "BR");
}

#[tokio::test]
async fn test_delete_hotel() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let mexico = factory.create_country("Mexico", "MX").await;
    let hotel = factory.create_hotel("Hotel 1", 5.0, mexico.id).await;

    let response = app
        .server
        .delete(&format!("/api/hotels/{}", hotel.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/hotels/{}", hotel.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_hotel_bad_id() {
    let app = TestApp::new().await;
    let admin = Factory::new(&app.state).create_admin().await;

    let response = app
        .server
        .delete("/api/hotels/-1")
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
