// Library crate for the hotel listing service
// Exports modules for use by the server binary and tests

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    create_country, create_hotel, delete_country, delete_hotel, get_country, get_hotel,
    list_countries, list_hotels, login, me, register, update_country, update_hotel,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Reads are public; writes check the role through the AdminUser extractor
    let api_routes = Router::new()
        // Account routes
        .route("/api/account/register", post(register))
        .route("/api/account/login", post(login))
        .route("/api/account/me", get(me))
        // Country routes
        .route("/api/countries", get(list_countries).post(create_country))
        .route(
            "/api/countries/{id}",
            get(get_country).put(update_country).delete(delete_country),
        )
        // Hotel routes
        .route("/api/hotels", get(list_hotels).post(create_hotel))
        .route(
            "/api/hotels/{id}",
            get(get_hotel).put(update_hotel).delete(delete_hotel),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, Hotel Listing!" }))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
