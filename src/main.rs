use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use hotel_listing::config::Config;
use hotel_listing::handlers::{
    AuthResponse, CountryResponse, CountrySummary, CreateCountryRequest, CreateHotelRequest,
    HotelResponse, HotelSummary, LoginRequest, RegisterRequest, UpdateCountryRequest,
    UpdateHotelRequest,
};
use hotel_listing::models::{Role, UserResponse};
use hotel_listing::state::AppState;
use hotel_listing::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::account::register,
        handlers::account::login,
        handlers::account::me,
        handlers::country::list_countries,
        handlers::country::get_country,
        handlers::country::create_country,
        handlers::country::update_country,
        handlers::country::delete_country,
        handlers::hotel::list_hotels,
        handlers::hotel::get_hotel,
        handlers::hotel::create_hotel,
        handlers::hotel::update_hotel,
        handlers::hotel::delete_hotel,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        Role,
        CreateCountryRequest,
        UpdateCountryRequest,
        CountryResponse,
        CountrySummary,
        CreateHotelRequest,
        UpdateHotelRequest,
        HotelResponse,
        HotelSummary,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Registration and login"),
        (name = "Countries", description = "Country catalog endpoints"),
        (name = "Hotels", description = "Hotel catalog endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let addr = config.server_addr();

    // Initialize application state (connects, creates the schema, seeds)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config).await?;
    tracing::info!("Database ready");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
