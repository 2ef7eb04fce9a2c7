use axum_test::TestServer;
use hotel_listing::build_router;
use hotel_listing::config::Config;
use hotel_listing::db;
use hotel_listing::repositories::{DeletePolicy, UnitOfWork};
use hotel_listing::state::AppState;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        // Each connection to :memory: is its own database
        database_url: "sqlite::memory:".to_string(),
        seed_catalog: false,
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_issuer: "HotelListingAPI".to_string(),
        jwt_expiration_hours: 24,
        country_hotels_on_delete: DeletePolicy::Restrict,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application on an empty database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Test application whose country delete cascades to hotels
    pub async fn with_policy(policy: DeletePolicy) -> Self {
        Self::with_config(Config {
            country_hotels_on_delete: policy,
            ..test_config()
        })
        .await
    }

    /// Test application with the starter catalog loaded
    pub async fn seeded() -> Self {
        Self::with_config(Config {
            seed_catalog: true,
            ..test_config()
        })
        .await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = db::connect(&config.database_url)
            .await
            .expect("Failed to open test database");

        let state = AppState::with_connection(db, config)
            .await
            .expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }

    /// A fresh unit of work on the test database
    pub fn uow(&self) -> UnitOfWork {
        self.state.unit_of_work()
    }
}
