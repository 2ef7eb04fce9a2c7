use std::convert::Infallible;
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::db;
use crate::repositories::{DeletePolicies, UnitOfWork};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    /// Delete policy overrides, fixed for the life of the process
    pub policies: Arc<DeletePolicies>,
}

impl AppState {
    /// Connect to the database, create the schema and seed the catalog if enabled
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let db = db::connect(&config.database_url)
            .await
            .map_err(|e| AppStateError::Database(e.to_string()))?;

        Self::with_connection(db, config).await
    }

    /// Build the state on an existing connection (for testing)
    pub async fn with_connection(
        db: DatabaseConnection,
        config: Config,
    ) -> Result<Self, AppStateError> {
        db::create_schema(&db)
            .await
            .map_err(|e| AppStateError::Schema(e.to_string()))?;

        let policies = Arc::new(config.delete_policies());

        if config.seed_catalog {
            db::seed_catalog(&db, Arc::clone(&policies))
                .await
                .map_err(|e| AppStateError::Seed(e.to_string()))?;
        }

        Ok(Self {
            db,
            config,
            policies,
        })
    }

    /// A fresh unit of work over the shared connection
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(self.db.clone(), Arc::clone(&self.policies))
    }
}

/// One unit of work per request: `async fn handler(mut uow: UnitOfWork)`
impl FromRequestParts<AppState> for UnitOfWork {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.unit_of_work())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Database connection error: {0}")]
    Database(String),

    #[error("Schema creation error: {0}")]
    Schema(String),

    #[error("Catalog seed error: {0}")]
    Seed(String),
}
