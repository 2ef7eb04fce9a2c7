use std::env;

use crate::repositories::{country, DeletePolicies, DeletePolicy};

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub seed_catalog: bool,

    // JWT
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expiration_hours: i64,

    // Delete policies
    pub country_hotels_on_delete: DeletePolicy,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            seed_catalog: parse_bool(
                "SEED_CATALOG",
                &env::var("SEED_CATALOG").unwrap_or_else(|_| "true".to_string()),
            )?,

            // JWT
            jwt_secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "HotelListingAPI".to_string()),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("JWT_EXPIRATION_HOURS"))?,

            // Delete policies
            country_hotels_on_delete: env::var("COUNTRY_HOTELS_ON_DELETE")
                .map(|value| value.parse())
                .unwrap_or(Ok(country::HOTELS_ON_DELETE))
                .map_err(|_| ConfigError::Invalid("COUNTRY_HOTELS_ON_DELETE"))?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Delete policy overrides handed to every unit of work
    pub fn delete_policies(&self) -> DeletePolicies {
        DeletePolicies::new().with(country::HOTELS_RELATION, self.country_hotels_on_delete)
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(name)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
