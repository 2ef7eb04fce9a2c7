use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    PaginatorTrait, Schema, SqlxSqliteConnector,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::entity::{country, hotel, user};
use crate::error::AppResult;
use crate::models::{Country, Hotel};
use crate::repositories::{DeletePolicies, UnitOfWork};

/// Open a connection for `url`.
///
/// `sqlite:` URLs get a pool with foreign keys enforced; an in-memory
/// database is pinned to one connection that never expires so the schema
/// outlives individual queries.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    if url.starts_with("sqlite:") {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbErr::Conn(sea_orm::RuntimeErr::Internal(e.to_string())))?
            .foreign_keys(true)
            .create_if_missing(true);

        let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbErr::Conn(sea_orm::RuntimeErr::Internal(e.to_string())))?;

        return Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool));
    }

    let mut opt = ConnectOptions::new(url);
    opt.max_connections(100)
        .min_connections(5)
        .sqlx_logging(true);

    Database::connect(opt).await
}

/// Create any missing tables from the entity definitions
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = vec![
        schema.create_table_from_entity(country::Entity),
        schema.create_table_from_entity(hotel::Entity),
        schema.create_table_from_entity(user::Entity),
    ];

    for statement in statements.iter_mut() {
        statement.if_not_exists();
        db.execute(backend.build(&*statement)).await?;
    }

    Ok(())
}

/// Insert the starter catalog when no country exists yet.
///
/// Countries get fixed ids so their hotels can be staged against them and
/// the whole catalog lands in one save. Returns whether anything was written.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    policies: Arc<DeletePolicies>,
) -> AppResult<bool> {
    if country::Entity::find().count(db).await? > 0 {
        return Ok(false);
    }

    let catalog = [
        (1, "Mexico", "MX", "Hotel 1", "Calle 1", 5.0),
        (2, "Brazil", "BR", "Hotel 2", "Calle 2", 4.5),
        (3, "United States", "US", "Hotel 3", "Calle 3", 3.9),
    ];

    let mut uow = UnitOfWork::new(db.clone(), policies);
    let countries = uow.countries();
    let hotels = uow.hotels();

    for (id, name, short_name, ..) in catalog {
        countries
            .insert(Country {
                id,
                ..Country::new(name, short_name)
            })
            .await?;
    }
    for (country_id, _, _, hotel_name, address, rating) in catalog {
        hotels
            .insert(Hotel::new(hotel_name, address, rating, country_id))
            .await?;
    }
    uow.save().await?;

    // Explicit ids do not advance a Postgres serial
    if db.get_database_backend() == DbBackend::Postgres {
        db.execute_unprepared(
            "SELECT setval(pg_get_serial_sequence('countries', 'id'), (SELECT MAX(id) FROM countries))",
        )
        .await?;
    }

    tracing::info!("Seeded catalog with {} countries", catalog.len());
    Ok(true)
}
