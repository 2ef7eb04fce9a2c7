use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::{pagination_headers, validate_id, HotelSummary, PaginationParams};
use crate::middlewares::AdminUser;
use crate::models::{Country, CreateCountry, UpdateCountry};
use crate::repositories::{CountryInclude, Includes, QuerySpec, UnitOfWork};

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCountryRequest {
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCountryRequest {
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountryResponse {
    pub id: i32,
    pub name: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotels: Option<Vec<HotelSummary>>,
}

impl From<Country> for CountryResponse {
    fn from(c: Country) -> Self {
        Self {
            id: c.id,
            name: c.name,
            short_name: c.short_name,
            hotels: c
                .hotels
                .map(|hotels| hotels.into_iter().map(HotelSummary::from).collect()),
        }
    }
}

/// Country without its hotels, as embedded in a hotel
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountrySummary {
    pub id: i32,
    pub name: String,
    pub short_name: String,
}

impl From<Country> for CountrySummary {
    fn from(c: Country) -> Self {
        Self {
            id: c.id,
            name: c.name,
            short_name: c.short_name,
        }
    }
}

// ============ Handlers ============

/// List countries one page at a time
#[utoipa::path(
    get,
    path = "/api/countries",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of countries; position in the X-Pagination header", body = [CountryResponse])
    ),
    tag = "Countries"
)]
pub async fn list_countries(
    mut uow: UnitOfWork,
    Query(params): Query<PaginationParams>,
) -> AppResult<(HeaderMap, Json<Vec<CountryResponse>>)> {
    let spec = QuerySpec::new().page(params.page_request()?);
    let page = uow.countries().get_paged_list(spec).await?;

    let headers = pagination_headers(&page.metadata)?;
    let countries = page.items.into_iter().map(CountryResponse::from).collect();

    Ok((headers, Json(countries)))
}

/// Get a country with its hotels
#[utoipa::path(
    get,
    path = "/api/countries/{id}",
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    responses(
        (status = 200, description = "Country details", body = CountryResponse),
        (status = 404, description = "Country not found")
    ),
    tag = "Countries"
)]
pub async fn get_country(
    mut uow: UnitOfWork,
    Path(id): Path<i32>,
) -> AppResult<Json<CountryResponse>> {
    let country = uow
        .countries()
        .get_by_id(id, Includes::of([CountryInclude::Hotels]))
        .await?
        .ok_or_else(|| AppError::not_found(format!("Country {}", id)))?;

    Ok(Json(country.into()))
}

/// Create a country
#[utoipa::path(
    post,
    path = "/api/countries",
    request_body = CreateCountryRequest,
    responses(
        (status = 201, description = "Country created successfully", body = CountryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Countries"
)]
pub async fn create_country(
    _admin: AdminUser,
    mut uow: UnitOfWork,
    Json(payload): Json<CreateCountryRequest>,
) -> AppResult<(StatusCode, Json<CountryResponse>)> {
    let mut country = Country::from(CreateCountry {
        name: payload.name,
        short_name: payload.short_name,
    });

    let ticket = uow.countries().insert(country.clone()).await?;
    uow.save().await?;

    country.id = ticket
        .id()
        .ok_or_else(|| AppError::Internal("Country saved without an id".to_string()))?;
    tracing::info!(country_id = country.id, "Created country");

    Ok((StatusCode::CREATED, Json(country.into())))
}

/// Update a country
#[utoipa::path(
    put,
    path = "/api/countries/{id}",
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    request_body = UpdateCountryRequest,
    responses(
        (status = 204, description = "Country updated successfully"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Country not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Countries"
)]
pub async fn update_country(
    _admin: AdminUser,
    mut uow: UnitOfWork,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCountryRequest>,
) -> AppResult<StatusCode> {
    validate_id(id)?;

    let countries = uow.countries();
    let mut country = countries
        .get_by_id(id, Includes::none())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Country {}", id)))?;

    country.apply(UpdateCountry {
        name: payload.name,
        short_name: payload.short_name,
    });
    countries.update(country).await?;
    uow.save().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a country
#[utoipa::path(
    delete,
    path = "/api/countries/{id}",
    params(
        ("id" = i32, Path, description = "Country ID")
    ),
    responses(
        (status = 204, description = "Country deleted successfully"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Country not found"),
        (status = 409, description = "Country still has hotels")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Countries"
)]
pub async fn delete_country(
    _admin: AdminUser,
    mut uow: UnitOfWork,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    validate_id(id)?;

    uow.countries().delete(id).await?;
    uow.save().await?;
    tracing::info!(country_id = id, "Deleted country");

    Ok(StatusCode::NO_CONTENT)
}
