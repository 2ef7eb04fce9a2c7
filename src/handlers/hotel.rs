use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use sea_orm::Order;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::hotel;
use crate::error::{AppError, AppResult};
use crate::handlers::{validate_id, CountrySummary};
use crate::middlewares::AdminUser;
use crate::models::{CreateHotel, Hotel, UpdateHotel};
use crate::repositories::{HotelInclude, Includes, QuerySpec, UnitOfWork};

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, IntoParams)]
pub struct HotelListParams {
    /// Comma separated relations to load, e.g. `Country`
    pub include: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHotelRequest {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateHotelRequest {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<CountrySummary>,
}

impl From<Hotel> for HotelResponse {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
            rating: h.rating,
            country_id: h.country_id,
            country: h.country.map(|country| CountrySummary::from(*country)),
        }
    }
}

/// Hotel without its country, as embedded in a country
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
}

impl From<Hotel> for HotelSummary {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
            rating: h.rating,
            country_id: h.country_id,
        }
    }
}

// ============ Handlers ============

/// List all hotels
#[utoipa::path(
    get,
    path = "/api/hotels",
    params(HotelListParams),
    responses(
        (status = 200, description = "All hotels ordered by id", body = [HotelResponse]),
        (status = 400, description = "Unknown relation in include")
    ),
    tag = "Hotels"
)]
pub async fn list_hotels(
    mut uow: UnitOfWork,
    Query(params): Query<HotelListParams>,
) -> AppResult<Json<Vec<HotelResponse>>> {
    let includes = match params.include.as_deref() {
        Some(list) => Includes::parse(list)?,
        None => Includes::none(),
    };

    let spec = QuerySpec::<Hotel>::new()
        .includes(includes)
        .order_by(hotel::Column::Id, Order::Asc);
    let hotels = uow.hotels().get_all(spec).await?;

    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

/// Get a hotel with its country
#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    params(
        ("id" = i32, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel details", body = HotelResponse),
        (status = 404, description = "Hotel not found")
    ),
    tag = "Hotels"
)]
pub async fn get_hotel(
    mut uow: UnitOfWork,
    Path(id): Path<i32>,
) -> AppResult<Json<HotelResponse>> {
    let hotel = uow
        .hotels()
        .get_by_id(id, Includes::of([HotelInclude::Country]))
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {}", id)))?;

    Ok(Json(hotel.into()))
}

/// Create a hotel
#[utoipa::path(
    post,
    path = "/api/hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created successfully", body = HotelResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 409, description = "Country does not exist")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Hotels"
)]
pub async fn create_hotel(
    _admin: AdminUser,
    mut uow: UnitOfWork,
    Json(payload): Json<CreateHotelRequest>,
) -> AppResult<(StatusCode, Json<HotelResponse>)> {
    let mut hotel = Hotel::from(CreateHotel {
        name: payload.name,
        address: payload.address,
        rating: payload.rating,
        country_id: payload.country_id,
    });

    let ticket = uow.hotels().insert(hotel.clone()).await?;
    uow.save().await?;

    hotel.id = ticket
        .id()
        .ok_or_else(|| AppError::Internal("Hotel saved without an id".to_string()))?;
    tracing::info!(hotel_id = hotel.id, country_id = hotel.country_id, "Created hotel");

    Ok((StatusCode::CREATED, Json(hotel.into())))
}

/// Update a hotel
#[utoipa::path(
    put,
    path = "/api/hotels/{id}",
    params(
        ("id" = i32, Path, description = "Hotel ID")
    ),
    request_body = UpdateHotelRequest,
    responses(
        (status = 204, description = "Hotel updated successfully"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Hotel not found"),
        (status = 409, description = "Country does not exist")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Hotels"
)]
pub async fn update_hotel(
    _admin: AdminUser,
    mut uow: UnitOfWork,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateHotelRequest>,
) -> AppResult<StatusCode> {
    validate_id(id)?;

    let hotels = uow.hotels();
    let mut hotel = hotels
        .get_by_id(id, Includes::none())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {}", id)))?;

    hotel.apply(UpdateHotel {
        name: payload.name,
        address: payload.address,
        rating: payload.rating,
        country_id: payload.country_id,
    });
    hotels.update(hotel).await?;
    uow.save().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a hotel
#[utoipa::path(
    delete,
    path = "/api/hotels/{id}",
    params(
        ("id" = i32, Path, description = "Hotel ID")
    ),
    responses(
        (status = 204, description = "Hotel deleted successfully"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator role required"),
        (status = 404, description = "Hotel not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Hotels"
)]
pub async fn delete_hotel(
    _admin: AdminUser,
    mut uow: UnitOfWork,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    validate_id(id)?;

    uow.hotels().delete(id).await?;
    uow.save().await?;
    tracing::info!(hotel_id = id, "Deleted hotel");

    Ok(StatusCode::NO_CONTENT)
}
