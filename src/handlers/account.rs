use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthUser;
use crate::models::{CreateUser, Role, User, UserResponse};
use crate::repositories::{Includes, Record, UnitOfWork};
use crate::services::AuthService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// ============ Handlers ============

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/account/register",
    request_body = RegisterRequest,
    responses(
        (status = 202, description = "Account registered"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    ),
    tag = "Account"
)]
pub async fn register(
    mut uow: UnitOfWork,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<StatusCode> {
    if payload.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let create_user = CreateUser {
        email: payload.email.trim().to_string(),
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        roles: payload.roles,
    };

    // Validate before paying for the hash
    let user = User::new(&create_user, "");
    user.validate()?;

    let users = uow.users();
    if users.email_exists(&user.email).await? {
        return Err(AppError::ConstraintViolation {
            constraint: "users.email".to_string(),
            detail: "Email already exists".to_string(),
        });
    }

    let user = User {
        password_hash: AuthService::hash_password(&create_user.password)?,
        ..user
    };
    users.insert(user).await?;
    uow.save().await?;

    tracing::info!(email = %create_user.email, "Registered account");
    Ok(StatusCode::ACCEPTED)
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/account/login",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Account"
)]
pub async fn login(
    State(state): State<AppState>,
    mut uow: UnitOfWork,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // Find user by email
    let user = uow
        .users()
        .find_by_email(payload.email.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // Verify password
    let is_valid = AuthService::verify_password(&payload.password, &user.password_hash)?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    // Generate token
    let token = AuthService::generate_token(&user, &state.config)?;

    Ok((StatusCode::ACCEPTED, Json(AuthResponse { token })))
}

/// Get current authenticated account
#[utoipa::path(
    get,
    path = "/api/account/me",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Account"
)]
pub async fn me(user: AuthUser, mut uow: UnitOfWork) -> AppResult<Json<UserResponse>> {
    let account = uow
        .users()
        .get_by_id(user.id, Includes::none())
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(account.into()))
}
