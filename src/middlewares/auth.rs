use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;
use crate::services::{AuthService, Claims};
use crate::state::AppState;

/// Authenticated user info extracted from JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Extractor for AuthUser - can be used directly in handlers
/// Example: `async fn handler(user: AuthUser) -> ... { }`
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// An authenticated user holding the `Administrator` role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if user.role != Role::Administrator {
            tracing::debug!(user_id = %user.id, "Rejected non-administrator");
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(user))
    }
}

/// Auth middleware - validates a bearer token when one is sent and injects
/// AuthUser into request extensions.
///
/// Requests without an Authorization header pass through anonymously; the
/// `AuthUser` and `AdminUser` extractors reject them where a user is needed.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AppError::InvalidToken))
        .transpose()?;

    if let Some(header) = header {
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::InvalidToken)?;

        // Verify token and get claims
        let claims = AuthService::verify_token(token, &state.config)?;

        // Insert AuthUser into request extensions
        let auth_user = AuthUser::from(claims);
        request.extensions_mut().insert(auth_user);
    }

    // Continue to handler
    Ok(next.run(request).await)
}
