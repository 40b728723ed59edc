//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use feedesk_core::auth::{AuthError, Role};
use feedesk_shared::{Claims, JwtError};

use crate::AppState;
use crate::response::error_response;

/// Legacy token header accepted when no bearer token is present.
pub const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Finds the session token: bearer first, then the legacy header.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .or_else(|| {
            headers
                .get(LEGACY_TOKEN_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|token| !token.is_empty())
        })
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the token from `Authorization: Bearer` or `x-auth-token`
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        debug!(path = %request.uri().path(), "Request without token");
        return error_response(&AuthError::MissingToken.into());
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => {
            info!(path = %request.uri().path(), "Rejected expired token");
            error_response(&AuthError::InvalidToken.into())
        }
        Err(e) => {
            warn!(error = %e, path = %request.uri().path(), "Rejected invalid token");
            error_response(&AuthError::InvalidToken.into())
        }
    }
}

/// Extractor for authenticated account claims.
///
/// Use this in handlers behind [`auth_middleware`]:
///
/// ```ignore
/// async fn handler(user: AuthUser) -> impl IntoResponse {
///     let account_id = user.account_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the account ID from the claims.
    #[must_use]
    pub fn account_id(&self) -> Uuid {
        self.0.account_id()
    }

    /// Returns the account's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.0.role
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| error_response(&AuthError::MissingToken.into()))
    }
}
