//! Role-guard middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use feedesk_core::auth::{AuthError, RoleGuard};
use feedesk_shared::Claims;

use crate::response::error_response;

/// Rejects requests whose claims carry a role the guard does not admit.
///
/// Must run inside [`auth_middleware`](super::auth_middleware), which
/// attaches the claims. Attach with
/// `middleware::from_fn_with_state(RoleGuard::ADMIN, require_role)`.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> Response {
    let Some(claims) = request.extensions().get::<Claims>() else {
        return error_response(&AuthError::MissingToken.into());
    };

    if let Err(e) = guard.check(claims.role) {
        warn!(
            account_id = %claims.sub,
            role = %claims.role,
            path = %request.uri().path(),
            "Access denied"
        );
        return error_response(&e.into());
    }

    next.run(request).await
}
