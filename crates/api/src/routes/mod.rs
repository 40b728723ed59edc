//! API route definitions.

use axum::{Router, middleware};

use feedesk_core::auth::RoleGuard;

use crate::AppState;
use crate::middleware::{auth_middleware, require_role};

pub mod auth;
pub mod fees;
pub mod health;
pub mod reports;

/// Creates the API router; protected groups need state for their middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .merge(fees::admin_routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(RoleGuard::ADMIN, require_role))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let student_routes = Router::new()
        .merge(fees::student_routes())
        .layer(middleware::from_fn_with_state(
            RoleGuard::STUDENT,
            require_role,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(admin_routes)
        .merge(student_routes)
}
