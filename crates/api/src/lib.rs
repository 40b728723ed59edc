//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication and role-guard middleware
//! - Request extractors
//! - Error response mapping

pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use feedesk_core::store::{AccountStore, FeeLedger};
use feedesk_db::{FeeRepository, UserRepository};
use feedesk_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account records.
    pub accounts: Arc<dyn AccountStore>,
    /// Fee assignment records.
    pub fees: Arc<dyn FeeLedger>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Builds state backed by PostgreSQL repositories sharing one pool.
    #[must_use]
    pub fn with_database(db: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self {
            accounts: Arc::new(UserRepository::new(db.clone())),
            fees: Arc::new(FeeRepository::new(db)),
            jwt_service: Arc::new(jwt_service),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
