//! Authentication routes for registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::{error, info, warn};

use feedesk_core::auth::{AuthError, Registration, hash_password, normalize_email, verify_password};
use feedesk_core::store::StoreError;
use feedesk_shared::auth::{
    AccountSummary, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};

use crate::AppState;
use crate::extractors::ApiJson;
use crate::response::error_response;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register - Create an admin or student account.
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> impl IntoResponse {
    let registration = match Registration::validate(payload) {
        Ok(r) => r,
        Err(e) => {
            info!(error = %e, "Registration rejected");
            return error_response(&e.into());
        }
    };

    // Early out only; the unique index is authoritative.
    match state.accounts.email_exists(&registration.email).await {
        Ok(true) => {
            info!(email = %registration.email, "Registration for existing email");
            return error_response(&AuthError::EmailTaken.into());
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return error_response(&e.into());
        }
    }

    let password_hash = match hash_password(registration.password()) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return error_response(&e.into());
        }
    };

    let account = match state
        .accounts
        .create(registration.into_new_account(password_hash))
        .await
    {
        Ok(a) => a,
        Err(StoreError::Duplicate(detail)) => {
            warn!(detail = %detail, "Concurrent registration lost at unique index");
            return error_response(&AuthError::EmailTaken.into());
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            return error_response(&e.into());
        }
    };

    let role = account.role();
    info!(account_id = %account.id, role = %role, "Account registered");

    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            msg: format!("{role} registered successfully."),
            user: AccountSummary {
                id: account.id,
                email: account.email,
                role,
            },
        }),
    )
        .into_response()
}

/// POST /auth/login - Verify credentials and issue a session token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&payload.email);

    let account = match state.accounts.find_by_email(&email).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            info!(email = %email, "Login attempt for unknown email");
            return error_response(&AuthError::InvalidCredentials.into());
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return error_response(&e.into());
        }
    };

    match verify_password(&payload.password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(account_id = %account.id, "Failed login attempt - invalid password");
            return error_response(&AuthError::InvalidCredentials.into());
        }
        Err(e) => {
            error!(error = %e, account_id = %account.id, "Password verification error");
            return error_response(&e.into());
        }
    }

    let token = match state.jwt_service.issue_token(account.id, account.role()) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to issue token");
            return error_response(&e.into());
        }
    };

    info!(account_id = %account.id, role = %account.role(), "Logged in");

    (StatusCode::OK, Json(LoginResponse { token })).into_response()
}
