//! Error response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use feedesk_shared::AppError;

/// Message returned for every 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Renders an `AppError` as `{error, msg}` with its status code.
///
/// Server errors never expose their cause; callers log it before responding.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let msg = if err.is_server_error() {
        SERVER_ERROR_MESSAGE
    } else {
        err.message()
    };

    (status, Json(json!({ "error": err.error_code(), "msg": msg }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response = error_response(&AppError::NotFound("Fee assignment not found.".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["msg"], "Fee assignment not found.");
    }

    #[tokio::test]
    async fn test_server_error_hides_cause() {
        let response = error_response(&AppError::Database("connection refused".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["msg"], "Server Error");
    }
}
