//! Collection reports for administrators.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, error};

use feedesk_core::auth::Role;
use feedesk_core::reports::ReportService;

use crate::AppState;
use crate::response::error_response;

/// Creates the reports router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fees/reports/summary", get(summary))
        .route("/fees/total-students", get(total_students))
        .route("/fees/pending-list", get(pending_list))
}

/// GET /fees/reports/summary - Totals by effective status.
async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    let buckets = match state.fees.totals_by_status().await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "Failed to total fees by status");
            return error_response(&e.into());
        }
    };

    let summary = ReportService::summarize(&buckets, Utc::now().date_naive());
    debug!(
        collected = %summary.total_collected,
        remaining = %summary.total_remaining,
        "Summary computed"
    );

    Json(summary).into_response()
}

/// GET /fees/total-students - Number of student accounts.
async fn total_students(State(state): State<AppState>) -> impl IntoResponse {
    match state.accounts.count_by_role(Role::Student).await {
        Ok(count) => Json(json!({ "count": count })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to count students");
            error_response(&e.into())
        }
    }
}

/// GET /fees/pending-list - Every unpaid fee with its owner's name.
async fn pending_list(State(state): State<AppState>) -> impl IntoResponse {
    let outstanding = match state.fees.list_outstanding().await {
        Ok(o) => o,
        Err(e) => {
            error!(error = %e, "Failed to list outstanding fees");
            return error_response(&e.into());
        }
    };

    let today = Utc::now().date_naive();
    let outstanding: Vec<_> = outstanding
        .into_iter()
        .map(|f| f.with_effective_status(today))
        .collect();

    Json(outstanding).into_response()
}
