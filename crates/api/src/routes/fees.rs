//! Fee assignment, listing, payment and receipt routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

use feedesk_core::fees::{AssignFeeInput, FeeError, FeeService};
use feedesk_core::store::StoreError;

use crate::AppState;
use crate::extractors::ApiJson;
use crate::middleware::AuthUser;
use crate::response::error_response;

/// Routes reserved for administrators.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/fees/assign", post(assign_fee))
}

/// Routes reserved for students.
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/fees/student", get(list_my_fees))
        .route("/fees/simulate/{id}", put(simulate_payment))
        .route("/fees/receipt/{id}", get(get_receipt))
}

/// POST /fees/assign - Assign a fee to a student.
async fn assign_fee(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<AssignFeeInput>,
) -> impl IntoResponse {
    let draft = match FeeService::validate_assignment(payload) {
        Ok(d) => d,
        Err(e) => {
            info!(error = %e, "Fee assignment rejected");
            return error_response(&e.into());
        }
    };

    let Some(student_id) = FeeService::parse_id(&draft.student_ref) else {
        return error_response(&FeeError::StudentNotFound.into());
    };

    let student = match state.accounts.find_by_id(student_id).await {
        Ok(account) => match FeeService::ensure_student(account) {
            Ok(s) => s,
            Err(e) => return error_response(&e.into()),
        },
        Err(e) => {
            error!(error = %e, "Failed to look up student");
            return error_response(&e.into());
        }
    };

    let assignment = match state.fees.create(draft.for_student(student.id)).await {
        Ok(a) => a,
        // Owner removed between lookup and insert.
        Err(StoreError::InvalidRecord(detail)) => {
            warn!(detail = %detail, "Fee insert lost its student");
            return error_response(&FeeError::StudentNotFound.into());
        }
        Err(e) => {
            error!(error = %e, "Failed to create fee assignment");
            return error_response(&e.into());
        }
    };

    info!(
        fee_id = %assignment.id,
        student_id = %student.id,
        admin_id = %user.account_id(),
        amount = %assignment.amount,
        "Fee assigned"
    );

    (
        StatusCode::CREATED,
        Json(json!({
            "msg": format!("Fee assigned successfully to {}", student.name),
            "assignment": assignment,
        })),
    )
        .into_response()
}

/// GET /fees/student - List the caller's fees by due date.
async fn list_my_fees(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    let fees = match state.fees.list_for_student(user.account_id()).await {
        Ok(f) => f,
        Err(e) => {
            error!(error = %e, "Failed to list student fees");
            return error_response(&e.into());
        }
    };

    if fees.is_empty() {
        return Json(json!({
            "msg": "No fee assignments found for this student.",
            "fees": [],
        }))
        .into_response();
    }

    let today = Utc::now().date_naive();
    let fees: Vec<_> = fees
        .into_iter()
        .map(|f| f.with_effective_status(today))
        .collect();

    Json(fees).into_response()
}

/// PUT /fees/simulate/{id} - Pay a fee through the simulated gateway.
async fn simulate_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let caller = user.account_id();
    let Some(fee_id) = FeeService::parse_id(&id) else {
        return error_response(&FeeError::AssignmentNotFound.into());
    };

    let assignment = match state.fees.find_by_id(fee_id).await {
        Ok(Some(a)) => a,
        Ok(None) => return error_response(&FeeError::AssignmentNotFound.into()),
        Err(e) => {
            error!(error = %e, "Failed to fetch fee assignment");
            return error_response(&e.into());
        }
    };

    if let Err(e) = FeeService::authorize_payment(&assignment, caller) {
        warn!(fee_id = %fee_id, caller = %caller, error = %e, "Payment refused");
        return error_response(&e.into());
    }

    let receipt = match state
        .fees
        .mark_paid(fee_id, FeeService::simulated_payment(Utc::now()))
        .await
    {
        Ok(Some(r)) => r,
        Ok(None) => {
            info!(fee_id = %fee_id, "Concurrent payment already applied");
            return error_response(&FeeError::AlreadyPaid.into());
        }
        Err(e) => {
            error!(error = %e, "Failed to record payment");
            return error_response(&e.into());
        }
    };

    info!(
        fee_id = %fee_id,
        student_id = %caller,
        transaction_id = receipt.transaction_id.as_deref().unwrap_or_default(),
        "Payment simulated"
    );

    Json(json!({
        "msg": "Payment simulated successfully. Status updated to Paid.",
        "receipt": receipt,
    }))
    .into_response()
}

/// GET /fees/receipt/{id} - Fetch one of the caller's fee records.
async fn get_receipt(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(fee_id) = FeeService::parse_id(&id) else {
        return error_response(&FeeError::ReceiptNotFound.into());
    };

    let assignment = match state.fees.find_by_id(fee_id).await {
        Ok(Some(a)) => a,
        Ok(None) => return error_response(&FeeError::ReceiptNotFound.into()),
        Err(e) => {
            error!(error = %e, "Failed to fetch receipt");
            return error_response(&e.into());
        }
    };

    if let Err(e) = FeeService::authorize_receipt(&assignment, user.account_id()) {
        warn!(fee_id = %fee_id, caller = %user.account_id(), "Receipt access refused");
        return error_response(&e.into());
    }

    Json(assignment.with_effective_status(Utc::now().date_naive())).into_response()
}
