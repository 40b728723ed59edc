//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request},
    response::Response,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use feedesk_shared::AppError;

use crate::response::error_response;

/// JSON body extractor that answers malformed bodies with the API error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Rejected request body");
                Err(error_response(&AppError::BadRequest(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))))
            }
        }
    }
}
