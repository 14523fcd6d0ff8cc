use crate::http::response::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fleetwatch_domain::DomainError;
use tracing::error;

/// Domain error carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

/// Map a domain error to its caller-visible status.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::ValidationError(_)
        | DomainError::EmptyBatch
        | DomainError::MixedVehicleBatch
        | DomainError::InvalidRange(_) => StatusCode::BAD_REQUEST,
        DomainError::MissingApiKey => StatusCode::UNAUTHORIZED,
        DomainError::InvalidApiKey => StatusCode::FORBIDDEN,
        DomainError::TelemetryNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::StoreError(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status == StatusCode::BAD_GATEWAY {
            error!("store failure surfaced to caller: {}", self.0);
        }
        let body = ApiResponse::<()>::failure(status, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
