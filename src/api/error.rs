//! HTTP mapping for service errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::Error;

/// JSON error body returned by every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
    pub message: String,
}

/// Wrapper turning a service [`Error`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0.format_for_log(), "Request failed");
        }

        let body = ErrorBody {
            error: format!("{:?}", self.0.code()),
            code: self.0.code() as u16,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::PersonaNotFound { .. } => StatusCode::NOT_FOUND,
        Error::RequestInvalid { .. } => StatusCode::BAD_REQUEST,
        Error::ContentBlocked { .. } => StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS,
        Error::ProviderRateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        Error::ProviderTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        Error::ProviderUnavailable { .. }
        | Error::ProviderResponse { .. }
        | Error::ProviderAuth { .. }
        | Error::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Shorthand for handler results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
