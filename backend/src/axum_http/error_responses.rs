use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::usecases::storefront::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<&StoreError> for ErrorResponse {
    fn from(err: &StoreError) -> Self {
        let status = err.status_code();
        let message = match err {
            // Don't leak internal error detail to client
            StoreError::Internal(_) => "Internal server error".to_string(),
            StoreError::PaymentsDisabled(message) => message.clone(),
            other => other.to_string(),
        };
        ErrorResponse::new(status, message)
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        ErrorResponse::from(&self).into_response()
    }
}
