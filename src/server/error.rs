//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::ChatResponse;

/// Errors surfaced to HTTP callers. Bodies keep the `{ "reply": ... }` shape.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No message received.")]
    MissingMessage,

    #[error("Internal server error.")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingMessage => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ChatResponse {
            reply: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
