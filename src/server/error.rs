//! Error types for the HTTP server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::errors::AppError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Body could not be read as a translation request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A pipeline stage failed
    #[error(transparent)]
    Pipeline(#[from] AppError),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!("Request failed: {}", message);

        // Every failure is reported the same way, clients only read `error`
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}
