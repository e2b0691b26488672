//! API error types and their HTTP mappings.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use recarbo_core::ExtractionError;

/// Errors returned by the upload API.
///
/// The core pipeline defines no HTTP semantics; the mapping to status
/// codes lives entirely here.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The multipart request had no `receipt` file field.
    #[error("no file uploaded")]
    MissingFile,

    /// The request body could not be read.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Text extraction failed for the uploaded image.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// Unexpected server-side failure.
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// JSON error body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFile | ApiError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
