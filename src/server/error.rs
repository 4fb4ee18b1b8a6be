//! JSON error responses for the HTTP API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::detectors::{FaceDetectionError, ImageDecodeError, TranscriptionError};

/// Error returned by API handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    BadGateway(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::BadGateway(m) | Self::Unavailable(m) | Self::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<ImageDecodeError> for ApiError {
    fn from(e: ImageDecodeError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<FaceDetectionError> for ApiError {
    fn from(e: FaceDetectionError) -> Self {
        match e {
            FaceDetectionError::NotConfigured => Self::Unavailable(e.to_string()),
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl From<TranscriptionError> for ApiError {
    fn from(e: TranscriptionError) -> Self {
        match e {
            TranscriptionError::NotConfigured => Self::Unavailable(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
