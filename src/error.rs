use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures while loading a page of palettes.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid color {value:?} in page {page}")]
    InvalidColor { value: String, page: u32 },
}

/// Failures while reading the hosted feedback table.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback store is not configured: set {0}")]
    NotConfigured(&'static str),

    #[error("feedback request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feedback query returned {status} {status_text}")]
    Status { status: u16, status_text: String },
}

/// Errors surfaced by the `/colors` endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid page or limit parameters")]
    InvalidPagination,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidPagination => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
