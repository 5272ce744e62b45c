use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sources::SourceError;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures confined to a single candidate symbol.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("required column '{0}' missing from price data")]
    MissingField(String),

    #[error("not enough price history: need {required} bars, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("no price data returned for {0}")]
    DataUnavailable(String),

    #[error("computation failed: {0}")]
    Computation(String),

    #[error("market data request failed: {0}")]
    Source(#[from] SourceError),
}

impl AnalysisError {
    /// Whether the candidate should be dropped silently instead of reported.
    pub fn is_silent_skip(&self) -> bool {
        matches!(self, AnalysisError::DataUnavailable(_))
    }
}
