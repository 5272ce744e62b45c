//! Analysis API endpoint.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::services::resolver;
use crate::types::AnalysisOutcome;
use crate::AppState;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    pub request_id: Uuid,
}

impl<T> ApiResponse<T> {
    fn new(data: T, request_id: Uuid) -> Self {
        Self {
            data,
            meta: ApiMeta { request_id },
        }
    }
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:ticker", get(get_analysis))
}

/// Analyze a ticker across its candidate markets.
async fn get_analysis(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ApiResponse<AnalysisOutcome>>> {
    let ticker = resolver::sanitize(&raw, state.config.max_ticker_len).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Please provide a valid ticker (e.g. NVDA, CPALL.BK, XAUUSD), at most {} characters",
            state.config.max_ticker_len
        ))
    })?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analysis", %request_id, %ticker);
    let outcome = async {
        info!("Received analysis request");
        state.analyzer.analyze(&ticker).await
    }
    .instrument(span)
    .await;

    match outcome {
        AnalysisOutcome::NotFound { message, .. } => Err(AppError::NotFound(message)),
        outcome => Ok(Json(ApiResponse::new(outcome, request_id))),
    }
}
