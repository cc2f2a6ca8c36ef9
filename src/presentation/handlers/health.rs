use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub indexed_records: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> Response {
    match state.vector_store.count().await {
        Ok(indexed_records) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                indexed_records,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Vector store unavailable");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}
