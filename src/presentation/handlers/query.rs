use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::RetrievalError;
use crate::domain::Query;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

#[tracing::instrument(skip_all)]
pub async fn query_handler(
    State(state): State<AppState>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed query request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    tracing::debug!(query_len = request.query.len(), k = ?request.k, "Query received");

    let query = Query::new(request.query).with_top_k(request.k.unwrap_or(state.default_top_k));

    match state.retrieval_service.query(&query).await {
        Ok(answer) => {
            tracing::info!(passages = answer.passages.len(), "Query successful");
            (StatusCode::OK, Json(QueryResponse { answer: answer.text })).into_response()
        }
        Err(RetrievalError::EmptyQuery) => {
            tracing::warn!("Rejected empty query");
            error_response(StatusCode::BAD_REQUEST, "query must not be empty")
        }
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Query failed: {e}"),
            )
        }
    }
}
