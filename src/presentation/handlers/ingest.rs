use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::application::ports::FileLoaderError;
use crate::application::services::IngestionError;
use crate::domain::StorageLocation;
use crate::presentation::state::AppState;

use super::error::error_response;

/// Object-created notification in the S3 event layout:
/// `{"Records":[{"s3":{"bucket":{"name":..},"object":{"key":..}}}]}`.
#[derive(Debug, Deserialize)]
pub struct IngestionEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectEntity {
    pub key: String,
}

impl IngestionEvent {
    /// Object keys arrive form-encoded (`+` for space, `%XX` otherwise) and
    /// are decoded here.
    pub fn locations(&self) -> Vec<StorageLocation> {
        self.records
            .iter()
            .map(|r| {
                StorageLocation::new(
                    r.s3.bucket.name.as_str(),
                    decode_object_key(&r.s3.object.key),
                )
            })
            .collect()
    }
}

fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ingested: Vec<IngestedDocument>,
}

#[derive(Debug, Serialize)]
pub struct IngestedDocument {
    pub source_key: String,
    pub chunk_count: usize,
}

/// Ingests every object named by the event, in order, stopping at the first
/// failure. Documents ingested before the failure stay indexed.
#[tracing::instrument(skip_all)]
pub async fn ingest_handler(
    State(state): State<AppState>,
    event: Result<Json<IngestionEvent>, JsonRejection>,
) -> Response {
    let Json(event) = match event {
        Ok(event) => event,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed ingestion event");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    tracing::debug!(records = event.records.len(), "Ingestion event received");

    let locations = event.locations();
    if locations.is_empty() {
        tracing::warn!("Ingestion event with no records");
        return error_response(StatusCode::BAD_REQUEST, "event contains no records");
    }

    let mut ingested = Vec::with_capacity(locations.len());
    for location in &locations {
        match state.ingestion_service.ingest(location).await {
            Ok(report) => ingested.push(IngestedDocument {
                source_key: report.source_key,
                chunk_count: report.chunk_count,
            }),
            Err(e) => {
                return error_response(
                    status_for(&e),
                    format!("Ingestion of {location} failed: {e}"),
                );
            }
        }
    }

    (StatusCode::OK, Json(IngestResponse { ingested })).into_response()
}

fn status_for(error: &IngestionError) -> StatusCode {
    match error {
        IngestionError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        IngestionError::Extraction(FileLoaderError::ExtractionFailed(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
