//! HTTP API surface: routing, request extraction and the fail-soft error
//! contract of the two predict routes.

use crate::application::artifact::ModelArtifact;
use crate::application::normalizer;
use crate::domain::errors::PredictError;
use crate::domain::features::BilletMeasurement;
use crate::domain::types::PredictionBatch;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Shared request state.
///
/// The artifact is immutable for the process lifetime, so a plain `Arc`
/// is enough; no locking, no per-request reload.
#[derive(Clone)]
pub struct AppState {
    pub artifact: Arc<ModelArtifact>,
    pub max_batch_rows: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict/", post(predict))
        .route("/predict_csv/", post(predict_csv))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Bienvenue sur l'API de détection de faux billets !"
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Scores a JSON batch of banknote records.
///
/// Records are schema-complete by construction: the extractor rejects a
/// missing or non-numeric field before this handler runs, so this path
/// never imputes.
async fn predict(
    State(state): State<AppState>,
    Json(billets): Json<Vec<BilletMeasurement>>,
) -> Json<serde_json::Value> {
    fail_soft(score_records(&state, &billets))
}

/// Scores a multipart CSV upload (one `file` field, header row required).
async fn predict_csv(State(state): State<AppState>, multipart: Multipart) -> Response {
    match read_file_field(multipart).await {
        Ok(bytes) => fail_soft(score_csv(&state, &bytes)).into_response(),
        // A missing or unreadable upload body is an ingress failure, not a
        // scoring failure; it keeps the transport status.
        Err(reason) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": reason })),
        )
            .into_response(),
    }
}

fn score_records(
    state: &AppState,
    billets: &[BilletMeasurement],
) -> Result<PredictionBatch, PredictError> {
    if billets.is_empty() {
        return Err(PredictError::EmptyBatch);
    }
    check_batch_size(state, billets.len())?;

    let rows: Vec<Vec<f64>> = billets.iter().map(BilletMeasurement::to_vector).collect();
    info!(rows = rows.len(), "scoring record batch");
    state.artifact.score(&rows)
}

fn score_csv(state: &AppState, bytes: &[u8]) -> Result<PredictionBatch, PredictError> {
    let rows = normalizer::normalize_csv(bytes)?;
    check_batch_size(state, rows.len())?;

    info!(rows = rows.len(), "scoring tabular upload");
    state.artifact.score(&rows)
}

fn check_batch_size(state: &AppState, rows: usize) -> Result<(), PredictError> {
    if state.max_batch_rows > 0 && rows > state.max_batch_rows {
        return Err(PredictError::BatchTooLarge {
            rows,
            limit: state.max_batch_rows,
        });
    }
    Ok(())
}

async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("invalid multipart upload: {}", e))?
    {
        if field.name() == Some("file") {
            return field
                .bytes()
                .await
                .map_err(|e| format!("failed to read upload: {}", e));
        }
    }
    Err("missing multipart field 'file'".to_string())
}

/// Legacy contract of the predict routes: failures are reported in the body,
/// not the status line, and callers check for an `error` key. Mapping the
/// typed errors to transport statuses instead only requires changing this
/// function.
fn fail_soft(result: Result<PredictionBatch, PredictError>) -> Json<serde_json::Value> {
    match result {
        Ok(batch) => Json(serde_json::json!({
            "predictions": batch.predictions,
            "probabilities": batch.probabilities,
        })),
        Err(err) => {
            warn!("prediction rejected: {}", err);
            Json(serde_json::json!({ "error": err.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_soft_success_shape() {
        let body = fail_soft(Ok(PredictionBatch {
            predictions: vec![0, 1],
            probabilities: vec![0.25, 0.75],
        }));

        assert_eq!(body.0["predictions"], serde_json::json!([0, 1]));
        assert_eq!(body.0["probabilities"], serde_json::json!([0.25, 0.75]));
        assert!(body.0.get("error").is_none());
    }

    #[test]
    fn test_fail_soft_error_shape() {
        let body = fail_soft(Err(PredictError::EmptyBatch));
        assert!(
            body.0["error"]
                .as_str()
                .expect("error message")
                .contains("empty batch")
        );
    }
}
