//! Axum request handlers for the HTTP API.
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::routes::AppState;
use crate::pipeline::{PipelineState, SearchRequest};
use crate::resolve::SearchMode;

/// Single user-visible failure message; the specific failure kind stays
/// server-side in the logs.
const NOTHING_FOUND: &str = "nothing found";

pub async fn root() -> &'static str {
    "Cover Framer"
}

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub input: String,
    /// Search by track instead of album.
    #[serde(default)]
    pub track: bool,
}

/// Run the full pipeline for one request.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateParams>,
) -> Result<Json<Value>, String> {
    let mode = if payload.track { SearchMode::Track } else { SearchMode::Album };
    let request = SearchRequest { raw_input: payload.input, mode };

    match state.pipeline.run(&request).await {
        Ok(Some(artifact)) => Ok(Json(json!({
            "image": artifact.data_uri,
            "filename": artifact.filename,
        }))),
        Ok(None) => Err(NOTHING_FOUND.to_string()),
        Err(e) => {
            tracing::error!("Generation failed ({:?}): {}", e.kind(), e);
            Err(NOTHING_FOUND.to_string())
        }
    }
}

/// Report the lifecycle state of the latest invocation, for polling UIs.
pub async fn pipeline_state(State(state): State<Arc<AppState>>) -> Json<Value> {
    let body = match state.pipeline.state().await {
        PipelineState::Idle => json!({"state": "idle"}),
        PipelineState::Pending => json!({"state": "pending"}),
        PipelineState::Success(artifact) => json!({
            "state": "success",
            "filename": artifact.filename,
        }),
        PipelineState::Failed(kind) => json!({"state": "failed", "kind": kind}),
    };
    Json(body)
}
