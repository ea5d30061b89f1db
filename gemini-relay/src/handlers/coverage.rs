use axum::{extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;
use service_core::extract::AppJson;

use crate::models::{generation, CoverageRequest};
use crate::services::prompts;
use crate::startup::AppState;

#[tracing::instrument(skip(state, request))]
pub async fn estimate_coverage(
    State(state): State<AppState>,
    AppJson(request): AppJson<CoverageRequest>,
) -> Result<Json<Value>, AppError> {
    if !request.is_estimable() {
        tracing::info!(
            source_files = request.source_files.len(),
            test_files = request.test_files.len(),
            "Nothing to estimate, replying with zero coverage"
        );
        return Ok(Json(generation::zero_coverage_response()));
    }

    let prompt = prompts::coverage_prompt(&request.source_files, &request.test_files);

    let response = state
        .generator
        .generate(&prompt)
        .await
        .map_err(|e| e.into_app_error("Failed to estimate coverage"))?;

    tracing::info!(
        source_files = request.source_files.len(),
        test_files = request.test_files.len(),
        estimate = ?generation::coverage_estimate(&response),
        "Coverage estimated"
    );

    Ok(Json(response))
}
