use axum::{extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;
use service_core::extract::AppJson;

use crate::models::{generation, ScanRequest};
use crate::services::prompts;
use crate::startup::AppState;

#[tracing::instrument(skip(state, request))]
pub async fn scan_code(
    State(state): State<AppState>,
    AppJson(request): AppJson<ScanRequest>,
) -> Result<Json<Value>, AppError> {
    let Some((filename, content)) = request.fields() else {
        return Err(AppError::BadRequest(
            "'filename' and 'content' are required.".to_string(),
        ));
    };

    let prompt = prompts::analysis_prompt(filename, content);

    let response = state
        .generator
        .generate(&prompt)
        .await
        .map_err(|e| e.into_app_error("Failed to analyze code with Gemini"))?;

    tracing::info!(
        filename = %filename,
        content_len = content.len(),
        reported_issues = ?generation::reported_issue_count(&response),
        "Scan analysed"
    );

    Ok(Json(response))
}
