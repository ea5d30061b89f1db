use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::AppJson;

use crate::models::{NotifyContent, NotifyRequest, NotifyResponse};
use crate::services::report;
use crate::startup::AppState;

#[tracing::instrument(skip(state, request))]
pub async fn notify(
    State(state): State<AppState>,
    AppJson(request): AppJson<NotifyRequest>,
) -> Result<Json<NotifyResponse>, AppError> {
    let text = match request.content() {
        Some(NotifyContent::Report(issues)) => {
            tracing::debug!(issues = issues.len(), "Rendering scan report");
            report::render_report(issues)
        }
        Some(NotifyContent::Message(message)) => message.to_string(),
        None => {
            return Err(AppError::BadRequest(
                "'message' or 'scan_results' is required.".to_string(),
            ))
        }
    };

    let telegram_response = state
        .messenger
        .send_message(&text)
        .await
        .map_err(|e| e.into_app_error("Failed to send Telegram message"))?;

    Ok(Json(NotifyResponse::sent(telegram_response)))
}
