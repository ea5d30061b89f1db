use super::Issue;
use serde::{Deserialize, Serialize};

/// Body of `POST /notify`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub scan_results: Option<Vec<Issue>>,
}

/// What should be delivered for a notify request.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyContent<'a> {
    Report(&'a [Issue]),
    Message(&'a str),
}

impl NotifyRequest {
    /// Non-empty scan results win over a plain message; `None` when neither is usable.
    pub fn content(&self) -> Option<NotifyContent<'_>> {
        if let Some(issues) = self.scan_results.as_deref().filter(|r| !r.is_empty()) {
            return Some(NotifyContent::Report(issues));
        }
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(NotifyContent::Message)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotifyResponse {
    pub status: String,
    pub message: String,
    pub telegram_response: serde_json::Value,
}

impl NotifyResponse {
    pub fn sent(telegram_response: serde_json::Value) -> Self {
        Self {
            status: "sent".to_string(),
            message: "Notification sent successfully".to_string(),
            telegram_response,
        }
    }
}
