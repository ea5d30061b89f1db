//! Outbound capabilities used by the relay handlers.
//!
//! Each trait has one production implementation talking HTTP and a mock used
//! by tests, so handlers never know which one they hold.

pub mod gemini;
pub mod mock;
pub mod telegram;

use async_trait::async_trait;
use serde_json::Value;
use service_core::error::AppError;
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use mock::{MockGenerationProvider, MockMessagingProvider};
pub use telegram::TelegramProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} request timed out after {timeout:?}")]
    Timeout {
        provider: &'static str,
        timeout: Duration,
    },

    #[error("{provider} request failed: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// Classify a reqwest failure. The URL is stripped because Telegram URLs embed the bot token.
    pub fn from_reqwest(provider: &'static str, timeout: Duration, err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            ProviderError::Timeout { provider, timeout }
        } else if err.is_decode() {
            ProviderError::InvalidResponse {
                provider,
                message: err.to_string(),
            }
        } else {
            ProviderError::Network {
                provider,
                message: err.to_string(),
            }
        }
    }

    /// Short metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Api { .. } => "http_error",
            ProviderError::Timeout { .. } => "timeout",
            ProviderError::Network { .. } => "network_error",
            ProviderError::InvalidResponse { .. } => "invalid_response",
        }
    }

    /// Map to the HTTP-facing error, prefixing upstream failures with `context`.
    pub fn into_app_error(self, context: &str) -> AppError {
        match self {
            ProviderError::NotConfigured(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            other => AppError::UpstreamError(format!("{}: {}", context, other)),
        }
    }
}

/// Pull a human-readable message out of an upstream error body.
///
/// Uses the string at `pointer` when the body is JSON and carries one, the raw
/// body otherwise, and the status text when the body is empty.
pub(crate) fn upstream_error_message(body: &str, pointer: &str, status: reqwest::StatusCode) -> String {
    if let Some(message) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer(pointer).and_then(Value::as_str).map(str::to_string))
    {
        return message;
    }
    if body.trim().is_empty() {
        return status.to_string();
    }
    body.to_string()
}

/// Sends a single prompt to a generative-language API.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Returns the provider's JSON response unchanged.
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError>;
}

/// Delivers a text message to the configured chat.
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Returns the provider's JSON response unchanged.
    async fn send_message(&self, text: &str) -> Result<Value, ProviderError>;
}
