//! Gemini `generateContent` client.

use super::{upstream_error_message, GenerationProvider, ProviderError};
use crate::config::GeminiSettings;
use crate::models::GenerateContentRequest;
use crate::services::metrics::{record_upstream_call, Upstream};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use service_core::observability::TracedClientExt;
use std::time::Instant;

const PROVIDER: &str = "Gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiProvider {
    settings: GeminiSettings,
    endpoint: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, settings.timeout, e))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            settings.api_base.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &GenerateContentRequest) -> Result<Value, ProviderError> {
        let timeout = self.settings.timeout;

        let response = self
            .client
            .traced_post(&self.endpoint)
            .header(API_KEY_HEADER, self.settings.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                message: upstream_error_message(&body, "/error/message", status),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, timeout, e))
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        tracing::debug!(
            model = %self.settings.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let started = Instant::now();
        let result = self.post(&request).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        record_upstream_call(Upstream::Gemini, outcome, started.elapsed());

        if let Err(e) = &result {
            tracing::warn!(model = %self.settings.model, error = %e, "Gemini request failed");
        }

        result
    }
}
