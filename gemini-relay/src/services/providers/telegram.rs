use super::{upstream_error_message, MessagingProvider, ProviderError};
use crate::config::TelegramSettings;
use crate::services::metrics::{record_upstream_call, Upstream};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use service_core::observability::TracedClientExt;
use std::time::Instant;

const PROVIDER: &str = "Telegram";
const PARSE_MODE: &str = "HTML";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramProvider {
    settings: TelegramSettings,
    client: Client,
}

impl TelegramProvider {
    pub fn new(settings: TelegramSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, settings.timeout, e))?;

        Ok(Self { settings, client })
    }

    pub fn is_configured(&self) -> bool {
        self.settings.bot_token.is_some() && self.settings.chat_id.is_some()
    }

    async fn post(&self, text: &str) -> Result<Value, ProviderError> {
        let (Some(token), Some(chat_id)) = (&self.settings.bot_token, &self.settings.chat_id)
        else {
            return Err(ProviderError::NotConfigured(
                "Telegram configuration missing (TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID)"
                    .to_string(),
            ));
        };

        let url = format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base.trim_end_matches('/'),
            token.expose_secret()
        );
        let payload = SendMessageRequest {
            chat_id,
            text,
            parse_mode: PARSE_MODE,
        };
        let timeout = self.settings.timeout;

        let response = self
            .client
            .traced_post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                message: upstream_error_message(&body, "/description", status),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, timeout, e))
    }
}

#[async_trait]
impl MessagingProvider for TelegramProvider {
    async fn send_message(&self, text: &str) -> Result<Value, ProviderError> {
        let started = Instant::now();
        let result = self.post(text).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        record_upstream_call(Upstream::Telegram, outcome, started.elapsed());

        match &result {
            Ok(_) => tracing::info!(text_len = text.len(), "Telegram message sent"),
            Err(e) => tracing::warn!(error = %e, "Telegram message failed"),
        }

        result
    }
}
