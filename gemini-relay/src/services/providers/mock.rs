//! Mock provider implementations for testing.

use super::{GenerationProvider, MessagingProvider, ProviderError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Mock generation provider that records prompts and replies with a canned body.
pub struct MockGenerationProvider {
    reply: Result<Value, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerationProvider {
    /// Reply with `body` to every prompt.
    pub fn replying(body: Value) -> Self {
        Self {
            reply: Ok(body),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply with a Gemini-shaped response whose first candidate carries `text`.
    pub fn replying_text(text: &str) -> Self {
        Self::replying(json!({
            "candidates": [{
                "content": {"parts": [{"text": text}], "role": "model"},
                "finishReason": "STOP"
            }]
        }))
    }

    /// Fail every prompt with an upstream API error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());

        tracing::info!(prompt_len = prompt.len(), "[MOCK] Prompt would be sent to Gemini");

        self.reply.clone().map_err(|message| ProviderError::Api {
            provider: "Gemini",
            status: 500,
            message,
        })
    }
}

#[derive(Debug, Clone)]
enum MessagingBehaviour {
    Accept,
    Unconfigured,
    Fail(String),
}

/// Mock messaging provider that records delivered texts.
pub struct MockMessagingProvider {
    behaviour: MessagingBehaviour,
    messages: Mutex<Vec<String>>,
    send_count: AtomicU64,
}

impl MockMessagingProvider {
    fn with(behaviour: MessagingBehaviour) -> Self {
        Self {
            behaviour,
            messages: Mutex::new(Vec::new()),
            send_count: AtomicU64::new(0),
        }
    }

    /// Accept every message, answering like the Bot API does.
    pub fn accepting() -> Self {
        Self::with(MessagingBehaviour::Accept)
    }

    /// Behave as if bot token or chat id were missing.
    pub fn unconfigured() -> Self {
        Self::with(MessagingBehaviour::Unconfigured)
    }

    /// Fail every message with an upstream API error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::with(MessagingBehaviour::Fail(message.to_string()))
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingProvider for MockMessagingProvider {
    async fn send_message(&self, text: &str) -> Result<Value, ProviderError> {
        match &self.behaviour {
            MessagingBehaviour::Unconfigured => Err(ProviderError::NotConfigured(
                "Telegram configuration missing (TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID)"
                    .to_string(),
            )),
            MessagingBehaviour::Fail(message) => Err(ProviderError::Api {
                provider: "Telegram",
                status: 400,
                message: message.clone(),
            }),
            MessagingBehaviour::Accept => {
                self.messages
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(text.to_string());
                let message_id = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

                tracing::info!(text_len = text.len(), "[MOCK] Telegram message would be sent");

                Ok(json!({
                    "ok": true,
                    "result": {"message_id": message_id, "text": text}
                }))
            }
        }
    }
}
