#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use gemini_relay::config::{CorsSettings, GeminiSettings, RelayConfig, TelegramSettings};
use gemini_relay::services::{
    GenerationProvider, MessagingProvider, MockGenerationProvider, MockMessagingProvider,
};
use gemini_relay::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_BOT_TOKEN: &str = "42:test-token";
pub const TEST_CHAT_ID: &str = "-1001234";

/// Config pointing both upstreams at `upstream_base` (usually a wiremock server).
pub fn test_config(upstream_base: &str, telegram_configured: bool) -> RelayConfig {
    let mut gemini = GeminiSettings::new("test-api-key");
    gemini.api_base = upstream_base.to_string();

    let telegram = TelegramSettings {
        bot_token: telegram_configured.then(|| Secret::new(TEST_BOT_TOKEN.to_string())),
        chat_id: telegram_configured.then(|| TEST_CHAT_ID.to_string()),
        api_base: upstream_base.to_string(),
        ..TelegramSettings::default()
    };

    RelayConfig {
        common: CoreConfig { port: 0 },
        gemini,
        telegram,
        cors: CorsSettings {
            allowed_origins: Vec::new(),
        },
        otlp_endpoint: None,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the real application (Gemini + Telegram providers) on a random port.
    pub async fn spawn(config: RelayConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// In-process router backed by mock providers.
pub struct MockedRouter {
    pub router: Router,
    pub generator: Arc<MockGenerationProvider>,
    pub messenger: Arc<MockMessagingProvider>,
}

impl MockedRouter {
    pub fn new(generator: MockGenerationProvider, messenger: MockMessagingProvider) -> Self {
        let generator = Arc::new(generator);
        let messenger = Arc::new(messenger);
        let state = AppState::new(
            generator.clone() as Arc<dyn GenerationProvider>,
            messenger.clone() as Arc<dyn MessagingProvider>,
        );
        let router = build_router(
            state,
            &CorsSettings {
                allowed_origins: Vec::new(),
            },
        );

        Self {
            router,
            generator,
            messenger,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::get(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(path, body.to_string()).await
    }

    pub async fn post_raw(&self, path: &str, body: String) -> (StatusCode, Value) {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
