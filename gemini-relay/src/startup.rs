//! Application startup and lifecycle management.

use crate::config::{CorsSettings, RelayConfig};
use crate::handlers::{estimate_coverage, health_check, metrics, notify, root, scan_code};
use crate::services::metrics::init_metrics;
use crate::services::{GeminiProvider, GenerationProvider, MessagingProvider, TelegramProvider};
use axum::body::Body;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{make_request_span, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn GenerationProvider>,
    pub messenger: Arc<dyn MessagingProvider>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn GenerationProvider>,
        messenger: Arc<dyn MessagingProvider>,
    ) -> Self {
        Self {
            generator,
            messenger,
            metrics: init_metrics(),
        }
    }
}

pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/scan", post(scan_code))
        .route("/notify", post(notify))
        .route("/coverage", post(estimate_coverage))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let allow_origin = if settings.allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(valid_origins(&settings.allowed_origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Origins that are not valid header values are dropped; they never widen the list.
fn valid_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let generator = GeminiProvider::new(config.gemini.clone())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
        tracing::info!(
            model = %config.gemini.model,
            endpoint = %generator.endpoint(),
            "Initialized Gemini provider"
        );

        let messenger = TelegramProvider::new(config.telegram.clone())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
        if messenger.is_configured() {
            tracing::info!("Initialized Telegram provider");
        } else {
            tracing::warn!("Telegram bot token or chat id missing; /notify will fail until configured");
        }

        let state = AppState::new(Arc::new(generator), Arc::new(messenger));
        Self::build_with_state(config, state).await
    }

    /// Build the application around pre-built providers.
    pub async fn build_with_state(config: RelayConfig, state: AppState) -> Result<Self, AppError> {
        let router = build_router(state, &config.cors);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Gemini relay listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
