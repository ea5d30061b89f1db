//! service-core: Shared HTTP infrastructure for the relay services.
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod observability;

pub use axum;
pub use serde_json;
pub use tracing;
