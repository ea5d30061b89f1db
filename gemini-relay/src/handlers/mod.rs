//! HTTP handlers for the relay.

pub mod coverage;
pub mod health;
pub mod metrics;
pub mod notify;
pub mod scan;

pub use coverage::estimate_coverage;
pub use health::{health_check, root};
pub use metrics::metrics;
pub use notify::notify;
pub use scan::scan_code;
