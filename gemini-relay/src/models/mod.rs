pub mod coverage;
pub mod generation;
pub mod issue;
pub mod notify;
pub mod scan;

pub use coverage::{CoverageRequest, SourceFile};
pub use generation::{GenerateContentRequest, GenerationConfig};
pub use issue::{Issue, IssueType, Severity};
pub use notify::{NotifyContent, NotifyRequest, NotifyResponse};
pub use scan::ScanRequest;
