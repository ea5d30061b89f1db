use serde::Deserialize;

/// One named file submitted for coverage estimation.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

/// Body of `POST /coverage`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRequest {
    #[serde(default)]
    pub source_files: Vec<SourceFile>,
    #[serde(default)]
    pub test_files: Vec<SourceFile>,
}

impl CoverageRequest {
    /// Coverage can only be estimated when both sides have at least one file.
    pub fn is_estimable(&self) -> bool {
        !self.source_files.is_empty() && !self.test_files.is_empty()
    }
}
