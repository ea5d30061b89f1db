use serde::Deserialize;

/// Body of `POST /scan`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ScanRequest {
    /// Both fields, when present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let filename = self.filename.as_deref().filter(|s| !s.is_empty())?;
        let content = self.content.as_deref().filter(|s| !s.is_empty())?;
        Some((filename, content))
    }
}
