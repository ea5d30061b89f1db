//! Findings produced by the analysis prompt and echoed back by the frontend
//! in `POST /notify`.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    /// Any value outside the known set. Never tallied.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Vulnerability,
    Dependency,
    /// Any value outside the known set. Never tallied.
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    #[serde(rename = "type", default)]
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

impl Issue {
    pub fn is_severity(&self, severity: Severity) -> bool {
        self.severity == Some(severity)
    }

    pub fn is_type(&self, issue_type: IssueType) -> bool {
        self.issue_type == Some(issue_type)
    }
}

// Upstream output is free-form, so unknown or non-string values map to `Other`
// rather than failing the whole request.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("high") => Severity::High,
            Some("medium") => Severity::Medium,
            Some("low") => Severity::Low,
            _ => Severity::Other,
        })
    }
}

/// Strings are kept as-is, `null` is absent, any other value is kept as its JSON text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

impl<'de> Deserialize<'de> for IssueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("error") => IssueType::Error,
            Some("vulnerability") => IssueType::Vulnerability,
            Some("dependency") => IssueType::Dependency,
            _ => IssueType::Other,
        })
    }
}
