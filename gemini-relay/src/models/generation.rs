//! Gemini `generateContent` wire types.
//!
//! Requests are typed; responses stay opaque `serde_json::Value` because the
//! relay hands them back to the caller untouched. The helpers at the bottom
//! only peek into a response for logging.

use serde::Serialize;
use serde_json::{json, Value};

pub const TEMPERATURE: f64 = 0.7;
pub const TOP_K: u32 = 40;
pub const TOP_P: f64 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerateContentRequest {
    /// Single-prompt request with the fixed generation parameters.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// Reply for `/coverage` when there is nothing to estimate, shaped like a Gemini response.
pub fn zero_coverage_response() -> Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "0"}],
                "role": "model"
            }
        }]
    })
}

/// Text of the first part of the first candidate, if any.
pub fn candidate_text(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Drop a surrounding Markdown code fence (```json ... ```) if the model added one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Number of issues in an analysis response, when the model produced a JSON array.
pub fn reported_issue_count(response: &Value) -> Option<usize> {
    let text = strip_code_fence(candidate_text(response)?);
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// First integer in a coverage response, clamped to 0..=100.
pub fn coverage_estimate(response: &Value) -> Option<u8> {
    let text = candidate_text(response)?;
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    // Arbitrarily long digit runs still clamp to 100.
    let value = digits.parse::<u64>().unwrap_or(u64::MAX).min(100);
    u8::try_from(value).ok()
}
