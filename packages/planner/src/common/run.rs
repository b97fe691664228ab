//! Run result model for generation network output.
//!
//! A network run produces an ordered sequence of [`RunRecord`]s, one per
//! completed stage. The envelope handed back to callers is a [`RunResult`],
//! which is deliberately loose: downstream code must never assume the nested
//! shape is present. Extraction is total - a malformed or empty envelope
//! degrades to "no outputs", never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The smallest unit of generated content. Only `kind == "text"` chunks
/// carry meaningful content; anything else (tool calls, non-text payloads)
/// is ignored by extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub content: String,
}

impl TextChunk {
    /// Build an assistant text chunk.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            role: Some("assistant".to_string()),
            content: content.into(),
        }
    }
}

/// One stage's contribution to a network run.
///
/// `history` is retained for future use (conversation replay, debugging);
/// only `output` is consumed by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Vec<TextChunk>,
    #[serde(default)]
    pub output: Vec<TextChunk>,
}

impl RunRecord {
    /// A record holding a single text output from the named agent.
    pub fn from_text(agent_name: &str, content: impl Into<String>) -> Self {
        Self {
            agent_name: Some(agent_name.to_string()),
            created_at: Some(Utc::now()),
            history: Vec::new(),
            output: vec![TextChunk::text(content)],
        }
    }
}

/// Opaque envelope returned by a network run.
///
/// By contract (not by static shape) it exposes the ordered record sequence
/// at `state._results`. All access goes through total accessors; an absent
/// or malformed path reads as "no results".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult(Value);

impl RunResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Wrap an ordered record sequence in the standard envelope.
    pub fn from_records(records: &[RunRecord]) -> Self {
        Self(serde_json::json!({ "state": { "_results": records } }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Extract the generated text strings in production order.
    ///
    /// Walks `state._results` in record order, then each record's `output`
    /// in chunk order, keeping only text chunks with string content. Total:
    /// any missing or mistyped level yields an empty (or shorter) sequence.
    pub fn text_outputs(&self) -> Vec<String> {
        let records = match self
            .0
            .get("state")
            .and_then(|state| state.get("_results"))
            .and_then(Value::as_array)
        {
            Some(records) => records,
            None => return Vec::new(),
        };

        let mut outputs = Vec::new();
        for record in records {
            let chunks = match record.get("output").and_then(Value::as_array) {
                Some(chunks) => chunks,
                None => continue,
            };
            for chunk in chunks {
                if chunk.get("kind").and_then(Value::as_str) != Some("text") {
                    continue;
                }
                if let Some(content) = chunk.get("content").and_then(Value::as_str) {
                    outputs.push(content.to_string());
                }
            }
        }
        outputs
    }
}
