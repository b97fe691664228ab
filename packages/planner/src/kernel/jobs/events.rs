use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Event name that runs the builder network against a raw `input` prompt.
pub const AGENT_RUN: &str = "ai/agent.run";

/// Event name that plans a site from an `idea` (or `input`) prompt.
pub const SITE_PLAN: &str = "ai/site.plan";

/// The asynchronous trigger payload that starts one pipeline run.
///
/// Immutable once dispatched. The payload is kept loosely typed because the
/// two accepted event names carry different field names for the same
/// free-text prompt; field precedence is a handler concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEvent {
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl JobEvent {
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Decode an event from raw broker bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("Failed to decode job event")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_event_with_payload() {
        let event =
            JobEvent::from_bytes(br#"{"name": "ai/site.plan", "data": {"idea": "a bakery"}}"#)
                .unwrap();
        assert_eq!(event.name, SITE_PLAN);
        assert_eq!(event.data, json!({"idea": "a bakery"}));
    }

    #[test]
    fn missing_data_defaults_to_null() {
        let event = JobEvent::from_bytes(br#"{"name": "ai/agent.run"}"#).unwrap();
        assert_eq!(event.name, AGENT_RUN);
        assert!(event.data.is_null());
    }

    #[test]
    fn unrecognizable_bytes_are_an_error() {
        assert!(JobEvent::from_bytes(b"not json").is_err());
    }
}
