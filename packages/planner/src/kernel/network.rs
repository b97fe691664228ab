//! Generation network runner.
//!
//! A [`GenerationNetwork`] drives one or more named agents through a bounded
//! number of iterations and returns the raw [`RunResult`] consumed by the
//! extraction step. Agent identity and system instructions are immutable
//! configuration built once at startup; each `run` call is independent and
//! stateless - no session is retained between calls.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::BaseAI;
use crate::common::{RunRecord, RunResult};

/// Immutable configuration for one generation agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub name: String,
    pub description: String,
    pub system: String,
    pub model: String,
}

impl AgentConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        system: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            system: system.into(),
            model: model.into(),
        }
    }
}

/// Transport or capability-level failure while running the network.
///
/// "No content" is never an error here: a stage that produces empty text
/// still yields a record. Only an unreachable or misbehaving capability
/// surfaces as `GenerationError`.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation network '{network}' has no agents configured")]
    NoAgents { network: String },

    #[error("agent '{agent}' failed: {reason}")]
    Agent { agent: String, reason: anyhow::Error },
}

/// An ordered set of agents plus the policy driving how many stages run.
pub struct GenerationNetwork {
    name: String,
    agents: Vec<AgentConfig>,
    ai: Arc<dyn BaseAI>,
    max_iter: usize,
    /// Lines that must all appear (trimmed, verbatim) in an iteration's text
    /// for the network to consider itself done before the iteration cap.
    /// Empty means no early exit: the cap is the only bound.
    completion_markers: Vec<String>,
}

impl GenerationNetwork {
    pub fn new(
        name: impl Into<String>,
        agents: Vec<AgentConfig>,
        ai: Arc<dyn BaseAI>,
        max_iter: usize,
    ) -> Self {
        Self {
            name: name.into(),
            agents,
            ai,
            // A zero cap would produce nothing at all
            max_iter: max_iter.max(1),
            completion_markers: Vec::new(),
        }
    }

    /// Stop early once every marker line has been produced in one iteration.
    pub fn with_completion_markers(mut self, markers: Vec<String>) -> Self {
        self.completion_markers = markers;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the network against a single free-text prompt.
    ///
    /// Each iteration runs every agent once, in order, appending one
    /// [`RunRecord`] per completed stage. When the iteration cap is reached,
    /// the last produced output stands as final - that is not an error.
    pub async fn run(&self, input: &str) -> Result<RunResult, GenerationError> {
        if self.agents.is_empty() {
            return Err(GenerationError::NoAgents {
                network: self.name.clone(),
            });
        }

        let mut records: Vec<RunRecord> = Vec::new();

        for iteration in 0..self.max_iter {
            let mut iteration_text = String::new();

            for agent in &self.agents {
                let prompt = format!("{}\n\n{}", agent.system, input);
                let text = self
                    .ai
                    .complete_with_model(&prompt, Some(&agent.model))
                    .await
                    .map_err(|reason| GenerationError::Agent {
                        agent: agent.name.clone(),
                        reason,
                    })?;

                debug!(
                    network = %self.name,
                    agent = %agent.name,
                    iteration,
                    output_length = text.len(),
                    "Agent stage complete"
                );

                if !iteration_text.is_empty() {
                    iteration_text.push('\n');
                }
                iteration_text.push_str(&text);

                records.push(RunRecord::from_text(&agent.name, text));
            }

            if self.iteration_complete(&iteration_text) {
                debug!(
                    network = %self.name,
                    iteration,
                    "All completion markers present, stopping early"
                );
                break;
            }
        }

        Ok(RunResult::from_records(&records))
    }

    fn iteration_complete(&self, text: &str) -> bool {
        if self.completion_markers.is_empty() {
            return false;
        }
        self.completion_markers
            .iter()
            .all(|marker| text.lines().any(|line| line.trim() == marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;

    fn agent() -> AgentConfig {
        AgentConfig::new("builder", "Test builder", "You build things.", "test-model")
    }

    #[tokio::test]
    async fn no_agents_is_an_error() {
        let network = GenerationNetwork::new("empty", vec![], Arc::new(MockAI::new()), 2);
        let err = network.run("idea").await.unwrap_err();
        assert!(matches!(err, GenerationError::NoAgents { .. }));
    }

    #[tokio::test]
    async fn runs_to_the_iteration_cap_without_markers() {
        let ai = Arc::new(MockAI::new().with_response("draft").with_response("refined"));
        let network = GenerationNetwork::new("net", vec![agent()], ai.clone(), 2);

        let result = network.run("idea").await.unwrap();

        assert_eq!(ai.completion_calls().len(), 2);
        assert_eq!(result.text_outputs(), vec!["draft", "refined"]);
    }

    #[tokio::test]
    async fn stops_early_when_markers_present() {
        let ai = Arc::new(MockAI::new().with_response("SPEC:\ndone"));
        let network = GenerationNetwork::new("net", vec![agent()], ai.clone(), 2)
            .with_completion_markers(vec!["SPEC:".to_string()]);

        let result = network.run("idea").await.unwrap();

        assert_eq!(ai.completion_calls().len(), 1);
        assert_eq!(result.text_outputs(), vec!["SPEC:\ndone"]);
    }

    #[tokio::test]
    async fn degenerate_output_is_not_an_error() {
        let ai = Arc::new(MockAI::new().with_response("").with_response(""));
        let network = GenerationNetwork::new("net", vec![agent()], ai, 2);

        let result = network.run("idea").await.unwrap();

        // One record per completed stage, each holding an empty text chunk
        assert_eq!(result.text_outputs(), vec!["", ""]);
    }

    #[tokio::test]
    async fn capability_failure_propagates() {
        let ai = Arc::new(MockAI::failing("connection refused"));
        let network = GenerationNetwork::new("net", vec![agent()], ai, 2);

        let err = network.run("idea").await.unwrap_err();
        assert!(matches!(err, GenerationError::Agent { ref agent, .. } if agent == "builder"));
    }

    #[tokio::test]
    async fn prompt_carries_system_instructions_and_input() {
        let ai = Arc::new(MockAI::new().with_response("SPEC:\nok"));
        let network = GenerationNetwork::new("net", vec![agent()], ai.clone(), 1);

        network.run("a bakery site").await.unwrap();

        let calls = ai.completion_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.starts_with("You build things."));
        assert!(calls[0].prompt.ends_with("a bakery site"));
        assert_eq!(calls[0].model.as_deref(), Some("test-model"));
    }
}
