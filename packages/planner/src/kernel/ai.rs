// AI implementation using Gemini
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in the domain layer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::gemini;

use super::{BaseAI, GEMINI_1_5_FLASH};

/// Gemini implementation of AI capabilities
#[derive(Clone)]
pub struct GeminiClient {
    client: gemini::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        let client = gemini::Client::new(api_key);
        Self { client }
    }
}

#[async_trait]
impl BaseAI for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_with_model(prompt, None).await
    }

    async fn complete_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let model_id = model.unwrap_or(GEMINI_1_5_FLASH);

        tracing::debug!(
            prompt_length = prompt.len(),
            model = model_id,
            "Building Gemini agent for completion"
        );

        let agent = self.client.agent(model_id).max_tokens(4096).build();

        let response = agent
            .prompt(prompt)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = model_id,
                    "Gemini API call failed"
                );
                e
            })
            .context("Failed to call Gemini API")?;

        tracing::debug!(
            response_length = response.len(),
            model = model_id,
            "Gemini API response received"
        );

        Ok(response)
    }
}
