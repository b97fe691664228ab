// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (what to prompt for) lives in the domain layer.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePlanStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::plans::{NewSitePlan, SitePlan};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt with a specific model (returns raw text response)
    /// If model is None, uses the default model
    async fn complete_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        // Default implementation ignores model and calls complete
        let _ = model;
        self.complete(prompt).await
    }
}

// =============================================================================
// Plan Store Trait (Infrastructure - durable append of plan records)
// =============================================================================

#[async_trait]
pub trait BasePlanStore: Send + Sync {
    /// Append one plan record. At-most-one attempt; retries are not this
    /// layer's concern.
    async fn append(&self, plan: NewSitePlan) -> Result<()>;

    /// Most recent plan records, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<SitePlan>>;
}
