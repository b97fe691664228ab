// Mock implementations for testing
//
// Provides mock services that can be injected into PlannerDeps for tests.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{BaseAI, BasePlanStore};
use crate::domains::plans::{NewSitePlan, SitePlan};

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a completion call
#[derive(Debug, Clone)]
pub struct CompletionCall {
    pub prompt: String,
    pub model: Option<String>,
}

/// Scripted AI double: returns queued responses in order, recording every
/// call. An exhausted script returns empty text (a valid degenerate output).
/// Clones share state, so tests can keep a handle for inspection after
/// handing the mock to the dependency container.
#[derive(Clone)]
pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<CompletionCall>>>,
    failure: Option<String>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// An AI whose every call fails with the given reason.
    pub fn failing(reason: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Some(reason.to_string()),
        }
    }

    /// Queue a response to be returned (responses are consumed in order).
    pub fn with_response(self, response: &str) -> Self {
        self.responses.lock().unwrap().push(response.to_string());
        self
    }

    /// Get all completion calls with their arguments
    pub fn completion_calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_with_model(prompt, None).await
    }

    async fn complete_with_model(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        self.calls.lock().unwrap().push(CompletionCall {
            prompt: prompt.to_string(),
            model: model.map(str::to_string),
        });

        if let Some(reason) = &self.failure {
            bail!("mock AI failure: {}", reason);
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(String::new())
        } else {
            Ok(responses.remove(0))
        }
    }
}

// =============================================================================
// Mock Plan Store
// =============================================================================

/// In-memory plan store double. Can be switched to fail every append to
/// exercise the best-effort persistence contract. Clones share state.
#[derive(Clone)]
pub struct MockPlanStore {
    appended: Arc<Mutex<Vec<NewSitePlan>>>,
    fail: bool,
}

impl MockPlanStore {
    pub fn new() -> Self {
        Self {
            appended: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A store whose every append fails.
    pub fn failing() -> Self {
        Self {
            appended: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Get all plans that were appended
    pub fn appended(&self) -> Vec<NewSitePlan> {
        self.appended.lock().unwrap().clone()
    }
}

impl Default for MockPlanStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePlanStore for MockPlanStore {
    async fn append(&self, plan: NewSitePlan) -> Result<()> {
        if self.fail {
            bail!("mock store unavailable");
        }
        self.appended.lock().unwrap().push(plan);
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<SitePlan>> {
        let appended = self.appended.lock().unwrap();
        Ok(appended
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .map(|plan| SitePlan {
                id: Uuid::new_v4(),
                idea: plan.idea.clone(),
                full: plan.full.clone(),
                spec: plan.spec.clone(),
                site_map: plan.site_map.clone(),
                components: plan.components.clone(),
                copy: plan.copy.clone(),
                code_plan: plan.code_plan.clone(),
                created_at: Utc::now(),
            })
            .collect())
    }
}
