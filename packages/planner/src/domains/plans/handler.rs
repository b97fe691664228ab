//! Plan job handler: the entry point invoked once per accepted event.
//!
//! Two event names route here through thin [`JobProfile`]s that differ only
//! in prompt field precedence, fallback prompt, and mode tag. The pipeline
//! is: prompt -> network run -> text extraction -> section parsing ->
//! best-effort persistence -> job result. A generation failure is fatal to
//! the job; a persistence failure is logged and swallowed.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::kernel::jobs::{events, EventRegistry};
use crate::kernel::PlannerDeps;

use super::sections::parse_sections;
use super::store::{persist_plan, NewSitePlan, PersistOutcome};

/// How one event name maps onto the shared plan pipeline.
#[derive(Debug, Clone, Copy)]
pub struct JobProfile {
    pub event: &'static str,
    /// Pipeline/version tag reported in the job result.
    pub mode: &'static str,
    /// Payload fields to read the prompt from, in precedence order.
    pub prompt_fields: &'static [&'static str],
    /// Used when no prompt field is present.
    pub fallback_prompt: &'static str,
}

pub const AGENT_RUN_JOB: JobProfile = JobProfile {
    event: events::AGENT_RUN,
    mode: "builder:v1",
    prompt_fields: &["input"],
    fallback_prompt: "Build a landing page for an AI task manager app.",
};

pub const SITE_PLAN_JOB: JobProfile = JobProfile {
    event: events::SITE_PLAN,
    mode: "site-plan:v1",
    prompt_fields: &["idea", "input"],
    fallback_prompt: "Landing page for a generic SaaS",
};

/// The parsed sections of one plan, mirroring the persisted row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSections {
    pub idea: String,
    pub full: String,
    pub spec: Option<String>,
    pub site_map: Option<String>,
    pub components: Option<String>,
    pub copy: Option<String>,
    pub code_plan: Option<String>,
}

impl From<NewSitePlan> for PlanSections {
    fn from(plan: NewSitePlan) -> Self {
        Self {
            idea: plan.idea,
            full: plan.full,
            spec: plan.spec,
            site_map: plan.site_map,
            components: plan.components,
            copy: plan.copy,
            code_plan: plan.code_plan,
        }
    }
}

/// What whoever inspects job completion sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanJobResult {
    pub success: bool,
    pub mode: String,
    pub input: String,
    pub message: Option<String>,
    pub full: String,
    pub sections: PlanSections,
}

impl PlanJobResult {
    /// A successful result carrying no generated content (degenerate output).
    pub fn empty(mode: &str, input: &str) -> Self {
        Self {
            success: true,
            mode: mode.to_string(),
            input: input.to_string(),
            message: None,
            full: String::new(),
            sections: PlanSections {
                idea: input.to_string(),
                ..Default::default()
            },
        }
    }
}

/// Pull the prompt out of the event payload per the profile's precedence,
/// falling back to the profile's default.
fn prompt_from_payload(payload: &Value, profile: &JobProfile) -> String {
    profile
        .prompt_fields
        .iter()
        .find_map(|field| payload.get(field).and_then(Value::as_str))
        .unwrap_or(profile.fallback_prompt)
        .to_string()
}

/// Run one plan job end to end.
///
/// Persistence failure never changes the returned result; only a generation
/// failure (or an unregistered event upstream) fails the job.
pub async fn run_plan_job(
    profile: &'static JobProfile,
    payload: Value,
    deps: Arc<PlannerDeps>,
) -> Result<PlanJobResult> {
    let input = prompt_from_payload(&payload, profile);
    let started = Instant::now();

    info!(mode = profile.mode, event = profile.event, "Plan job started");

    // Fatal on failure: no partial result, no persistence attempt
    let result = deps
        .network
        .run(&input)
        .await
        .context("Generation network run failed")?;

    let outputs = result.text_outputs();
    let full = outputs.join("\n\n");

    // Last non-empty output, scanning in reverse; None when nothing usable
    let message = outputs
        .iter()
        .rev()
        .find(|s| !s.trim().is_empty())
        .cloned();

    debug!(
        mode = profile.mode,
        output_count = outputs.len(),
        combined_length = full.len(),
        "Extracted generation outputs"
    );

    let sections = parse_sections(&full);
    let plan = NewSitePlan::from_sections(&input, &full, &sections);
    let result_sections = PlanSections::from(plan.clone());

    match persist_plan(deps.plan_store.as_ref(), plan).await {
        PersistOutcome::Stored => debug!(mode = profile.mode, "Site plan persisted"),
        PersistOutcome::Failed { reason } => {
            // Best-effort: log the idea and the reason, never the generated text
            warn!(
                mode = profile.mode,
                idea = %input,
                reason = %reason,
                "Failed to persist site plan, continuing"
            );
        }
    }

    info!(
        mode = profile.mode,
        duration_ms = started.elapsed().as_millis() as u64,
        "Plan job finished"
    );

    Ok(PlanJobResult {
        success: true,
        mode: profile.mode.to_string(),
        input,
        message,
        full,
        sections: result_sections,
    })
}

/// Register both plan event names against the shared pipeline.
pub fn register_plan_jobs(registry: &mut EventRegistry) {
    registry.register(events::AGENT_RUN, |payload, deps| {
        run_plan_job(&AGENT_RUN_JOB, payload, deps)
    });
    registry.register(events::SITE_PLAN, |payload, deps| {
        run_plan_job(&SITE_PLAN_JOB, payload, deps)
    });
}
