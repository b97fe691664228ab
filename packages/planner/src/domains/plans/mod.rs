//! Site plan domain: staged generation, section parsing, persistence.

pub mod agents;
pub mod handler;
pub mod sections;
pub mod store;

pub use agents::{builder_agent, site_builder_network};
pub use handler::{
    register_plan_jobs, run_plan_job, JobProfile, PlanJobResult, PlanSections, AGENT_RUN_JOB,
    SITE_PLAN_JOB,
};
pub use sections::{parse_sections, CANONICAL_LABELS};
pub use store::{persist_plan, NewSitePlan, PersistOutcome, PgPlanStore, SitePlan};
