//! Planner dependencies (using traits for testability)
//!
//! Central dependency container handed to every job handler. All external
//! services sit behind trait abstractions so tests can swap in deterministic
//! doubles; everything is constructed once at startup and passed explicitly -
//! no ambient singletons.

use std::sync::Arc;

use super::network::GenerationNetwork;
use super::BasePlanStore;

/// Dependencies accessible to job handlers
#[derive(Clone)]
pub struct PlannerDeps {
    /// The configured generation network driven by each plan job
    pub network: Arc<GenerationNetwork>,
    /// Durable (best-effort) plan storage
    pub plan_store: Arc<dyn BasePlanStore>,
}

impl PlannerDeps {
    pub fn new(network: Arc<GenerationNetwork>, plan_store: Arc<dyn BasePlanStore>) -> Self {
        Self {
            network,
            plan_store,
        }
    }
}
