//! Kernel module - planner infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod jobs;
pub mod network;
pub mod test_dependencies;
pub mod traits;

/// Default Gemini model for plan generation.
pub const GEMINI_1_5_FLASH: &str = "gemini-1.5-flash";

pub use ai::GeminiClient;
pub use deps::PlannerDeps;
pub use network::{AgentConfig, GenerationError, GenerationNetwork};
pub use test_dependencies::{MockAI, MockPlanStore};
pub use traits::*;
