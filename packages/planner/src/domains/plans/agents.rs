//! Builder agent and network configuration.
//!
//! Single multi-purpose agent for now. Later this could split into
//! specialized agents (spec, ux, components, copywriter, codegen) with
//! routing between them; the network abstraction already supports an
//! ordered list of agents.

use std::sync::Arc;

use crate::kernel::{AgentConfig, BaseAI, GenerationNetwork, GEMINI_1_5_FLASH};

use super::sections::CANONICAL_LABELS;

const BUILDER_SYSTEM: &str = "\
You are a senior full-stack product & UX architect plus marketing copywriter.
Given a short user request, produce staged output to scaffold a modern SaaS marketing site.
Output EXACTLY these section labels in this order, each alone on its own line followed by a colon, with blank line after each label's content:
SPEC:
SITE_MAP:
COMPONENTS:
COPY:
CODE_PLAN:
Rules: No code blocks, no additional sections, no prefixes like SECTION_. Keep it concise and plain markdown.";

/// The website builder agent. Responsibilities:
/// 1. Interpret user intent (product, audience, tone) and draft a concise SPEC.
/// 2. Propose a SITE_MAP and section/component list.
/// 3. Describe key UI COMPONENTS (props and purpose).
/// 4. Draft marketing COPY in a friendly, clear voice.
/// 5. Output a CODE_PLAN: component filenames with brief responsibilities.
pub fn builder_agent() -> AgentConfig {
    AgentConfig::new(
        "builder",
        "Generates product spec, sitemap, component plan, marketing copy, and code plan for a web app.",
        BUILDER_SYSTEM,
        GEMINI_1_5_FLASH,
    )
}

/// Build the site builder network around a generation capability.
///
/// The network stops early once an iteration has produced every canonical
/// section header; the iteration cap (usually 2) bounds cost and latency
/// either way.
pub fn site_builder_network(ai: Arc<dyn BaseAI>, max_iter: usize) -> GenerationNetwork {
    let markers = CANONICAL_LABELS
        .iter()
        .map(|label| format!("{label}:"))
        .collect();
    GenerationNetwork::new("Site Builder Network", vec![builder_agent()], ai, max_iter)
        .with_completion_markers(markers)
}
