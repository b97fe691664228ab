//! Common types shared across kernel and domains.

pub mod run;

pub use run::{RunRecord, RunResult, TextChunk};
