//! # retro-synthesis
//!
//! The weekly synthesis pipeline: deterministic aggregation of a week of
//! journal entries, prompt construction, a single suspending call to a
//! text-generation backend, structured response parsing, and a three-stage
//! validation chain gating what gets persisted.
//!
//! Data flow:
//!
//! ```text
//! EntryRepository → aggregate → prompt → [generate] → parse → validate → SummaryRepository
//! ```
//!
//! Every stage except the generation call is a pure function; given the
//! same parsed response and window, the validator chain always produces the
//! same verdict. That determinism is what makes the pipeline testable even
//! though the generation backend's output is not reproducible.

pub mod aggregate;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod validate;

// Re-export core types
pub use retro_core::*;

pub use aggregate::compute_aggregate;
pub use orchestrator::{SynthesisConfig, SynthesisOrchestrator};
pub use parse::parse_synthesis;
pub use prompt::build_prompt;
pub use validate::{
    validate_actionability, validate_chain, validate_shape, validate_window, word_count,
};
