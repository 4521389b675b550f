//! Centralized default constants for the retrospect system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model.
pub const GEN_MODEL: &str = "qwen3:8b";

/// Timeout for generation requests (seconds). Also bounds the single
/// suspension point of a synthesis run.
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// MOOD RATING
// =============================================================================

/// Lowest allowed mood rating on a journal entry.
pub const RATING_MIN: i32 = -2;

/// Highest allowed mood rating on a journal entry.
pub const RATING_MAX: i32 = 2;

// =============================================================================
// SYNTHESIS LIMITS
// =============================================================================

/// Number of calendar days covered by one synthesis window.
pub const WEEK_DAYS: u32 = 7;

/// Hard word limit on the generated weekly summary.
pub const SUMMARY_WORD_LIMIT: usize = 120;

/// Hard word limit on the generated weekly focus.
pub const FOCUS_WORD_LIMIT: usize = 60;

/// Soft summary target requested by the `compressed` prompt variant.
pub const COMPRESSED_SUMMARY_TARGET: usize = 80;

/// Soft focus target requested by the `compressed` prompt variant.
pub const COMPRESSED_FOCUS_TARGET: usize = 40;

/// Closed vocabulary of imperative verbs accepted by the actionability
/// validator and advertised by the `actionable` prompt variant.
pub const IMPERATIVE_VERBS: &[&str] = &[
    "schedule", "plan", "block", "review", "write", "read", "practice", "prepare", "email",
    "call", "draft", "set",
];

/// Frequency tokens accepted as time-boxes by the actionability validator.
pub const FREQUENCY_TOKENS: &[&str] = &["daily", "weekly", "morning", "evening"];
