//! Structured logging schema and field name constants for retrospect.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, slow call, rejected synthesis |
//! | INFO  | Lifecycle events, accepted syntheses |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-entry iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "store", "inference", "synthesis"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "ollama", "orchestrator", "validator"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "generate", "synthesize_week", "upsert"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// User UUID being operated on.
pub const USER_ID: &str = "user_id";

/// Journal entry UUID.
pub const ENTRY_ID: &str = "entry_id";

/// First calendar date of the synthesis window (YYYY-MM-DD).
pub const WEEK_START: &str = "week_start";

/// Prompt variant selected for a synthesis run.
pub const VARIANT: &str = "variant";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of entries aggregated into a synthesis.
pub const ENTRY_COUNT: &str = "entry_count";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
