//! Core data models for retrospect.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::defaults::{RATING_MAX, RATING_MIN};
use crate::error::{Error, Result};

// =============================================================================
// JOURNAL ENTRIES
// =============================================================================

/// One structured daily reflection.
///
/// Invariant (enforced by the entry store): at most one entry per
/// `(user_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Calendar date this reflection covers, unique per user.
    pub date: NaiveDate,
    /// What went well.
    pub wins: String,
    /// What was hard.
    pub challenges: String,
    /// What was learned.
    pub learnings: String,
    /// What the author is grateful for.
    pub gratitude: String,
    /// Mood rating, constrained to `-2..=2`.
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct CreateEntryRequest {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub wins: String,
    pub challenges: String,
    pub learnings: String,
    pub gratitude: String,
    pub rating: i32,
}

/// Request for updating an existing journal entry. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryRequest {
    pub wins: Option<String>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub gratitude: Option<String>,
    pub rating: Option<i32>,
}

/// Check a mood rating against the allowed `-2..=2` range.
pub fn validate_rating(rating: i32) -> Result<()> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "rating must be in {}..={}, got {}",
            RATING_MIN, RATING_MAX, rating
        )))
    }
}

// =============================================================================
// AGGREGATES
// =============================================================================

/// Deterministic statistics over one week of entries.
///
/// Ephemeral: computed per synthesis call, embedded verbatim into the prompt
/// and copied into the persisted [`WeeklySummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    /// Number of entries in the window.
    pub entry_count: usize,
    /// Arithmetic mean of ratings, rounded to 2 decimal places.
    /// `0.0` when no rated entries exist.
    pub avg_rating: f64,
    /// Window dates with no entry, canonical `YYYY-MM-DD`, in date order.
    pub missing_days: Vec<String>,
    /// Identifiers of the contributing entries, in date order.
    pub source_entry_ids: Vec<Uuid>,
}

// =============================================================================
// PROMPT VARIANTS
// =============================================================================

/// Named instruction-set addendum controlling the generation service's
/// verbosity, strictness, and actionability demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Base instruction set only.
    Base,
    /// Tighter soft word targets.
    Compressed,
    /// No links, no out-of-week dates, state insufficiency over fabrication.
    Strict,
    /// Demand an imperative verb and a time-box in the focus.
    Actionable,
}

impl PromptVariant {
    /// Returns string representation of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVariant::Base => "base",
            PromptVariant::Compressed => "compressed",
            PromptVariant::Strict => "strict",
            PromptVariant::Actionable => "actionable",
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PromptVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "base" => Ok(PromptVariant::Base),
            "compressed" => Ok(PromptVariant::Compressed),
            "strict" => Ok(PromptVariant::Strict),
            "actionable" => Ok(PromptVariant::Actionable),
            other => Err(Error::InvalidInput(format!(
                "unknown prompt variant: {}",
                other
            ))),
        }
    }
}

// =============================================================================
// SYNTHESIS RESULTS
// =============================================================================

/// Structured output extracted from a generation response.
///
/// The parser guarantees `summary` and `focus` are present as text; `keys`
/// preserves the full key set of the parsed JSON object so the shape
/// validator can reject extras rather than the parser silently dropping
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSynthesis {
    pub summary: String,
    pub focus: String,
    /// All keys present in the parsed object. Ordering follows
    /// serde_json's map and is not significant.
    pub keys: Vec<String>,
}

/// Persisted result of one successful synthesis.
///
/// Invariant (enforced by the summary store): at most one per
/// `(user_id, week_start)`; a repeated synthesis overwrites the slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entry_count: usize,
    pub avg_rating: f64,
    pub missing_days: Vec<String>,
    pub source_entry_ids: Vec<Uuid>,
    pub summary: String,
    pub focus: String,
    pub generated_at: DateTime<Utc>,
}
