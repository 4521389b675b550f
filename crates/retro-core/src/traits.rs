//! Core traits for retrospect abstractions.
//!
//! These traits define the seams the synthesis pipeline consumes: entry
//! storage (read-mostly), summary storage (keyed upsert), and the text
//! generation backend (the single suspension point). Concrete
//! implementations are pluggable, which is what makes the pipeline
//! testable against deterministic fakes.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// ENTRY REPOSITORY
// =============================================================================

/// Repository for journal entry bookkeeping.
///
/// The synthesis pipeline only requires [`EntryRepository::list_range`];
/// the rest is ordinary keyed-map CRUD owned by the surrounding
/// application.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry.
    ///
    /// Rejects ratings outside `-2..=2` and a second entry for the same
    /// `(user, date)` with `Error::InvalidInput`.
    async fn insert(&self, req: CreateEntryRequest) -> Result<Uuid>;

    /// Fetch an entry by ID.
    async fn fetch(&self, id: Uuid) -> Result<JournalEntry>;

    /// Apply a partial update to an entry.
    async fn update(&self, id: Uuid, req: UpdateEntryRequest) -> Result<()>;

    /// Delete an entry.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Look up the entry for a user on a specific date, if any.
    async fn get_by_date(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<JournalEntry>>;

    /// List a user's entries with dates in `[start, end]` inclusive,
    /// sorted by date ascending.
    async fn list_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>>;
}

// =============================================================================
// SUMMARY REPOSITORY
// =============================================================================

/// Key-value repository for weekly summaries, keyed by `(user, week_start)`.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Get the stored summary for a key, if any.
    async fn get(&self, user_id: Uuid, week_start: NaiveDate) -> Result<Option<WeeklySummary>>;

    /// Insert or replace the summary for its `(user, week_start)` key.
    async fn upsert(&self, summary: WeeklySummary) -> Result<()>;

    /// List all summaries for a user, ordered by week_start ascending.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WeeklySummary>>;

    /// Delete the summary for a key. Returns whether one existed.
    async fn delete(&self, user_id: Uuid, week_start: NaiveDate) -> Result<bool>;
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
