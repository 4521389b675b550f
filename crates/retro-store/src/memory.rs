//! In-memory repositories backed by `tokio::sync::RwLock` maps.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use retro_core::{
    validate_rating, CreateEntryRequest, EntryRepository, Error, JournalEntry, Result,
    SummaryRepository, UpdateEntryRequest, WeeklySummary,
};

// =============================================================================
// ENTRY STORE
// =============================================================================

#[derive(Default)]
struct EntryMaps {
    by_id: HashMap<Uuid, JournalEntry>,
    /// Uniqueness index enforcing at most one entry per (user, date).
    by_user_date: HashMap<(Uuid, NaiveDate), Uuid>,
}

/// In-memory [`EntryRepository`].
#[derive(Default)]
pub struct InMemoryEntryStore {
    maps: RwLock<EntryMaps>,
}

impl InMemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (all users).
    pub async fn len(&self) -> usize {
        self.maps.read().await.by_id.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryStore {
    async fn insert(&self, req: CreateEntryRequest) -> Result<Uuid> {
        validate_rating(req.rating)?;

        let mut maps = self.maps.write().await;
        let key = (req.user_id, req.date);
        if maps.by_user_date.contains_key(&key) {
            return Err(Error::InvalidInput(format!(
                "entry already exists for user {} on {}",
                req.user_id, req.date
            )));
        }

        let now = Utc::now();
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            date: req.date,
            wins: req.wins,
            challenges: req.challenges,
            learnings: req.learnings,
            gratitude: req.gratitude,
            rating: req.rating,
            created_at: now,
            updated_at: now,
        };

        let id = entry.id;
        maps.by_user_date.insert(key, id);
        maps.by_id.insert(id, entry);
        debug!(entry_id = %id, date = %req.date, "Entry inserted");
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<JournalEntry> {
        self.maps
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or(Error::EntryNotFound(id))
    }

    async fn update(&self, id: Uuid, req: UpdateEntryRequest) -> Result<()> {
        if let Some(rating) = req.rating {
            validate_rating(rating)?;
        }

        let mut maps = self.maps.write().await;
        let entry = maps.by_id.get_mut(&id).ok_or(Error::EntryNotFound(id))?;

        if let Some(wins) = req.wins {
            entry.wins = wins;
        }
        if let Some(challenges) = req.challenges {
            entry.challenges = challenges;
        }
        if let Some(learnings) = req.learnings {
            entry.learnings = learnings;
        }
        if let Some(gratitude) = req.gratitude {
            entry.gratitude = gratitude;
        }
        if let Some(rating) = req.rating {
            entry.rating = rating;
        }
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut maps = self.maps.write().await;
        let entry = maps.by_id.remove(&id).ok_or(Error::EntryNotFound(id))?;
        maps.by_user_date.remove(&(entry.user_id, entry.date));
        Ok(())
    }

    async fn get_by_date(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<JournalEntry>> {
        let maps = self.maps.read().await;
        Ok(maps
            .by_user_date
            .get(&(user_id, date))
            .and_then(|id| maps.by_id.get(id))
            .cloned())
    }

    async fn list_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<JournalEntry>> {
        let maps = self.maps.read().await;
        let mut entries: Vec<JournalEntry> = maps
            .by_id
            .values()
            .filter(|e| e.user_id == user_id && e.date >= start && e.date <= end)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }
}

// =============================================================================
// SUMMARY STORE
// =============================================================================

/// In-memory [`SummaryRepository`], keyed by `(user, week_start)`.
#[derive(Default)]
pub struct InMemorySummaryStore {
    summaries: RwLock<HashMap<(Uuid, NaiveDate), WeeklySummary>>,
}

impl InMemorySummaryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored summaries (all users).
    pub async fn len(&self) -> usize {
        self.summaries.read().await.len()
    }

    /// Whether the store holds no summaries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaryStore {
    async fn get(&self, user_id: Uuid, week_start: NaiveDate) -> Result<Option<WeeklySummary>> {
        Ok(self
            .summaries
            .read()
            .await
            .get(&(user_id, week_start))
            .cloned())
    }

    async fn upsert(&self, summary: WeeklySummary) -> Result<()> {
        let key = (summary.user_id, summary.week_start);
        let replaced = self.summaries.write().await.insert(key, summary).is_some();
        debug!(week_start = %key.1, replaced, "Summary upserted");
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WeeklySummary>> {
        let mut summaries: Vec<WeeklySummary> = self
            .summaries
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        summaries.sort_by_key(|s| s.week_start);
        Ok(summaries)
    }

    async fn delete(&self, user_id: Uuid, week_start: NaiveDate) -> Result<bool> {
        Ok(self
            .summaries
            .write()
            .await
            .remove(&(user_id, week_start))
            .is_some())
    }
}
