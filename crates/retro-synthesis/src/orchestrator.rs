//! Synthesis orchestration.
//!
//! [`SynthesisOrchestrator::synthesize_week`] drives the whole pipeline for
//! one `(user, week)` key: fetch entries, aggregate, build the prompt, make
//! exactly one generation call, parse, validate, persist. Concurrent calls
//! for the same key are serialized on a per-key async lock, so the last
//! writer is a whole pipeline run, never an interleaving of two.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use retro_core::defaults::GEN_TIMEOUT_SECS;
use retro_core::{
    EntryRepository, Error, GenerationBackend, PromptVariant, Result, SummaryRepository,
    WeekWindow, WeeklySummary,
};

use crate::aggregate::compute_aggregate;
use crate::parse::parse_synthesis;
use crate::prompt::build_prompt;
use crate::validate::validate_chain;

/// Tunables for a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Upper bound on one generation call. Elapsing surfaces as a
    /// transport failure, indistinguishable from an unreachable backend.
    pub gen_timeout: Duration,
}

impl SynthesisConfig {
    pub fn new(gen_timeout: Duration) -> Self {
        Self { gen_timeout }
    }

    /// Create from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `RETRO_SYNTH_TIMEOUT_SECS` | `120` | Generation call timeout |
    pub fn from_env() -> Self {
        let secs = std::env::var("RETRO_SYNTH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);
        Self::new(Duration::from_secs(secs))
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(GEN_TIMEOUT_SECS))
    }
}

/// Coordinates one synthesis pipeline over pluggable stores and backend.
pub struct SynthesisOrchestrator {
    entries: Arc<dyn EntryRepository>,
    summaries: Arc<dyn SummaryRepository>,
    backend: Arc<dyn GenerationBackend>,
    config: SynthesisConfig,
    // Guards per (user, week_start) key. The outer lock is only held to
    // fetch or insert the Arc, never across an await.
    week_locks: StdMutex<HashMap<(Uuid, NaiveDate), Arc<AsyncMutex<()>>>>,
}

impl SynthesisOrchestrator {
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        summaries: Arc<dyn SummaryRepository>,
        backend: Arc<dyn GenerationBackend>,
        config: SynthesisConfig,
    ) -> Self {
        info!(
            model = backend.model_name(),
            timeout_secs = config.gen_timeout.as_secs(),
            "Initializing synthesis orchestrator"
        );
        Self {
            entries,
            summaries,
            backend,
            config,
            week_locks: StdMutex::new(HashMap::new()),
        }
    }

    fn week_lock(&self, key: (Uuid, NaiveDate)) -> Arc<AsyncMutex<()>> {
        let mut locks = self.week_locks.lock().expect("week lock map poisoned");
        locks
            .entry(key)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Drop the map entry for a key once no other task holds or waits on
    /// it, so the lock map does not grow one entry per key forever. Two
    /// strong counts means the map's and ours; a waiter blocked on
    /// `lock().await` holds a third.
    fn evict_week_lock(&self, key: (Uuid, NaiveDate), lock: &Arc<AsyncMutex<()>>) {
        let mut locks = self.week_locks.lock().expect("week lock map poisoned");
        if Arc::strong_count(lock) == 2 {
            locks.remove(&key);
        }
    }

    #[cfg(test)]
    fn week_lock_count(&self) -> usize {
        self.week_locks.lock().expect("week lock map poisoned").len()
    }

    /// Run the full pipeline for one user-week and persist the result.
    ///
    /// Fails without calling the backend when the week has no entries.
    /// On any downstream failure the stored summary for the key, if one
    /// exists, is left untouched.
    #[instrument(skip(self), fields(
        subsystem = "synthesis",
        component = "orchestrator",
        op = "synthesize_week",
        user_id = %user_id,
        week_start = %week_start,
        variant = %variant,
    ))]
    pub async fn synthesize_week(
        &self,
        user_id: Uuid,
        week_start: NaiveDate,
        variant: PromptVariant,
    ) -> Result<WeeklySummary> {
        let key = (user_id, week_start);
        let lock = self.week_lock(key);
        let result = {
            let _guard = lock.lock().await;
            self.run_synthesis(user_id, week_start, variant).await
        };
        self.evict_week_lock(key, &lock);
        result
    }

    async fn run_synthesis(
        &self,
        user_id: Uuid,
        week_start: NaiveDate,
        variant: PromptVariant,
    ) -> Result<WeeklySummary> {
        let start = Instant::now();
        let window = WeekWindow::new(week_start);

        let entries = self
            .entries
            .list_range(user_id, window.start(), window.end())
            .await?;
        if entries.is_empty() {
            debug!("No entries in window, skipping generation");
            return Err(Error::NoEntries(format!("no entries in week {}", window)));
        }

        let aggregate = compute_aggregate(&entries, week_start);
        let prompt = build_prompt(&entries, &aggregate, &window, variant);
        debug!(
            entry_count = aggregate.entry_count,
            prompt_len = prompt.len(),
            "Prompt built"
        );

        let raw = match tokio::time::timeout(self.config.gen_timeout, self.backend.generate(&prompt))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    timeout_secs = self.config.gen_timeout.as_secs(),
                    "Generation timed out"
                );
                return Err(Error::Transport(format!(
                    "generation timed out after {}s",
                    self.config.gen_timeout.as_secs()
                )));
            }
        };
        debug!(response_len = raw.len(), "Generation complete");

        let parsed = parse_synthesis(&raw)?;
        if let Err(e) = validate_chain(&parsed, &window) {
            warn!(error = %e, "Synthesis rejected by validation");
            return Err(e);
        }

        let summary = WeeklySummary {
            id: Uuid::new_v4(),
            user_id,
            week_start,
            week_end: window.end(),
            entry_count: aggregate.entry_count,
            avg_rating: aggregate.avg_rating,
            missing_days: aggregate.missing_days,
            source_entry_ids: aggregate.source_entry_ids,
            summary: parsed.summary,
            focus: parsed.focus,
            generated_at: Utc::now(),
        };
        self.summaries.upsert(summary.clone()).await?;

        info!(
            entry_count = summary.entry_count,
            duration_ms = start.elapsed().as_millis() as u64,
            success = true,
            "Synthesis accepted"
        );
        Ok(summary)
    }

    /// The stored summary for a key, if any.
    pub async fn get_summary(
        &self,
        user_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklySummary>> {
        self.summaries.get(user_id, week_start).await
    }
}
