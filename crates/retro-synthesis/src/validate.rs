//! The validation chain gating what reaches storage.
//!
//! Three stages, always in order, failing fast on the first violation:
//!
//! 1. shape: key set, emptiness, word limits
//! 2. window: no URLs, no calendar dates outside the synthesized week
//! 3. actionability: the focus names a concrete verb and a time anchor
//!
//! Every stage is a pure function of the parsed response and the week
//! window; the chain never consults the prompt variant. A compressed or
//! base response is held to the same bar as a strict one.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use retro_core::defaults::{
    FOCUS_WORD_LIMIT, FREQUENCY_TOKENS, IMPERATIVE_VERBS, SUMMARY_WORD_LIMIT,
};
use retro_core::temporal::ISO_DATE_FORMAT;
use retro_core::{Error, ParsedSynthesis, Result, WeekWindow};

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+").expect("valid regex"));

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("valid regex"));

// Hour forms: h, hr, hrs, hour, hours. Minute forms: min, mins, minute(s).
static TIMEBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d+[\s-]*(?:min(?:ute)?s?|h(?:(?:ou)?rs?)?)\b").expect("valid regex")
});

static VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", IMPERATIVE_VERBS.join("|"))).expect("valid regex")
});

static FREQUENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", FREQUENCY_TOKENS.join("|"))).expect("valid regex")
});

/// Whitespace-delimited word count. Punctuation attached to a word counts
/// with it; consecutive whitespace is one separator.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Stage 1: structural shape of the parsed response.
pub fn validate_shape(parsed: &ParsedSynthesis) -> Result<()> {
    if parsed.keys.len() != 2
        || !parsed.keys.iter().any(|k| k == "summary")
        || !parsed.keys.iter().any(|k| k == "focus")
    {
        return Err(Error::Shape(format!(
            "response must contain exactly the keys \"summary\" and \"focus\", got [{}]",
            parsed.keys.join(", ")
        )));
    }

    if parsed.summary.trim().is_empty() {
        return Err(Error::Shape("summary is empty".to_string()));
    }
    if parsed.focus.trim().is_empty() {
        return Err(Error::Shape("focus is empty".to_string()));
    }

    let summary_words = word_count(&parsed.summary);
    if summary_words > SUMMARY_WORD_LIMIT {
        return Err(Error::Shape(format!(
            "summary has {} words, limit is {}",
            summary_words, SUMMARY_WORD_LIMIT
        )));
    }
    let focus_words = word_count(&parsed.focus);
    if focus_words > FOCUS_WORD_LIMIT {
        return Err(Error::Shape(format!(
            "focus has {} words, limit is {}",
            focus_words, FOCUS_WORD_LIMIT
        )));
    }

    Ok(())
}

/// Stage 2: temporal and referential integrity over summary and focus.
///
/// Digit runs shaped like ISO dates that do not name a real calendar day
/// (e.g. `2025-13-40`) are skipped rather than rejected.
pub fn validate_window(parsed: &ParsedSynthesis, window: &WeekWindow) -> Result<()> {
    for text in [&parsed.summary, &parsed.focus] {
        if let Some(m) = URL_RE.find(text) {
            return Err(Error::Window(format!(
                "response must not contain URLs, found \"{}\"",
                m.as_str()
            )));
        }

        for m in ISO_DATE_RE.find_iter(text) {
            let Ok(date) = NaiveDate::parse_from_str(m.as_str(), ISO_DATE_FORMAT) else {
                continue;
            };
            if !window.contains(date) {
                return Err(Error::Window(format!(
                    "date {} is outside the week {}",
                    m.as_str(),
                    window
                )));
            }
        }
    }

    Ok(())
}

/// Stage 3: the focus must be actionable.
///
/// Actionable means two things at once: an imperative verb from a small
/// closed vocabulary, and either a time-box (`15 minutes`, `2h`) or a
/// frequency word (`daily`, `weekly`, `morning`, `evening`). Checked only
/// against the focus; the summary is retrospective by nature.
pub fn validate_actionability(parsed: &ParsedSynthesis) -> Result<()> {
    if !VERB_RE.is_match(&parsed.focus) {
        return Err(Error::Actionability(format!(
            "focus lacks an imperative verb (expected one of: {})",
            IMPERATIVE_VERBS.join(", ")
        )));
    }

    if !TIMEBOX_RE.is_match(&parsed.focus) && !FREQUENCY_RE.is_match(&parsed.focus) {
        return Err(Error::Actionability(
            "focus lacks a time-box or frequency (e.g. \"15 minutes\", \"daily\")".to_string(),
        ));
    }

    Ok(())
}

/// Run the full chain in order, stopping at the first failure.
pub fn validate_chain(parsed: &ParsedSynthesis, window: &WeekWindow) -> Result<()> {
    validate_shape(parsed)?;
    validate_window(parsed, window)?;
    validate_actionability(parsed)?;
    Ok(())
}
