//! # retro-store
//!
//! In-memory keyed-map implementations of the retrospect repository traits.
//!
//! The synthesis pipeline never touches a map directly; it only sees the
//! `EntryRepository` and `SummaryRepository` traits from `retro-core`, so a
//! persistent backing store can substitute for these without touching the
//! pipeline.

pub mod memory;

pub use memory::{InMemoryEntryStore, InMemorySummaryStore};
