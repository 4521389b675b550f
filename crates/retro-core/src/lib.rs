//! # retro-core
//!
//! Core types, traits, and abstractions for the retrospect library.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other retrospect crates depend on: the journal entry and weekly
//! summary models, the week window temporal type, the repository and
//! generation-backend seams, and the shared error taxonomy.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod temporal;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use temporal::WeekWindow;
pub use traits::*;
