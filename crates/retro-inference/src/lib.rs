//! # retro-inference
//!
//! Text generation backend abstraction for retrospect.
//!
//! This crate provides:
//! - The Ollama implementation of `retro_core::GenerationBackend` (default)
//! - A deterministic mock backend for testing (feature `mock`)
//!
//! # Feature Flags
//!
//! - `ollama` (default): Enable the Ollama backend
//! - `mock`: Enable the mock backend for downstream test suites
//!
//! # Example
//!
//! ```rust,no_run
//! use retro_inference::OllamaBackend;
//! use retro_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OllamaBackend::from_env();
//!     let text = backend.generate("Summarize this week").await.unwrap();
//!     println!("{text}");
//! }
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

// Mock generation backend for deterministic tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use retro_core::*;

#[cfg(feature = "ollama")]
pub use ollama::OllamaBackend;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
