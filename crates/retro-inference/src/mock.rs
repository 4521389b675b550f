//! Mock generation backend for deterministic testing.
//!
//! Implements [`retro_core::GenerationBackend`] with canned responses so the
//! synthesis pipeline can be exercised without a live inference server.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use retro_inference::mock::MockGenerationBackend;
//! use retro_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MockGenerationBackend::new()
//!         .with_fixed_response(r#"{"summary": "ok", "focus": "ok"}"#);
//!     let response = backend.generate("prompt").await.unwrap();
//!     assert!(response.contains("summary"));
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use retro_core::{Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    script: Arc<Mutex<VecDeque<String>>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    model_name: String,
    latency_ms: u64,
    failure_rate: f64,
}

/// One recorded call to the mock backend.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: r#"{"summary": "Mock summary", "focus": "Mock focus"}"#.to_string(),
            model_name: "mock".to_string(),
            latency_ms: 0,
            failure_rate: 0.0,
        }
    }
}

impl MockGenerationBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a fixed response for all generation requests.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Queue responses returned one per call, in order. Once the script is
    /// exhausted, the fixed response is used.
    pub fn with_scripted_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut script = self.script.lock().unwrap();
            script.extend(responses.into_iter().map(Into::into));
        }
        self
    }

    /// Set the reported model name.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model_name = name.into();
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling. 1.0 makes
    /// every call fail with a transport error.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of generation calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    fn log_call(&self, system: &str, prompt: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        match self.config.failure_rate {
            rate if rate >= 1.0 => true,
            rate if rate > 0.0 => rand::thread_rng().gen::<f64>() < rate,
            _ => false,
        }
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    fn next_response(&self) -> String {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.config.default_response.clone())
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.log_call(system, prompt);
        self.simulate_latency().await;

        if self.should_fail() {
            return Err(Error::Transport("simulated failure".to_string()));
        }

        Ok(self.next_response())
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_response() {
        let backend = MockGenerationBackend::new().with_fixed_response("custom");
        assert_eq!(backend.generate("anything").await.unwrap(), "custom");
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let backend = MockGenerationBackend::new()
            .with_fixed_response("fallback")
            .with_scripted_responses(["first", "second"]);

        assert_eq!(backend.generate("p").await.unwrap(), "first");
        assert_eq!(backend.generate("p").await.unwrap(), "second");
        assert_eq!(backend.generate("p").await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn test_call_logging_captures_prompts() {
        let backend = MockGenerationBackend::new();
        backend.generate("prompt one").await.unwrap();
        backend
            .generate_with_system("system text", "prompt two")
            .await
            .unwrap();

        let calls = backend.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].prompt, "prompt one");
        assert_eq!(calls[1].system, "system text");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_forced_failure() {
        let backend = MockGenerationBackend::new().with_failure_rate(1.0);
        let err = backend.generate("p").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_latency_simulation() {
        let backend = MockGenerationBackend::new().with_latency_ms(20);
        let start = std::time::Instant::now();
        backend.generate("p").await.unwrap();
        assert!(start.elapsed().as_millis() >= 20);
    }

    #[test]
    fn test_model_name() {
        let backend = MockGenerationBackend::new().with_model_name("test-model");
        assert_eq!(backend.model_name(), "test-model");
    }
}
