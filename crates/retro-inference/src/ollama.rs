//! Ollama generation backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use retro_core::{Error, GenerationBackend, Result};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = retro_core::defaults::OLLAMA_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = retro_core::defaults::GEN_MODEL;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = retro_core::defaults::GEN_TIMEOUT_SECS;

/// Generation requests slower than this are logged with `slow = true`.
const SLOW_GEN_THRESHOLD_MS: u64 = 30_000;

/// Ollama generation backend over the `/api/chat` endpoint.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    gen_model: String,
    gen_timeout_secs: u64,
}

impl OllamaBackend {
    /// Create a new Ollama backend with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_OLLAMA_URL.to_string(), DEFAULT_GEN_MODEL.to_string())
    }

    /// Create a new Ollama backend with custom configuration.
    pub fn with_config(base_url: String, gen_model: String) -> Self {
        let gen_timeout = std::env::var("RETRO_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(gen_timeout))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing Ollama backend: url={}, gen={}",
            base_url, gen_model
        );

        Self {
            client,
            base_url,
            gen_model,
            gen_timeout_secs: gen_timeout,
        }
    }

    /// Create from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `OLLAMA_BASE` | `http://localhost:11434` | Ollama endpoint |
    /// | `OLLAMA_GEN_MODEL` | `qwen3:8b` | Generation model |
    /// | `RETRO_GEN_TIMEOUT_SECS` | `120` | Per-request timeout |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLLAMA_BASE").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let gen_model =
            std::env::var("OLLAMA_GEN_MODEL").unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());
        Self::with_config(base_url, gen_model)
    }

    /// Set the generation model to use.
    pub fn set_gen_model(&mut self, model_name: String) {
        info!(
            "Switching generation model from {} to {}",
            self.gen_model, model_name
        );
        self.gen_model = model_name;
    }

    /// Check if the Ollama server is reachable.
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => {
                if resp.status().is_success() {
                    info!("Ollama health check passed");
                    Ok(true)
                } else {
                    warn!("Ollama health check failed: {}", resp.status());
                    Ok(false)
                }
            }
            Err(e) => {
                warn!("Ollama health check error: {}", e);
                Ok(false)
            }
        }
    }

    /// Generate with Ollama's JSON mode enabled, so the returned body is
    /// guaranteed to be a single valid JSON value.
    #[instrument(skip(self, system, prompt), fields(subsystem = "inference", component = "ollama", op = "generate_json", model = %self.gen_model, prompt_len = prompt.len()))]
    pub async fn generate_json(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_internal(system, prompt, Some(serde_json::json!("json")))
            .await
    }

    async fn generate_internal(
        &self,
        system: &str,
        prompt: &str,
        format: Option<serde_json::Value>,
    ) -> Result<String> {
        let start = Instant::now();

        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let request = ChatRequest {
            model: self.gen_model.clone(),
            messages,
            stream: false,
            format,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(Duration::from_secs(self.gen_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse response: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = result.message.content.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > SLOW_GEN_THRESHOLD_MS {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }

        Ok(result.message.content)
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    /// Ollama format enforcement. Set to `"json"` for guaranteed valid JSON output.
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
}

/// Response from the Ollama `/api/chat` endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    #[instrument(skip(self, system, prompt), fields(subsystem = "inference", component = "ollama", op = "generate", model = %self.gen_model, prompt_len = prompt.len()))]
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_internal(system, prompt, None).await
    }

    fn model_name(&self) -> &str {
        &self.gen_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_stores_settings() {
        let backend = OllamaBackend::with_config(
            "http://inference.local:11434".to_string(),
            "mistral".to_string(),
        );
        assert_eq!(backend.base_url, "http://inference.local:11434");
        assert_eq!(backend.model_name(), "mistral");
    }

    #[test]
    fn test_set_gen_model() {
        let mut backend =
            OllamaBackend::with_config(DEFAULT_OLLAMA_URL.to_string(), "a".to_string());
        backend.set_gen_model("b".to_string());
        assert_eq!(backend.model_name(), "b");
    }

    #[test]
    fn test_chat_request_omits_absent_format() {
        let request = ChatRequest {
            model: "m".to_string(),
            messages: vec![],
            stream: false,
            format: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("format"));
    }

    #[test]
    fn test_chat_request_serializes_present_format() {
        let request = ChatRequest {
            model: "m".to_string(),
            messages: vec![],
            stream: false,
            format: Some(serde_json::json!("json")),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""format":"json""#));
    }

    #[test]
    fn test_chat_response_deserializes() {
        let json = r#"{"message": {"role": "assistant", "content": "hello"}, "done": true}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.content, "hello");
    }

    // Live-server test, run with --features integration against a local Ollama.
    #[cfg(feature = "integration")]
    #[tokio::test]
    async fn test_generate_live() {
        let backend = OllamaBackend::from_env();
        let response = backend.generate("Reply with the word ok").await.unwrap();
        assert!(!response.is_empty());
    }
}
