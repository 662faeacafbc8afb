//! Remote generative completion boundary.
//!
//! Everything above this module talks to a [`CompletionBackend`]; the
//! concrete clients below only differ in transport and schema dialect.

pub mod claude;
pub mod gemini;
pub mod ollama;
pub mod openai;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAIClient;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::schema::Schema;

/// One completion: model, prompt and optional output constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub schema: Option<Schema>,
    pub temperature: Option<f32>,
    pub thinking_budget: Option<u32>,
}

impl CompletionRequest {
    pub fn new(model: &str, prompt: impl Into<String>) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.into(),
            schema: None,
            temperature: None,
            thinking_budget: None,
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }
}

/// Anything that can turn a [`CompletionRequest`] into response text.
///
/// An `Ok` empty string means the call succeeded but the model produced no
/// text; transport, auth and rate-limit problems are `Err`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Short provider label for logs.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Arc<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        (**self).complete(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T: CompletionBackend + ?Sized> CompletionBackend for Box<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        (**self).complete(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Builds a reqwest client, with a request timeout when one is configured.
pub(crate) fn http_client(timeout_secs: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    // Builder only fails on TLS backend initialisation; fall back to defaults
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::briefing_schema;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("gemini-3-flash-preview", "hello")
            .with_temperature(0.7)
            .with_thinking_budget(4000)
            .with_schema(briefing_schema());

        assert_eq!(request.model, "gemini-3-flash-preview");
        assert_eq!(request.prompt, "hello");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.thinking_budget, Some(4000));
        assert!(request.schema.is_some());
    }

    #[test]
    fn test_request_defaults_are_unconstrained() {
        let request = CompletionRequest::new("m", String::from("p"));
        assert!(request.schema.is_none());
        assert!(request.temperature.is_none());
        assert!(request.thinking_budget.is_none());
    }
}
