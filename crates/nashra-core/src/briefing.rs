//! Strategic briefings and article summaries generated by a remote model.

use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ai::{CompletionBackend, CompletionRequest};
use crate::error::GenerationError;
use crate::prompt::{briefing_prompt, summary_prompt};
use crate::schema::briefing_schema;

/// Returned in place of a summary when the model answers with nothing.
pub const SUMMARY_FALLBACK: &str = "فشل توليد الملخص.";

/// A topic that has passed the non-blank check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingRequest {
    topic: String,
}

impl BriefingRequest {
    /// Keeps the topic as given; only the emptiness check looks at the trimmed form.
    pub fn new(topic: &str) -> Result<Self, GenerationError> {
        if topic.trim().is_empty() {
            return Err(GenerationError::EmptyTopic);
        }
        Ok(Self {
            topic: topic.to_string(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingResult {
    pub title: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub outlook: String,
}

impl BriefingResult {
    /// Parses model output, accepting one wrapping Markdown code fence.
    pub fn parse(text: &str) -> Result<Self, GenerationError> {
        let result: BriefingResult = serde_json::from_str(strip_code_fence(text))?;
        if result.key_points.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "keyPoints is empty".to_string(),
            ));
        }
        Ok(result)
    }
}

/// Models used for each operation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorModels {
    pub briefing: String,
    pub summary: String,
    pub thinking_budget: Option<u32>,
    pub summary_temperature: f32,
}

impl Default for GeneratorModels {
    fn default() -> Self {
        Self {
            briefing: "gemini-3-pro-preview".to_string(),
            summary: "gemini-3-flash-preview".to_string(),
            thinking_budget: Some(4000),
            summary_temperature: 0.7,
        }
    }
}

pub struct BriefingGenerator<B> {
    backend: B,
    models: GeneratorModels,
}

impl<B: CompletionBackend> BriefingGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_models(backend, GeneratorModels::default())
    }

    pub fn with_models(backend: B, models: GeneratorModels) -> Self {
        Self { backend, models }
    }

    pub fn models(&self) -> &GeneratorModels {
        &self.models
    }

    /// Produces a four-part strategic briefing on `topic`.
    ///
    /// Blank topics are rejected without contacting the model. No retry is
    /// attempted; calling again is the caller's "regenerate".
    pub async fn generate_briefing(&self, topic: &str) -> Result<BriefingResult, GenerationError> {
        let request = BriefingRequest::new(topic)?;

        let mut completion =
            CompletionRequest::new(&self.models.briefing, briefing_prompt(request.topic()))
                .with_schema(briefing_schema());
        if let Some(budget) = self.models.thinking_budget {
            completion = completion.with_thinking_budget(budget);
        }

        debug!(
            "requesting briefing from {} ({})",
            self.backend.name(),
            completion.model
        );

        let outcome = self.briefing_outcome(&completion).await;
        if let Err(e) = &outcome {
            warn!("briefing failed [{}]: {}", e.kind().as_str(), e);
        }
        outcome
    }

    async fn briefing_outcome(
        &self,
        completion: &CompletionRequest,
    ) -> Result<BriefingResult, GenerationError> {
        let text = self
            .backend
            .complete(completion)
            .await
            .map_err(GenerationError::UpstreamFailure)?;

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        BriefingResult::parse(&text)
    }

    /// Summarizes an article in at most three bullet points (advisory).
    ///
    /// Empty model output yields [`SUMMARY_FALLBACK`] rather than an error.
    pub async fn generate_summary(
        &self,
        title: &str,
        content: &str,
    ) -> Result<String, GenerationError> {
        let completion = CompletionRequest::new(&self.models.summary, summary_prompt(title, content))
            .with_temperature(self.models.summary_temperature);

        debug!(
            "requesting summary from {} ({})",
            self.backend.name(),
            completion.model
        );

        match self.backend.complete(&completion).await {
            Ok(text) if text.is_empty() => {
                warn!("summary for {:?} came back empty, using fallback", title);
                Ok(SUMMARY_FALLBACK.to_string())
            }
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("summary failed [upstream_failure]: {}", e);
                Err(GenerationError::UpstreamFailure(e))
            }
        }
    }
}

/// Returns the body of a single ```json fence, or `text` trimmed.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)\A\s*```[A-Za-z]*[ \t]*\r?\n(.*?)\r?\n?```\s*\z").unwrap()
    });

    match fence.captures(text).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text.trim(),
    }
}
