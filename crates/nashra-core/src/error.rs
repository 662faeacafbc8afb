use thiserror::Error;

/// User-facing message shared by every generation failure.
pub const GENERATION_FAILED_MESSAGE: &str =
    "حدث خطأ أثناء الاتصال بالمحلل الذكي. يرجى المحاولة لاحقاً.";

/// Why a briefing or summary could not be produced.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Rejected before any remote call.
    #[error("topic is empty")]
    EmptyTopic,

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model response does not match the expected shape: {0}")]
    MalformedResponse(String),

    #[error("completion request failed: {0}")]
    UpstreamFailure(#[source] anyhow::Error),
}

/// Stable tag for logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyTopic,
    EmptyResponse,
    MalformedResponse,
    UpstreamFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyTopic => "empty_topic",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::UpstreamFailure => "upstream_failure",
        }
    }
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::EmptyTopic => ErrorKind::EmptyTopic,
            GenerationError::EmptyResponse => ErrorKind::EmptyResponse,
            GenerationError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            GenerationError::UpstreamFailure(_) => ErrorKind::UpstreamFailure,
        }
    }

    /// What to show the reader. The remote failure kinds collapse into one
    /// "retry later" message; only blank input gets its own.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::EmptyTopic => "يرجى إدخال موضوع للتحليل.",
            _ => GENERATION_FAILED_MESSAGE,
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_failures_share_one_message() {
        let errors = [
            GenerationError::EmptyResponse,
            GenerationError::MalformedResponse("eof".into()),
            GenerationError::UpstreamFailure(anyhow::anyhow!("429 Too Many Requests")),
        ];
        for err in &errors {
            assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
        }
        assert_ne!(GenerationError::EmptyTopic.user_message(), GENERATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(GenerationError::EmptyResponse.kind().as_str(), "empty_response");
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: GenerationError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
