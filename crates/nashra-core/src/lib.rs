pub mod ai;
pub mod briefing;
pub mod cache;
pub mod config;
pub mod error;
pub mod market;
pub mod prompt;
pub mod provider;
pub mod schema;

// Re-export main types for convenience
pub use ai::{
    ClaudeClient, CompletionBackend, CompletionRequest, GeminiClient, OllamaClient, OpenAIClient,
};
pub use briefing::{BriefingGenerator, BriefingRequest, BriefingResult, GeneratorModels, SUMMARY_FALLBACK};
pub use cache::SummaryCache;
pub use config::Config;
pub use error::{ErrorKind, GenerationError};
pub use market::{fallback_quotes, MarketQuote, MarketQuoteProvider};
pub use provider::Provider;
pub use schema::Schema;
