use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::ai::{
    ollama::DEFAULT_OLLAMA_URL, ClaudeClient, CompletionBackend, GeminiClient, OllamaClient,
    OpenAIClient,
};
use crate::briefing::GeneratorModels;
use crate::provider::Provider;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub provider: Option<String>,
    pub default_model: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub ollama_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            provider: Some(Provider::Gemini.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Loads the user config file, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("nashra").join("config.json"))
    }

    /// Overlays process environment variables on top of the file values.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Overlays values from `lookup`; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.gemini_api_key = Some(key);
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Some(key) = get("ANTHROPIC_API_KEY") {
            self.claude_api_key = Some(key);
        }
        if let Some(provider) = get("NASHRA_PROVIDER") {
            self.provider = Some(provider);
        }
        if let Some(url) = get("OLLAMA_URL") {
            self.ollama_url = Some(url);
        }
        self
    }

    pub fn provider(&self) -> Result<Provider> {
        match &self.provider {
            Some(name) => name.parse(),
            None => Ok(Provider::Gemini),
        }
    }

    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Claude => self.claude_api_key.as_deref(),
            Provider::Ollama => None,
        };
        key.filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, provider: Provider, key: &str) -> Result<()> {
        let slot = match provider {
            Provider::Gemini => &mut self.gemini_api_key,
            Provider::OpenAI => &mut self.openai_api_key,
            Provider::Claude => &mut self.claude_api_key,
            Provider::Ollama => return Err(anyhow!("Ollama does not use an API key")),
        };
        *slot = Some(key.to_string());
        Ok(())
    }

    /// Client for the configured provider, or `None` when the provider needs
    /// a credential that is not set. `None` is a supported configuration.
    pub fn backend(&self) -> Result<Option<Box<dyn CompletionBackend>>> {
        let provider = self.provider()?;
        let timeout = self.request_timeout_secs;

        let backend: Box<dyn CompletionBackend> = match provider {
            Provider::Ollama => Box::new(
                OllamaClient::new(self.ollama_url.as_deref().unwrap_or(DEFAULT_OLLAMA_URL))
                    .with_timeout(timeout),
            ),
            hosted => {
                let Some(key) = self.api_key(hosted) else {
                    return Ok(None);
                };
                match hosted {
                    Provider::Gemini => Box::new(GeminiClient::new(key).with_timeout(timeout)),
                    Provider::OpenAI => Box::new(OpenAIClient::new(key).with_timeout(timeout)),
                    _ => Box::new(ClaudeClient::new(key).with_timeout(timeout)),
                }
            }
        };
        Ok(Some(backend))
    }

    /// Models for the configured provider; `default_model` overrides the
    /// briefing model only.
    pub fn generator_models(&self) -> Result<GeneratorModels> {
        let provider = self.provider()?;
        Ok(GeneratorModels {
            briefing: self
                .default_model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            summary: provider.fast_model().to_string(),
            thinking_budget: provider.supports_thinking_budget().then_some(4000),
            ..GeneratorModels::default()
        })
    }
}
