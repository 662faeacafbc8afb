use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use nashra_core::ai::{ClaudeClient, GeminiClient, OpenAIClient};
use nashra_core::prompt::SUGGESTED_TOPICS;
use nashra_core::{
    BriefingGenerator, BriefingResult, CompletionBackend, Config, GenerationError, MarketQuote,
    MarketQuoteProvider, OllamaClient, Provider,
};

mod render;

#[derive(Parser)]
#[command(name = "nashra")]
#[command(about = "Entrepreneur NASHRA AI analyst: briefings, article summaries and market quotes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a strategic briefing on a topic
    Brief {
        /// Topic to analyse
        topic: String,
        /// Override the briefing model
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Summarize an article in at most three points
    Summarize {
        /// Article title
        #[arg(short, long)]
        title: String,
        /// File holding the article body (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show the market ticker
    Quotes,
    /// Fetch a briefing and the market ticker side by side
    Dashboard {
        /// Topic to analyse
        topic: String,
    },
    /// List suggested briefing topics
    Topics,
    /// List models for the configured provider
    Models,
    /// Inspect or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (keys masked)
    Show,
    /// Choose the completion provider: gemini, openai, claude or ollama
    SetProvider { provider: String },
    /// Store an API key for a provider
    SetKey { provider: String, key: String },
    /// Set the default briefing model
    SetModel { model: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // File values only; environment overrides are never written back
    let stored = Config::load()?;
    let config = stored.clone().with_env();

    match cli.command {
        Commands::Brief { topic, model } => brief(&config, &topic, model).await?,
        Commands::Summarize { title, file } => summarize(&config, &title, file).await?,
        Commands::Quotes => quotes(&config).await?,
        Commands::Dashboard { topic } => dashboard(&config, &topic).await?,
        Commands::Topics => list_topics(),
        Commands::Models => list_models(&config).await?,
        Commands::Config { action } => configure(stored, &config, action)?,
    }

    Ok(())
}

fn generator(config: &Config) -> Result<BriefingGenerator<Box<dyn CompletionBackend>>> {
    let provider = config.provider()?;
    let backend = config.backend()?.ok_or_else(|| {
        anyhow!(
            "No API key configured for {}. Set one with: nashra config set-key {} <KEY>",
            provider.display_name(),
            provider
        )
    })?;
    let models = config.generator_models()?;
    log::debug!("using {} with {:?}", provider.display_name(), models);
    Ok(BriefingGenerator::with_models(backend, models))
}

fn quote_provider(config: &Config) -> Result<MarketQuoteProvider<Box<dyn CompletionBackend>>> {
    let provider = config.provider()?;
    Ok(MarketQuoteProvider::new(config.backend()?).with_model(provider.fast_model()))
}

/// Prints the user-facing message and turns the failure into an exit error.
fn report(err: GenerationError) -> anyhow::Error {
    println!("{}", err.user_message().red());
    anyhow!("{} ({})", err, err.kind().as_str())
}

async fn brief(config: &Config, topic: &str, model: Option<String>) -> Result<()> {
    let mut config = config.clone();
    if model.is_some() {
        config.default_model = model;
    }
    let generator = generator(&config)?;

    println!(
        "🧠 Analysing {} with {}...\n",
        topic.bold().cyan(),
        generator.models().briefing.magenta()
    );

    let briefing = generator.generate_briefing(topic).await.map_err(report)?;
    print_briefing(&briefing);
    Ok(())
}

async fn summarize(config: &Config, title: &str, file: Option<PathBuf>) -> Result<()> {
    let content = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let generator = generator(config)?;
    let summary = generator
        .generate_summary(title, &content)
        .await
        .map_err(report)?;

    println!("{}", title.bold().green());
    println!("{}", "=".repeat(50).dimmed());
    println!("{}", summary);
    Ok(())
}

async fn quotes(config: &Config) -> Result<()> {
    let provider = quote_provider(config)?;
    if !provider.is_live() {
        println!("{}", "No API key configured, showing reference quotes".dimmed());
    }
    print_quotes(&provider.fetch_quotes().await);
    Ok(())
}

async fn dashboard(config: &Config, topic: &str) -> Result<()> {
    let generator = generator(config)?;
    let ticker = quote_provider(config)?;

    let (briefing, quotes) = tokio::join!(generator.generate_briefing(topic), ticker.fetch_quotes());

    print_quotes(&quotes);
    println!();
    match briefing {
        Ok(briefing) => print_briefing(&briefing),
        Err(e) => return Err(report(e)),
    }
    Ok(())
}

fn list_topics() {
    println!("\n{}", "💡 Suggested Topics".bold().blue());
    println!("{}", "=".repeat(30).dimmed());
    for topic in SUGGESTED_TOPICS {
        println!("  • {}", topic);
    }
}

async fn list_models(config: &Config) -> Result<()> {
    let provider = config.provider()?;

    println!(
        "\n{}",
        format!("🤖 Models for {}", provider.display_name()).bold().blue()
    );
    println!("{}", "=".repeat(30).dimmed());

    let models = match provider {
        Provider::Gemini => GeminiClient::list_models(),
        Provider::OpenAI => OpenAIClient::list_models(),
        Provider::Claude => ClaudeClient::list_models(),
        Provider::Ollama => {
            let url = config
                .ollama_url
                .as_deref()
                .unwrap_or(nashra_core::ai::ollama::DEFAULT_OLLAMA_URL);
            match OllamaClient::new(url).list_models().await {
                Ok(models) => models,
                Err(e) => {
                    println!("{}: {}", "Error connecting to Ollama".red(), e);
                    println!("Make sure Ollama is running: {}", "ollama serve".bold());
                    return Ok(());
                }
            }
        }
    };

    if models.is_empty() {
        println!("{}", "No models found. Pull a model with: ollama pull llama3.2".yellow());
    }
    for model in models {
        println!("  • {}", model.green());
    }
    Ok(())
}

fn configure(mut config: Config, effective: &Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", render::config_summary(effective));
            return Ok(());
        }
        ConfigAction::SetProvider { provider } => {
            let provider: Provider = provider.parse()?;
            config.provider = Some(provider.as_str().to_string());
            println!("Provider set to {}", provider.display_name().green());
        }
        ConfigAction::SetKey { provider, key } => {
            let provider: Provider = provider.parse()?;
            config.set_api_key(provider, &key)?;
            println!("API key stored for {}", provider.display_name().green());
        }
        ConfigAction::SetModel { model } => {
            println!("Default model set to {}", model.green());
            config.default_model = Some(model);
        }
    }

    config.save()
}

fn print_briefing(briefing: &BriefingResult) {
    println!("{}", render::briefing_text(briefing));
}

fn print_quotes(quotes: &[MarketQuote]) {
    println!("{}", render::ticker_line(quotes));
}
