//! Terminal formatting for pipeline output.

use colored::*;
use nashra_core::{BriefingResult, Config, MarketQuote};

pub fn briefing_text(briefing: &BriefingResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", briefing.title.bold().green()));
    out.push_str(&format!("{}\n\n", "=".repeat(50).dimmed()));

    out.push_str(&format!("{}\n", "الملخص التنفيذي".bold().blue()));
    out.push_str(&format!("{}\n\n", briefing.summary));

    out.push_str(&format!("{}\n", "أهم النقاط".bold().blue()));
    for (i, point) in briefing.key_points.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", (i + 1).to_string().bold().yellow(), point));
    }

    out.push_str(&format!("\n{}\n", "التوقعات".bold().blue()));
    out.push_str(&briefing.outlook);
    out
}

pub fn ticker_line(quotes: &[MarketQuote]) -> String {
    quotes
        .iter()
        .map(|q| {
            let change = if q.is_gain() {
                q.change.green()
            } else {
                q.change.red()
            };
            format!("{} {} {}", q.symbol.bold(), q.price, change)
        })
        .collect::<Vec<_>>()
        .join("  │  ")
}

/// Masks all but the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

pub fn config_summary(config: &Config) -> String {
    let key = |k: &Option<String>| k.as_deref().map(mask).unwrap_or_else(|| "(not set)".to_string());

    [
        format!("provider:        {}", config.provider.as_deref().unwrap_or("gemini")),
        format!("default_model:   {}", config.default_model.as_deref().unwrap_or("(provider default)")),
        format!("gemini_api_key:  {}", key(&config.gemini_api_key)),
        format!("openai_api_key:  {}", key(&config.openai_api_key)),
        format!("claude_api_key:  {}", key(&config.claude_api_key)),
        format!("ollama_url:      {}", config.ollama_url.as_deref().unwrap_or("(default)")),
        format!(
            "request_timeout: {}",
            config
                .request_timeout_secs
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "(none)".to_string())
        ),
    ]
    .join("\n")
}
