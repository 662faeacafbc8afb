//! Market ticker quotes. Decorative data, so this never fails visibly.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::ai::{CompletionBackend, CompletionRequest};
use crate::briefing::strip_code_fence;
use crate::prompt::quotes_prompt;
use crate::schema::quotes_schema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub price: String,
    /// Signed percentage, e.g. `+1.4%`.
    pub change: String,
}

impl MarketQuote {
    fn new(symbol: &str, price: &str, change: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: price.to_string(),
            change: change.to_string(),
        }
    }

    pub fn is_gain(&self) -> bool {
        !self.change.trim_start().starts_with('-')
    }
}

/// The quotes shown whenever live data is unavailable.
pub fn fallback_quotes() -> Vec<MarketQuote> {
    vec![
        MarketQuote::new("BTC", "68,210", "+1.4%"),
        MarketQuote::new("AAPL", "215.30", "+0.8%"),
        MarketQuote::new("NVDA", "124.50", "+3.2%"),
        MarketQuote::new("ETH", "2,650", "-0.5%"),
    ]
}

pub struct MarketQuoteProvider<B> {
    backend: Option<B>,
    model: String,
}

impl<B: CompletionBackend> MarketQuoteProvider<B> {
    /// `None` means no credential is configured; quotes then always come
    /// from [`fallback_quotes`].
    pub fn new(backend: Option<B>) -> Self {
        Self {
            backend,
            model: "gemini-3-flash-preview".to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn fetch_quotes(&self) -> Vec<MarketQuote> {
        let Some(backend) = &self.backend else {
            debug!("no completion backend configured, serving fallback quotes");
            return fallback_quotes();
        };

        let request = CompletionRequest::new(&self.model, quotes_prompt()).with_schema(quotes_schema());
        debug!("requesting quotes from {} ({})", backend.name(), self.model);

        match backend.complete(&request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("market data came back empty, using fallback");
                fallback_quotes()
            }
            Ok(text) => match serde_json::from_str::<Vec<MarketQuote>>(strip_code_fence(&text)) {
                Ok(quotes) if !quotes.is_empty() => quotes,
                Ok(_) => {
                    warn!("market data contained no quotes, using fallback");
                    fallback_quotes()
                }
                Err(e) => {
                    warn!("market data unparseable, using fallback: {}", e);
                    fallback_quotes()
                }
            },
            Err(e) => {
                warn!("market data fetch failed, using fallback: {}", e);
                fallback_quotes()
            }
        }
    }
}
