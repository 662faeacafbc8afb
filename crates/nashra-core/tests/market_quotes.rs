mod common;

use std::sync::Arc;

use common::StubBackend;
use nashra_core::{fallback_quotes, MarketQuote, MarketQuoteProvider};

fn live(stub: &Arc<StubBackend>) -> MarketQuoteProvider<Arc<StubBackend>> {
    MarketQuoteProvider::new(Some(Arc::clone(stub)))
}

#[tokio::test]
async fn no_credential_serves_fallback_without_remote_call() {
    let provider: MarketQuoteProvider<Arc<StubBackend>> = MarketQuoteProvider::new(None);

    assert!(!provider.is_live());
    assert_eq!(provider.fetch_quotes().await, fallback_quotes());
}

#[tokio::test]
async fn empty_text_falls_back() {
    let stub = Arc::new(StubBackend::text(""));
    assert_eq!(live(&stub).fetch_quotes().await, fallback_quotes());
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn invalid_json_falls_back() {
    let stub = Arc::new(StubBackend::text("{not json"));
    assert_eq!(live(&stub).fetch_quotes().await, fallback_quotes());
}

#[tokio::test]
async fn transport_error_falls_back() {
    let stub = Arc::new(StubBackend::failing("connection refused"));
    assert_eq!(live(&stub).fetch_quotes().await, fallback_quotes());
}

#[tokio::test]
async fn live_quotes_are_returned() {
    let stub = Arc::new(StubBackend::text(
        r#"[{"symbol":"TSLA","price":"251.10","change":"-2.1%"},
            {"symbol":"GOOGL","price":"178.40","change":"+0.3%"}]"#,
    ));

    let quotes = live(&stub).fetch_quotes().await;

    assert_eq!(
        quotes,
        vec![
            MarketQuote {
                symbol: "TSLA".to_string(),
                price: "251.10".to_string(),
                change: "-2.1%".to_string(),
            },
            MarketQuote {
                symbol: "GOOGL".to_string(),
                price: "178.40".to_string(),
                change: "+0.3%".to_string(),
            },
        ]
    );
    let request = stub.last_request().unwrap();
    assert!(request.schema.is_some());
    assert_eq!(request.model, "gemini-3-flash-preview");
}

#[tokio::test]
async fn empty_array_falls_back() {
    let stub = Arc::new(StubBackend::text("[]"));
    assert_eq!(live(&stub).fetch_quotes().await, fallback_quotes());
}

#[tokio::test]
async fn briefing_and_quotes_run_concurrently() {
    let quotes_stub = Arc::new(StubBackend::failing("timeout"));
    let briefing_stub = Arc::new(StubBackend::text(""));
    let generator = nashra_core::BriefingGenerator::new(Arc::clone(&briefing_stub));
    let provider = live(&quotes_stub);

    let (briefing, quotes) = tokio::join!(generator.generate_briefing("AI"), provider.fetch_quotes());

    assert!(briefing.is_err());
    assert_eq!(quotes, fallback_quotes());
}
