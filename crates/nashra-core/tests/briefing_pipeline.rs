mod common;

use std::sync::Arc;

use common::StubBackend;
use nashra_core::prompt::SUMMARY_CONTENT_CAP;
use nashra_core::{BriefingGenerator, BriefingResult, GenerationError, SUMMARY_FALLBACK};

const QUANTUM_TOPIC: &str = "مستقبل الحوسبة الكمية";

const QUANTUM_BRIEFING: &str = r#"{
    "title": "الحوسبة الكمية: السباق نحو التفوق",
    "summary": "تقترب الحوسبة الكمية من التطبيقات التجارية الأولى.",
    "keyPoints": ["تسارع الاستثمار", "تحديات التشفير", "فرص للشركات الناشئة"],
    "outlook": "نمو متسارع خلال العقد القادم"
}"#;

fn generator(stub: &Arc<StubBackend>) -> BriefingGenerator<Arc<StubBackend>> {
    BriefingGenerator::new(Arc::clone(stub))
}

#[tokio::test]
async fn valid_json_is_returned_field_for_field() {
    let stub = Arc::new(StubBackend::text(QUANTUM_BRIEFING));

    let briefing = generator(&stub).generate_briefing(QUANTUM_TOPIC).await.unwrap();

    assert_eq!(
        briefing,
        BriefingResult {
            title: "الحوسبة الكمية: السباق نحو التفوق".to_string(),
            summary: "تقترب الحوسبة الكمية من التطبيقات التجارية الأولى.".to_string(),
            key_points: vec![
                "تسارع الاستثمار".to_string(),
                "تحديات التشفير".to_string(),
                "فرص للشركات الناشئة".to_string(),
            ],
            outlook: "نمو متسارع خلال العقد القادم".to_string(),
        }
    );
    let request = stub.last_request().unwrap();
    assert!(request.prompt.contains(QUANTUM_TOPIC));
}

#[tokio::test]
async fn broken_json_is_malformed() {
    let stub = Arc::new(StubBackend::text("{not json"));

    let err = generator(&stub).generate_briefing(QUANTUM_TOPIC).await.unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn partial_object_is_malformed_not_partial_success() {
    let stub = Arc::new(StubBackend::text(r#"{"title":"T","summary":"S","keyPoints":["k"]}"#));

    let err = generator(&stub).generate_briefing(QUANTUM_TOPIC).await.unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn empty_text_is_empty_response_for_briefing() {
    let stub = Arc::new(StubBackend::text(""));

    let err = generator(&stub).generate_briefing(QUANTUM_TOPIC).await.unwrap_err();

    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn transport_error_is_upstream_failure() {
    let stub = Arc::new(StubBackend::failing("Gemini API error 429 Too Many Requests"));

    let err = generator(&stub).generate_briefing(QUANTUM_TOPIC).await.unwrap_err();

    assert!(matches!(err, GenerationError::UpstreamFailure(_)));
    assert_eq!(stub.calls(), 1, "no automatic retry");
}

#[tokio::test]
async fn blank_topic_is_rejected_before_remote_call() {
    let stub = Arc::new(StubBackend::text(QUANTUM_BRIEFING));

    let err = generator(&stub).generate_briefing("  \n ").await.unwrap_err();

    assert!(matches!(err, GenerationError::EmptyTopic));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn repeated_calls_are_each_well_formed() {
    let second = QUANTUM_BRIEFING.replace("نمو متسارع", "نمو حذر");
    let stub = Arc::new(StubBackend::new(vec![
        Ok(QUANTUM_BRIEFING.to_string()),
        Ok(second),
    ]));
    let generator = generator(&stub);

    for _ in 0..2 {
        let briefing = generator.generate_briefing(QUANTUM_TOPIC).await.unwrap();
        assert!(!briefing.title.is_empty());
        assert!(!briefing.summary.is_empty());
        assert!(!briefing.key_points.is_empty());
        assert!(!briefing.outlook.is_empty());
    }
}

#[tokio::test]
async fn empty_text_yields_fallback_summary() {
    let stub = Arc::new(StubBackend::text(""));

    let summary = generator(&stub)
        .generate_summary("عنوان", "محتوى")
        .await
        .unwrap();

    assert_eq!(summary, SUMMARY_FALLBACK);
}

#[tokio::test]
async fn summary_text_is_returned_verbatim() {
    let reply = "• نقطة أولى\n• نقطة ثانية\n• نقطة ثالثة\n• نقطة رابعة";
    let stub = Arc::new(StubBackend::text(reply));

    let summary = generator(&stub).generate_summary("T", "C").await.unwrap();

    // More than three points is accepted; the limit is only requested
    assert_eq!(summary, reply);
}

#[tokio::test]
async fn content_at_cap_is_sent_whole() {
    let content = "ك".repeat(SUMMARY_CONTENT_CAP);
    let stub = Arc::new(StubBackend::text("ok"));

    generator(&stub).generate_summary("T", &content).await.unwrap();

    let prompt = stub.last_request().unwrap().prompt;
    assert!(prompt.contains(&format!("\"{content}\"")));
}

#[tokio::test]
async fn content_over_cap_is_truncated() {
    let kept = "ك".repeat(SUMMARY_CONTENT_CAP);
    let content = format!("{kept}ز");
    let stub = Arc::new(StubBackend::text("ok"));

    generator(&stub).generate_summary("T", &content).await.unwrap();

    let prompt = stub.last_request().unwrap().prompt;
    assert!(prompt.contains(&format!("\"{kept}\"")));
    assert!(!prompt.contains('ز'));
}
