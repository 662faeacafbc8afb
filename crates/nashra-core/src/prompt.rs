//! Instruction templates sent to the model.

/// Article content is cut to this many characters before it is sent.
pub const SUMMARY_CONTENT_CAP: usize = 3000;

/// Topics offered to readers who do not know what to ask for.
pub const SUGGESTED_TOPICS: [&str; 5] = [
    "مستقبل الحوسبة الكمية",
    "ثورة الذكاء الاصطناعي في الطب",
    "التحول الرقمي في السعودية 2030",
    "العملات الرقمية المشفرة",
    "استراتيجيات النمو للشركات الناشئة",
];

/// Symbols requested for the market ticker.
pub const TICKER_SYMBOLS: [&str; 6] = ["AAPL", "TSLA", "BTC", "ETH", "NVDA", "GOOGL"];

/// Longest prefix of `text` holding at most `cap` characters.
///
/// Counts Unicode scalar values, so Arabic text is never cut mid code point.
pub fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn briefing_prompt(topic: &str) -> String {
    format!(
        "أنت محلل استراتيجي خبير في صحيفة \"Entrepreneur NASHRA\".\n\
         قم بتحليل الموضوع التالي بعمق: \"{topic}\".\n\
         ركز على الجوانب التقنية والاقتصادية والفرص المستقبلية لرواد الأعمال.\n\
         يجب أن يكون الرد باللغة العربية الفصحى الرصينة."
    )
}

pub fn summary_prompt(title: &str, content: &str) -> String {
    let content = truncate_chars(content, SUMMARY_CONTENT_CAP);
    format!(
        "قم بتلخيص المقال التالي بأسلوب نقاط ذكية (Bullet points) بحد أقصى 3 نقاط.\n\
         اجعل الملخص موجهاً لرجال الأعمال والتقنيين المشغولين.\n\
         عنوان المقال: \"{title}\"\n\
         المحتوى: \"{content}\""
    )
}

pub fn quotes_prompt() -> String {
    format!(
        "جلب أحدث أسعار الأسهم والعملات الرقمية التالية: {}.\n\
         أعطني السعر الحالي ونسبة التغيير خلال الـ 24 ساعة الماضية.\n\
         يجب أن تكون المخرجات بتنسيق JSON حصرياً كمصفوفة من الكائنات.",
        TICKER_SYMBOLS.join(", ")
    )
}
