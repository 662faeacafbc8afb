//! Caller-side memo of article summaries.
//!
//! The model has no cache semantics of its own, so a summary is remembered
//! per article only after it was produced successfully. Failed attempts are
//! never stored and the next request tries again.

use std::collections::HashMap;
use std::hash::Hash;

use crate::ai::CompletionBackend;
use crate::briefing::BriefingGenerator;
use crate::error::GenerationError;

#[derive(Debug, Clone)]
pub struct SummaryCache<K> {
    summaries: HashMap<K, String>,
}

impl<K: Eq + Hash> Default for SummaryCache<K> {
    fn default() -> Self {
        Self {
            summaries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> SummaryCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &K) -> Option<&str> {
        self.summaries.get(id).map(String::as_str)
    }

    pub fn insert(&mut self, id: K, summary: String) {
        self.summaries.insert(id, summary);
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Cached summary for `id`, generating and storing it on a miss.
    pub async fn get_or_generate<B: CompletionBackend>(
        &mut self,
        id: K,
        generator: &BriefingGenerator<B>,
        title: &str,
        content: &str,
    ) -> Result<String, GenerationError> {
        if let Some(summary) = self.summaries.get(&id) {
            return Ok(summary.clone());
        }

        let summary = generator.generate_summary(title, content).await?;
        self.summaries.insert(id, summary.clone());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CompletionRequest;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails on the first call, then answers with the call number.
    struct Flaky {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for Flaky {
        async fn complete(&self, _request: &CompletionRequest) -> anyhow::Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err(anyhow!("connection reset"))
            } else {
                Ok(format!("summary #{n}"))
            }
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_only_successes_are_cached() {
        let generator = BriefingGenerator::new(Flaky {
            calls: AtomicUsize::new(0),
        });
        let mut cache = SummaryCache::new();

        let first = cache.get_or_generate(7u32, &generator, "T", "C").await;
        assert!(matches!(first, Err(GenerationError::UpstreamFailure(_))));
        assert!(cache.is_empty());

        let second = cache.get_or_generate(7, &generator, "T", "C").await.unwrap();
        assert_eq!(second, "summary #1");

        let third = cache.get_or_generate(7, &generator, "T", "C").await.unwrap();
        assert_eq!(third, "summary #1");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keyed_by_id_not_content() {
        let mut cache = SummaryCache::new();
        cache.insert("a1", "x".to_string());
        assert_eq!(cache.get(&"a1"), Some("x"));
        assert_eq!(cache.get(&"a2"), None);
    }
}
