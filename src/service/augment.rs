//! Augmentation: deciding when a question needs live context and
//! fetching it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::prompt::Augmentation;
use crate::port::search::WebSearch;

/// Classifies questions and fetches web context for the prompt.
///
/// Classification is a case-insensitive substring match against a fixed
/// keyword list. Deliberately coarse: it exists to catch "what is X
/// worth today" style questions, not to understand language.
pub struct AugmentationSelector {
    search: Arc<dyn WebSearch>,
    keywords: Vec<String>,
    max_results: usize,
    timeout: Duration,
}

impl AugmentationSelector {
    pub fn new(
        search: Arc<dyn WebSearch>,
        keywords: Vec<String>,
        max_results: usize,
        timeout: Duration,
    ) -> Self {
        let keywords = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        Self {
            search,
            keywords,
            max_results,
            timeout,
        }
    }

    /// Whether this question warrants a live lookup.
    #[must_use]
    pub fn needs_lookup(&self, question: &str) -> bool {
        let lowered = question.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k))
    }

    /// Classify and, when warranted, fetch context.
    ///
    /// Provider failures, timeouts, and empty result sets all collapse to
    /// [`Augmentation::Unavailable`]; nothing propagates to the caller.
    pub async fn augment(&self, question: &str) -> Augmentation {
        if !self.needs_lookup(question) {
            return Augmentation::NotNeeded;
        }
        match self.fetch(question).await {
            Some(context) => Augmentation::Context(context),
            None => Augmentation::Unavailable,
        }
    }

    async fn fetch(&self, question: &str) -> Option<String> {
        let result = tokio::time::timeout(self.timeout, self.search.search(question)).await;
        let hits = match result {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => {
                warn!(provider = self.search.name(), error = %e, "web lookup failed");
                return None;
            }
            Err(_) => {
                warn!(provider = self.search.name(), "web lookup timed out");
                return None;
            }
        };
        if hits.is_empty() {
            debug!("web lookup returned nothing usable");
            return None;
        }
        let context = hits
            .iter()
            .take(self.max_results)
            .map(|h| format!("{}: {}", h.title, h.snippet))
            .collect::<Vec<_>>()
            .join("\n");
        Some(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ProviderError, Result};
    use crate::port::search::SearchHit;
    use async_trait::async_trait;

    struct FixedSearch(Result<Vec<SearchHit>>);

    #[async_trait]
    impl WebSearch for FixedSearch {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
            match &self.0 {
                Ok(hits) => Ok(hits.clone()),
                Err(_) => Err(Error::Provider(ProviderError::Status {
                    provider: "fixed",
                    status: 500,
                })),
            }
        }
    }

    fn selector(result: Result<Vec<SearchHit>>) -> AugmentationSelector {
        AugmentationSelector::new(
            Arc::new(FixedSearch(result)),
            vec!["harga".into(), "today".into(), "2025".into()],
            3,
            Duration::from_secs(5),
        )
    }

    fn hit(n: usize) -> SearchHit {
        SearchHit {
            title: format!("t{n}"),
            snippet: format!("s{n}"),
        }
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let s = selector(Ok(vec![]));
        assert!(s.needs_lookup("harga bitcoin hari ini berapa?"));
        assert!(s.needs_lookup("BTC price TODAY?"));
        assert!(s.needs_lookup("prediksi 2025"));
        assert!(!s.needs_lookup("apa itu blockchain?"));
    }

    #[tokio::test]
    async fn plain_question_skips_lookup() {
        let s = selector(Ok(vec![hit(1)]));
        assert_eq!(s.augment("apa itu blockchain?").await, Augmentation::NotNeeded);
    }

    #[tokio::test]
    async fn results_are_capped_and_joined() {
        let s = selector(Ok(vec![hit(1), hit(2), hit(3), hit(4)]));
        let augmentation = s.augment("harga bitcoin?").await;
        assert_eq!(
            augmentation,
            Augmentation::Context("t1: s1\nt2: s2\nt3: s3".into())
        );
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_unavailable() {
        let s = selector(Err(Error::Provider(ProviderError::Status {
            provider: "fixed",
            status: 500,
        })));
        assert_eq!(s.augment("harga bitcoin?").await, Augmentation::Unavailable);
    }

    #[tokio::test]
    async fn empty_results_degrade_to_unavailable() {
        let s = selector(Ok(vec![]));
        assert_eq!(s.augment("harga bitcoin?").await, Augmentation::Unavailable);
    }
}
