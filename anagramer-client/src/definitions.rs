use anagramer_types::Definition;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::{ApiClient, ClientError, DictClient};

#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn define(&self, word: &str) -> Result<Definition, ClientError>;
}

#[async_trait]
impl DefinitionSource for ApiClient {
    async fn define(&self, word: &str) -> Result<Definition, ClientError> {
        self.word_definition(word).await
    }
}

#[async_trait]
impl DefinitionSource for DictClient {
    async fn define(&self, word: &str) -> Result<Definition, ClientError> {
        self.define_word(word).await
    }
}

/// Definitions keyed by lowercased word. Entries are never evicted.
///
/// Each lookup is bounded by `timeout`. Concurrent lookups of the same word
/// wait on the request already in flight instead of issuing another.
pub struct DefinitionCache {
    source: Arc<dyn DefinitionSource>,
    timeout: Duration,
    entries: Mutex<HashMap<String, Arc<OnceCell<Definition>>>>,
}

impl DefinitionCache {
    pub fn new(source: Arc<dyn DefinitionSource>, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn lookup(&self, word: &str) -> Result<Definition, ClientError> {
        let word = word.trim();
        let key = word.to_lowercase();
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_default().clone()
        };

        if let Some(definition) = cell.get() {
            debug!("Definition cache hit for '{}'", word);
            return Ok(definition.clone());
        }

        let fetched = cell
            .get_or_try_init(|| async {
                match tokio::time::timeout(self.timeout, self.source.define(word)).await {
                    Ok(result) => result,
                    Err(_) => Err(ClientError::Timeout(self.timeout)),
                }
            })
            .await;

        match fetched {
            Ok(definition) => Ok(definition.clone()),
            Err(e) => {
                warn!("Definition lookup for '{}' failed: {}", word, e);
                let mut entries = self.entries.lock().await;
                if entries
                    .get(&key)
                    .is_some_and(|current| Arc::ptr_eq(current, &cell) && !current.initialized())
                {
                    entries.remove(&key);
                }
                Err(e)
            }
        }
    }

    /// Cached definition without touching the network
    pub async fn cached(&self, word: &str) -> Option<Definition> {
        let entries = self.entries.lock().await;
        entries
            .get(&word.trim().to_lowercase())
            .and_then(|cell| cell.get().cloned())
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Words with an entry, answered or still in flight
    async fn entry_count(cache: &DefinitionCache) -> usize {
        cache.entries.lock().await.len()
    }

    struct CountingSource {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl CountingSource {
        fn new(delay: Duration, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay,
                fail,
            })
        }
    }

    #[async_trait]
    impl DefinitionSource for CountingSource {
        async fn define(&self, word: &str) -> Result<Definition, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(ClientError::Dict("unavailable".to_string()));
            }
            Ok(Definition {
                word: word.to_string(),
                text: format!("meaning of {}", word),
            })
        }
    }

    #[tokio::test]
    async fn test_second_lookup_served_from_cache() {
        let source = CountingSource::new(Duration::ZERO, false);
        let cache = DefinitionCache::new(source.clone(), Duration::from_secs(5));

        let first = cache.lookup("Tree").await.unwrap();
        let second = cache.lookup("tree").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.cached("TREE").await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_lookups_coalesce() {
        let source = CountingSource::new(Duration::from_millis(100), false);
        let cache = DefinitionCache::new(source.clone(), Duration::from_secs(5));

        let (a, b) = tokio::join!(cache.lookup("lets"), cache.lookup("LETS"));

        assert_eq!(a.unwrap().text, b.unwrap().text);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_times_out() {
        let source = CountingSource::new(Duration::from_secs(30), false);
        let cache = DefinitionCache::new(source.clone(), Duration::from_secs(5));

        let err = cache.lookup("slow").await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout(_)));
        assert!(cache.is_empty().await);
        assert_eq!(entry_count(&cache).await, 0);
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let source = CountingSource::new(Duration::ZERO, true);
        let cache = DefinitionCache::new(source.clone(), Duration::from_secs(5));

        assert!(cache.lookup("rest").await.is_err());
        assert!(cache.lookup("rest").await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(cache.cached("rest").await.is_none());
        assert_eq!(entry_count(&cache).await, 0);
    }
}
