//! Memoized dictionary loads, keyed by provider identity.
//!
//! Each provider id owns one slot. The slot is a [`OnceCell`], so concurrent
//! scoring calls for the same provider await a single in-flight load instead
//! of fetching twice. Failed loads leave the slot empty and the next call
//! retries. Entries can be dropped explicitly with [`DictionaryCache::invalidate`]
//! or expire after an optional TTL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::OnceCell;

use super::{DICTIONARY_KEY, Dictionary, DictionaryProvider};

type Slot = Arc<OnceCell<(Instant, Arc<Dictionary>)>>;

/// Cache of parsed dictionaries, one per provider id.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    slots: Mutex<HashMap<String, Slot>>,
    ttl: Option<Duration>,
}

/// Marker for a provider that had nothing to serve.
struct Unavailable;

impl DictionaryCache {
    /// Create a cache whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries expire `ttl` after they were loaded.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: Mutex::default(),
            ttl: Some(ttl),
        }
    }

    /// Return the provider's dictionary, loading it on first use.
    ///
    /// Returns `None` when the provider cannot serve [`DICTIONARY_KEY`]; that
    /// outcome is not cached.
    #[tracing::instrument(skip_all, fields(provider = provider.provider_id()))]
    pub async fn get_or_load<P: DictionaryProvider>(&self, provider: &P) -> Option<Arc<Dictionary>> {
        let slot = self.slot_for(provider.provider_id());

        let loaded = slot
            .get_or_try_init(|| async {
                let Some(text) = provider.get(DICTIONARY_KEY).await else {
                    return Err(Unavailable);
                };
                let dictionary = Dictionary::from_text(&text);
                tracing::info!(words = dictionary.len(), "dictionary loaded");
                Ok((Instant::now(), Arc::new(dictionary)))
            })
            .await;

        match loaded {
            Ok((_, dictionary)) => Some(Arc::clone(dictionary)),
            Err(Unavailable) => None,
        }
    }

    /// Drop the cached dictionary for a provider. Returns `true` if one existed.
    pub fn invalidate(&self, provider_id: &str) -> bool {
        self.lock()
            .remove(provider_id)
            .is_some_and(|slot| slot.initialized())
    }

    /// Drop every cached dictionary.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns `true` if a loaded, unexpired dictionary is cached for the provider.
    pub fn is_cached(&self, provider_id: &str) -> bool {
        self.lock()
            .get(provider_id)
            .and_then(|slot| slot.get())
            .is_some_and(|(loaded_at, _)| !self.is_expired(*loaded_at))
    }

    /// Find the live slot for a provider, replacing it if its entry expired.
    fn slot_for(&self, provider_id: &str) -> Slot {
        let mut slots = self.lock();
        if let Some(slot) = slots.get(provider_id) {
            let expired = slot
                .get()
                .is_some_and(|(loaded_at, _)| self.is_expired(*loaded_at));
            if !expired {
                return Arc::clone(slot);
            }
            tracing::debug!(provider = provider_id, "cached dictionary expired");
        }
        let slot: Slot = Arc::new(OnceCell::new());
        slots.insert(provider_id.to_string(), Arc::clone(&slot));
        slot
    }

    fn is_expired(&self, loaded_at: Instant) -> bool {
        self.ttl.is_some_and(|ttl| loaded_at.elapsed() >= ttl)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::StaticDictionaryProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that counts fetches and yields mid-load so callers can overlap.
    struct CountingProvider {
        id: String,
        calls: AtomicUsize,
        text: Option<String>,
    }

    impl CountingProvider {
        fn new(id: &str, text: Option<&str>) -> Self {
            Self {
                id: id.to_string(),
                calls: AtomicUsize::new(0),
                text: text.map(str::to_string),
            }
        }
    }

    impl DictionaryProvider for CountingProvider {
        fn provider_id(&self) -> &str {
            &self.id
        }

        async fn get(&self, _key: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.text.clone()
        }
    }

    #[tokio::test]
    async fn loads_once_per_provider() {
        let cache = DictionaryCache::new();
        let provider = CountingProvider::new("p1", Some("alpha\nbeta"));

        let first = cache.get_or_load(&provider).await.unwrap();
        let second = cache.get_or_load(&provider).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_cached("p1"));
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_load() {
        let cache = DictionaryCache::new();
        let provider = CountingProvider::new("p1", Some("alpha"));

        let (a, b) = tokio::join!(cache.get_or_load(&provider), cache.get_or_load(&provider));

        assert!(a.is_some() && b.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_providers_get_distinct_entries() {
        let cache = DictionaryCache::new();
        let english = StaticDictionaryProvider::english("en", "hello");
        let other = StaticDictionaryProvider::english("other", "bonjour");

        let a = cache.get_or_load(&english).await.unwrap();
        let b = cache.get_or_load(&other).await.unwrap();

        assert!(a.contains("hello"));
        assert!(!a.contains("bonjour"));
        assert!(b.contains("bonjour"));
    }

    #[tokio::test]
    async fn missing_dictionary_is_not_cached() {
        let cache = DictionaryCache::new();
        let provider = CountingProvider::new("empty", None);

        assert!(cache.get_or_load(&provider).await.is_none());
        assert!(cache.get_or_load(&provider).await.is_none());

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert!(!cache.is_cached("empty"));
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let cache = DictionaryCache::new();
        let provider = CountingProvider::new("p1", Some("alpha"));

        cache.get_or_load(&provider).await;
        assert!(cache.invalidate("p1"));
        assert!(!cache.invalidate("p1"));
        cache.get_or_load(&provider).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let cache = DictionaryCache::with_ttl(Duration::ZERO);
        let provider = CountingProvider::new("p1", Some("alpha"));

        cache.get_or_load(&provider).await;
        assert!(!cache.is_cached("p1"));
        cache.get_or_load(&provider).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = DictionaryCache::new();
        let provider = StaticDictionaryProvider::english("en", "hello");
        cache.get_or_load(&provider).await;
        cache.clear();
        assert!(!cache.is_cached("en"));
    }
}
