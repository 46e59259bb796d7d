//! English word dictionary and the providers that supply it.
//!
//! The dictionary is an external resource: a newline-delimited word list
//! served by a key-value [`DictionaryProvider`] under [`DICTIONARY_KEY`].
//! When no provider can serve it, spelling checks are skipped rather than
//! failing the score.
//!
//! Loaded dictionaries are memoized per provider by a [`DictionaryCache`].

pub mod cache;

use std::collections::{HashMap, HashSet};
use std::future::Future;

use camino::Utf8PathBuf;

use crate::error::{ProviderError, ProviderResult};

pub use cache::DictionaryCache;

/// Key under which the English word list is stored.
pub const DICTIONARY_KEY: &str = "dictionary:english-words";

/// A case-folded set of valid English words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Parse a newline-delimited word list. Blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    /// Build a dictionary from individual words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if the word (compared lowercase) is in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Key-value source of dictionary text.
///
/// `provider_id` is the identity the [`DictionaryCache`] keys on: two handles
/// with the same id share one cached dictionary.
pub trait DictionaryProvider: Send + Sync {
    /// Stable identity of this provider instance.
    fn provider_id(&self) -> &str;

    /// Fetch the text stored under `key`, or `None` if unavailable.
    fn get(&self, key: &str) -> impl Future<Output = Option<String>> + Send;
}

/// Serves the dictionary from a newline-delimited file on disk.
#[derive(Debug, Clone)]
pub struct FileDictionaryProvider {
    path: Utf8PathBuf,
    id: String,
}

impl FileDictionaryProvider {
    /// Create a provider reading from `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        let id = format!("file:{path}");
        Self { path, id }
    }

    /// Path of the backing word list.
    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    async fn fetch(&self, key: &str) -> ProviderResult<String> {
        if key != DICTIONARY_KEY {
            return Err(ProviderError::UnknownKey(key.to_string()));
        }
        tokio::fs::read_to_string(self.path.as_std_path())
            .await
            .map_err(|source| ProviderError::Read {
                path: self.path.clone(),
                source,
            })
    }
}

impl DictionaryProvider for FileDictionaryProvider {
    fn provider_id(&self) -> &str {
        &self.id
    }

    async fn get(&self, key: &str) -> Option<String> {
        match self.fetch(key).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(provider = %self.id, error = %e, "dictionary provider failed");
                None
            }
        }
    }
}

/// In-memory provider, for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDictionaryProvider {
    id: String,
    entries: HashMap<String, String>,
}

impl StaticDictionaryProvider {
    /// Create an empty provider with the given identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: HashMap::new(),
        }
    }

    /// Create a provider serving `words` under [`DICTIONARY_KEY`].
    pub fn english(id: impl Into<String>, words: impl Into<String>) -> Self {
        Self::new(id).with_entry(DICTIONARY_KEY, words)
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl DictionaryProvider for StaticDictionaryProvider {
    fn provider_id(&self) -> &str {
        &self.id
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Provider that never has a dictionary. Spelling checks are always skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDictionary;

impl DictionaryProvider for NoDictionary {
    fn provider_id(&self) -> &str {
        "none"
    }

    async fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// An absent provider behaves like [`NoDictionary`].
impl<P: DictionaryProvider> DictionaryProvider for Option<P> {
    fn provider_id(&self) -> &str {
        self.as_ref().map_or("none", P::provider_id)
    }

    async fn get(&self, key: &str) -> Option<String> {
        match self {
            Some(provider) => provider.get(key).await,
            None => None,
        }
    }
}
