//! Bounded LRU caches of provider results, one per operation.

use crate::i18n::LanguageIdentity;
use crate::translators::provider::{
    DictionaryResult, ExampleResult, LanguageDetectionResult, SpellcheckResult, TextToSpeechResult,
    TranslationResult, TransliterationResult,
};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of cached results per operation.
pub const DEFAULT_RESULT_CACHE_CAPACITY: usize = 256;

/// Text plus the canonical ids of the languages it was sent with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub destination: Option<String>,
    pub source: Option<String>,
}

impl CacheKey {
    pub fn new(text: &str, destination: Option<&LanguageIdentity>, source: Option<&LanguageIdentity>) -> Self {
        Self {
            text: text.to_string(),
            destination: destination.map(|language| language.id.clone()),
            source: source.map(|language| language.id.clone()),
        }
    }
}

#[derive(Debug)]
pub struct ResultCache<T> {
    cache: Mutex<LruCache<CacheKey, T>>,
}

impl<T: Clone> ResultCache<T> {
    /// Create a cache holding at most `capacity` results (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, T>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &CacheKey) -> Option<T> {
        self.lock().get(key).cloned()
    }

    /// Store `result` and hand it back.
    pub fn put(&self, key: CacheKey, result: T) -> T {
        self.lock().put(key, result.clone());
        result
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

/// One cache per aggregator operation.
#[derive(Debug)]
pub struct ResultCaches {
    pub translation: ResultCache<TranslationResult>,
    pub transliteration: ResultCache<TransliterationResult>,
    pub spellcheck: ResultCache<SpellcheckResult>,
    pub language_detection: ResultCache<LanguageDetectionResult>,
    pub example: ResultCache<ExampleResult>,
    pub dictionary: ResultCache<DictionaryResult>,
    pub text_to_speech: ResultCache<TextToSpeechResult>,
}

impl ResultCaches {
    pub fn new(capacity: usize) -> Self {
        Self {
            translation: ResultCache::new(capacity),
            transliteration: ResultCache::new(capacity),
            spellcheck: ResultCache::new(capacity),
            language_detection: ResultCache::new(capacity),
            example: ResultCache::new(capacity),
            dictionary: ResultCache::new(capacity),
            text_to_speech: ResultCache::new(capacity),
        }
    }

    /// Capacity of each cache.
    pub fn capacity(&self) -> usize {
        self.translation.capacity()
    }

    /// Results held across all operations.
    pub fn len(&self) -> usize {
        self.translation.len()
            + self.transliteration.len()
            + self.spellcheck.len()
            + self.language_detection.len()
            + self.example.len()
            + self.dictionary.len()
            + self.text_to_speech.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.translation.clear();
        self.transliteration.clear();
        self.spellcheck.clear();
        self.language_detection.clear();
        self.example.clear();
        self.dictionary.clear();
        self.text_to_speech.clear();
    }
}

impl Default for ResultCaches {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translators::provider::ServiceResult;

    fn french() -> LanguageIdentity {
        LanguageIdentity::new("fra", "French").with_alpha2("fr")
    }

    fn translation(text: &str) -> TranslationResult {
        ServiceResult::new("Mock", text, text.to_uppercase())
    }

    #[test]
    fn test_key_uses_canonical_ids() {
        let french = french();
        let key = CacheKey::new("hello", Some(&french), None);
        assert_eq!(key.destination.as_deref(), Some("fra"));
        assert_eq!(key.source, None);
        assert_ne!(key, CacheKey::new("hello", None, Some(&french)));
    }

    #[test]
    fn test_put_returns_result() {
        let cache = ResultCache::new(2);
        let key = CacheKey::new("hello", Some(&french()), None);
        let stored = cache.put(key.clone(), translation("hello"));
        assert_eq!(stored.result, "HELLO");
        assert_eq!(cache.get(&key), Some(stored));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = ResultCache::new(2);
        for text in ["a", "b", "c"] {
            cache.put(CacheKey::new(text, None, None), translation(text));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&CacheKey::new("a", None, None)).is_none());
        assert!(cache.get(&CacheKey::new("c", None, None)).is_some());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache: ResultCache<TranslationResult> = ResultCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_clear_empties_every_operation() {
        let caches = ResultCaches::new(4);
        let key = CacheKey::new("hello", None, None);
        caches.translation.put(key.clone(), translation("hello"));
        caches
            .language_detection
            .put(key.clone(), ServiceResult::new("Mock", "hello", "eng".to_string()));
        caches.text_to_speech.put(key, ServiceResult::new("Mock", "hello", vec![1, 2, 3]));
        assert_eq!(caches.len(), 3);

        caches.clear();
        assert!(caches.is_empty());
        assert_eq!(caches.capacity(), 4);
    }
}
