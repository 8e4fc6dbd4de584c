//! Ordered fallback across translation services.
//!
//! Every operation validates its text, resolves language names through the
//! [`Resolver`], then asks each provider in turn. A provider is retried only
//! for transient errors; the first success wins and is cached per operation,
//! keyed by the text and the canonical language ids. When every provider
//! fails, the error lists each one with the reason it gave.

use crate::config::Config;
use crate::error::{AggregateError, ProviderError};
use crate::i18n::{is_broad_whitespace, normalize_key, LanguageIdentity};
use crate::resolver::Resolver;
use crate::retry::{with_retry_if, RetryConfig};
use crate::translators::cache::{CacheKey, ResultCache, ResultCaches, DEFAULT_RESULT_CACHE_CAPACITY};
use crate::translators::provider::{
    DictionaryResult, ExampleResult, LanguageDetectionResult, ServiceResult, SpellcheckResult, TextToSpeechResult,
    TranslationResult, TransliterationResult, Translator,
};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Source language value meaning "let the service detect it".
pub const AUTO_LANGUAGE: &str = "auto";

pub struct Aggregator {
    resolver: Arc<Resolver>,
    providers: Vec<Arc<dyn Translator>>,
    retry: RetryConfig,
    caches: ResultCaches,
}

impl Aggregator {
    pub fn new(resolver: Arc<Resolver>, providers: Vec<Arc<dyn Translator>>) -> Self {
        Self {
            resolver,
            providers,
            retry: RetryConfig::provider_call(),
            caches: ResultCaches::new(DEFAULT_RESULT_CACHE_CAPACITY),
        }
    }

    /// Aggregator whose per-provider attempts and cache size follow `config`.
    pub fn from_config(resolver: Arc<Resolver>, providers: Vec<Arc<dyn Translator>>, config: &Config) -> Self {
        Self::new(resolver, providers)
            .with_retry(RetryConfig::provider_call().with_max_attempts(config.provider_max_attempts))
            .with_cache_capacity(config.result_cache_capacity)
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the result caches with empty ones holding `capacity` results
    /// per operation.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.caches = ResultCaches::new(capacity);
        self
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.caches.clear();
        debug!("Result caches cleared");
    }

    /// Number of cached results across all operations.
    pub fn cache_len(&self) -> usize {
        self.caches.len()
    }

    /// Provider names, in the order they are tried.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// A new aggregator over the registered providers matching `names`, in
    /// the order given, with empty caches.
    ///
    /// Names are resolved like any translator name, so aliases and typos
    /// work. A name that resolves to a translator without a registered
    /// provider is skipped.
    ///
    /// # Errors
    /// Fails if any name does not resolve to a known translator.
    pub fn select(&self, names: &[&str]) -> Result<Self, AggregateError> {
        let mut providers: Vec<Arc<dyn Translator>> = Vec::with_capacity(names.len());

        for &name in names {
            let matched = self.resolver.resolve_translator(Some(name), None)?;
            let Some(provider) = self
                .providers
                .iter()
                .find(|provider| provider.name().eq_ignore_ascii_case(matched.id()))
            else {
                warn!("'{}' resolved to {} but no such service is registered", name, matched.id());
                continue;
            };
            if !providers.iter().any(|kept| kept.name() == provider.name()) {
                providers.push(Arc::clone(provider));
            }
        }

        info!("Selected services: {:?}", providers.iter().map(|p| p.name()).collect::<Vec<_>>());

        Ok(Self {
            resolver: Arc::clone(&self.resolver),
            providers,
            retry: self.retry.clone(),
            caches: ResultCaches::new(self.caches.capacity()),
        })
    }

    pub async fn translate(
        &self,
        text: &str,
        destination: &str,
        source: &str,
    ) -> Result<TranslationResult, AggregateError> {
        let text = check_text(text)?;
        let destination = self.destination(destination)?;
        let source = self.source(source)?;

        let key = CacheKey::new(text, Some(&*destination), source.as_deref());
        if let Some(cached) = from_cache(&self.caches.translation, &key, "translate") {
            return Ok(cached);
        }

        let result = self
            .first_success("translate", |provider| {
                provider.translate(text, &destination, source.as_deref())
            })
            .await?;
        let result = self.canonical_languages(result, Some(&*destination), source.as_deref());
        Ok(self.caches.translation.put(key, result))
    }

    pub async fn transliterate(
        &self,
        text: &str,
        destination: &str,
        source: &str,
    ) -> Result<TransliterationResult, AggregateError> {
        let text = check_text(text)?;
        let destination = self.destination(destination)?;
        let source = self.source(source)?;

        let key = CacheKey::new(text, Some(&*destination), source.as_deref());
        if let Some(cached) = from_cache(&self.caches.transliteration, &key, "transliterate") {
            return Ok(cached);
        }

        let result = self
            .first_success("transliterate", |provider| {
                provider.transliterate(text, &destination, source.as_deref())
            })
            .await?;
        let result = self.canonical_languages(result, Some(&*destination), source.as_deref());
        Ok(self.caches.transliteration.put(key, result))
    }

    pub async fn spellcheck(&self, text: &str, source: &str) -> Result<SpellcheckResult, AggregateError> {
        let text = check_text(text)?;
        let source = self.source(source)?;

        let key = CacheKey::new(text, None, source.as_deref());
        if let Some(cached) = from_cache(&self.caches.spellcheck, &key, "spellcheck") {
            return Ok(cached);
        }

        let result = self
            .first_success("spellcheck", |provider| provider.spellcheck(text, source.as_deref()))
            .await?;
        let result = self.canonical_languages(result, None, source.as_deref());
        Ok(self.caches.spellcheck.put(key, result))
    }

    /// Detect the language of `text`.
    ///
    /// The payload is the canonical language id. A provider reporting a code
    /// the registry cannot resolve counts as a failure for that provider.
    pub async fn detect_language(&self, text: &str) -> Result<LanguageDetectionResult, AggregateError> {
        let text = check_text(text)?;
        let languages = self.resolver.languages();

        let key = CacheKey::new(text, None, None);
        if let Some(cached) = from_cache(&self.caches.language_detection, &key, "detect_language") {
            return Ok(cached);
        }

        let result = self
            .first_success("detect_language", |provider| {
                provider
                    .detect_language(text)
                    .map(move |result| -> Result<LanguageDetectionResult, ProviderError> {
                        let result = result?;
                        let resolution = languages
                            .resolve(&result.result)
                            .map_err(|_| ProviderError::UnsupportedLanguage(result.result.clone()))?;
                        let id = resolution.id().to_string();
                        Ok(result.map(|_| id.clone()).with_source_language(id))
                    })
                    .boxed()
            })
            .await?;
        Ok(self.caches.language_detection.put(key, result))
    }

    pub async fn example(&self, text: &str, destination: &str, source: &str) -> Result<ExampleResult, AggregateError> {
        let text = check_text(text)?;
        let destination = self.destination(destination)?;
        let source = self.source(source)?;

        let key = CacheKey::new(text, Some(&*destination), source.as_deref());
        if let Some(cached) = from_cache(&self.caches.example, &key, "example") {
            return Ok(cached);
        }

        let result = self
            .first_success("example", |provider| provider.example(text, &destination, source.as_deref()))
            .await?;
        let result = self.canonical_languages(result, Some(&*destination), source.as_deref());
        Ok(self.caches.example.put(key, result))
    }

    pub async fn dictionary(
        &self,
        text: &str,
        destination: &str,
        source: &str,
    ) -> Result<DictionaryResult, AggregateError> {
        let text = check_text(text)?;
        let destination = self.destination(destination)?;
        let source = self.source(source)?;

        let key = CacheKey::new(text, Some(&*destination), source.as_deref());
        if let Some(cached) = from_cache(&self.caches.dictionary, &key, "dictionary") {
            return Ok(cached);
        }

        let result = self
            .first_success("dictionary", |provider| {
                provider.dictionary(text, &destination, source.as_deref())
            })
            .await?;
        let result = self.canonical_languages(result, Some(&*destination), source.as_deref());
        Ok(self.caches.dictionary.put(key, result))
    }

    pub async fn text_to_speech(&self, text: &str, source: &str) -> Result<TextToSpeechResult, AggregateError> {
        let text = check_text(text)?;
        let source = self.source(source)?;

        let key = CacheKey::new(text, None, source.as_deref());
        if let Some(cached) = from_cache(&self.caches.text_to_speech, &key, "text_to_speech") {
            return Ok(cached);
        }

        let result = self
            .first_success("text_to_speech", |provider| provider.text_to_speech(text, source.as_deref()))
            .await?;
        let result = self.canonical_languages(result, None, source.as_deref());
        Ok(self.caches.text_to_speech.put(key, result))
    }

    fn destination(&self, input: &str) -> Result<Arc<LanguageIdentity>, AggregateError> {
        Ok(self.resolver.resolve_language(Some(input), None)?.identity)
    }

    /// `None` when the service should detect the source language itself.
    fn source(&self, input: &str) -> Result<Option<Arc<LanguageIdentity>>, AggregateError> {
        if normalize_key(input) == AUTO_LANGUAGE {
            return Ok(None);
        }
        Ok(Some(self.resolver.resolve_language(Some(input), None)?.identity))
    }

    /// Replace provider-reported language codes with canonical ids.
    fn canonical_languages<T>(
        &self,
        mut result: ServiceResult<T>,
        destination: Option<&LanguageIdentity>,
        source: Option<&LanguageIdentity>,
    ) -> ServiceResult<T> {
        if let Some(destination) = destination {
            result.destination_language = Some(destination.id.clone());
        }
        result.source_language = match (source, result.source_language.take()) {
            (Some(source), _) => Some(source.id.clone()),
            (None, Some(reported)) => match self.resolver.languages().resolve(&reported) {
                Ok(resolution) => Some(resolution.id().to_string()),
                Err(_) => Some(reported),
            },
            (None, None) => None,
        };
        result
    }

    /// Try each provider in order until one succeeds.
    async fn first_success<'a, T, F>(&'a self, method: &'static str, call: F) -> Result<T, AggregateError>
    where
        F: Fn(&'a dyn Translator) -> BoxFuture<'a, Result<T, ProviderError>>,
    {
        if self.providers.is_empty() {
            return Err(AggregateError::NoProviders);
        }

        let mut failures = Vec::new();

        for provider in self.providers.iter() {
            let provider: &'a dyn Translator = provider.as_ref();
            let operation = format!("{}.{}", provider.name(), method);

            match with_retry_if(&self.retry, &operation, || call(provider), ProviderError::is_retryable).await {
                Ok(result) => {
                    debug!("{} succeeded", operation);
                    return Ok(result);
                }
                Err(e) => {
                    warn!("{} failed: {}", operation, e);
                    failures.push((provider.name().to_string(), e));
                }
            }
        }

        Err(AggregateError::NoResult { method, failures })
    }
}

fn from_cache<T: Clone>(cache: &ResultCache<T>, key: &CacheKey, method: &str) -> Option<T> {
    let result = cache.get(key)?;
    debug!("{} served from cache", method);
    Some(result)
}

fn check_text(text: &str) -> Result<&str, AggregateError> {
    if text.chars().all(is_broad_whitespace) {
        return Err(AggregateError::EmptyText);
    }
    Ok(text)
}
