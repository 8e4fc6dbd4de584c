//! Provider capability interface.
//!
//! A translation service implements [`Translator`] and overrides the
//! operations it supports; everything else answers
//! [`ProviderError::Unsupported`] so the aggregator can move on to the next
//! service.

use crate::error::ProviderError;
use crate::i18n::LanguageIdentity;
use futures::future::{self, BoxFuture, FutureExt};
use serde::Serialize;

/// Result of one provider operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResult<T> {
    /// Name of the service that produced the result
    pub service: String,
    /// Text the operation was applied to
    pub source: String,
    /// Source language, when known. Services may report their own codes;
    /// the aggregator replaces them with canonical ids.
    pub source_language: Option<String>,
    /// Destination language, for operations that have one
    pub destination_language: Option<String>,
    pub result: T,
}

impl<T> ServiceResult<T> {
    pub fn new(service: impl Into<String>, source: impl Into<String>, result: T) -> Self {
        Self {
            service: service.into(),
            source: source.into(),
            source_language: None,
            destination_language: None,
            result,
        }
    }

    pub fn with_source_language(mut self, id: impl Into<String>) -> Self {
        self.source_language = Some(id.into());
        self
    }

    pub fn with_destination_language(mut self, id: impl Into<String>) -> Self {
        self.destination_language = Some(id.into());
        self
    }

    /// Replace the payload, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResult<U> {
        ServiceResult {
            service: self.service,
            source: self.source,
            source_language: self.source_language,
            destination_language: self.destination_language,
            result: f(self.result),
        }
    }
}

pub type TranslationResult = ServiceResult<String>;
pub type TransliterationResult = ServiceResult<String>;
pub type SpellcheckResult = ServiceResult<String>;
/// Payload is the language code as reported by the service.
pub type LanguageDetectionResult = ServiceResult<String>;
pub type ExampleResult = ServiceResult<Vec<String>>;
pub type DictionaryResult = ServiceResult<Vec<String>>;
/// Payload is the encoded audio.
pub type TextToSpeechResult = ServiceResult<Vec<u8>>;

fn unsupported<'a, T: Send + 'a>(method: &'static str) -> BoxFuture<'a, Result<T, ProviderError>> {
    future::ready(Err(ProviderError::Unsupported { method })).boxed()
}

/// A translation service.
///
/// Languages arrive already resolved; implementations map them to their own
/// codes with [`LanguageIdentity::code_for`] using [`Translator::name`].
pub trait Translator: Send + Sync {
    /// Service identifier, matching a translator id in the dataset.
    fn name(&self) -> &str;

    fn translate<'a>(
        &'a self,
        _text: &'a str,
        _destination: &'a LanguageIdentity,
        _source: Option<&'a LanguageIdentity>,
    ) -> BoxFuture<'a, Result<TranslationResult, ProviderError>> {
        unsupported("translate")
    }

    fn transliterate<'a>(
        &'a self,
        _text: &'a str,
        _destination: &'a LanguageIdentity,
        _source: Option<&'a LanguageIdentity>,
    ) -> BoxFuture<'a, Result<TransliterationResult, ProviderError>> {
        unsupported("transliterate")
    }

    fn spellcheck<'a>(
        &'a self,
        _text: &'a str,
        _source: Option<&'a LanguageIdentity>,
    ) -> BoxFuture<'a, Result<SpellcheckResult, ProviderError>> {
        unsupported("spellcheck")
    }

    fn detect_language<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<LanguageDetectionResult, ProviderError>> {
        unsupported("detect_language")
    }

    fn example<'a>(
        &'a self,
        _text: &'a str,
        _destination: &'a LanguageIdentity,
        _source: Option<&'a LanguageIdentity>,
    ) -> BoxFuture<'a, Result<ExampleResult, ProviderError>> {
        unsupported("example")
    }

    fn dictionary<'a>(
        &'a self,
        _text: &'a str,
        _destination: &'a LanguageIdentity,
        _source: Option<&'a LanguageIdentity>,
    ) -> BoxFuture<'a, Result<DictionaryResult, ProviderError>> {
        unsupported("dictionary")
    }

    fn text_to_speech<'a>(
        &'a self,
        _text: &'a str,
        _source: Option<&'a LanguageIdentity>,
    ) -> BoxFuture<'a, Result<TextToSpeechResult, ProviderError>> {
        unsupported("text_to_speech")
    }
}
