//! Translator resolution and the provider fallback chain.
//!
//! - `resolver`: maps free-text translator names to a known implementation
//! - `provider`: the capability trait a translation service implements
//! - `aggregator`: tries services in order until one succeeds
//! - `cache`: per-operation result caches used by the aggregator

mod aggregator;
mod cache;
mod provider;
mod resolver;

pub use aggregator::{Aggregator, AUTO_LANGUAGE};
pub use cache::{CacheKey, ResultCache, ResultCaches, DEFAULT_RESULT_CACHE_CAPACITY};
pub use provider::{
    DictionaryResult, ExampleResult, LanguageDetectionResult, ServiceResult, SpellcheckResult, TextToSpeechResult,
    TranslationResult, Translator, TransliterationResult,
};
pub use resolver::{TranslatorIdentity, TranslatorMatch, TranslatorResolver, DEFAULT_TRANSLATOR_THRESHOLD};
