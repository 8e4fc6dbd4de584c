//! Language and translator name resolution for translation back-ends.
//!
//! The core lives in [`i18n`]: it turns any user-supplied language string
//! (ISO code, English name, native name, foreign name, or a typo of one of
//! these) into a canonical [`i18n::LanguageIdentity`]. The same similarity
//! engine resolves translator names in [`translators`], which also holds
//! the provider trait and the fallback aggregator.

pub mod config;
pub mod error;
pub mod i18n;
pub mod resolver;
pub mod retry;
pub mod translators;

pub use error::{AggregateError, DatasetError, ProviderError, ResolveError};
pub use resolver::Resolver;
