//! Error types shared across the crate.
//!
//! Resolution failures are deterministic functions of the input and the
//! loaded dataset, so none of them are retried internally. Provider errors
//! carry enough information for the fallback chain to decide whether
//! another attempt is worth making.

use thiserror::Error;

/// Errors raised while resolving a language or translator name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The input did not reach the threshold against any known language name.
    #[error("couldn't recognize the given language ({input}){}", did_you_mean(.guess, .similarity))]
    UnknownLanguage {
        input: String,
        /// Id of the closest language, if the registry had any candidates.
        guess: Option<String>,
        /// Similarity of the closest language, as a fraction in [0, 1].
        similarity: f64,
    },

    /// The input did not reach the threshold against any known translator alias.
    #[error("couldn't recognize the given translator ({input}){}", did_you_mean(.guess, .similarity))]
    UnknownTranslator {
        input: String,
        guess: Option<String>,
        similarity: f64,
    },

    /// Structurally invalid input, as opposed to input that simply matched nothing.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ResolveError {
    /// Best-guess similarity carried by the error (0 for `InvalidInput`).
    pub fn similarity(&self) -> f64 {
        match self {
            Self::UnknownLanguage { similarity, .. } | Self::UnknownTranslator { similarity, .. } => {
                *similarity
            }
            Self::InvalidInput(_) => 0.0,
        }
    }

    /// Best-guess identifier carried by the error, if any.
    pub fn guess(&self) -> Option<&str> {
        match self {
            Self::UnknownLanguage { guess, .. } | Self::UnknownTranslator { guess, .. } => {
                guess.as_deref()
            }
            Self::InvalidInput(_) => None,
        }
    }
}

fn did_you_mean(guess: &Option<String>, similarity: &f64) -> String {
    match guess {
        Some(guess) => format!(
            ", did you mean '{}' (similarity: {:.2}%)?",
            guess,
            similarity * 100.0
        ),
        None => String::new(),
    }
}

/// Errors raised while decoding or indexing a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate language id '{0}'")]
    DuplicateLanguage(String),

    #[error("duplicate translator id '{0}'")]
    DuplicateTranslator(String),

    #[error("record has an empty identifier")]
    EmptyIdentifier,
}

/// Errors returned by a single translation provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("{method} is not implemented by this service")]
    Unsupported { method: &'static str },

    #[error("language '{0}' is not supported by this service")]
    UnsupportedLanguage(String),

    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("rate limited by the service")]
    RateLimited,

    #[error("network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Whether another attempt against the same provider could succeed.
    ///
    /// 5xx responses, rate limiting and network failures are transient;
    /// everything else fails the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Service { status, .. } => *status >= 500,
            Self::RateLimited | Self::Network(_) => true,
            Self::Unsupported { .. } | Self::UnsupportedLanguage(_) => false,
        }
    }
}

/// Errors returned by the provider fallback chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("the given text is empty")]
    EmptyText,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("no translation service is configured")]
    NoProviders,

    #[error("no service returned a valid result for {method} ({} attempted)", .failures.len())]
    NoResult {
        method: &'static str,
        /// Every provider tried, in order, with the error it returned.
        failures: Vec<(String, ProviderError)>,
    },
}
