//! Language resolver: turn any user-supplied string into a language identity.
//!
//! Resolution tries, in order:
//!
//! 1. the memo of previous resolutions
//! 2. the registry's exact-match index (codes, names, aliases)
//! 3. fuzzy search over every known display name
//!
//! A fuzzy match is accepted when its similarity reaches the threshold;
//! otherwise the error carries the closest candidate so the caller can ask
//! "did you mean ...?".

use crate::error::ResolveError;
use crate::i18n::memo::{MemoEntry, ResolutionMemo, DEFAULT_MEMO_CAPACITY};
use crate::i18n::metrics::{MetricsReport, ResolutionMetrics};
use crate::i18n::registry::{normalize_key, LanguageRegistry};
use crate::i18n::similarity::{best_match, ranked_search, SearchResult};
use crate::i18n::vector::vectorize;
use crate::i18n::Resolution;
use std::sync::Arc;
use tracing::{debug, trace};

/// Default minimum similarity for a fuzzy language match.
pub const DEFAULT_LANGUAGE_THRESHOLD: f64 = 0.93;

/// Resolves strings against one registry, remembering previous answers.
///
/// `LanguageResolver` is `Send + Sync`; share it behind an `Arc`.
#[derive(Debug)]
pub struct LanguageResolver {
    registry: Arc<LanguageRegistry>,
    memo: ResolutionMemo,
    metrics: ResolutionMetrics,
    threshold: f64,
}

impl LanguageResolver {
    /// Create a resolver with the default threshold and memo capacity.
    pub fn new(registry: impl Into<Arc<LanguageRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            memo: ResolutionMemo::new(DEFAULT_MEMO_CAPACITY),
            metrics: ResolutionMetrics::new(),
            threshold: DEFAULT_LANGUAGE_THRESHOLD,
        }
    }

    /// Set the threshold used by [`resolve`](Self::resolve).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the memo with an empty one of the given capacity.
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo = ResolutionMemo::new(capacity);
        self
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve `input` using the resolver's default threshold.
    pub fn resolve(&self, input: &str) -> Result<Resolution, ResolveError> {
        self.resolve_with_threshold(input, self.threshold)
    }

    /// Resolve `input`, accepting fuzzy matches with similarity >= `threshold`.
    ///
    /// # Errors
    /// * `InvalidInput` if `threshold` is NaN
    /// * `UnknownLanguage` if no exact key matches and the best fuzzy
    ///   candidate scores below `threshold` (or zero)
    pub fn resolve_with_threshold(&self, input: &str, threshold: f64) -> Result<Resolution, ResolveError> {
        if threshold.is_nan() {
            return Err(ResolveError::InvalidInput("threshold is NaN".to_string()));
        }

        let key = normalize_key(input);

        if let Some(entry) = self.memo.get(&key) {
            if let Some(identity) = self.registry.get(&entry.id) {
                self.metrics.record_memo_hit();
                if entry.exact || entry.confidence >= threshold {
                    trace!("Memo hit for '{}': {} ({:.4})", key, entry.id, entry.confidence);
                    return Ok(Resolution {
                        identity: Arc::clone(identity),
                        confidence: entry.confidence,
                        exact: entry.exact,
                    });
                }
                return Err(self.unknown(input, Some(entry.id), entry.confidence));
            }
        }
        self.metrics.record_memo_miss();

        if let Some(identity) = self.registry.lookup_exact(&key) {
            debug!("Exact match for '{}': {}", key, identity.id);
            self.metrics.record_exact_hit();
            self.remember(key, &identity.id, 1.0, true);
            return Ok(Resolution {
                identity: Arc::clone(identity),
                confidence: 1.0,
                exact: true,
            });
        }

        let query = vectorize(input);
        let best = best_match(&query, self.registry.name_vectors());

        let (owner, similarity) = match best {
            Some(result) => (result.vector.owner().to_string(), result.similarity),
            None => return Err(self.unknown(input, None, 0.0)),
        };

        // A zero score means no shared character at all, whatever the threshold.
        if similarity <= 0.0 || similarity < threshold {
            debug!(
                "No language above threshold for '{}': best '{}' at {:.4} (threshold {:.4})",
                input, owner, similarity, threshold
            );
            return Err(self.unknown(input, Some(owner), similarity));
        }

        let Some(identity) = self.registry.get(&owner) else {
            return Err(self.unknown(input, None, 0.0));
        };

        debug!("Fuzzy match for '{}': {} ({:.4})", input, owner, similarity);
        self.metrics.record_fuzzy_hit();
        self.remember(key, &owner, similarity, false);

        Ok(Resolution {
            identity: Arc::clone(identity),
            confidence: similarity,
            exact: false,
        })
    }

    /// Every known display name scored against `input`, best first.
    pub fn search(&self, input: &str) -> Vec<SearchResult<'_>> {
        ranked_search(&vectorize(input), self.registry.name_vectors())
    }

    pub fn clear_memo(&self) {
        self.memo.clear();
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    fn remember(&self, key: String, id: &str, confidence: f64, exact: bool) {
        self.memo.put(
            key,
            MemoEntry {
                id: id.to_string(),
                confidence,
                exact,
            },
        );
    }

    fn unknown(&self, input: &str, guess: Option<String>, similarity: f64) -> ResolveError {
        self.metrics.record_failure();
        ResolveError::UnknownLanguage {
            input: input.to_string(),
            guess,
            similarity,
        }
    }
}
