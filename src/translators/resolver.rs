//! Translator resolver: map free-text translator names to an implementation.
//!
//! Works like the language resolver, over a table of translator aliases:
//! the implementation identifier is tried exactly first (optionally written
//! as a qualified path such as `translators::GoogleTranslate`), then aliases
//! are matched fuzzily.

use crate::error::{DatasetError, ResolveError};
use crate::i18n::{best_match, normalize_key, ranked_search, vectorize, NameVector, SearchResult, TranslatorRecord};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Default minimum similarity for a fuzzy translator match.
pub const DEFAULT_TRANSLATOR_THRESHOLD: f64 = 0.90;

/// Qualified paths accepted in front of an identifier, lower-cased.
const QUALIFIED_PREFIXES: &[&str] = &[
    "translatehub::translators::",
    "translators::",
    "translatehub.translators.",
    "translators.",
];

/// A known translator implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslatorIdentity {
    /// Implementation identifier (e.g. "GoogleTranslate")
    pub id: String,
    /// Human-readable names, in any language
    pub aliases: Vec<String>,
}

/// Outcome of resolving a string to a translator.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorMatch {
    pub identity: Arc<TranslatorIdentity>,
    pub confidence: f64,
}

impl TranslatorMatch {
    pub fn id(&self) -> &str {
        &self.identity.id
    }
}

#[derive(Debug, Clone)]
pub struct TranslatorResolver {
    /// Translators in dataset order
    translators: Vec<Arc<TranslatorIdentity>>,
    /// Lower-cased identifier → translator
    by_id: HashMap<String, Arc<TranslatorIdentity>>,
    vectors: Vec<NameVector>,
    threshold: f64,
}

impl TranslatorResolver {
    /// Build the alias table from dataset records.
    ///
    /// # Errors
    /// Fails on an empty identifier or on two records whose identifiers are
    /// equal ignoring case.
    pub fn build(records: Vec<TranslatorRecord>) -> Result<Self, DatasetError> {
        let mut translators = Vec::with_capacity(records.len());
        let mut by_id = HashMap::new();
        let mut vectors = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for record in records {
            let key = normalize_key(&record.id);
            if key.is_empty() {
                return Err(DatasetError::EmptyIdentifier);
            }
            if by_id.contains_key(&key) {
                return Err(DatasetError::DuplicateTranslator(record.id));
            }

            let identity = Arc::new(TranslatorIdentity {
                id: record.id,
                aliases: record.aliases,
            });

            for name in std::iter::once(&identity.id).chain(identity.aliases.iter()) {
                let vector = NameVector::new(identity.id.as_str(), name);
                if !vector.is_empty() && seen.insert((identity.id.clone(), vector.source().to_string())) {
                    vectors.push(vector);
                }
            }

            by_id.insert(key, Arc::clone(&identity));
            translators.push(identity);
        }

        info!(
            "Translator table built: {} translators, {} alias vectors",
            translators.len(),
            vectors.len()
        );

        Ok(Self {
            translators,
            by_id,
            vectors,
            threshold: DEFAULT_TRANSLATOR_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Get a translator by identifier, ignoring case.
    pub fn get(&self, id: &str) -> Option<&Arc<TranslatorIdentity>> {
        self.by_id.get(&normalize_key(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TranslatorIdentity>> {
        self.translators.iter()
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    pub fn resolve(&self, input: &str) -> Result<TranslatorMatch, ResolveError> {
        self.resolve_with_threshold(input, self.threshold)
    }

    /// Resolve `input`, accepting fuzzy matches with similarity >= `threshold`.
    pub fn resolve_with_threshold(&self, input: &str, threshold: f64) -> Result<TranslatorMatch, ResolveError> {
        if threshold.is_nan() {
            return Err(ResolveError::InvalidInput("threshold is NaN".to_string()));
        }

        if let Some(identity) = self.lookup_exact(input) {
            debug!("Exact translator match for '{}': {}", input, identity.id);
            return Ok(TranslatorMatch {
                identity: Arc::clone(identity),
                confidence: 1.0,
            });
        }

        let query = vectorize(input);
        let Some(best) = best_match(&query, &self.vectors) else {
            return Err(unknown(input, None, 0.0));
        };

        if best.similarity <= 0.0 || best.similarity < threshold {
            debug!(
                "No translator above threshold for '{}': best '{}' ({}) at {:.4}",
                input,
                best.vector.source(),
                best.vector.owner(),
                best.similarity
            );
            return Err(unknown(input, Some(best.vector.owner().to_string()), best.similarity));
        }

        match self.get(best.vector.owner()) {
            Some(identity) => {
                debug!("Fuzzy translator match for '{}': {} ({:.4})", input, identity.id, best.similarity);
                Ok(TranslatorMatch {
                    identity: Arc::clone(identity),
                    confidence: best.similarity,
                })
            }
            None => Err(unknown(input, None, 0.0)),
        }
    }

    /// Every alias scored against `input`, best first.
    pub fn search(&self, input: &str) -> Vec<SearchResult<'_>> {
        ranked_search(&vectorize(input), &self.vectors)
    }

    /// Exact match on the identifier, bare or under a known module path.
    fn lookup_exact(&self, input: &str) -> Option<&Arc<TranslatorIdentity>> {
        let key = normalize_key(input);
        if let Some(identity) = self.by_id.get(&key) {
            return Some(identity);
        }
        QUALIFIED_PREFIXES
            .iter()
            .find_map(|prefix| key.strip_prefix(*prefix))
            .and_then(|id| self.by_id.get(id))
    }
}

fn unknown(input: &str, guess: Option<String>, similarity: f64) -> ResolveError {
    ResolveError::UnknownTranslator {
        input: input.to_string(),
        guess,
        similarity,
    }
}
