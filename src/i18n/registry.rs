//! Language registry: every known language and the indices used to find it.
//!
//! The registry is built once from decoded dataset records and is read-only
//! afterwards, so it can be shared between threads without locking. Each
//! resolver owns its own registry; there is no process-wide instance.
//!
//! # Exact-match precedence
//!
//! Several records may claim the same key (legacy codes for one
//! macrolanguage, a name shared by two languages). The merged index is filled
//! in layers, and the first identity to claim a key keeps it:
//!
//! 1. internal ids
//! 2. ISO 639-1 codes
//! 3. ISO 639-2/B codes
//! 4. ISO 639-2/T codes
//! 5. special synonyms, then dataset aliases
//! 6. English names
//! 7. foreign names
//!
//! Within a layer identities are visited in ascending id order, so the
//! result never depends on the order of the input records.

use crate::error::DatasetError;
use crate::i18n::dataset::Dataset;
use crate::i18n::vector::{is_broad_whitespace, NameVector};
use crate::i18n::LanguageIdentity;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Keys that must resolve exactly even though they are not primary codes.
///
/// Providers spell these with mixed case ("zh-CN"), which case folding would
/// otherwise leave without a match.
const SPECIAL_SYNONYMS: &[(&str, &str)] = &[("zh-cn", "zho"), ("zh-tw", "zho")];

/// Normalize a string for exact lookup: trim broad whitespace and lower-case.
///
/// Parentheses are kept, unlike the fuzzy preprocessing, because the index
/// holds raw display strings such as "modern greek (1453-)".
pub fn normalize_key(input: &str) -> String {
    input.trim_matches(is_broad_whitespace).to_lowercase()
}

/// Read-only collection of language identities with exact and fuzzy indices.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    /// All identities, keyed and ordered by id
    languages: BTreeMap<String, Arc<LanguageIdentity>>,

    /// Merged exact-match index: normalized key → identity
    exact: HashMap<String, Arc<LanguageIdentity>>,

    /// One vector per distinct display name, in id order
    vectors: Vec<NameVector>,
}

impl LanguageRegistry {
    /// Build a registry from a decoded dataset.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, DatasetError> {
        Self::build(dataset.languages.clone(), &dataset.aliases)
    }

    /// Build a registry from language records and `(alias, id)` pairs.
    ///
    /// # Errors
    /// Fails on an empty or duplicated language id. Aliases and foreign names
    /// that point to unknown languages are skipped with a warning.
    pub fn build(
        records: Vec<LanguageIdentity>,
        aliases: &[(String, String)],
    ) -> Result<Self, DatasetError> {
        let mut languages: BTreeMap<String, Arc<LanguageIdentity>> = BTreeMap::new();
        for record in records {
            if record.id.trim().is_empty() {
                return Err(DatasetError::EmptyIdentifier);
            }
            if languages.contains_key(&record.id) {
                return Err(DatasetError::DuplicateLanguage(record.id));
            }
            languages.insert(record.id.clone(), Arc::new(record));
        }

        let exact = build_exact_index(&languages, aliases);
        let vectors = build_name_vectors(&languages);

        info!(
            "Language registry built: {} languages, {} exact keys, {} name vectors",
            languages.len(),
            exact.len(),
            vectors.len()
        );

        Ok(Self {
            languages,
            exact,
            vectors,
        })
    }

    /// Look up an already-normalized key (see [`normalize_key`]).
    pub fn lookup_exact(&self, normalized_key: &str) -> Option<&Arc<LanguageIdentity>> {
        self.exact.get(normalized_key)
    }

    /// Get a language by its internal id.
    pub fn get(&self, id: &str) -> Option<&Arc<LanguageIdentity>> {
        self.languages.get(id)
    }

    /// Precomputed vectors for every known display name.
    pub fn name_vectors(&self) -> &[NameVector] {
        &self.vectors
    }

    /// All identities, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<LanguageIdentity>> {
        self.languages.values()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Number of keys in the merged exact-match index.
    pub fn exact_key_count(&self) -> usize {
        self.exact.len()
    }
}

fn build_exact_index(
    languages: &BTreeMap<String, Arc<LanguageIdentity>>,
    aliases: &[(String, String)],
) -> HashMap<String, Arc<LanguageIdentity>> {
    let mut exact: HashMap<String, Arc<LanguageIdentity>> = HashMap::new();

    let mut claim = |key: &str, identity: &Arc<LanguageIdentity>| {
        let key = normalize_key(key);
        if key.is_empty() {
            return;
        }
        if let Some(existing) = exact.get(&key) {
            if existing.id != identity.id {
                debug!(
                    "Exact key '{}' already claimed by '{}', ignoring '{}'",
                    key, existing.id, identity.id
                );
            }
            return;
        }
        exact.insert(key, Arc::clone(identity));
    };

    for identity in languages.values() {
        claim(&identity.id, identity);
    }
    for identity in languages.values() {
        if let Some(code) = &identity.alpha2 {
            claim(code, identity);
        }
    }
    for identity in languages.values() {
        if let Some(code) = &identity.alpha3b {
            claim(code, identity);
        }
    }
    for identity in languages.values() {
        if let Some(code) = &identity.alpha3t {
            claim(code, identity);
        }
    }

    for &(alias, id) in SPECIAL_SYNONYMS {
        if let Some(identity) = languages.get(id) {
            claim(alias, identity);
        }
    }
    for (alias, id) in aliases {
        match languages.get(id) {
            Some(identity) => claim(alias, identity),
            None => warn!("Alias '{}' points to unknown language '{}', skipping", alias, id),
        }
    }

    for identity in languages.values() {
        claim(&identity.name, identity);
    }
    for identity in languages.values() {
        for (language_id, name) in identity.translated_names() {
            if languages.contains_key(language_id) {
                claim(name, identity);
            }
        }
    }

    exact
}

fn build_name_vectors(languages: &BTreeMap<String, Arc<LanguageIdentity>>) -> Vec<NameVector> {
    let mut vectors = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for identity in languages.values() {
        let foreign = identity.translated_names().filter_map(|(language_id, name)| {
            if languages.contains_key(language_id) {
                Some(name)
            } else {
                warn!(
                    "Name of '{}' in unknown language '{}' ignored",
                    identity.id, language_id
                );
                None
            }
        });

        for name in std::iter::once(identity.name.as_str()).chain(foreign) {
            let vector = NameVector::new(identity.id.as_str(), name);
            if vector.is_empty() {
                continue;
            }
            if seen.insert((identity.id.clone(), vector.source().to_string())) {
                vectors.push(vector);
            }
        }
    }

    vectors
}
