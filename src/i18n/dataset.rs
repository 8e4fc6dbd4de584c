//! Dataset load contract.
//!
//! The resolvers receive already-decoded records; reading them from disk is
//! the caller's business. The built-in dataset is embedded at compile time.

use crate::error::DatasetError;
use crate::i18n::LanguageIdentity;
use serde::{Deserialize, Serialize};

const BUILTIN_DATASET: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/languages.json"));

/// A translator and the human-readable names it goes by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorRecord {
    /// Implementation identifier (e.g. "GoogleTranslate")
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Everything needed to build the registries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub languages: Vec<LanguageIdentity>,

    /// Extra exact-match codes as `(alias, language id)` pairs
    #[serde(default)]
    pub aliases: Vec<(String, String)>,

    #[serde(default)]
    pub translators: Vec<TranslatorRecord>,
}

impl Dataset {
    /// Decode a dataset from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The dataset shipped with the crate.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json(BUILTIN_DATASET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let dataset = Dataset::builtin().expect("Builtin dataset should parse");
        assert!(dataset.languages.len() >= 30);
        assert!(!dataset.translators.is_empty());
        assert!(dataset.languages.iter().any(|lang| lang.id == "eng"));
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let dataset = Dataset::builtin().expect("Builtin dataset should parse");
        let mut ids: Vec<&str> = dataset.languages.iter().map(|l| l.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_from_json_aliases_as_pairs() {
        let dataset = Dataset::from_json(
            r#"{"languages": [{"id": "zho", "name": "Chinese"}], "aliases": [["chi", "zho"]]}"#,
        )
        .expect("Should parse");
        assert_eq!(dataset.aliases, vec![("chi".to_string(), "zho".to_string())]);
        assert!(dataset.translators.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let result = Dataset::from_json("{ not json");
        assert!(matches!(result, Err(DatasetError::Parse(_))));
    }

    #[test]
    fn test_from_json_empty_object() {
        let dataset = Dataset::from_json("{}").expect("Should parse");
        assert!(dataset.languages.is_empty());
    }
}
