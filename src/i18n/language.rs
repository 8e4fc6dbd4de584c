//! Language identity: the canonical record for one language.
//!
//! Every code, name and alias a user might type resolves to exactly one
//! `LanguageIdentity`. Identities are loaded once from the dataset and never
//! change afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Language type, as classified by ISO 639-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageType {
    Ancient,
    Constructed,
    Extinct,
    Historical,
    Living,
    Special,
}

/// Language scope, as classified by ISO 639-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageScope {
    Individual,
    Macrolanguage,
    Special,
}

/// Optional classification attached to a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageExtra {
    #[serde(rename = "type")]
    pub kind: LanguageType,
    pub scope: LanguageScope,
}

/// Canonical record for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageIdentity {
    /// Stable internal key (ISO 639-3 style), unique across the registry
    pub id: String,

    /// ISO 639-1 code (e.g. "en")
    #[serde(default)]
    pub alpha2: Option<String>,

    /// ISO 639-2/B code (e.g. "fre")
    #[serde(default)]
    pub alpha3b: Option<String>,

    /// ISO 639-2/T code (e.g. "fra")
    #[serde(default)]
    pub alpha3t: Option<String>,

    /// English display name
    pub name: String,

    #[serde(default)]
    pub extra: Option<LanguageExtra>,

    /// Other language id → this language's name written in that language.
    /// `None` means the name has not been translated yet.
    #[serde(default, rename = "foreign")]
    pub foreign_names: BTreeMap<String, Option<String>>,

    /// Provider name → provider-specific code, where it differs from ISO
    #[serde(default, rename = "providers")]
    pub provider_codes: BTreeMap<String, String>,
}

impl LanguageIdentity {
    /// Create a bare identity with no codes, names or overrides.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alpha2: None,
            alpha3b: None,
            alpha3t: None,
            name: name.into(),
            extra: None,
            foreign_names: BTreeMap::new(),
            provider_codes: BTreeMap::new(),
        }
    }

    pub fn with_alpha2(mut self, code: impl Into<String>) -> Self {
        self.alpha2 = Some(code.into());
        self
    }

    pub fn with_alpha3(mut self, bibliographic: impl Into<String>, terminological: impl Into<String>) -> Self {
        self.alpha3b = Some(bibliographic.into());
        self.alpha3t = Some(terminological.into());
        self
    }

    pub fn with_foreign_name(mut self, language_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.foreign_names.insert(language_id.into(), Some(name.into()));
        self
    }

    pub fn with_provider_code(mut self, provider: impl Into<String>, code: impl Into<String>) -> Self {
        self.provider_codes.insert(provider.into(), code.into());
        self
    }

    /// Code to send to `provider` for this language.
    ///
    /// Falls back to the alpha-2 code, then to the id, when the provider has
    /// no override (e.g. Bing wants "nb" for Norwegian and "pt-pt" for Portuguese).
    /// Provider names compare case-insensitively.
    pub fn code_for(&self, provider: &str) -> &str {
        self.provider_codes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(provider))
            .map(|(_, code)| code.as_str())
            .or(self.alpha2.as_deref())
            .unwrap_or(self.id.as_str())
    }

    /// This language's name as written in `language_id`, if translated.
    pub fn foreign_name(&self, language_id: &str) -> Option<&str> {
        self.foreign_names.get(language_id)?.as_deref()
    }

    /// The name of the language in itself, or its English name.
    pub fn native_name(&self) -> &str {
        self.foreign_name(&self.id).unwrap_or(self.name.as_str())
    }

    /// Non-null foreign names, in language id order.
    pub fn translated_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.foreign_names
            .iter()
            .filter_map(|(lang, name)| name.as_deref().map(|name| (lang.as_str(), name)))
    }
}

impl PartialEq for LanguageIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LanguageIdentity {}

impl Hash for LanguageIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Outcome of resolving a string to a language.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub identity: Arc<LanguageIdentity>,
    /// 1.0 for exact matches, otherwise the fuzzy similarity
    pub confidence: f64,
    /// Whether the exact-match index answered, as opposed to fuzzy search.
    /// A fuzzy hit can still score 1.0.
    pub exact: bool,
}

impl Resolution {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }
}
