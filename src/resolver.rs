//! The two resolution entry points, bundled over one loaded dataset.

use crate::config::Config;
use crate::error::{DatasetError, ResolveError};
use crate::i18n::{Dataset, LanguageRegistry, LanguageResolver, Resolution};
use crate::translators::{TranslatorMatch, TranslatorResolver};

/// Language and translator resolution built from one dataset.
///
/// Shareable across threads; wrap it in an `Arc` to hand it to concurrent
/// callers.
#[derive(Debug)]
pub struct Resolver {
    languages: LanguageResolver,
    translators: TranslatorResolver,
}

impl Resolver {
    pub fn new(languages: LanguageResolver, translators: TranslatorResolver) -> Self {
        Self { languages, translators }
    }

    /// Build both resolvers from decoded dataset records.
    pub fn from_dataset(dataset: &Dataset, config: &Config) -> Result<Self, DatasetError> {
        let registry = LanguageRegistry::from_dataset(dataset)?;
        let languages = LanguageResolver::new(registry)
            .with_threshold(config.language_threshold)
            .with_memo_capacity(config.memo_capacity);
        let translators =
            TranslatorResolver::build(dataset.translators.clone())?.with_threshold(config.translator_threshold);

        Ok(Self::new(languages, translators))
    }

    /// Resolver over the built-in dataset with default settings.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_dataset(&Dataset::builtin()?, &Config::default())
    }

    pub fn languages(&self) -> &LanguageResolver {
        &self.languages
    }

    pub fn translators(&self) -> &TranslatorResolver {
        &self.translators
    }

    /// Resolve a language name or code.
    ///
    /// `threshold` overrides the configured fuzzy-match threshold for this
    /// call only.
    ///
    /// # Errors
    /// `InvalidInput` when `input` is absent or `threshold` is NaN;
    /// `UnknownLanguage` when nothing matches well enough.
    pub fn resolve_language(&self, input: Option<&str>, threshold: Option<f64>) -> Result<Resolution, ResolveError> {
        let input = input.ok_or_else(|| ResolveError::InvalidInput("no language given".to_string()))?;
        let threshold = threshold.unwrap_or(self.languages.threshold());
        self.languages.resolve_with_threshold(input, threshold)
    }

    /// Resolve a translator name.
    ///
    /// # Errors
    /// `InvalidInput` when `input` is absent or `threshold` is NaN;
    /// `UnknownTranslator` when nothing matches well enough.
    pub fn resolve_translator(
        &self,
        input: Option<&str>,
        threshold: Option<f64>,
    ) -> Result<TranslatorMatch, ResolveError> {
        let input = input.ok_or_else(|| ResolveError::InvalidInput("no translator given".to_string()))?;
        let threshold = threshold.unwrap_or(self.translators.threshold());
        self.translators.resolve_with_threshold(input, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TranslatorRecord;

    fn small_dataset() -> Dataset {
        Dataset::from_json(
            r#"{
                "languages": [
                    {"id": "eng", "alpha2": "en", "alpha3b": "eng", "alpha3t": "eng", "name": "English",
                     "foreign": {"fra": "anglais"}},
                    {"id": "fra", "alpha2": "fr", "alpha3b": "fre", "alpha3t": "fra", "name": "French",
                     "foreign": {"fra": "français"}}
                ],
                "aliases": [["francais", "fra"]],
                "translators": [{"id": "GoogleTranslate", "aliases": ["google"]}]
            }"#,
        )
        .expect("Should parse")
    }

    fn resolver() -> Resolver {
        Resolver::from_dataset(&small_dataset(), &Config::default()).expect("Should build")
    }

    #[test]
    fn test_resolve_language() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_language(Some("fr"), None).expect("Should resolve").id(), "fra");
        assert_eq!(resolver.resolve_language(Some("Francais"), None).expect("Should resolve").id(), "fra");
    }

    #[test]
    fn test_absent_input_is_invalid() {
        let resolver = resolver();
        assert!(matches!(
            resolver.resolve_language(None, None),
            Err(ResolveError::InvalidInput(_))
        ));
        assert!(matches!(
            resolver.resolve_translator(None, Some(0.5)),
            Err(ResolveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_blank_input_is_unknown_not_invalid() {
        let err = resolver().resolve_language(Some("   "), None).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownLanguage { similarity, .. } if similarity == 0.0));
    }

    #[test]
    fn test_threshold_override_per_call() {
        let resolver = resolver();
        // "anglai" is close to "anglais" but not identical
        assert!(resolver.resolve_language(Some("anglai"), Some(1.0)).is_err());
        assert_eq!(
            resolver.resolve_language(Some("anglai"), Some(0.5)).expect("Should resolve").id(),
            "eng"
        );
        assert_eq!(resolver.languages().threshold(), 0.93);
    }

    #[test]
    fn test_config_thresholds_are_applied() {
        let config = Config {
            language_threshold: 0.5,
            translator_threshold: 0.4,
            memo_capacity: 3,
            ..Config::default()
        };
        let resolver = Resolver::from_dataset(&small_dataset(), &config).expect("Should build");
        assert_eq!(resolver.languages().threshold(), 0.5);
        assert_eq!(resolver.translators().threshold(), 0.4);
    }

    #[test]
    fn test_resolve_translator() {
        let resolver = resolver();
        let result = resolver.resolve_translator(Some("Google"), None).expect("Should resolve");
        assert_eq!(result.id(), "GoogleTranslate");
        assert!(matches!(
            resolver.resolve_translator(Some("yandex"), None),
            Err(ResolveError::UnknownTranslator { .. })
        ));
    }

    #[test]
    fn test_duplicate_translators_fail_to_build() {
        let mut dataset = small_dataset();
        dataset.translators.push(TranslatorRecord {
            id: "googletranslate".to_string(),
            aliases: Vec::new(),
        });
        assert!(matches!(
            Resolver::from_dataset(&dataset, &Config::default()),
            Err(DatasetError::DuplicateTranslator(_))
        ));
    }

    #[test]
    fn test_builtin() {
        let resolver = Resolver::builtin().expect("Should load built-in dataset");
        assert_eq!(resolver.resolve_language(Some("English"), None).expect("Should resolve").id(), "eng");
        assert_eq!(
            resolver.resolve_translator(Some("deepl"), None).expect("Should resolve").id(),
            "DeeplTranslate"
        );
    }
}
