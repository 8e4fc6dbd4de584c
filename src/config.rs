use crate::i18n::{DEFAULT_LANGUAGE_THRESHOLD, DEFAULT_MEMO_CAPACITY};
use crate::translators::{DEFAULT_RESULT_CACHE_CAPACITY, DEFAULT_TRANSLATOR_THRESHOLD};
use anyhow::{bail, Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Resolution
    pub language_threshold: f64,
    pub translator_threshold: f64,
    pub memo_capacity: usize,

    // Dataset
    pub dataset_path: Option<String>,

    // Providers
    pub provider_max_attempts: u32,
    pub result_cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // Resolution
            language_threshold: env_or("LANGUAGE_THRESHOLD", DEFAULT_LANGUAGE_THRESHOLD)?,
            translator_threshold: env_or("TRANSLATOR_THRESHOLD", DEFAULT_TRANSLATOR_THRESHOLD)?,
            memo_capacity: env_or("LANGUAGE_MEMO_CAPACITY", DEFAULT_MEMO_CAPACITY)?,

            // Dataset
            dataset_path: std::env::var("LANGUAGE_DATASET")
                .ok()
                .filter(|path| !path.trim().is_empty()),

            // Providers
            provider_max_attempts: env_or("PROVIDER_MAX_ATTEMPTS", 2)?,
            result_cache_capacity: env_or("RESULT_CACHE_CAPACITY", DEFAULT_RESULT_CACHE_CAPACITY)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        check_threshold("LANGUAGE_THRESHOLD", self.language_threshold)?;
        check_threshold("TRANSLATOR_THRESHOLD", self.translator_threshold)?;
        if self.memo_capacity == 0 {
            bail!("LANGUAGE_MEMO_CAPACITY must be at least 1");
        }
        if self.provider_max_attempts == 0 {
            bail!("PROVIDER_MAX_ATTEMPTS must be at least 1");
        }
        if self.result_cache_capacity == 0 {
            bail!("RESULT_CACHE_CAPACITY must be at least 1");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_threshold: DEFAULT_LANGUAGE_THRESHOLD,
            translator_threshold: DEFAULT_TRANSLATOR_THRESHOLD,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            dataset_path: None,
            provider_max_attempts: 2,
            result_cache_capacity: DEFAULT_RESULT_CACHE_CAPACITY,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}

fn check_threshold(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("{} must be a finite number >= 0, got {}", key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 6] = [
        "LANGUAGE_THRESHOLD",
        "TRANSLATOR_THRESHOLD",
        "LANGUAGE_MEMO_CAPACITY",
        "LANGUAGE_DATASET",
        "PROVIDER_MAX_ATTEMPTS",
        "RESULT_CACHE_CAPACITY",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("Should load defaults");
        assert_eq!(config, Config::default());
        assert_eq!(config.language_threshold, 0.93);
        assert_eq!(config.translator_threshold, 0.90);
        assert_eq!(config.memo_capacity, 512);
        assert_eq!(config.dataset_path, None);
        assert_eq!(config.provider_max_attempts, 2);
        assert_eq!(config.result_cache_capacity, 256);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("LANGUAGE_THRESHOLD", "0.8");
        std::env::set_var("TRANSLATOR_THRESHOLD", " 0.75 ");
        std::env::set_var("LANGUAGE_MEMO_CAPACITY", "64");
        std::env::set_var("LANGUAGE_DATASET", "/tmp/languages.json");
        std::env::set_var("PROVIDER_MAX_ATTEMPTS", "4");
        std::env::set_var("RESULT_CACHE_CAPACITY", "32");

        let config = Config::from_env().expect("Should load overrides");
        clear_env();

        assert_eq!(config.language_threshold, 0.8);
        assert_eq!(config.translator_threshold, 0.75);
        assert_eq!(config.memo_capacity, 64);
        assert_eq!(config.dataset_path.as_deref(), Some("/tmp/languages.json"));
        assert_eq!(config.provider_max_attempts, 4);
        assert_eq!(config.result_cache_capacity, 32);
    }

    #[test]
    #[serial]
    fn test_blank_dataset_path_is_ignored() {
        clear_env();
        std::env::set_var("LANGUAGE_DATASET", "   ");
        let config = Config::from_env().expect("Should load");
        clear_env();
        assert_eq!(config.dataset_path, None);
    }

    // ==================== Validation Tests ====================

    #[test]
    #[serial]
    fn test_rejects_unparsable_threshold() {
        clear_env();
        std::env::set_var("LANGUAGE_THRESHOLD", "high");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("LANGUAGE_THRESHOLD"));
    }

    #[test]
    #[serial]
    fn test_rejects_negative_threshold() {
        clear_env();
        std::env::set_var("TRANSLATOR_THRESHOLD", "-0.1");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("TRANSLATOR_THRESHOLD"));
    }

    #[test]
    #[serial]
    fn test_rejects_non_finite_threshold() {
        clear_env();
        std::env::set_var("LANGUAGE_THRESHOLD", "NaN");
        assert!(Config::from_env().is_err());
        std::env::set_var("LANGUAGE_THRESHOLD", "inf");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_rejects_zero_capacity() {
        clear_env();
        std::env::set_var("LANGUAGE_MEMO_CAPACITY", "0");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("LANGUAGE_MEMO_CAPACITY"));
    }

    #[test]
    #[serial]
    fn test_rejects_zero_result_cache_capacity() {
        clear_env();
        std::env::set_var("RESULT_CACHE_CAPACITY", "0");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("RESULT_CACHE_CAPACITY"));
    }

    #[test]
    fn test_validate_zero_attempts() {
        let config = Config {
            provider_max_attempts: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_above_one_is_allowed() {
        let config = Config {
            language_threshold: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
