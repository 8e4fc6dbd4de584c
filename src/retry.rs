use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one)
    pub max_attempts: u32,
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (e.g., 2.0 doubles the delay each time)
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    /// Set the maximum number of attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the maximum delay between retries
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: one translation service call (2 attempts)
    /// Delays: 250ms before the second attempt
    pub fn provider_call() -> Self {
        Self::new(2, Duration::from_millis(250))
            .with_max_delay(Duration::from_secs(2))
            .with_backoff_multiplier(2.0)
    }

    /// Calculate the delay for a given attempt number (0-indexed)
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::provider_call()
    }
}

/// Execute an async operation with retries, using a predicate to determine if retry is appropriate
///
/// Errors rejected by `should_retry` are returned immediately. A config with
/// `max_attempts == 0` still makes one attempt.
///
/// # Returns
/// The result of the operation, or the last error if all retries failed
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        // Wait before retry (except for first attempt)
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                max_attempts,
                delay
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if !should_retry(&e) {
                    debug!(
                        "{}: Error is not retryable, failing immediately: {}",
                        operation_name, e
                    );
                    return Err(e);
                }

                let remaining = max_attempts - attempt - 1;
                if remaining == 0 {
                    warn!(
                        "{}: All {} attempts failed. Last error: {}",
                        operation_name, max_attempts, e
                    );
                    return Err(e);
                }
                warn!(
                    "{}: Attempt {}/{} failed ({}), {} retries remaining",
                    operation_name,
                    attempt + 1,
                    max_attempts,
                    e,
                    remaining
                );
            }
        }

        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.initial_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_retry_config_provider_call_complete() {
        let config = RetryConfig::provider_call();

        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.max_delay, Duration::from_secs(2));
        assert!((config.backoff_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retry_config_builder_pattern() {
        let config = RetryConfig::new(2, Duration::from_millis(50))
            .with_max_attempts(5)
            .with_max_delay(Duration::from_secs(10))
            .with_backoff_multiplier(1.5);

        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.initial_delay, Duration::from_millis(50));
        assert_eq!(config.max_delay, Duration::from_secs(10));
        assert!((config.backoff_multiplier - 1.5).abs() < f64::EPSILON);
    }

    // ==================== Delay Calculation Tests ====================

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig::new(4, Duration::from_secs(1)).with_backoff_multiplier(2.0);

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(4));
    }

    #[test]
    fn test_delay_max_capping() {
        let config = RetryConfig::new(10, Duration::from_secs(2))
            .with_max_delay(Duration::from_secs(5))
            .with_backoff_multiplier(2.0);

        // attempt 1: 2s, attempt 2: 4s, attempt 3: 8s (capped to 5s)
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(5));
        assert_eq!(config.delay_for_attempt(9), Duration::from_secs(5));
    }

    #[test]
    fn test_delay_calculation_provider_preset() {
        let config = RetryConfig::provider_call();

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(500));
    }

    // ==================== with_retry_if Tests ====================

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let config = RetryConfig::new(3, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<u32, ProviderError> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                }
            },
            ProviderError::is_retryable,
        )
        .await;

        assert_eq!(result.expect("Should succeed"), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_retryable_failures() {
        let config = RetryConfig::new(3, Duration::from_millis(5));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<&str, ProviderError> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    if attempt < 2 {
                        Err(ProviderError::RateLimited)
                    } else {
                        Ok("bonjour")
                    }
                }
            },
            ProviderError::is_retryable,
        )
        .await;

        assert_eq!(result.expect("Should succeed"), "bonjour");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let config = RetryConfig::new(5, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), ProviderError> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(ProviderError::Service {
                        status: 400,
                        message: "bad request".to_string(),
                    })
                }
            },
            ProviderError::is_retryable,
        )
        .await;

        assert!(matches!(result, Err(ProviderError::Service { status: 400, .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retryable_then_non_retryable() {
        let config = RetryConfig::new(5, Duration::from_millis(5));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), ProviderError> = with_retry_if(
            &config,
            "test",
            || {
                let c = counter_clone.clone();
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    match attempt {
                        0 => Err(ProviderError::Network("reset".to_string())),
                        _ => Err(ProviderError::UnsupportedLanguage("tlh".to_string())),
                    }
                }
            },
            ProviderError::is_retryable,
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            ProviderError::UnsupportedLanguage("tlh".to_string())
        );
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhausts_attempts_and_returns_last_error() {
        let config = RetryConfig::new(3, Duration::from_millis(5));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), String> = with_retry_if(
            &config,
            "error_test",
            || {
                let c = counter_clone.clone();
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    Err(format!("error on attempt {}", attempt + 1))
                }
            },
            |_: &String| true,
        )
        .await;

        assert_eq!(result.unwrap_err(), "error on attempt 3");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let config = RetryConfig::new(0, Duration::from_millis(100));
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: Result<(), &str> = with_retry_if(
            &config,
            "zero_attempts",
            || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("failure")
                }
            },
            |_: &&str| true,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    // ==================== Timing Verification Tests ====================

    #[tokio::test]
    async fn test_exponential_backoff_timing() {
        let config = RetryConfig::new(3, Duration::from_millis(50)).with_backoff_multiplier(2.0);

        let start = std::time::Instant::now();

        let _result: Result<(), &str> =
            with_retry_if(&config, "timing_test", || async { Err("always fails") }, |_| true).await;

        let elapsed = start.elapsed();

        // Should have waited: 0ms + 50ms + 100ms = 150ms minimum
        assert!(
            elapsed >= Duration::from_millis(100),
            "Expected at least 100ms delay, got {:?}",
            elapsed
        );
        assert!(
            elapsed < Duration::from_millis(1000),
            "Expected less than 1s total, got {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_no_delay_on_immediate_success() {
        let config = RetryConfig::new(3, Duration::from_secs(10));

        let start = std::time::Instant::now();

        let result: Result<i32, &str> =
            with_retry_if(&config, "immediate_success", || async { Ok(42) }, |_| true).await;

        assert!(result.is_ok());
        assert!(
            start.elapsed() < Duration::from_millis(100),
            "Expected quick completion, got {:?}",
            start.elapsed()
        );
    }
}
