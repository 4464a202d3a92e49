//! Configuration for the inference HTTP client.

use std::time::Duration;

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retry attempts for retryable errors.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay between retry attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Configuration for the inference HTTP client.
#[derive(Debug, Clone)]
pub struct MlClientConfig {
    /// Default timeout for HTTP requests.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: String,
    /// Maximum number of retry attempts for retryable errors.
    pub max_retries: u32,
    /// Base delay for the linear retry backoff.
    pub retry_backoff: Duration,
}

impl Default for MlClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl MlClientConfig {
    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("argus/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Creates a new configuration with the specified timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new configuration with the specified user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Creates a new configuration with the specified retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Creates a new configuration with the specified retry backoff.
    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        if self.user_agent.is_empty() {
            Self::default_user_agent()
        } else {
            self.user_agent.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MlClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_backoff, Duration::from_millis(500));
        assert!(config.user_agent.contains("argus"));
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = MlClientConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.effective_timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_empty() {
        let config = MlClientConfig {
            user_agent: String::new(),
            ..Default::default()
        };
        assert!(config.effective_user_agent().contains("argus"));
    }

    #[test]
    fn test_builder_setters() {
        let config = MlClientConfig::default()
            .with_timeout(Duration::from_secs(60))
            .with_max_retries(0)
            .with_user_agent("photo-indexer/2.1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.user_agent, "photo-indexer/2.1");
    }
}
