//! Service configuration.

use std::time::Duration;

use dilex_fetch::url::SheetsEndpoints;

/// Configuration for [`ExchangeService`](crate::ExchangeService).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Where both exports are fetched from.
    pub endpoints: SheetsEndpoints,
    /// Upper bound on a single source fetch, retries included.
    pub fetch_timeout: Duration,
}

impl ServiceConfig {
    /// Default bound on a single source fetch.
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(45);

    /// Creates a configuration for the published spreadsheets.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoints: SheetsEndpoints::new(api_key),
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets the per-fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::new("key");
        assert_eq!(config.fetch_timeout, Duration::from_secs(45));
        assert_eq!(config.endpoints.api_key, "key");

        let config = config.with_fetch_timeout(Duration::from_secs(5));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    }
}
