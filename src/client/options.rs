//! Client configuration.

use crate::error::{NotifyError, NotifyResult};
use std::time::Duration;

/// Options for building a [`NotificationClient`](super::NotificationClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Base URL of the service, without the `/v2` prefix
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl ClientOptions {
    /// Production base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://api.notifications.service.gov.uk";

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Both timeouts must be non-zero; a zero timeout fails every request
    pub fn validate(&self) -> NotifyResult<()> {
        if self.timeout.is_zero() {
            return Err(NotifyError::configuration("timeout must be greater than zero"));
        }
        if self.connect_timeout.is_zero() {
            return Err(NotifyError::configuration(
                "connect_timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, ClientOptions::DEFAULT_BASE_URL);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_options_builder() {
        let options = ClientOptions::new("http://localhost:6011")
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(1));
        assert_eq!(options.base_url, "http://localhost:6011");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.connect_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        assert!(ClientOptions::default().validate().is_ok());

        let err = ClientOptions::default()
            .timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("timeout must be greater than zero"));

        let err = ClientOptions::default()
            .connect_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("connect_timeout"));
    }
}
