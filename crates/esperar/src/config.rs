//! Library-wide timeout defaults.
//!
//! Controls and pages snapshot these values at construction; per-instance
//! overrides always win. A shared [`WaitConfig`] lets a test suite tune all
//! four knobs in one place and hand them to every page object it builds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wait::DEFAULT_POLL_INTERVAL_MS;

/// Default implicit wait while resolving a control (3 seconds)
pub const DEFAULT_IMPLICIT_WAIT_MS: u64 = 3_000;

/// Default wait for a page to become available (30 seconds)
pub const DEFAULT_PAGE_LOADING_TIMEOUT_MS: u64 = 30_000;

/// Default wait for a page or dialog to close (3 seconds)
pub const DEFAULT_CLOSING_TIMEOUT_MS: u64 = 3_000;

/// Overridable timeout defaults for controls and pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// How long [`Control::resolve`](crate::control::Control::resolve) polls
    /// before giving up
    pub implicit_wait: Duration,
    /// How long a page is given to become available
    pub page_loading_timeout: Duration,
    /// How long a page is given to close
    pub closing_timeout: Duration,
    /// Delay between condition re-evaluations
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            implicit_wait: Duration::from_millis(DEFAULT_IMPLICIT_WAIT_MS),
            page_loading_timeout: Duration::from_millis(DEFAULT_PAGE_LOADING_TIMEOUT_MS),
            closing_timeout: Duration::from_millis(DEFAULT_CLOSING_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WaitConfig {
    /// Create a config with library defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the implicit wait
    #[must_use]
    pub const fn with_implicit_wait(mut self, timeout: Duration) -> Self {
        self.implicit_wait = timeout;
        self
    }

    /// Set the page loading timeout
    #[must_use]
    pub const fn with_page_loading_timeout(mut self, timeout: Duration) -> Self {
        self.page_loading_timeout = timeout;
        self
    }

    /// Set the closing timeout
    #[must_use]
    pub const fn with_closing_timeout(mut self, timeout: Duration) -> Self {
        self.closing_timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_library_defaults() {
        let config = WaitConfig::default();
        assert_eq!(config.implicit_wait, Duration::from_secs(3));
        assert_eq!(config.page_loading_timeout, Duration::from_secs(30));
        assert_eq!(config.closing_timeout, Duration::from_secs(3));
        assert_eq!(config.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_overrides() {
        let config = WaitConfig::new()
            .with_implicit_wait(Duration::from_secs(10))
            .with_page_loading_timeout(Duration::from_secs(60))
            .with_closing_timeout(Duration::from_secs(1))
            .with_poll_interval(Duration::from_millis(50));
        assert_eq!(config.implicit_wait, Duration::from_secs(10));
        assert_eq!(config.page_loading_timeout, Duration::from_secs(60));
        assert_eq!(config.closing_timeout, Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }
}
