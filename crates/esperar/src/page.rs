//! Page abstraction.
//!
//! A [`Page`] composes controls and derives its whole "availability" from
//! one designated indicating control: the page is available exactly when
//! the element at its indicating locator is visible. A page has no state of
//! its own beyond configuration.
//!
//! `wait_until_*` operations return `&self` so a test can confirm readiness
//! and keep chaining:
//!
//! ```ignore
//! dashboard.wait_until_loaded()?.header.resolve()?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::WaitConfig;
use crate::control::{Control, ControlKind};
use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult};
use crate::session::SessionContext;

/// A composite of controls whose availability is the visibility of one
/// indicating control.
pub struct Page {
    name: String,
    indicating_locator: Option<Locator>,
    session: Option<Arc<dyn SessionContext>>,
    loading_timeout: Duration,
    closing_timeout: Duration,
    poll_interval: Duration,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.name)
            .field("indicating_locator", &self.indicating_locator)
            .field("loading_timeout", &self.loading_timeout)
            .field("closing_timeout", &self.closing_timeout)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Create a page with its indicating locator
    #[must_use]
    pub fn new(name: impl Into<String>, indicating_locator: Locator) -> Self {
        Self::named(name).with_indicator(indicating_locator)
    }

    /// Create a page whose indicating locator will be supplied later.
    ///
    /// Every availability/wait operation fails with a configuration error
    /// until [`Page::with_indicator`] is applied.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let config = WaitConfig::default();
        Self {
            name: name.into(),
            indicating_locator: None,
            session: None,
            loading_timeout: config.page_loading_timeout,
            closing_timeout: config.closing_timeout,
            poll_interval: config.poll_interval,
        }
    }

    /// Set the indicating locator
    #[must_use]
    pub fn with_indicator(mut self, locator: Locator) -> Self {
        self.indicating_locator = Some(locator);
        self
    }

    /// Bind an explicit session instead of the thread's default
    #[must_use]
    pub fn with_session(mut self, session: Arc<dyn SessionContext>) -> Self {
        self.session = Some(session);
        self
    }

    /// Override the loading timeout
    #[must_use]
    pub const fn with_loading_timeout(mut self, timeout: Duration) -> Self {
        self.loading_timeout = timeout;
        self
    }

    /// Override the closing timeout
    #[must_use]
    pub const fn with_closing_timeout(mut self, timeout: Duration) -> Self {
        self.closing_timeout = timeout;
        self
    }

    /// Take timeout defaults from a shared config
    #[must_use]
    pub const fn with_config(mut self, config: &WaitConfig) -> Self {
        self.loading_timeout = config.page_loading_timeout;
        self.closing_timeout = config.closing_timeout;
        self.poll_interval = config.poll_interval;
        self
    }

    /// Get the page name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the indicating locator, if one is set
    #[must_use]
    pub const fn indicating_locator(&self) -> Option<&Locator> {
        self.indicating_locator.as_ref()
    }

    /// Get the loading timeout
    #[must_use]
    pub const fn loading_timeout(&self) -> Duration {
        self.loading_timeout
    }

    /// Get the closing timeout
    #[must_use]
    pub const fn closing_timeout(&self) -> Duration {
        self.closing_timeout
    }

    /// Whether the indicating control becomes visible within `timeout`.
    /// A timeout is `false`, not an error.
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`] (missing indicating locator or
    /// session).
    pub fn is_available(&self, timeout: Duration) -> EsperarResult<bool> {
        self.indicator()?.is_visible(timeout)
    }

    /// Whether the indicating control becomes invisible within `timeout`
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn is_not_available(&self, timeout: Duration) -> EsperarResult<bool> {
        self.indicator()?.is_not_visible(timeout)
    }

    /// Wait until the page is available, surfacing failure instead of
    /// swallowing it. Returns the page for chaining.
    ///
    /// # Errors
    ///
    /// [`EsperarError::Configuration`] or [`EsperarError::Timeout`] naming
    /// the page and the awaited condition.
    pub fn wait_until_available(&self, timeout: Duration) -> EsperarResult<&Self> {
        if self.is_available(timeout)? {
            debug!(page = %self.name, "page available");
            Ok(self)
        } else {
            Err(self.timeout_error("to become available", timeout))
        }
    }

    /// Wait until the page is gone, for confirming a page or dialog closed
    ///
    /// # Errors
    ///
    /// [`EsperarError::Configuration`] or [`EsperarError::Timeout`].
    pub fn wait_until_not_available(&self, timeout: Duration) -> EsperarResult<&Self> {
        if self.is_not_available(timeout)? {
            debug!(page = %self.name, "page closed");
            Ok(self)
        } else {
            Err(self.timeout_error("to close", timeout))
        }
    }

    /// [`Page::wait_until_available`] with this page's loading timeout
    ///
    /// # Errors
    ///
    /// [`EsperarError::Configuration`] or [`EsperarError::Timeout`].
    pub fn wait_until_loaded(&self) -> EsperarResult<&Self> {
        self.wait_until_available(self.loading_timeout)
    }

    /// [`Page::wait_until_not_available`] with this page's closing timeout
    ///
    /// # Errors
    ///
    /// [`EsperarError::Configuration`] or [`EsperarError::Timeout`].
    pub fn wait_until_closed(&self) -> EsperarResult<&Self> {
        self.wait_until_not_available(self.closing_timeout)
    }

    /// Build the indicating control for one availability check.
    ///
    /// Constructed fresh per call; the page itself never holds element state.
    fn indicator(&self) -> EsperarResult<Control> {
        let locator = self.indicating_locator.clone().ok_or_else(|| {
            EsperarError::configuration(format!(
                "page '{}' has no indicating locator",
                self.name
            ))
        })?;
        let mut control = Control::new(ControlKind::Generic, locator).with_config(
            &WaitConfig::new().with_poll_interval(self.poll_interval),
        );
        if let Some(session) = &self.session {
            control = control.with_session(Arc::clone(session));
        }
        Ok(control)
    }

    fn timeout_error(&self, what: &str, timeout: Duration) -> EsperarError {
        EsperarError::Timeout {
            condition: format!("page '{}' {what}", self.name),
            ms: crate::wait::saturating_millis(timeout),
        }
    }
}
