//! Result and error types for Esperar.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can occur in Esperar
#[derive(Debug, Error)]
pub enum EsperarError {
    /// A control or page was used before it was fully wired up: missing
    /// locator, or no session bound and no default session registered.
    /// Never retried and never converted to a boolean query result.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is missing and on which object
        message: String,
    },

    /// A control could not be resolved within its implicit wait: either the
    /// element is absent, or it is present but hidden while visibility was
    /// required.
    #[error("Could not find {control} located by {locator} within {ms}ms")]
    ControlNotFound {
        /// Display name of the control (kind plus locator)
        control: String,
        /// String form of the locator
        locator: String,
        /// Implicit wait that was exhausted, in milliseconds
        ms: u64,
    },

    /// An explicit wait operation did not reach the desired state in time
    #[error("Timed out after {ms}ms waiting for {condition}")]
    Timeout {
        /// Description of the awaited condition
        condition: String,
        /// Timeout that was exhausted, in milliseconds
        ms: u64,
    },

    /// The underlying driver reported a failure while evaluating a probe
    #[error("Session error: {message}")]
    Session {
        /// Driver-reported message
        message: String,
    },
}

impl EsperarError {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a session error
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Whether this error is a programming error rather than a runtime race.
    ///
    /// Boolean queries (`exists`, `is_visible`, `is_available`, ...) collapse
    /// every other variant into `false`; configuration errors always stay
    /// visible.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
