//! Condition-wait engine.
//!
//! Everything that tolerates timing variance in this crate goes through
//! [`await_condition`]: a blocking poll loop that re-evaluates a probe until
//! it yields a value or a deadline passes. Probes report "not yet" either as
//! `Ok(None)` or as a transient error; both are retried. Only the deadline
//! surfaces, decorated with the caller's condition description so the
//! failure names what was being waited for.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::result::{EsperarError, EsperarResult};

/// Default polling interval between condition re-evaluations (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Options for wait operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Deadline measured from the first evaluation
    pub timeout: Duration,
    /// Delay between successive evaluations
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Create wait options with the given timeout and the default poll interval
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Poll `probe` until it yields a value or `options.timeout` elapses.
///
/// The probe is evaluated immediately; if it already satisfies, its value is
/// returned without any polling. A zero timeout therefore means exactly one
/// evaluation. Transient probe errors are swallowed and retried. The last
/// satisfying value is what the caller receives, so a successful wait never
/// costs a second lookup.
///
/// # Errors
///
/// Returns [`EsperarError::Timeout`] carrying `condition` once the deadline
/// passes without a satisfying evaluation.
pub fn await_condition<T, F>(
    mut probe: F,
    options: &WaitOptions,
    condition: &str,
) -> EsperarResult<T>
where
    F: FnMut() -> EsperarResult<Option<T>>,
{
    let start = Instant::now();
    loop {
        match probe() {
            Ok(Some(value)) => {
                debug!(
                    condition,
                    elapsed_ms = saturating_millis(start.elapsed()),
                    "condition satisfied"
                );
                return Ok(value);
            }
            Ok(None) => {
                trace!(condition, "condition not yet satisfied");
            }
            Err(err) => {
                // Momentary lookup failures while the UI settles are
                // indistinguishable from "not yet"; retry them.
                trace!(condition, error = %err, "transient probe error, retrying");
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            break;
        }
        let remaining = options.timeout - elapsed;
        std::thread::sleep(options.poll_interval.min(remaining));
    }

    let ms = saturating_millis(options.timeout);
    debug!(condition, timeout_ms = ms, "condition wait timed out");
    Err(EsperarError::Timeout {
        condition: condition.to_string(),
        ms,
    })
}

/// Millisecond count of a duration, saturating at `u64::MAX`
pub(crate) fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Wait for a boolean predicate with the default poll interval.
///
/// # Errors
///
/// Returns [`EsperarError::Timeout`] if the predicate never holds.
pub fn wait_until<F>(predicate: F, timeout: Duration, condition: &str) -> EsperarResult<()>
where
    F: Fn() -> bool,
{
    let options = WaitOptions::new(timeout);
    await_condition(
        || Ok(if predicate() { Some(()) } else { None }),
        &options,
        condition,
    )
}
