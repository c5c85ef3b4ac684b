//! Lazy control abstraction.
//!
//! A [`Control`] is a named, located, possibly-not-yet-rendered piece of UI.
//! It wraps a [`Locator`] and re-resolves its target element on every
//! interaction; a [`ElementHandle`] is never cached across calls, so a
//! control stays valid across DOM rebuilds, re-renders, and AJAX refreshes.
//!
//! Control kinds are a flat tag, not a subtype hierarchy: one concrete
//! `Control` carries a [`ControlKind`] describing its interaction
//! capabilities, and interaction layers dispatch on those capabilities.
//!
//! Failure policy: boolean queries (`exists`, `is_visible`, ...) never fail
//! on timing - a timeout collapses into `false`. Only [`Control::resolve`]
//! raises, and it raises [`EsperarError::ControlNotFound`] naming the control
//! and its locator, never a raw timeout. Missing locator or session is a
//! configuration error from every operation, raised before any polling.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::WaitConfig;
use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult};
use crate::session::{self, ElementHandle, SessionContext};
use crate::wait::{await_condition, WaitOptions};

/// Kind tag for a control, carrying its interaction capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Untyped element
    Generic,
    /// Push button
    Button,
    /// Hyperlink
    Link,
    /// Single- or multi-line text input
    TextField,
    /// Two-state checkbox
    CheckBox,
    /// Drop-down select list
    SelectList,
    /// Read-only text
    Label,
}

impl ControlKind {
    /// Name used in display names and failure messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "Control",
            Self::Button => "Button",
            Self::Link => "Link",
            Self::TextField => "TextField",
            Self::CheckBox => "CheckBox",
            Self::SelectList => "SelectList",
            Self::Label => "Label",
        }
    }

    /// Whether this kind reacts to clicks
    #[must_use]
    pub const fn is_clickable(&self) -> bool {
        matches!(self, Self::Button | Self::Link | Self::CheckBox)
    }

    /// Whether this kind accepts typed text
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::TextField)
    }

    /// Whether this kind holds a checked/unchecked state
    #[must_use]
    pub const fn is_toggleable(&self) -> bool {
        matches!(self, Self::CheckBox)
    }
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reusable handle representing one UI element via a locator.
///
/// Constructed once, typically as a field of a page object, and reused for
/// the lifetime of a test. Carries no per-call mutable state.
pub struct Control {
    kind: ControlKind,
    locator: Option<Locator>,
    session: Option<Arc<dyn SessionContext>>,
    expect_visible: bool,
    implicit_wait: Duration,
    poll_interval: Duration,
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("kind", &self.kind)
            .field("locator", &self.locator)
            .field("expect_visible", &self.expect_visible)
            .field("implicit_wait", &self.implicit_wait)
            .finish_non_exhaustive()
    }
}

impl Control {
    /// Create a control of the given kind
    #[must_use]
    pub fn new(kind: ControlKind, locator: Locator) -> Self {
        let config = WaitConfig::default();
        Self {
            kind,
            locator: Some(locator),
            session: None,
            expect_visible: true,
            implicit_wait: config.implicit_wait,
            poll_interval: config.poll_interval,
        }
    }

    /// Create a generic control
    #[must_use]
    pub fn generic(locator: Locator) -> Self {
        Self::new(ControlKind::Generic, locator)
    }

    /// Create a button control
    #[must_use]
    pub fn button(locator: Locator) -> Self {
        Self::new(ControlKind::Button, locator)
    }

    /// Create a text-field control
    #[must_use]
    pub fn text_field(locator: Locator) -> Self {
        Self::new(ControlKind::TextField, locator)
    }

    /// Create a control whose locator will be supplied later.
    ///
    /// Every wait/query operation on an unlocated control fails with a
    /// configuration error until [`Control::with_locator`] is applied.
    #[must_use]
    pub fn unlocated(kind: ControlKind) -> Self {
        let config = WaitConfig::default();
        Self {
            kind,
            locator: None,
            session: None,
            expect_visible: true,
            implicit_wait: config.implicit_wait,
            poll_interval: config.poll_interval,
        }
    }

    /// Attach a locator
    #[must_use]
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Bind an explicit session instead of the thread's default
    #[must_use]
    pub fn with_session(mut self, session: Arc<dyn SessionContext>) -> Self {
        self.session = Some(session);
        self
    }

    /// Override the implicit wait used by [`Control::resolve`]
    #[must_use]
    pub const fn with_implicit_wait(mut self, timeout: Duration) -> Self {
        self.implicit_wait = timeout;
        self
    }

    /// Take timeout defaults from a shared config
    #[must_use]
    pub const fn with_config(mut self, config: &WaitConfig) -> Self {
        self.implicit_wait = config.implicit_wait;
        self.poll_interval = config.poll_interval;
        self
    }

    /// Accept an element that is present but hidden.
    ///
    /// By default a control must be visible to resolve; this opts into
    /// "presence suffices" semantics.
    #[must_use]
    pub const fn accept_hidden(mut self) -> Self {
        self.expect_visible = false;
        self
    }

    /// Get the kind tag
    #[must_use]
    pub const fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Get the locator, if one is attached
    #[must_use]
    pub const fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Whether this control requires visibility to resolve
    #[must_use]
    pub const fn expects_visible(&self) -> bool {
        self.expect_visible
    }

    /// Get the implicit wait
    #[must_use]
    pub const fn implicit_wait(&self) -> Duration {
        self.implicit_wait
    }

    /// Self-describing name used in every failure message,
    /// e.g. `Button[css=button.primary]`
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.locator {
            Some(locator) => format!("{}[{locator}]", self.kind),
            None => format!("{}[no locator]", self.kind),
        }
    }

    /// Single, non-waiting presence check. Any lookup failure is `false`.
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`] (missing locator or session).
    pub fn exists_now(&self) -> EsperarResult<bool> {
        let locator = self.require_locator()?;
        let session = self.resolve_session()?;
        Ok(matches!(session.find_element(locator), Ok(Some(_))))
    }

    /// Whether the element becomes present within `timeout`.
    ///
    /// Existence probes are never themselves failures: a timeout is `false`.
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn exists(&self, timeout: Duration) -> EsperarResult<bool> {
        let locator = self.require_locator()?.clone();
        let session = self.resolve_session()?;
        let condition = format!("{} to be present", self.display_name());
        as_query(await_condition(
            || session.find_element(&locator),
            &self.wait_options(timeout),
            &condition,
        ))
    }

    /// Single, non-waiting visibility check. Any lookup failure is `false`.
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn is_visible_now(&self) -> EsperarResult<bool> {
        let locator = self.require_locator()?;
        let session = self.resolve_session()?;
        Ok(matches!(
            visible_probe(session.as_ref(), locator),
            Ok(Some(_))
        ))
    }

    /// Whether the element becomes visible within `timeout`
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn is_visible(&self, timeout: Duration) -> EsperarResult<bool> {
        let locator = self.require_locator()?.clone();
        let session = self.resolve_session()?;
        let condition = format!("{} to become visible", self.display_name());
        as_query(await_condition(
            || visible_probe(session.as_ref(), &locator),
            &self.wait_options(timeout),
            &condition,
        ))
    }

    /// Single, non-waiting clickability check: present, visible, and
    /// enabled. Any lookup failure is `false`.
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn is_clickable_now(&self) -> EsperarResult<bool> {
        let locator = self.require_locator()?;
        let session = self.resolve_session()?;
        Ok(matches!(
            clickable_probe(session.as_ref(), locator),
            Ok(Some(_))
        ))
    }

    /// Whether the element becomes clickable (visible and enabled) within
    /// `timeout`
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn is_clickable(&self, timeout: Duration) -> EsperarResult<bool> {
        let locator = self.require_locator()?.clone();
        let session = self.resolve_session()?;
        let condition = format!("{} to become clickable", self.display_name());
        as_query(await_condition(
            || clickable_probe(session.as_ref(), &locator),
            &self.wait_options(timeout),
            &condition,
        ))
    }

    /// Whether the element becomes invisible (or absent) within `timeout`
    ///
    /// # Errors
    ///
    /// Only [`EsperarError::Configuration`].
    pub fn is_not_visible(&self, timeout: Duration) -> EsperarResult<bool> {
        let locator = self.require_locator()?.clone();
        let session = self.resolve_session()?;
        let condition = format!("{} to disappear", self.display_name());
        as_query(await_condition(
            || gone_probe(session.as_ref(), &locator),
            &self.wait_options(timeout),
            &condition,
        ))
    }

    /// Resolve to a live element handle, polling up to the implicit wait.
    ///
    /// The primary accessor behind every interaction. The handle is valid
    /// for immediate use only; the next interaction resolves again. When the
    /// control expects visibility, a present-but-hidden element does not
    /// satisfy the wait - "not present" and "present but hidden" both end in
    /// the same `ControlNotFound`, so call sites need a single failure
    /// branch for "you cannot interact with this".
    ///
    /// # Errors
    ///
    /// [`EsperarError::Configuration`] for a missing locator or session;
    /// [`EsperarError::ControlNotFound`] when the implicit wait is exhausted.
    pub fn resolve(&self) -> EsperarResult<ElementHandle> {
        let locator = self.require_locator()?.clone();
        let session = self.resolve_session()?;
        let condition = format!(
            "{} to become {}",
            self.display_name(),
            if self.expect_visible { "visible" } else { "present" }
        );

        let outcome = await_condition(
            || {
                if self.expect_visible {
                    visible_probe(session.as_ref(), &locator)
                } else {
                    session.find_element(&locator)
                }
            },
            &self.wait_options(self.implicit_wait),
            &condition,
        );

        match outcome {
            Ok(handle) => Ok(handle),
            Err(EsperarError::Timeout { ms, .. }) => {
                debug!(control = %self.display_name(), "control did not resolve");
                Err(EsperarError::ControlNotFound {
                    control: self.display_name(),
                    locator: locator.to_string(),
                    ms,
                })
            }
            Err(other) => Err(other),
        }
    }

    fn require_locator(&self) -> EsperarResult<&Locator> {
        self.locator.as_ref().ok_or_else(|| {
            EsperarError::configuration(format!("{} has no locator", self.display_name()))
        })
    }

    fn resolve_session(&self) -> EsperarResult<Arc<dyn SessionContext>> {
        match &self.session {
            Some(session) => Ok(Arc::clone(session)),
            None => session::current(),
        }
    }

    const fn wait_options(&self, timeout: Duration) -> WaitOptions {
        WaitOptions::new(timeout).with_poll_interval(self.poll_interval)
    }
}

/// Probe that satisfies when the element is present and displayed
fn visible_probe(
    session: &dyn SessionContext,
    locator: &Locator,
) -> EsperarResult<Option<ElementHandle>> {
    match session.find_element(locator)? {
        Some(handle) => {
            if session.is_displayed(&handle)? {
                Ok(Some(handle))
            } else {
                Ok(None)
            }
        }
        None => Ok(None),
    }
}

/// Probe that satisfies when the element is visible and enabled
fn clickable_probe(
    session: &dyn SessionContext,
    locator: &Locator,
) -> EsperarResult<Option<ElementHandle>> {
    match visible_probe(session, locator)? {
        Some(handle) => {
            if session.is_enabled(&handle)? {
                Ok(Some(handle))
            } else {
                Ok(None)
            }
        }
        None => Ok(None),
    }
}

/// Probe that satisfies when the element is absent or hidden
fn gone_probe(session: &dyn SessionContext, locator: &Locator) -> EsperarResult<Option<()>> {
    match session.find_element(locator)? {
        Some(handle) => {
            if session.is_displayed(&handle)? {
                Ok(None)
            } else {
                Ok(Some(()))
            }
        }
        None => Ok(Some(())),
    }
}

/// Collapse a wait outcome into the boolean-query policy: success is `true`,
/// timing failures are `false`, configuration errors stay visible.
fn as_query<T>(outcome: EsperarResult<T>) -> EsperarResult<bool> {
    match outcome {
        Ok(_) => Ok(true),
        Err(err) if err.is_configuration() => Err(err),
        Err(_) => Ok(false),
    }
}
