//! Session context: the capability surface a browser driver must provide,
//! plus the thread-scoped default-session registry.
//!
//! Esperar never launches or owns a browser. Any driver that can find an
//! element by [`Locator`] and answer visibility/enabled queries satisfies
//! [`SessionContext`]; controls and pages consume it behind an
//! `Arc<dyn SessionContext>`.
//!
//! The registry gives each thread its own "current session" slot so that
//! controls constructed without an explicit session still resolve one at
//! call time, and parallel test runners on separate threads do not
//! interfere.

use std::cell::RefCell;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult};

/// Transient handle to a live UI element.
///
/// Valid only for the duration of the call that obtained it. Controls never
/// store one across method calls; every interaction re-resolves through the
/// locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned identifier for the element
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Element text content, if the driver reports it
    pub text_content: Option<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
        }
    }

    /// Attach text content reported by the driver
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }
}

/// Capability surface consumed by controls, pages, and the wait engine.
///
/// `find_element` distinguishes "not found" (`Ok(None)`) from a driver
/// failure (`Err`); probes treat both as "not yet" while polling.
pub trait SessionContext: Send + Sync {
    /// Search the current UI state for one element matching the locator
    fn find_element(&self, locator: &Locator) -> EsperarResult<Option<ElementHandle>>;

    /// Whether the element is currently rendered visibly
    fn is_displayed(&self, element: &ElementHandle) -> EsperarResult<bool>;

    /// Whether the element is currently enabled for interaction
    fn is_enabled(&self, element: &ElementHandle) -> EsperarResult<bool>;
}

thread_local! {
    static CURRENT: RefCell<Option<Arc<dyn SessionContext>>> = const { RefCell::new(None) };
}

/// Register the calling thread's default session.
///
/// Controls and pages constructed without an explicit session resolve this
/// one at call time.
pub fn set_current(session: Arc<dyn SessionContext>) {
    CURRENT.with(|slot| {
        *slot.borrow_mut() = Some(session);
    });
}

/// Get the calling thread's default session.
///
/// # Errors
///
/// Returns [`EsperarError::Configuration`] when no session has been
/// registered on this thread.
pub fn current() -> EsperarResult<Arc<dyn SessionContext>> {
    CURRENT.with(|slot| {
        slot.borrow().clone().ok_or_else(|| {
            EsperarError::configuration(
                "no session bound and no default session registered on this thread",
            )
        })
    })
}

/// Clear the calling thread's default session
pub fn clear_current() {
    CURRENT.with(|slot| {
        *slot.borrow_mut() = None;
    });
}

/// Run `f` with `session` as the thread's default, restoring the previous
/// default afterwards, including on panic.
pub fn with_session<R>(session: Arc<dyn SessionContext>, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT.with(|slot| slot.borrow_mut().replace(session));
    let _guard = RestoreGuard { previous };
    f()
}

struct RestoreGuard {
    previous: Option<Arc<dyn SessionContext>>,
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| {
            *slot.borrow_mut() = previous;
        });
    }
}

/// Scripted in-memory session used by unit tests across the crate.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::{ElementHandle, SessionContext};
    use crate::locator::Locator;
    use crate::result::{EsperarError, EsperarResult};

    /// One scripted element in the fake DOM
    #[derive(Debug, Clone)]
    pub struct FakeElement {
        pub id: String,
        pub tag_name: String,
        pub displayed: bool,
        pub enabled: bool,
    }

    impl FakeElement {
        pub fn visible(id: &str) -> Self {
            Self {
                id: id.to_string(),
                tag_name: "div".to_string(),
                displayed: true,
                enabled: true,
            }
        }

        pub fn hidden(id: &str) -> Self {
            Self {
                displayed: false,
                ..Self::visible(id)
            }
        }
    }

    /// In-memory [`SessionContext`] whose DOM can be mutated mid-test.
    ///
    /// `find_calls` counts every `find_element` invocation so tests can
    /// assert "exactly one evaluation" properties. `fail_finds` injects that
    /// many transient driver errors before lookups succeed again.
    #[derive(Default)]
    pub struct FakeSession {
        elements: Mutex<HashMap<Locator, FakeElement>>,
        find_calls: AtomicUsize,
        fail_finds: AtomicUsize,
    }

    impl FakeSession {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, locator: Locator, element: FakeElement) {
            self.elements.lock().unwrap().insert(locator, element);
        }

        pub fn remove(&self, locator: &Locator) {
            self.elements.lock().unwrap().remove(locator);
        }

        pub fn set_displayed(&self, locator: &Locator, displayed: bool) {
            if let Some(element) = self.elements.lock().unwrap().get_mut(locator) {
                element.displayed = displayed;
            }
        }

        pub fn set_enabled(&self, locator: &Locator, enabled: bool) {
            if let Some(element) = self.elements.lock().unwrap().get_mut(locator) {
                element.enabled = enabled;
            }
        }

        pub fn find_calls(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }

        pub fn fail_next_finds(&self, count: usize) {
            self.fail_finds.store(count, Ordering::SeqCst);
        }
    }

    impl SessionContext for FakeSession {
        fn find_element(&self, locator: &Locator) -> EsperarResult<Option<ElementHandle>> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            if self
                .fail_finds
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(EsperarError::session("transient driver failure"));
            }
            let elements = self.elements.lock().unwrap();
            Ok(elements
                .get(locator)
                .map(|e| ElementHandle::new(e.id.clone(), e.tag_name.clone())))
        }

        fn is_displayed(&self, element: &ElementHandle) -> EsperarResult<bool> {
            let elements = self.elements.lock().unwrap();
            elements
                .values()
                .find(|e| e.id == element.id)
                .map(|e| e.displayed)
                .ok_or_else(|| EsperarError::session("stale element handle"))
        }

        fn is_enabled(&self, element: &ElementHandle) -> EsperarResult<bool> {
            let elements = self.elements.lock().unwrap();
            elements
                .values()
                .find(|e| e.id == element.id)
                .map(|e| e.enabled)
                .ok_or_else(|| EsperarError::session("stale element handle"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::fake::{FakeElement, FakeSession};
    use super::*;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_new() {
            let handle = ElementHandle::new("el-1", "button");
            assert_eq!(handle.id, "el-1");
            assert_eq!(handle.tag_name, "button");
            assert!(handle.text_content.is_none());
        }

        #[test]
        fn test_with_text() {
            let handle = ElementHandle::new("el-1", "span").with_text("Score: 10");
            assert_eq!(handle.text_content.as_deref(), Some("Score: 10"));
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_current_without_registration_is_configuration_error() {
            clear_current();
            // The Ok side is a trait object without Debug, so destructure
            // instead of unwrap_err
            let Err(err) = current() else {
                panic!("expected a configuration error");
            };
            assert!(err.is_configuration());
        }

        #[test]
        fn test_set_and_clear() {
            let session: Arc<dyn SessionContext> = Arc::new(FakeSession::new());
            set_current(session);
            assert!(current().is_ok());
            clear_current();
            assert!(current().is_err());
        }

        #[test]
        fn test_with_session_restores_previous() {
            clear_current();
            let outer: Arc<dyn SessionContext> = Arc::new(FakeSession::new());
            set_current(Arc::clone(&outer));

            let inner: Arc<dyn SessionContext> = Arc::new(FakeSession::new());
            with_session(inner, || {
                assert!(current().is_ok());
            });

            // Outer session is back after the scope ends
            assert!(current().is_ok());
            clear_current();
        }

        #[test]
        fn test_with_session_restores_on_panic() {
            clear_current();
            let session: Arc<dyn SessionContext> = Arc::new(FakeSession::new());
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                with_session(session, || panic!("boom"));
            }));
            assert!(result.is_err());
            assert!(current().is_err());
        }

        #[test]
        fn test_registry_is_thread_scoped() {
            clear_current();
            let session: Arc<dyn SessionContext> = Arc::new(FakeSession::new());
            set_current(session);

            let handle = std::thread::spawn(|| current().is_err());
            assert!(handle.join().unwrap());
            clear_current();
        }
    }

    mod fake_session_tests {
        use super::*;
        use crate::locator::Locator;

        #[test]
        fn test_find_and_display_state() {
            let session = FakeSession::new();
            session.insert(Locator::id("username"), FakeElement::hidden("el-1"));

            let handle = session
                .find_element(&Locator::id("username"))
                .unwrap()
                .unwrap();
            assert!(!session.is_displayed(&handle).unwrap());

            session.set_displayed(&Locator::id("username"), true);
            assert!(session.is_displayed(&handle).unwrap());
        }

        #[test]
        fn test_injected_transient_failures() {
            let session = FakeSession::new();
            session.insert(Locator::id("x"), FakeElement::visible("el-1"));
            session.fail_next_finds(2);

            assert!(session.find_element(&Locator::id("x")).is_err());
            assert!(session.find_element(&Locator::id("x")).is_err());
            assert!(session.find_element(&Locator::id("x")).unwrap().is_some());
            assert_eq!(session.find_calls(), 3);
        }
    }
}
