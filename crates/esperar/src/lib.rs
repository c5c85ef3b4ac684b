//! Esperar: lazy UI controls, page objects, and a condition-wait engine
//! for browser test automation.
//!
//! Esperar (Spanish: "to wait") gives test authors named, reusable objects
//! representing pieces of a web page, and hides the mechanics of locating
//! elements, tolerating timing variance, and producing diagnosable failures.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    ESPERAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌──────────────────┐     │
//! │   │ Page /     │───►│ Condition  │───►│ SessionContext   │     │
//! │   │ Control    │    │ Wait Engine│    │ (browser driver) │     │
//! │   └────────────┘    └────────────┘    └──────────────────┘     │
//! │        │                                       ▲                │
//! │        └── Locator (re-resolved every call) ───┘                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A test calls a [`Page`] or [`Control`] operation; the operation asks the
//! wait engine to poll the session through a locator-derived probe. On
//! success the caller gets a live [`ElementHandle`] for immediate use; on
//! timeout it gets a failure naming the control or page and the condition
//! that was being awaited.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use esperar::{Control, Locator, Page};
//!
//! # fn demo() -> esperar::EsperarResult<()> {
//! let login = Page::new("Login", Locator::id("login-form"));
//! let username = Control::text_field(Locator::id("username"));
//! let submit = Control::button(Locator::css("button[type=submit]"));
//!
//! login.wait_until_loaded()?;
//! let field = username.resolve()?;
//! assert!(submit.is_visible(Duration::from_secs(3))?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Library-wide timeout defaults
pub mod config;

/// Lazy control abstraction: existence/visibility queries and resolution
pub mod control;

/// Declarative element locators
pub mod locator;

/// Page abstraction: availability derived from one indicating control
pub mod page;

/// Result and error types
pub mod result;

/// Session capability surface and the thread-scoped default-session registry
pub mod session;

/// Condition-wait engine
pub mod wait;

pub use config::WaitConfig;
pub use control::{Control, ControlKind};
pub use locator::{Locator, Strategy};
pub use page::Page;
pub use result::{EsperarError, EsperarResult};
pub use session::{ElementHandle, SessionContext};
pub use wait::{await_condition, wait_until, WaitOptions};

/// The working set, for glob imports in test suites
pub mod prelude {
    pub use crate::config::WaitConfig;
    pub use crate::control::{Control, ControlKind};
    pub use crate::locator::{Locator, Strategy};
    pub use crate::page::Page;
    pub use crate::result::{EsperarError, EsperarResult};
    pub use crate::session::{self, ElementHandle, SessionContext};
    pub use crate::wait::{await_condition, wait_until, WaitOptions};
}
