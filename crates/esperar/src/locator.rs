//! Locator abstraction: declarative descriptors for finding UI elements.
//!
//! A [`Locator`] says *how* to find an element, never *which* element was
//! found. Controls keep a locator and re-run it on every interaction, so a
//! locator must stay valid across DOM rebuilds. Two locators are equal iff
//! their strategy and value match.

use serde::{Deserialize, Serialize};

/// Strategy for locating an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Element `id` attribute
    Id,
    /// Element `name` attribute
    Name,
    /// CSS selector expression
    Css,
    /// XPath expression
    XPath,
    /// Visible text content
    Text,
    /// `data-testid` attribute
    TestId,
}

impl Strategy {
    /// Short name used in the string form of a locator
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::Text => "text",
            Self::TestId => "testid",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declarative, comparable descriptor of how to find one element.
///
/// Immutable once attached to a control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Create a locator with an explicit strategy
    #[must_use]
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// Locate by element id
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    /// Locate by element name attribute
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Strategy::Name, value)
    }

    /// Locate by CSS selector
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    /// Locate by XPath expression
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    /// Locate by visible text content
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Strategy::Text, value)
    }

    /// Locate by `data-testid` attribute
    #[must_use]
    pub fn test_id(value: impl Into<String>) -> Self {
        Self::new(Strategy::TestId, value)
    }

    /// Get the strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the selector value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Human-readable description used in failure messages
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}={}", self.strategy, self.value)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}
