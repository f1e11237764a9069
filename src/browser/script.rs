//! JavaScript snippets with arguments.
//!
//! The script body runs as a function; arguments are available through
//! `arguments[i]`. Elements passed as arguments arrive in the page as the
//! DOM nodes they reference.
//!
//! # Example
//!
//! ```ignore
//! use remote_webdriver::Script;
//!
//! let script = Script::new("arguments[0].scrollIntoView(); return arguments[1];")
//!     .element(&button)
//!     .arg(42);
//!
//! let value = window.execute(script).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::protocol::element_argument;

use super::Element;

/// A script and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    source: String,
    args: Vec<Value>,
}

impl Script {
    /// Creates a script without arguments.
    #[inline]
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            args: Vec::new(),
        }
    }

    /// Appends a JSON argument.
    #[inline]
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Appends an element reference. The element must live in the window
    /// the script runs in.
    #[inline]
    #[must_use]
    pub fn element(mut self, element: &Element) -> Self {
        self.args.push(element_argument(element.id()));
        self
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Value>) {
        (self.source, self.args)
    }
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Script {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
