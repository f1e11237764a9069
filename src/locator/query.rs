//! Wire-ready locators.
//!
//! A [`Query`] is the `{"using": ..., "value": ...}` object the find
//! endpoints accept. Callers never build one by hand: it comes out of the
//! compiler (see [`LocatorExpression::compile`]), so every query that
//! reaches the wire uses exactly one legal strategy.
//!
//! [`LocatorExpression::compile`]: super::LocatorExpression::compile

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::error::Result;

use super::LocatorExpression;

// ============================================================================
// Strategy
// ============================================================================

/// Locator strategies defined by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// CSS selector.
    #[serde(rename = "css selector")]
    Css,
    /// XPath 1.0 expression.
    #[serde(rename = "xpath")]
    XPath,
    /// Exact visible text of an `<a>` element.
    #[serde(rename = "link text")]
    LinkText,
    /// Substring of the visible text of an `<a>` element.
    #[serde(rename = "partial link text")]
    PartialLinkText,
    /// Element tag name.
    #[serde(rename = "tag name")]
    TagName,
}

impl Strategy {
    /// Returns the strategy name for the protocol.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css selector",
            Self::XPath => "xpath",
            Self::LinkText => "link text",
            Self::PartialLinkText => "partial link text",
            Self::TagName => "tag name",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Query
// ============================================================================

/// A compiled locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query {
    #[serde(rename = "using")]
    strategy: Strategy,
    value: String,
}

impl Query {
    #[inline]
    pub(crate) fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    #[inline]
    pub(crate) fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    #[inline]
    pub(crate) fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    /// Anchors every `//` location path of an XPath query at the context
    /// node, so the element-scoped endpoints search below the element
    /// instead of the whole document. Other strategies already are
    /// element-relative.
    pub(crate) fn relative(self) -> Self {
        match self.strategy {
            Strategy::XPath => Self {
                value: relative_xpath(&self.value),
                ..self
            },
            _ => self,
        }
    }

    /// Returns the strategy.
    #[inline]
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the selector value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.strategy, self.value)
    }
}

/// Prefixes `.` to each top-level union branch that starts with `//`.
/// `|` inside string literals, predicates and function calls is not a
/// branch separator.
fn relative_xpath(xpath: &str) -> String {
    let mut out = String::with_capacity(xpath.len() + 8);
    let mut quote = None;
    let mut depth = 0usize;
    let mut branch_start = true;

    for (i, c) in xpath.char_indices() {
        if branch_start && !c.is_whitespace() {
            if xpath[i..].starts_with("//") {
                out.push('.');
            }
            branch_start = false;
        }
        match (quote, c) {
            (Some(q), _) if q == c => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, '|') if depth == 0 => branch_start = true,
            _ => {}
        }
        out.push(c);
    }
    out
}

// ============================================================================
// IntoQuery
// ============================================================================

/// Anything the find operations accept.
pub trait IntoQuery {
    /// Compiles `self` into a wire query.
    fn into_query(self) -> Result<Query>;
}

impl IntoQuery for Query {
    #[inline]
    fn into_query(self) -> Result<Query> {
        Ok(self)
    }
}

impl IntoQuery for &Query {
    #[inline]
    fn into_query(self) -> Result<Query> {
        Ok(self.clone())
    }
}

impl IntoQuery for LocatorExpression {
    #[inline]
    fn into_query(self) -> Result<Query> {
        self.compile()
    }
}

impl IntoQuery for &LocatorExpression {
    #[inline]
    fn into_query(self) -> Result<Query> {
        self.compile()
    }
}

// ============================================================================
// Tests
// ============================================================================
