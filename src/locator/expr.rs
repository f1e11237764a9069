//! Locator expression tree.

// ============================================================================
// Imports
// ============================================================================

use std::ops::{BitAnd, BitOr, Not};

use super::HtmlTag;

// ============================================================================
// Leaf Predicates
// ============================================================================

/// Comparison of a CSS-expressible attribute leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeMatch {
    /// `[a="v"]`
    Exact,
    /// `[a*="v"]`
    Contains,
    /// `[a^="v"]`
    Prefix,
    /// `[a$="v"]`
    Suffix,
}

/// Comparison of an XPath-only leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XPathMatch {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    EndsWith,
}

/// Left-hand side of an XPath comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum XPathTarget {
    /// `@name`
    Attribute(String),
    /// `name()`, e.g. `text()`
    Function(String),
}

/// A single element-matching condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Attribute comparison with a CSS rendering.
    Attribute {
        name: String,
        op: AttributeMatch,
        value: String,
    },
    /// Comparison only XPath can express.
    XPath {
        target: XPathTarget,
        op: XPathMatch,
        value: String,
    },
    /// Tag name equality.
    Tag(HtmlTag),
    /// Visible text of a link.
    LinkText { text: String, partial: bool },
}

// ============================================================================
// LocatorExpression
// ============================================================================

/// Boolean combination of [`Predicate`]s.
///
/// Built with the [`By`](super::By) helpers and the `&`, `|` and `!`
/// operators:
///
/// ```
/// use remote_webdriver::{By, HtmlTag};
///
/// let search = (By::tag(HtmlTag::DIV) | By::tag(HtmlTag::A)) & By::name().equals("search");
/// let query = search.compile().unwrap();
/// assert_eq!(query.value(), "//div[@name=\"search\"] | //a[@name=\"search\"]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocatorExpression {
    Leaf(Predicate),
    And(Box<LocatorExpression>, Box<LocatorExpression>),
    Or(Box<LocatorExpression>, Box<LocatorExpression>),
    Not(Box<LocatorExpression>),
}

impl From<Predicate> for LocatorExpression {
    #[inline]
    fn from(predicate: Predicate) -> Self {
        Self::Leaf(predicate)
    }
}

impl BitAnd for LocatorExpression {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for LocatorExpression {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for LocatorExpression {
    type Output = Self;

    fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}
