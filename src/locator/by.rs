//! Locator builders.
//!
//! # Example
//!
//! ```
//! use remote_webdriver::{By, HtmlTag};
//!
//! // CSS-capable: compiles to `p[title="Google"]`
//! let a = By::title().equals("Google") & By::tag(HtmlTag::P);
//!
//! // Needs XPath: compiles to `//*[(@title="Google" and text()="Google")]`
//! let b = By::title().equals("Google") & By::text().equals("Google");
//!
//! // Dedicated strategy
//! let c = By::partial_link_text("Read more");
//! # let _ = (a, b, c);
//! ```

// ============================================================================
// Imports
// ============================================================================

use super::expr::{AttributeMatch, LocatorExpression, Predicate, XPathMatch, XPathTarget};
use super::HtmlTag;

// ============================================================================
// By
// ============================================================================

/// Entry point for building locator expressions.
pub struct By;

macro_rules! named_attributes {
    ($($method:ident => $attr:literal),* $(,)?) => {
        impl By {
            $(
                #[doc = concat!("The `", $attr, "` attribute.")]
                #[inline]
                #[must_use]
                pub fn $method() -> AttributeLocator {
                    AttributeLocator::new($attr)
                }
            )*
        }
    };
}

named_attributes! {
    id => "id",
    class => "class",
    style => "style",
    title => "title",
    hidden => "hidden",
    tabindex => "tabindex",
    r#type => "type",
    value => "value",
    placeholder => "placeholder",
    name => "name",
    pattern => "pattern",
    href => "href",
    src => "src",
    alt => "alt",
}

impl By {
    /// Any attribute by name.
    #[inline]
    #[must_use]
    pub fn attribute(name: impl Into<String>) -> AttributeLocator {
        AttributeLocator::new(name)
    }

    /// An attribute compared through XPath, which also allows inequality.
    #[inline]
    #[must_use]
    pub fn xpath_attribute(name: impl Into<String>) -> XPathLocator {
        XPathLocator {
            target: XPathTarget::Attribute(name.into()),
        }
    }

    /// The text content of the element, `text()`.
    #[inline]
    #[must_use]
    pub fn text() -> XPathLocator {
        Self::function("text")
    }

    /// The value of an XPath function evaluated on the element, e.g.
    /// `normalize-space`.
    #[inline]
    #[must_use]
    pub fn function(name: impl Into<String>) -> XPathLocator {
        XPathLocator {
            target: XPathTarget::Function(name.into()),
        }
    }

    /// Elements with the given tag.
    #[inline]
    #[must_use]
    pub fn tag(tag: impl Into<HtmlTag>) -> LocatorExpression {
        Predicate::Tag(tag.into()).into()
    }

    /// Links whose visible text is exactly `text`.
    #[inline]
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> LocatorExpression {
        Predicate::LinkText {
            text: text.into(),
            partial: false,
        }
        .into()
    }

    /// Links whose visible text contains `text`.
    #[inline]
    #[must_use]
    pub fn partial_link_text(text: impl Into<String>) -> LocatorExpression {
        Predicate::LinkText {
            text: text.into(),
            partial: true,
        }
        .into()
    }
}

// ============================================================================
// AttributeLocator
// ============================================================================

/// Comparisons on an attribute. All but [`not_equals`](Self::not_equals)
/// have a CSS form.
#[derive(Debug, Clone)]
pub struct AttributeLocator {
    name: String,
}

impl AttributeLocator {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn compare(self, op: AttributeMatch, value: impl Into<String>) -> LocatorExpression {
        Predicate::Attribute {
            name: self.name,
            op,
            value: value.into(),
        }
        .into()
    }

    /// Attribute equals `value`.
    #[must_use]
    pub fn equals(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(AttributeMatch::Exact, value)
    }

    /// Attribute contains `value`.
    #[must_use]
    pub fn contains(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(AttributeMatch::Contains, value)
    }

    /// Attribute starts with `value`.
    #[must_use]
    pub fn starts_with(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(AttributeMatch::Prefix, value)
    }

    /// Attribute ends with `value`.
    #[must_use]
    pub fn ends_with(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(AttributeMatch::Suffix, value)
    }

    /// Attribute differs from `value`. Forces XPath.
    #[must_use]
    pub fn not_equals(self, value: impl Into<String>) -> LocatorExpression {
        By::xpath_attribute(self.name).not_equals(value)
    }
}

// ============================================================================
// XPathLocator
// ============================================================================

/// Comparisons that compile to XPath only.
#[derive(Debug, Clone)]
pub struct XPathLocator {
    target: XPathTarget,
}

impl XPathLocator {
    fn compare(self, op: XPathMatch, value: impl Into<String>) -> LocatorExpression {
        Predicate::XPath {
            target: self.target,
            op,
            value: value.into(),
        }
        .into()
    }

    /// `target = "value"`
    #[must_use]
    pub fn equals(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(XPathMatch::Equals, value)
    }

    /// `target != "value"`
    #[must_use]
    pub fn not_equals(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(XPathMatch::NotEquals, value)
    }

    /// `contains(target, "value")`
    #[must_use]
    pub fn contains(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(XPathMatch::Contains, value)
    }

    /// `starts-with(target, "value")`
    #[must_use]
    pub fn starts_with(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(XPathMatch::StartsWith, value)
    }

    /// `ends-with(target, "value")`
    ///
    /// `ends-with` is an XPath 2.0 function; remote ends limited to
    /// XPath 1.0 reject it with `invalid selector`.
    #[must_use]
    pub fn ends_with(self, value: impl Into<String>) -> LocatorExpression {
        self.compare(XPathMatch::EndsWith, value)
    }
}
