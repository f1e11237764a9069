//! HTML tag names.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;
use std::fmt;

/// An HTML tag name used in tag locators.
///
/// Common tags are available as constants; any other name converts from a
/// string. HTML tag names are case-insensitive, so names are stored in
/// lower case and `P` equals `p`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlTag(Cow<'static, str>);

macro_rules! tags {
    ($($konst:ident => $name:literal),* $(,)?) => {
        impl HtmlTag {
            $(
                #[doc = concat!("`<", $name, ">`")]
                pub const $konst: Self = Self(Cow::Borrowed($name));
            )*
        }
    };
}

tags! {
    A => "a",
    ARTICLE => "article",
    BODY => "body",
    BUTTON => "button",
    DIV => "div",
    FORM => "form",
    H1 => "h1",
    H2 => "h2",
    H3 => "h3",
    HEADER => "header",
    IFRAME => "iframe",
    IMG => "img",
    INPUT => "input",
    LABEL => "label",
    LI => "li",
    MAIN => "main",
    NAV => "nav",
    OPTION => "option",
    P => "p",
    SECTION => "section",
    SELECT => "select",
    SPAN => "span",
    TABLE => "table",
    TD => "td",
    TEXTAREA => "textarea",
    TR => "tr",
    UL => "ul",
}

impl HtmlTag {
    /// Returns the tag name.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for HtmlTag {
    fn from(name: &'static str) -> Self {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Self(Cow::Owned(name.to_ascii_lowercase()))
        } else {
            Self(Cow::Borrowed(name))
        }
    }
}

impl From<String> for HtmlTag {
    fn from(mut name: String) -> Self {
        name.make_ascii_lowercase();
        Self(Cow::Owned(name))
    }
}

// ============================================================================
// Tests
// ============================================================================
