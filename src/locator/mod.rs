//! Locator query algebra.
//!
//! Element-matching predicates combine with `&`, `|` and `!` into a
//! [`LocatorExpression`], which compiles to exactly one wire [`Query`].
//! CSS is preferred; XPath is used when the expression needs text
//! predicates, inequality, negation, or a disjunction over different tags.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `by` | [`By`] builders for leaf predicates |
//! | `expr` | [`LocatorExpression`] tree and operators |
//! | `compile` | CSS/XPath compiler |
//! | `query` | [`Query`], [`Strategy`], [`IntoQuery`] |
//! | `tag` | [`HtmlTag`] |

// ============================================================================
// Submodules
// ============================================================================

mod by;
mod compile;
mod expr;
mod query;
mod tag;

// ============================================================================
// Re-exports
// ============================================================================

pub use by::{AttributeLocator, By, XPathLocator};
pub use expr::{AttributeMatch, LocatorExpression, Predicate, XPathMatch, XPathTarget};
pub use query::{IntoQuery, Query, Strategy};
pub use tag::HtmlTag;
