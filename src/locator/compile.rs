//! Compiles [`LocatorExpression`] trees into a single [`Query`].
//!
//! Every node compiles to an optional CSS selector and a mandatory XPath
//! form. The top level prefers CSS and falls back to XPath.
//!
//! # Rules
//!
//! | Node | CSS | XPath |
//! |------|-----|-------|
//! | attribute | `[a="v"]`, `[a*="v"]`, `[a^="v"]`, `[a$="v"]` | `@a="v"`, `contains(@a,"v")`, ... |
//! | XPath leaf | none | `@a!="v"`, `text()="v"`, ... |
//! | tag | `p` | `//p` |
//! | AND | `p[a][b]` if every other operand is an attribute | `//p[f1 and f2]` or `(f1 and f2)` |
//! | OR | `s1, s2` if all branches share a tag and have CSS | `//x | //y` when tags are involved, else `(f1 or f2)` |
//! | NOT | none | `not(f)` |
//!
//! An AND with a tag-bearing OR operand is distributed first:
//! `(a | b) & c` becomes `(a & c) | (b & c)`.

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::{LocatorError, Result};

use super::expr::{AttributeMatch, LocatorExpression, Predicate, XPathMatch, XPathTarget};
use super::query::{Query, Strategy};
use super::HtmlTag;

type CompileResult<T> = std::result::Result<T, LocatorError>;

/// Names that are valid both as a CSS identifier and as an XML name.
static NAME: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$"));

// ============================================================================
// Entry Point
// ============================================================================

impl LocatorExpression {
    /// Compiles this expression into a wire query.
    ///
    /// # Errors
    ///
    /// [`Error::Locator`](crate::Error::Locator) when two different tags are
    /// required of one element, when a tag is negated, or when link text
    /// is combined with anything else.
    pub fn compile(&self) -> Result<Query> {
        let query = compile(self)?;
        trace!(strategy = %query.strategy(), value = query.value(), "Compiled locator");
        Ok(query)
    }
}

fn compile(expr: &LocatorExpression) -> CompileResult<Query> {
    match expr {
        LocatorExpression::Leaf(Predicate::LinkText { text, partial }) => {
            let strategy = if *partial {
                Strategy::PartialLinkText
            } else {
                Strategy::LinkText
            };
            return Ok(Query::new(strategy, text.clone()));
        }
        LocatorExpression::Leaf(Predicate::Tag(tag)) => {
            check_name("tag", tag.as_str())?;
            return Ok(Query::new(Strategy::TagName, tag.as_str()));
        }
        _ => {}
    }

    let node = distribute(lower(expr)?);
    let compiled = compile_node(&node)?;

    Ok(match compiled.css {
        Some(css) => Query::css(css),
        None => Query::xpath(compiled.xpath.into_paths().join(" | ")),
    })
}

// ============================================================================
// Normal Form
// ============================================================================

/// N-ary form of the expression tree. `And`/`Or` never directly contain a
/// node of the same kind.
#[derive(Debug, Clone)]
enum Node {
    Leaf(Predicate),
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Box<Node>),
}

fn lower(expr: &LocatorExpression) -> CompileResult<Node> {
    Ok(match expr {
        LocatorExpression::Leaf(Predicate::LinkText { text, .. }) => {
            return Err(LocatorError::LinkTextNotComposable { text: text.clone() });
        }
        LocatorExpression::Leaf(predicate) => {
            check_names(predicate)?;
            Node::Leaf(predicate.clone())
        }
        LocatorExpression::And(lhs, rhs) => conjunction(vec![lower(lhs)?, lower(rhs)?]),
        LocatorExpression::Or(lhs, rhs) => disjunction(vec![lower(lhs)?, lower(rhs)?]),
        LocatorExpression::Not(inner) => Node::Not(Box::new(lower(inner)?)),
    })
}

fn check_names(predicate: &Predicate) -> CompileResult<()> {
    match predicate {
        Predicate::Attribute { name, .. } => check_name("attribute", name),
        Predicate::XPath { target: XPathTarget::Attribute(name), .. } => {
            check_name("attribute", name)
        }
        Predicate::XPath { target: XPathTarget::Function(name), .. } => {
            check_name("function", name)
        }
        Predicate::Tag(tag) => check_name("tag", tag.as_str()),
        Predicate::LinkText { .. } => Ok(()),
    }
}

fn check_name(kind: &'static str, name: &str) -> CompileResult<()> {
    if NAME.as_ref().is_ok_and(|re| re.is_match(name)) {
        Ok(())
    } else {
        Err(LocatorError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

fn conjunction(operands: Vec<Node>) -> Node {
    let mut flat = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            Node::And(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    if flat.len() == 1 {
        return flat.remove(0);
    }
    Node::And(flat)
}

fn disjunction(branches: Vec<Node>) -> Node {
    let mut flat = Vec::with_capacity(branches.len());
    for branch in branches {
        match branch {
            Node::Or(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    if flat.len() == 1 {
        return flat.remove(0);
    }
    Node::Or(flat)
}

/// First tag fixed anywhere under `node`.
fn fixed_tag(node: &Node) -> Option<&HtmlTag> {
    match node {
        Node::Leaf(Predicate::Tag(tag)) => Some(tag),
        Node::Leaf(_) => None,
        Node::And(children) | Node::Or(children) => children.iter().find_map(fixed_tag),
        Node::Not(inner) => fixed_tag(inner),
    }
}

/// Rewrites `(a | b) & c` into `(a & c) | (b & c)` wherever the OR operand
/// fixes a tag.
fn distribute(node: Node) -> Node {
    match node {
        Node::Leaf(_) => node,
        Node::Not(inner) => Node::Not(Box::new(distribute(*inner))),
        Node::Or(branches) => disjunction(branches.into_iter().map(distribute).collect()),
        Node::And(operands) => {
            let mut pivot = None;
            let mut rest = Vec::with_capacity(operands.len());
            for operand in operands.into_iter().map(distribute) {
                match operand {
                    Node::Or(branches)
                        if pivot.is_none() && branches.iter().any(|b| fixed_tag(b).is_some()) =>
                    {
                        pivot = Some((rest.len(), branches));
                    }
                    other => rest.push(other),
                }
            }

            let Some((at, branches)) = pivot else {
                return conjunction(rest);
            };

            let expanded = branches
                .into_iter()
                .map(|branch| {
                    let mut operands = rest.clone();
                    operands.insert(at, branch);
                    conjunction(operands)
                })
                .collect();
            distribute(disjunction(expanded))
        }
    }
}

// ============================================================================
// Compiled Form
// ============================================================================

#[derive(Debug)]
enum XPath {
    /// Filter usable inside `[...]`.
    Predicate(String),
    /// Absolute location paths, joined with `|`.
    Paths(Vec<String>),
}

impl XPath {
    fn into_paths(self) -> Vec<String> {
        match self {
            Self::Predicate(filter) => vec![format!("//*[{filter}]")],
            Self::Paths(paths) => paths,
        }
    }

    fn into_predicate(self) -> Option<String> {
        match self {
            Self::Predicate(filter) => Some(filter),
            Self::Paths(_) => None,
        }
    }
}

#[derive(Debug)]
struct Compiled {
    css: Option<String>,
    xpath: XPath,
    /// The single tag every match has, if one is fixed.
    tag: Option<HtmlTag>,
}

fn compile_node(node: &Node) -> CompileResult<Compiled> {
    match node {
        Node::Leaf(predicate) => compile_leaf(predicate),
        Node::And(operands) => compile_and(operands),
        Node::Or(branches) => compile_or(branches),
        Node::Not(inner) => compile_not(inner),
    }
}

fn compile_leaf(predicate: &Predicate) -> CompileResult<Compiled> {
    Ok(match predicate {
        Predicate::Attribute { name, op, value } => Compiled {
            css: Some(css_attribute(name, *op, value)),
            xpath: XPath::Predicate(xpath_attribute(name, *op, value)),
            tag: None,
        },
        Predicate::XPath { target, op, value } => Compiled {
            css: None,
            xpath: XPath::Predicate(xpath_comparison(target, *op, value)),
            tag: None,
        },
        Predicate::Tag(tag) => Compiled {
            css: Some(tag.to_string()),
            xpath: XPath::Paths(vec![format!("//{tag}")]),
            tag: Some(tag.clone()),
        },
        Predicate::LinkText { text, .. } => {
            return Err(LocatorError::LinkTextNotComposable { text: text.clone() });
        }
    })
}

fn compile_and(operands: &[Node]) -> CompileResult<Compiled> {
    let mut tag: Option<&HtmlTag> = None;
    let mut css = String::new();
    let mut css_capable = true;
    let mut filters = Vec::with_capacity(operands.len());

    for operand in operands {
        if let Node::Leaf(Predicate::Tag(next)) = operand {
            match tag {
                Some(first) if first != next => {
                    return Err(LocatorError::TagContradiction {
                        first: first.to_string(),
                        second: next.to_string(),
                    });
                }
                _ => tag = Some(next),
            }
            continue;
        }

        let compiled = compile_node(operand)?;
        css_capable &= matches!(operand, Node::Leaf(Predicate::Attribute { .. }));
        if css_capable && let Some(fragment) = compiled.css {
            css.push_str(&fragment);
        }
        match compiled.xpath.into_predicate() {
            Some(filter) => filters.push(filter),
            None => {
                return Err(LocatorError::TagContradiction {
                    first: tag.map_or_else(|| "*".to_string(), HtmlTag::to_string),
                    second: fixed_tag(operand).map_or_else(|| "*".to_string(), HtmlTag::to_string),
                });
            }
        }
    }

    let css = css_capable.then(|| match tag {
        Some(tag) => format!("{tag}{css}"),
        None => css,
    });

    Ok(match tag {
        Some(tag) => {
            let path = if filters.is_empty() {
                format!("//{tag}")
            } else {
                format!("//{tag}[{}]", filters.join(" and "))
            };
            Compiled {
                css,
                xpath: XPath::Paths(vec![path]),
                tag: Some(tag.clone()),
            }
        }
        None => Compiled {
            css,
            xpath: XPath::Predicate(format!("({})", filters.join(" and "))),
            tag: None,
        },
    })
}

fn compile_or(branches: &[Node]) -> CompileResult<Compiled> {
    let compiled = branches
        .iter()
        .map(compile_node)
        .collect::<CompileResult<Vec<_>>>()?;

    let shared_tag = compiled.first().and_then(|c| c.tag.clone());
    let same_tag = compiled.iter().all(|c| c.tag == shared_tag);

    let css = if same_tag {
        compiled
            .iter()
            .map(|c| c.css.clone())
            .collect::<Option<Vec<_>>>()
            .map(|selectors| selectors.join(", "))
    } else {
        None
    };

    let union = |compiled: Vec<Compiled>| {
        XPath::Paths(
            compiled
                .into_iter()
                .flat_map(|c| c.xpath.into_paths())
                .collect(),
        )
    };

    let xpath = if !same_tag || shared_tag.is_some() {
        union(compiled)
    } else {
        let filters = compiled
            .iter()
            .map(|c| match &c.xpath {
                XPath::Predicate(filter) => Some(filter.as_str()),
                XPath::Paths(_) => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|filters| format!("({})", filters.join(" or ")));
        match filters {
            Some(filter) => XPath::Predicate(filter),
            None => union(compiled),
        }
    };

    Ok(Compiled {
        css,
        xpath,
        tag: if same_tag { shared_tag } else { None },
    })
}

fn compile_not(inner: &Node) -> CompileResult<Compiled> {
    if let Some(tag) = fixed_tag(inner) {
        return Err(LocatorError::NegatedTag {
            tag: tag.to_string(),
        });
    }
    let filter = compile_node(inner)?
        .xpath
        .into_predicate()
        .ok_or_else(|| LocatorError::NegatedTag {
            tag: "*".to_string(),
        })?;
    Ok(Compiled {
        css: None,
        xpath: XPath::Predicate(format!("not({filter})")),
        tag: None,
    })
}

// ============================================================================
// Leaf Rendering
// ============================================================================

fn css_attribute(name: &str, op: AttributeMatch, value: &str) -> String {
    let operator = match op {
        AttributeMatch::Exact => "=",
        AttributeMatch::Contains => "*=",
        AttributeMatch::Prefix => "^=",
        AttributeMatch::Suffix => "$=",
    };
    format!("[{name}{operator}{}]", css_string(value))
}

fn xpath_attribute(name: &str, op: AttributeMatch, value: &str) -> String {
    let op = match op {
        AttributeMatch::Exact => XPathMatch::Equals,
        AttributeMatch::Contains => XPathMatch::Contains,
        AttributeMatch::Prefix => XPathMatch::StartsWith,
        AttributeMatch::Suffix => XPathMatch::EndsWith,
    };
    xpath_comparison(&XPathTarget::Attribute(name.to_string()), op, value)
}

fn xpath_comparison(target: &XPathTarget, op: XPathMatch, value: &str) -> String {
    let target = match target {
        XPathTarget::Attribute(name) => format!("@{name}"),
        XPathTarget::Function(name) => format!("{name}()"),
    };
    let literal = xpath_string(value);
    match op {
        XPathMatch::Equals => format!("{target}={literal}"),
        XPathMatch::NotEquals => format!("{target}!={literal}"),
        XPathMatch::Contains => format!("contains({target},{literal})"),
        XPathMatch::StartsWith => format!("starts-with({target},{literal})"),
        XPathMatch::EndsWith => format!("ends-with({target},{literal})"),
    }
}

/// Double-quoted CSS string.
fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// XPath 1.0 string literal. XPath has no escapes, so values holding both
/// quote kinds are spliced with `concat()`.
fn xpath_string(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{part}\""))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::{prop, prop_assert, prop_oneof, proptest};
    use proptest::strategy::Strategy as Generator;

    use crate::error::Error;
    use crate::locator::By;

    fn css(value: &str) -> Query {
        Query::css(value)
    }

    fn xpath(value: &str) -> Query {
        Query::xpath(value)
    }

    fn locator_error(expr: LocatorExpression) -> LocatorError {
        match expr.compile() {
            Err(Error::Locator(err)) => err,
            other => panic!("expected locator error, got {other:?}"),
        }
    }

    // ------------------------------------------------------------------------
    // Leaves
    // ------------------------------------------------------------------------

    #[test]
    fn test_single_attribute() {
        assert_eq!(By::id().equals("2").compile().unwrap(), css("[id=\"2\"]"));
        assert_eq!(
            By::title().equals("abc").compile().unwrap(),
            css("[title=\"abc\"]")
        );
    }

    #[test]
    fn test_attribute_operators() {
        assert_eq!(
            By::class().contains("btn").compile().unwrap(),
            css("[class*=\"btn\"]")
        );
        assert_eq!(
            By::href().starts_with("https:").compile().unwrap(),
            css("[href^=\"https:\"]")
        );
        assert_eq!(
            By::src().ends_with(".png").compile().unwrap(),
            css("[src$=\".png\"]")
        );
    }

    #[test]
    fn test_lone_tag_uses_tag_name_strategy() {
        assert_eq!(
            By::tag(HtmlTag::P).compile().unwrap(),
            Query::new(Strategy::TagName, "p")
        );
    }

    #[test]
    fn test_link_text() {
        assert_eq!(
            By::link_text("Home").compile().unwrap(),
            Query::new(Strategy::LinkText, "Home")
        );
        assert_eq!(
            By::partial_link_text("Read").compile().unwrap(),
            Query::new(Strategy::PartialLinkText, "Read")
        );
    }

    #[test]
    fn test_xpath_only_leaves() {
        assert_eq!(
            By::title().not_equals("x").compile().unwrap(),
            xpath("//*[@title!=\"x\"]")
        );
        assert_eq!(
            By::text().contains("Goo").compile().unwrap(),
            xpath("//*[contains(text(),\"Goo\")]")
        );
        assert_eq!(
            By::function("normalize-space").starts_with("Sign").compile().unwrap(),
            xpath("//*[starts-with(normalize-space(),\"Sign\")]")
        );
        assert_eq!(
            By::xpath_attribute("alt").ends_with("logo").compile().unwrap(),
            xpath("//*[ends-with(@alt,\"logo\")]")
        );
    }

    // ------------------------------------------------------------------------
    // Conjunction
    // ------------------------------------------------------------------------

    #[test]
    fn test_and_of_attributes_is_css() {
        let expr = By::title().equals("Google") & By::alt().equals("Google");
        assert_eq!(
            expr.compile().unwrap(),
            css("[title=\"Google\"][alt=\"Google\"]")
        );
    }

    #[test]
    fn test_and_hoists_tag_to_front() {
        let expr = By::title().equals("Google") & By::tag(HtmlTag::P);
        assert_eq!(expr.compile().unwrap(), css("p[title=\"Google\"]"));
    }

    #[test]
    fn test_and_with_text_falls_back_to_xpath() {
        let expr = By::title().equals("Google") & By::text().equals("Google");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//*[(@title=\"Google\" and text()=\"Google\")]")
        );
    }

    #[test]
    fn test_and_with_tag_and_text() {
        let expr = By::tag(HtmlTag::P) & By::text().equals("Google");
        assert_eq!(expr.compile().unwrap(), xpath("//p[text()=\"Google\"]"));
    }

    #[test]
    fn test_and_of_three() {
        let expr = By::tag("p") & By::text().equals("Google") & By::class().equals("lst");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//p[text()=\"Google\" and @class=\"lst\"]")
        );
    }

    #[test]
    fn test_and_of_two_tags_is_rejected() {
        let err = locator_error(By::tag(HtmlTag::P) & By::tag(HtmlTag::DIV));
        assert_eq!(
            err,
            LocatorError::TagContradiction {
                first: "p".into(),
                second: "div".into()
            }
        );
    }

    #[test]
    fn test_and_of_same_tag_twice() {
        let expr = By::tag("p") & By::tag("p") & By::id().equals("x");
        assert_eq!(expr.compile().unwrap(), css("p[id=\"x\"]"));
    }

    #[test]
    fn test_and_with_tagless_or_stays_one_predicate() {
        let expr = By::id().equals("a") & (By::name().equals("b") | By::text().equals("c"));
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//*[(@id=\"a\" and (@name=\"b\" or text()=\"c\"))]")
        );
    }

    // ------------------------------------------------------------------------
    // Disjunction
    // ------------------------------------------------------------------------

    #[test]
    fn test_or_of_attributes_is_css_list() {
        let expr = By::title().equals("Google") | By::alt().equals("Google");
        assert_eq!(
            expr.compile().unwrap(),
            css("[title=\"Google\"], [alt=\"Google\"]")
        );
    }

    #[test]
    fn test_or_with_tag_is_union() {
        let expr = By::title().equals("Google") | By::tag(HtmlTag::P);
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//*[@title=\"Google\"] | //p")
        );
    }

    #[test]
    fn test_or_with_text_is_alternation() {
        let expr = By::title().equals("Google") | By::text().equals("Google");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//*[(@title=\"Google\" or text()=\"Google\")]")
        );
    }

    #[test]
    fn test_or_tag_and_text() {
        let expr = By::tag(HtmlTag::P) | By::text().equals("Google");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//p | //*[text()=\"Google\"]")
        );
    }

    #[test]
    fn test_or_of_three() {
        let expr = By::tag("p") | By::text().equals("Google") | By::class().equals("lst");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//p | //*[text()=\"Google\"] | //*[@class=\"lst\"]")
        );
    }

    #[test]
    fn test_or_with_shared_tag_keeps_css() {
        let expr = (By::tag("p") & By::id().equals("a")) | (By::tag("p") & By::id().equals("b"));
        assert_eq!(
            expr.compile().unwrap(),
            css("p[id=\"a\"], p[id=\"b\"]")
        );
    }

    #[test]
    fn test_or_with_shared_tag_needing_xpath_is_union() {
        let expr =
            (By::tag("p") & By::text().equals("a")) | (By::tag("p") & By::id().equals("b"));
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//p[text()=\"a\"] | //p[@id=\"b\"]")
        );
    }

    #[test]
    fn test_distribution_over_tag_bearing_or() {
        let expr = (By::tag(HtmlTag::DIV) | By::tag(HtmlTag::A)) & By::name().equals("search");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//div[@name=\"search\"] | //a[@name=\"search\"]")
        );
    }

    #[test]
    fn test_distribution_keeps_operand_order() {
        let expr = By::name().equals("q") & (By::tag("input") | By::tag("textarea"));
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//input[@name=\"q\"] | //textarea[@name=\"q\"]")
        );
    }

    #[test]
    fn test_distribution_surfaces_contradictions() {
        let err = locator_error((By::tag("p") | By::tag("a")) & By::tag("div"));
        assert!(matches!(err, LocatorError::TagContradiction { .. }));
    }

    #[test]
    fn test_mixture() {
        let expr = (By::tag("p") & By::text().equals("Google") & By::class().equals("lst"))
            | (By::tag("a") & By::text().equals("Wikipedia"))
            | ((By::tag("div") | By::tag("a")) & By::name().equals("search"))
            | ((By::tag("div") & By::name().equals("search"))
                | By::placeholder().equals("Search"));
        assert_eq!(
            expr.compile().unwrap(),
            xpath(
                "//p[text()=\"Google\" and @class=\"lst\"] | //a[text()=\"Wikipedia\"] | \
                 //div[@name=\"search\"] | //a[@name=\"search\"] | //div[@name=\"search\"] | \
                 //*[@placeholder=\"Search\"]"
            )
        );
    }

    // ------------------------------------------------------------------------
    // Negation
    // ------------------------------------------------------------------------

    #[test]
    fn test_not() {
        let expr = By::tag("input") & !By::r#type().equals("hidden");
        assert_eq!(
            expr.compile().unwrap(),
            xpath("//input[not(@type=\"hidden\")]")
        );
    }

    #[test]
    fn test_not_over_tag_is_rejected() {
        let err = locator_error(!By::tag(HtmlTag::P));
        assert_eq!(err, LocatorError::NegatedTag { tag: "p".into() });

        let err = locator_error(!(By::id().equals("x") & By::tag("div")));
        assert_eq!(err, LocatorError::NegatedTag { tag: "div".into() });
    }

    #[test]
    fn test_link_text_does_not_compose() {
        let err = locator_error(By::link_text("Home") & By::id().equals("x"));
        assert_eq!(
            err,
            LocatorError::LinkTextNotComposable {
                text: "Home".into()
            }
        );
    }

    #[test]
    fn test_tag_case_is_ignored() {
        let expr = By::tag("P") & By::tag("p") & By::id().equals("x");
        assert_eq!(expr.compile().unwrap(), css("p[id=\"x\"]"));
        assert_eq!(
            By::tag("DIV").compile().unwrap(),
            Query::new(Strategy::TagName, "div")
        );
    }

    // ------------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------------

    #[test]
    fn test_attribute_name_with_space_is_rejected() {
        let err = locator_error(By::attribute("data x").equals("v"));
        assert_eq!(
            err,
            LocatorError::InvalidName {
                kind: "attribute",
                name: "data x".into()
            }
        );

        let err = locator_error(By::xpath_attribute("a]|//b[@c").not_equals("v"));
        assert!(matches!(err, LocatorError::InvalidName { kind: "attribute", .. }));
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let err = locator_error(By::tag(String::new()) & By::text().equals("v"));
        assert_eq!(
            err,
            LocatorError::InvalidName {
                kind: "tag",
                name: String::new()
            }
        );
        let err = locator_error(By::tag("p>a"));
        assert!(matches!(err, LocatorError::InvalidName { kind: "tag", .. }));
    }

    #[test]
    fn test_function_name_cannot_splice_xpath() {
        let err = locator_error(By::function("text()]|//x[").equals("v"));
        assert_eq!(
            err,
            LocatorError::InvalidName {
                kind: "function",
                name: "text()]|//x[".into()
            }
        );
    }

    #[test]
    fn test_common_names_are_accepted() {
        assert_eq!(
            By::attribute("data-test_id").equals("v").compile().unwrap(),
            css("[data-test_id=\"v\"]")
        );
        assert_eq!(
            By::function("string-length").not_equals("0").compile().unwrap(),
            xpath("//*[string-length()!=\"0\"]")
        );
        assert_eq!(
            By::tag("my-widget").compile().unwrap(),
            Query::new(Strategy::TagName, "my-widget")
        );
    }

    // ------------------------------------------------------------------------
    // Quoting
    // ------------------------------------------------------------------------

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(
            By::title().equals("say \"hi\"").compile().unwrap(),
            css("[title=\"say \\\"hi\\\"\"]")
        );
        assert_eq!(
            By::text().equals("say \"hi\"").compile().unwrap(),
            xpath("//*[text()='say \"hi\"']")
        );
        assert_eq!(
            By::text().equals("it's \"x\"").compile().unwrap(),
            xpath("//*[text()=concat(\"it's \", '\"', \"x\", '\"', \"\")]")
        );
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    fn leaf() -> impl Generator<Value = LocatorExpression> {
        let value = "[a-z\"' ]{0,6}";
        prop_oneof![
            (prop::sample::select(vec!["id", "class", "title", "name"]), value)
                .prop_map(|(name, v)| By::attribute(name).equals(v)),
            value.prop_map(|v| By::class().contains(v)),
            value.prop_map(|v| By::text().equals(v)),
            value.prop_map(|v| By::title().not_equals(v)),
        ]
    }

    fn tagless_expression() -> impl Generator<Value = LocatorExpression> {
        leaf().prop_recursive(5, 32, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a & b),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| a | b),
                inner.prop_map(|a| !a),
            ]
        })
    }

    fn tag() -> impl Generator<Value = LocatorExpression> {
        prop::sample::select(vec!["p", "a", "div"]).prop_map(|name| By::tag(name))
    }

    proptest! {
        #[test]
        fn prop_tagless_expressions_always_compile(expr in tagless_expression()) {
            let query = expr.compile().unwrap();
            prop_assert!(!query.value().is_empty());
        }

        #[test]
        fn prop_single_tag_conjunctions_compile(
            tag in tag(),
            rest in tagless_expression(),
        ) {
            let query = (tag & rest).compile().unwrap();
            prop_assert!(matches!(query.strategy(), Strategy::Css | Strategy::XPath));
        }

        #[test]
        fn prop_tagged_disjunctions_distribute(
            a in tag(),
            b in tag(),
            rest in tagless_expression(),
        ) {
            let query = ((a | b) & rest).compile().unwrap();
            prop_assert!(matches!(query.strategy(), Strategy::Css | Strategy::XPath));
        }
    }
}
