// ABOUTME: NodeSet, the fluent error-carrying node collection with filters, collapse, and extraction.
// ABOUTME: Once a chain records an error every later chain call passes the set through untouched.

//! Chained queries over a set of DOM nodes.
//!
//! Key behaviors:
//! - Filters keep the nodes a predicate accepts, in their original order.
//! - An error recorded by one step short-circuits every later step.
//! - Extraction collapses the set to one node first. `Strictness::Lenient`
//!   takes the first of several matches; `Strictness::Strict` reports them
//!   as `Ambiguous`.

use std::fmt;
use std::io::{self, Write};

use log::{debug, warn};

use crate::dom::{self, NodeRef};
use crate::error::{QueryError, Result};
use crate::scan::{self, ScanFormat};
use crate::tag::{Tag, TagQuery};

/// How collapse treats a set holding more than one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Take the first node in discovery order.
    #[default]
    Lenient,
    /// Fail with `QueryError::Ambiguous`.
    Strict,
}

/// An ordered collection of node references plus the first error of its chain.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSet<'a> {
    nodes: Vec<NodeRef<'a>>,
    err: Option<QueryError>,
}

impl<'a> NodeSet<'a> {
    /// Creates a set from nodes in discovery order.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeRef<'a>>,
    {
        Self {
            nodes: nodes.into_iter().collect(),
            err: None,
        }
    }

    /// Creates a set that carries `err` and no nodes.
    pub fn from_error(err: QueryError) -> Self {
        debug!("node set chain failed: {}", err);
        Self {
            nodes: Vec::new(),
            err: Some(err),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeRef<'a>] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        self.nodes.iter().copied()
    }

    /// The error recorded by this chain, if any.
    pub fn err(&self) -> Option<&QueryError> {
        self.err.as_ref()
    }

    /// Converts the set into its nodes, or the chain's error.
    pub fn into_result(self) -> Result<Vec<NodeRef<'a>>> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.nodes),
        }
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// Keeps the nodes for which `predicate` returns true.
    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        if self.err.is_some() {
            return self;
        }
        let nodes = self.nodes.into_iter().filter(|n| predicate(*n)).collect();
        Self { nodes, err: None }
    }

    /// Element nodes whose tag matches `tag`.
    pub fn element(self, tag: impl Into<TagQuery>) -> Self {
        if self.err.is_some() {
            return self;
        }
        let query = tag.into();
        self.filter(|node| dom::element_local_name(node).is_some_and(|name| query.matches(name)))
    }

    /// Element nodes of the HTML element called `name` (case-insensitive).
    ///
    /// Names that are not HTML elements record `UnsupportedTag`.
    pub fn element_named(self, name: &str) -> Self {
        if self.err.is_some() {
            return self;
        }
        match name.parse::<Tag>() {
            Ok(tag) => self.element(tag),
            Err(err) => Self::from_error(err),
        }
    }

    /// Element nodes whose first attribute `key` has exactly the value `val`.
    pub fn attribute(self, key: &str, val: &str) -> Self {
        self.filter(|node| dom::attribute_val(node, key) == Some(val))
    }

    /// Element nodes whose `class` attribute contains the whole token `class`.
    pub fn contains_class(self, class: &str) -> Self {
        self.filter(|node| {
            dom::attribute_val(node, "class").is_some_and(|attr| dom::contains_class(attr, class))
        })
    }

    /// Text nodes whose payload equals `text`.
    pub fn equal_text(self, text: &str) -> Self {
        self.filter(|node| dom::equal_text(node, text))
    }

    /// Text nodes whose payload contains `text`.
    pub fn contains_text(self, text: &str) -> Self {
        self.filter(|node| dom::contains_text(node, text))
    }

    /// Nodes with a direct child text node equal to `text`.
    pub fn child_equal_text(self, text: &str) -> Self {
        self.filter(|node| dom::child_equal_text(node, text))
    }

    /// Element nodes whose `class` attribute is exactly `class`.
    pub fn class(self, class: &str) -> Self {
        self.attribute("class", class)
    }

    /// Element nodes whose `href` attribute is exactly `href`.
    pub fn href(self, href: &str) -> Self {
        self.attribute("href", href)
    }

    /// The single element whose `id` is `id`; zero or several matches are an error.
    pub fn id(self, id: &str) -> Self {
        self.attribute("id", id).one()
    }

    /// Collapses to exactly one node, recording `NotFound` or `Ambiguous` otherwise.
    pub fn one(self) -> Self {
        self.collapse(Strictness::Strict)
    }

    /// Collapses to the first node, recording `NotFound` if there is none.
    pub fn first(self) -> Self {
        self.collapse(Strictness::Lenient)
    }

    fn collapse(self, strictness: Strictness) -> Self {
        if self.err.is_some() {
            return self;
        }
        match self.collect_one(strictness) {
            Ok(node) => Self::from_nodes([node]),
            Err(err) => Self::from_error(err),
        }
    }

    pub fn h1(self) -> Self {
        self.element(Tag::H1)
    }

    pub fn h2(self) -> Self {
        self.element(Tag::H2)
    }

    pub fn h3(self) -> Self {
        self.element(Tag::H3)
    }

    pub fn h4(self) -> Self {
        self.element(Tag::H4)
    }

    pub fn td(self) -> Self {
        self.element(Tag::TD)
    }

    pub fn a(self) -> Self {
        self.element(Tag::A)
    }

    pub fn p(self) -> Self {
        self.element(Tag::P)
    }

    pub fn img(self) -> Self {
        self.element(Tag::IMG)
    }

    pub fn ol(self) -> Self {
        self.element(Tag::OL)
    }

    pub fn ul(self) -> Self {
        self.element(Tag::UL)
    }

    pub fn span(self) -> Self {
        self.element(Tag::SPAN)
    }

    pub fn div(self) -> Self {
        self.element(Tag::DIV)
    }

    pub fn nav(self) -> Self {
        self.element(Tag::NAV)
    }

    pub fn li(self) -> Self {
        self.element(Tag::LI)
    }

    // ------------------------------------------------------------------------
    // Collapse
    // ------------------------------------------------------------------------

    /// Resolves the set to a single node.
    ///
    /// An empty set is `NotFound` under either strictness. With several nodes,
    /// `Lenient` returns the first and `Strict` fails with `Ambiguous`.
    pub fn collect_one(&self, strictness: Strictness) -> Result<NodeRef<'a>> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        match (self.nodes.as_slice(), strictness) {
            ([], _) => Err(QueryError::NotFound),
            ([node], _) => Ok(*node),
            (nodes, Strictness::Strict) => Err(QueryError::Ambiguous(nodes.len())),
            ([node, rest @ ..], Strictness::Lenient) => {
                debug!("lenient collapse kept the first of {} nodes", rest.len() + 1);
                Ok(*node)
            }
        }
    }

    pub fn collect_one_lenient(&self) -> Result<NodeRef<'a>> {
        self.collect_one(Strictness::Lenient)
    }

    pub fn collect_one_strict(&self) -> Result<NodeRef<'a>> {
        self.collect_one(Strictness::Strict)
    }

    // ------------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------------

    /// Full text content of the collapsed node.
    pub fn text(&self, strictness: Strictness) -> Result<String> {
        let node = self.collect_one(strictness)?;
        Ok(dom::text_of(node))
    }

    /// Payload of the collapsed node, which must be a text node.
    pub fn exact_text(&self, strictness: Strictness) -> Result<String> {
        let node = self.collect_one(strictness)?;
        dom::exact_text(node)
    }

    /// Value of attribute `key` on the collapsed node.
    pub fn attr_val(&self, key: &str, strictness: Strictness) -> Result<&'a str> {
        let node = self.collect_one(strictness)?;
        dom::require_attribute(node, key)
    }

    /// Value of `href` on the collapsed node.
    pub fn href_val(&self, strictness: Strictness) -> Result<&'a str> {
        self.attr_val("href", strictness)
    }

    /// Text parsed as an integer, ignoring `,` separators.
    pub fn int(&self, strictness: Strictness) -> Result<i64> {
        let text = self.text(strictness)?;
        scan::parse_int(&text)
    }

    /// Text parsed as a float where a trailing `k`/`K` multiplies by 1000.
    pub fn united_float(&self, strictness: Strictness) -> Result<f64> {
        let text = self.text(strictness)?;
        scan::parse_united_float(&text)
    }

    /// Integer found at the `%d`/`%v` placeholder of `format`.
    ///
    /// Fails with `InvalidScanFormat` when `format` has no placeholder or the
    /// text does not carry its literal prefix and suffix. No partial value is
    /// ever returned; `unwrap_or_default()` yields 0 on any failure.
    pub fn scan_int(&self, format: &str, strictness: Strictness) -> Result<i64> {
        let text = self.text(strictness)?;
        ScanFormat::parse(format)?.scan(&text)
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Writes every node's markup to `w`, each followed by `suffix`.
    pub fn printf<W: Write + ?Sized>(self, w: &mut W, suffix: fmt::Arguments<'_>) -> Self {
        if self.err.is_some() {
            return self;
        }
        for node in &self.nodes {
            let written = dom::render(*node, w).and_then(|_| w.write_fmt(suffix));
            if let Err(e) = written {
                warn!("failed to dump node: {}", e);
                break;
            }
        }
        self
    }

    /// Writes every node's markup to `w`, separated by blank lines.
    pub fn dump_to<W: Write + ?Sized>(self, w: &mut W) -> Self {
        self.printf(w, format_args!("\n\n"))
    }

    /// Writes every node's markup to stdout, separated by blank lines.
    pub fn dump(self) -> Self {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.dump_to(&mut lock)
    }
}
