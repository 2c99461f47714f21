// ABOUTME: Read-only helpers over scraper's node tree used by NodeSet predicates and extractors.
// ABOUTME: Covers attribute lookup, class tokens, text matching, subtree text, and markup rendering.

//! DOM helpers for the query layer.
//!
//! Nodes are `ego_tree::NodeRef`s into a tree owned by a `scraper::Html`.
//! Nothing here mutates the tree.

use std::io::{self, Write};

use html5ever::LocalName;
use scraper::Node;

use crate::error::{QueryError, Result};

/// A reference to a node in a parsed document.
pub type NodeRef<'a> = ego_tree::NodeRef<'a, Node>;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "xmp",
];

/// Elements whose leading newline the parser drops, so rendering must restore it.
const NEWLINE_PRESERVING_ELEMENTS: &[&str] = &["listing", "pre", "textarea"];

/// Returns the element name if `node` is an element.
pub fn element_name<'a>(node: NodeRef<'a>) -> Option<&'a str> {
    node.value().as_element().map(|el| el.name())
}

/// Returns the interned local name if `node` is an element.
pub fn element_local_name<'a>(node: NodeRef<'a>) -> Option<&'a LocalName> {
    node.value().as_element().map(|el| &el.name.local)
}

/// Returns the value of the first attribute named `key`, if `node` is an element that has one.
pub fn attribute_val<'a>(node: NodeRef<'a>, key: &str) -> Option<&'a str> {
    let el = node.value().as_element()?;
    el.attrs().find(|(k, _)| *k == key).map(|(_, v)| v)
}

/// Like `attribute_val` but reports a missing attribute as an error.
pub fn require_attribute<'a>(node: NodeRef<'a>, key: &str) -> Result<&'a str> {
    attribute_val(node, key).ok_or_else(|| QueryError::NoSuchAttribute(key.to_string()))
}

/// Returns true if the whitespace separated `class_attr` contains `token` as a whole token.
pub fn contains_class(class_attr: &str, token: &str) -> bool {
    class_attr.split_ascii_whitespace().any(|c| c == token)
}

/// Returns true if `node` is a text node whose payload equals `text`.
pub fn equal_text(node: NodeRef<'_>, text: &str) -> bool {
    match node.value().as_text() {
        Some(t) => &**t == text,
        None => false,
    }
}

/// Returns true if `node` is a text node whose payload contains `text`.
pub fn contains_text(node: NodeRef<'_>, text: &str) -> bool {
    match node.value().as_text() {
        Some(t) => t.contains(text),
        None => false,
    }
}

/// Returns true if any direct child of `node` is a text node equal to `text`.
pub fn child_equal_text(node: NodeRef<'_>, text: &str) -> bool {
    node.children().any(|child| equal_text(child, text))
}

/// Full text content of `node`: its payload for a text node, otherwise every
/// descendant text payload concatenated in document order.
pub fn text_of(node: NodeRef<'_>) -> String {
    if let Some(t) = node.value().as_text() {
        return t.text.to_string();
    }
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|t| &**t)
        .collect()
}

/// Payload of a text node; any other node kind is rejected.
pub fn exact_text(node: NodeRef<'_>) -> Result<String> {
    node.value()
        .as_text()
        .map(|t| t.text.to_string())
        .ok_or(QueryError::NotTextNode)
}

/// Serializes `node` and its descendants as HTML markup.
pub fn render<W: Write + ?Sized>(node: NodeRef<'_>, w: &mut W) -> io::Result<()> {
    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                render(child, w)?;
            }
        }
        Node::Doctype(doctype) => write!(w, "<!DOCTYPE {}>", doctype.name())?,
        Node::Comment(comment) => write!(w, "<!--{}-->", &**comment)?,
        Node::ProcessingInstruction(pi) => write!(w, "<?{} {}>", &*pi.target, &*pi.data)?,
        Node::Text(text) => {
            let raw = node
                .parent()
                .and_then(element_name)
                .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name));
            if raw {
                w.write_all(text.as_bytes())?;
            } else {
                w.write_all(escape(text).as_bytes())?;
            }
        }
        Node::Element(el) => {
            write!(w, "<{}", el.name())?;
            for (key, val) in el.attrs() {
                write!(w, " {}=\"{}\"", key, escape(val))?;
            }
            if VOID_ELEMENTS.contains(&el.name()) {
                w.write_all(b"/>")?;
                return Ok(());
            }
            w.write_all(b">")?;
            if NEWLINE_PRESERVING_ELEMENTS.contains(&el.name()) {
                let leading_newline = node
                    .first_child()
                    .and_then(|child| child.value().as_text())
                    .is_some_and(|t| t.starts_with('\n'));
                if leading_newline {
                    w.write_all(b"\n")?;
                }
            }
            for child in node.children() {
                render(child, w)?;
            }
            write!(w, "</{}>", el.name())?;
        }
    }
    Ok(())
}

/// Escapes markup-significant characters in text and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}
