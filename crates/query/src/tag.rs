// ABOUTME: Tag tokens for element matching and the TagQuery union accepted by NodeSet::element.
// ABOUTME: A Tag wraps the parser's interned element name, so matching is an atom comparison.

use std::fmt;
use std::str::FromStr;

use html5ever::{local_name, LocalName};

use crate::error::QueryError;

/// Element names defined by HTML, including obsolete ones parsers still produce.
const HTML_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "address", "applet", "area", "article", "aside", "audio", "b",
    "base", "basefont", "bdi", "bdo", "bgsound", "big", "blink", "blockquote", "body", "br",
    "button", "canvas", "caption", "center", "cite", "code", "col", "colgroup", "data",
    "datalist", "dd", "del", "details", "dfn", "dialog", "dir", "div", "dl", "dt", "em",
    "embed", "fieldset", "figcaption", "figure", "font", "footer", "form", "frame",
    "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html",
    "i", "iframe", "image", "img", "input", "ins", "isindex", "kbd", "keygen", "label",
    "legend", "li", "link", "listing", "main", "map", "mark", "marquee", "math", "menu",
    "menuitem", "meta", "meter", "multicol", "nav", "nextid", "nobr", "noembed", "noframes",
    "noscript", "object", "ol", "optgroup", "option", "output", "p", "param", "picture",
    "plaintext", "pre", "progress", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp",
    "script", "search", "section", "select", "slot", "small", "source", "spacer", "span",
    "strike", "strong", "style", "sub", "summary", "sup", "svg", "table", "tbody", "td",
    "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track", "tt",
    "u", "ul", "var", "video", "wbr", "xmp",
];

/// Precomputed identity of an HTML element name.
///
/// Holds the same interned atom the parser stores on each element, so
/// comparing against a parsed element never looks at the characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(LocalName);

impl Tag {
    pub const A: Tag = Tag(local_name!("a"));
    pub const BODY: Tag = Tag(local_name!("body"));
    pub const DIV: Tag = Tag(local_name!("div"));
    pub const H1: Tag = Tag(local_name!("h1"));
    pub const H2: Tag = Tag(local_name!("h2"));
    pub const H3: Tag = Tag(local_name!("h3"));
    pub const H4: Tag = Tag(local_name!("h4"));
    pub const H5: Tag = Tag(local_name!("h5"));
    pub const H6: Tag = Tag(local_name!("h6"));
    pub const IMG: Tag = Tag(local_name!("img"));
    pub const LI: Tag = Tag(local_name!("li"));
    pub const NAV: Tag = Tag(local_name!("nav"));
    pub const OL: Tag = Tag(local_name!("ol"));
    pub const P: Tag = Tag(local_name!("p"));
    pub const SPAN: Tag = Tag(local_name!("span"));
    pub const TABLE: Tag = Tag(local_name!("table"));
    pub const TD: Tag = Tag(local_name!("td"));
    pub const TH: Tag = Tag(local_name!("th"));
    pub const TR: Tag = Tag(local_name!("tr"));
    pub const UL: Tag = Tag(local_name!("ul"));

    /// Returns the lowercase element name for this tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local_name(&self) -> &LocalName {
        &self.0
    }

    /// Returns true if `name` is this tag's interned element name.
    pub fn matches(&self, name: &LocalName) -> bool {
        self.0 == *name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = QueryError;

    /// Accepts any HTML element name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if HTML_ELEMENTS.binary_search(&lower.as_str()).is_ok() {
            Ok(Tag(LocalName::from(lower)))
        } else {
            Err(QueryError::UnsupportedTag(s.to_string()))
        }
    }
}

/// What `NodeSet::element` compares element nodes against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagQuery {
    /// Exact, case-sensitive element name.
    Name(String),
    /// Precomputed tag token.
    Tag(Tag),
}

impl TagQuery {
    /// Returns true if an element whose local name is `name` satisfies this query.
    pub fn matches(&self, name: &LocalName) -> bool {
        match self {
            TagQuery::Name(n) => n.as_str() == &**name,
            TagQuery::Tag(tag) => tag.matches(name),
        }
    }
}

impl From<Tag> for TagQuery {
    fn from(tag: Tag) -> Self {
        TagQuery::Tag(tag)
    }
}

impl From<&str> for TagQuery {
    fn from(name: &str) -> Self {
        TagQuery::Name(name.to_string())
    }
}

impl From<String> for TagQuery {
    fn from(name: String) -> Self {
        TagQuery::Name(name)
    }
}
