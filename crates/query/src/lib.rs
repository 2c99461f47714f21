// ABOUTME: Main library entry point for the digests-query HTML node query layer.
// ABOUTME: Re-exports the public API: NodeSet, Strictness, Tag, TagQuery, QueryError, ErrorKind.

//! digests-query - fluent filtering and typed extraction over parsed HTML.
//!
//! A [`NodeSet`] is an ordered set of node references into a
//! [`scraper::Html`] tree. Filters narrow it, collapse resolves it to one
//! node, and extractors coerce that node's text or attributes to values.
//! Errors ride along inside the set, so a chain can be written without
//! checking each step.
//!
//! # Example
//!
//! ```
//! use digests_query::{parse_document, NodeSet, Strictness};
//!
//! let doc = parse_document(r#"<div id="stats"><span class="views">Views: 1,234</span></div>"#);
//! let views = NodeSet::all(&doc)
//!     .span()
//!     .contains_class("views")
//!     .scan_int("Views: %d", Strictness::Strict);
//! assert_eq!(views, Ok(1234));
//! ```

pub mod dom;
pub mod error;
pub mod node_set;
pub mod scan;
pub mod source;
pub mod tag;

pub use crate::dom::NodeRef;
pub use crate::error::{ErrorKind, QueryError, Result};
pub use crate::node_set::{NodeSet, Strictness};
pub use crate::scan::ScanFormat;
pub use crate::source::{parse_document, parse_fragment};
pub use crate::tag::{Tag, TagQuery};
