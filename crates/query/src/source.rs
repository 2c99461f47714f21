// ABOUTME: Seeding NodeSets from parsed documents.
// ABOUTME: Wraps scraper's document and fragment parsers and builds root or all-node starting sets.

use scraper::Html;

use crate::node_set::NodeSet;

/// Parses a full HTML document.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Parses an HTML fragment (no implied `<head>`/`<body>`).
pub fn parse_fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

impl<'a> NodeSet<'a> {
    /// A set holding only the document node of `doc`.
    pub fn root(doc: &'a Html) -> Self {
        NodeSet::from_nodes([doc.tree.root()])
    }

    /// Every node of `doc` in document order, starting with the document node.
    pub fn all(doc: &'a Html) -> Self {
        NodeSet::from_nodes(doc.tree.root().descendants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_set::Strictness;

    #[test]
    fn test_root_is_single_document_node() {
        let doc = parse_document("<p>one</p><p>two</p>");
        let root = NodeSet::root(&doc);
        assert_eq!(root.len(), 1);
        assert_eq!(root.text(Strictness::Strict), Ok("onetwo".to_string()));
    }

    #[test]
    fn test_all_lists_nodes_in_document_order() {
        let doc = parse_fragment("<ul><li>a</li><li>b</li></ul>");
        let texts: Vec<String> = NodeSet::all(&doc)
            .filter(|n| n.value().is_text())
            .iter()
            .map(crate::dom::text_of)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
