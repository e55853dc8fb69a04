//! Document type and related utilities
//!
//! The `doc` root of an ADF tree and its depth-first traversal.

use super::{Children, Node};

/// ADF schema version written by the encoder.
pub const ADF_VERSION: u32 = 1;

// =============================================================================
// Document
// =============================================================================

/// Root document container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// ADF schema version
    pub version: u32,
    /// Top-level blocks (the document fragment)
    pub content: Children,
}

impl Document {
    /// Create a document from top-level nodes
    pub fn new(content: impl IntoIterator<Item = Node>) -> Self {
        Self {
            version: ADF_VERSION,
            content: content.into_iter().collect(),
        }
    }

    /// Create an empty document
    pub fn empty() -> Self {
        Self::new([])
    }

    /// Check if the document has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Count all nodes below the root
    pub fn node_count(&self) -> usize {
        self.iter_nodes().count()
    }

    /// Iterate over all nodes (depth-first, pre-order)
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        NodeIterator::new(&self.content)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// NodeIterator
// =============================================================================

/// Depth-first iterator over all nodes of a fragment
struct NodeIterator<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> NodeIterator<'a> {
    fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for NodeIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BlockKind, Inline};

    fn sample() -> Document {
        Document::new([
            Node::block(BlockKind::Heading { level: 1 }, [Node::text("Title")]),
            Node::block(
                BlockKind::BulletList,
                [Node::block(
                    BlockKind::ListItem,
                    [Node::block(
                        BlockKind::Paragraph,
                        [Node::text("one"), Node::Inline(Inline::HardBreak)],
                    )],
                )],
            ),
        ])
    }

    #[test]
    fn test_document_basic() {
        let doc = sample();
        assert_eq!(doc.version, ADF_VERSION);
        assert!(!doc.is_empty());
        assert!(Document::default().is_empty());
    }

    #[test]
    fn test_iter_nodes_preorder() {
        let doc = sample();
        let names: Vec<_> = doc.iter_nodes().map(Node::type_name).collect();
        assert_eq!(
            names,
            vec!["heading", "text", "bulletList", "listItem", "paragraph", "text", "hardBreak"]
        );
        assert_eq!(doc.node_count(), 7);
    }
}
