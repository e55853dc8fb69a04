//! Typed ADF document tree.
//!
//! This module provides `Document`, `Node`, `Block`, `Inline`, `Text` and
//! `Mark`: a closed set of node variants that every serializer handles
//! exhaustively. Anything outside this set is rejected when a tree is
//! built from JSON.
//!
//! # Layout
//!
//! - Blocks are boxed so `Node` stays small enough to sit inline in
//!   [`Children`].
//! - Text runs carry their marks, sorted by schema rank.

mod block;
mod document;
mod inline;
mod mark;
mod text;

pub use block::{Block, BlockKind, PanelType};
pub use document::{ADF_VERSION, Document};
pub use inline::Inline;
pub use mark::{Mark, MarkKind, Marks, SubSup, add_to_set, normalize_set};
pub use text::Text;

use smallvec::SmallVec;

/// Node in an ADF tree - a block container, a text run, or an inline atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Block(Box<Block>),
    Text(Text),
    Inline(Inline),
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 4]>;

impl Node {
    // Generates for each variant (block -> Block, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(block, text, inline);

    /// Wrap a block.
    pub fn block(kind: BlockKind, content: impl IntoIterator<Item = Node>) -> Self {
        Node::Block(Box::new(Block::new(kind).with_content(content)))
    }

    /// Create an unmarked text node.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    /// ADF `type` discriminator of this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Block(b) => b.kind.type_name(),
            Node::Text(_) => "text",
            Node::Inline(i) => i.type_name(),
        }
    }

    /// Whether this node sits in inline content (text and atoms).
    pub fn is_inline_content(&self) -> bool {
        !self.is_block()
    }

    /// Child nodes (empty for text and atoms).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Block(b) => &b.content,
            _ => &[],
        }
    }

}

/// Append `node` to `children`, merging it into a preceding text run with
/// the same marks.
pub(crate) fn push_merging(children: &mut Children, node: Node) {
    if let Node::Text(next) = &node
        && let Some(Node::Text(prev)) = children.last_mut()
        && prev.marks == next.marks
    {
        prev.content.push_str(&next.content);
        return;
    }
    children.push(node);
}
