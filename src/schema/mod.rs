//! Schemas: which node and mark types exist, which ones each vendor
//! accepts, and how each one maps to HTML.
//!
//! - [`NodeType`] is the attribute-free list of every node `type`.
//! - [`VendorSchema`] is an allow-list over node types and mark kinds.
//! - [`dom`] holds the one node-to-element mapping every serializer uses.

pub mod dom;

pub use dom::{DomSpec, DomTag, block_spec, inline_spec, mark_spec};

use crate::node::{BlockKind, Inline, MarkKind, Node};

// =============================================================================
// NodeType
// =============================================================================

/// Attribute-free node discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    CodeBlock,
    Panel,
    Rule,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    Text,
    HardBreak,
    Mention,
    Emoji,
}

impl NodeType {
    pub const ALL: [NodeType; 17] = [
        NodeType::Paragraph,
        NodeType::Heading,
        NodeType::BulletList,
        NodeType::OrderedList,
        NodeType::ListItem,
        NodeType::Blockquote,
        NodeType::CodeBlock,
        NodeType::Panel,
        NodeType::Rule,
        NodeType::Table,
        NodeType::TableRow,
        NodeType::TableHeader,
        NodeType::TableCell,
        NodeType::Text,
        NodeType::HardBreak,
        NodeType::Mention,
        NodeType::Emoji,
    ];

    impl_type_names!(
        Paragraph => "paragraph",
        Heading => "heading",
        BulletList => "bulletList",
        OrderedList => "orderedList",
        ListItem => "listItem",
        Blockquote => "blockquote",
        CodeBlock => "codeBlock",
        Panel => "panel",
        Rule => "rule",
        Table => "table",
        TableRow => "tableRow",
        TableHeader => "tableHeader",
        TableCell => "tableCell",
        Text => "text",
        HardBreak => "hardBreak",
        Mention => "mention",
        Emoji => "emoji",
    );

    /// Look up a node type by its ADF `type` string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.type_name() == name)
    }

    pub fn of_block(kind: &BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => NodeType::Paragraph,
            BlockKind::Heading { .. } => NodeType::Heading,
            BlockKind::BulletList => NodeType::BulletList,
            BlockKind::OrderedList { .. } => NodeType::OrderedList,
            BlockKind::ListItem => NodeType::ListItem,
            BlockKind::Blockquote => NodeType::Blockquote,
            BlockKind::CodeBlock { .. } => NodeType::CodeBlock,
            BlockKind::Panel { .. } => NodeType::Panel,
            BlockKind::Rule => NodeType::Rule,
            BlockKind::Table => NodeType::Table,
            BlockKind::TableRow => NodeType::TableRow,
            BlockKind::TableHeader => NodeType::TableHeader,
            BlockKind::TableCell => NodeType::TableCell,
        }
    }

    pub fn of_inline(inline: &Inline) -> Self {
        match inline {
            Inline::HardBreak => NodeType::HardBreak,
            Inline::Mention { .. } => NodeType::Mention,
            Inline::Emoji { .. } => NodeType::Emoji,
        }
    }

    pub fn of(node: &Node) -> Self {
        match node {
            Node::Block(b) => Self::of_block(&b.kind),
            Node::Text(_) => NodeType::Text,
            Node::Inline(i) => Self::of_inline(i),
        }
    }
}

/// Look up a mark kind by its ADF `type` string.
pub fn mark_kind_from_name(name: &str) -> Option<MarkKind> {
    MarkKind::ALL.into_iter().find(|k| mark_kind_name(*k) == name)
}

/// ADF `type` string of a mark kind.
pub fn mark_kind_name(kind: MarkKind) -> &'static str {
    match kind {
        MarkKind::Link => "link",
        MarkKind::Em => "em",
        MarkKind::Strong => "strong",
        MarkKind::TextColor => "textColor",
        MarkKind::Strike => "strike",
        MarkKind::SubSup => "subsup",
        MarkKind::Underline => "underline",
        MarkKind::Code => "code",
    }
}

// =============================================================================
// VendorSchema
// =============================================================================

/// Allow-list of node types and mark kinds a vendor format can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorSchema {
    /// Schema name for diagnostics
    pub name: &'static str,
    nodes: &'static [NodeType],
    marks: &'static [MarkKind],
}

impl VendorSchema {
    /// Every node and mark this crate knows.
    pub const DEFAULT: Self = Self {
        name: "default",
        nodes: &NodeType::ALL,
        marks: &MarkKind::ALL,
    };

    /// Bitbucket: no panels; only basic inline formatting and links.
    pub const BITBUCKET: Self = Self {
        name: "bitbucket",
        nodes: &[
            NodeType::Paragraph,
            NodeType::Heading,
            NodeType::BulletList,
            NodeType::OrderedList,
            NodeType::ListItem,
            NodeType::Blockquote,
            NodeType::CodeBlock,
            NodeType::Rule,
            NodeType::Table,
            NodeType::TableRow,
            NodeType::TableHeader,
            NodeType::TableCell,
            NodeType::Text,
            NodeType::HardBreak,
            NodeType::Mention,
            NodeType::Emoji,
        ],
        marks: &[
            MarkKind::Link,
            MarkKind::Em,
            MarkKind::Strong,
            MarkKind::Strike,
            MarkKind::Code,
        ],
    };

    /// Confluence storage format.
    pub const CONFLUENCE: Self = Self {
        name: "confluence",
        ..Self::DEFAULT
    };

    /// Jira rendered wiki markup.
    pub const JIRA: Self = Self {
        name: "jira",
        ..Self::DEFAULT
    };

    pub fn allows_node(&self, node_type: NodeType) -> bool {
        self.nodes.contains(&node_type)
    }

    pub fn allows_block(&self, kind: &BlockKind) -> bool {
        self.allows_node(NodeType::of_block(kind))
    }

    pub fn allows_mark(&self, kind: MarkKind) -> bool {
        self.marks.contains(&kind)
    }
}

impl Default for VendorSchema {
    fn default() -> Self {
        Self::DEFAULT
    }
}
