//! Block nodes - containers with ordered children.

use std::fmt;
use std::str::FromStr;

use super::{Children, Node};

// =============================================================================
// BlockKind
// =============================================================================

/// Block node variants and their attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading { level: u8 },
    BulletList,
    OrderedList { order: Option<u32> },
    ListItem,
    Blockquote,
    CodeBlock { language: Option<String> },
    Panel { panel_type: PanelType },
    Rule,
    Table,
    TableRow,
    TableHeader,
    TableCell,
}

impl BlockKind {
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
    );

    /// Whether this block holds inline content (text, atoms) directly.
    pub fn holds_inline(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph | BlockKind::Heading { .. } | BlockKind::CodeBlock { .. }
        )
    }

    /// Whether this block is a leaf with no content at all.
    pub fn is_leaf(&self) -> bool {
        matches!(self, BlockKind::Rule)
    }
}

// =============================================================================
// PanelType
// =============================================================================

/// Panel flavours understood by the ADF `panel` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelType {
    #[default]
    Info,
    Note,
    Tip,
    Warning,
    Error,
    Success,
}

impl PanelType {
    pub const ALL: [PanelType; 6] = [
        PanelType::Info,
        PanelType::Note,
        PanelType::Tip,
        PanelType::Warning,
        PanelType::Error,
        PanelType::Success,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PanelType::Info => "info",
            PanelType::Note => "note",
            PanelType::Tip => "tip",
            PanelType::Warning => "warning",
            PanelType::Error => "error",
            PanelType::Success => "success",
        }
    }
}

impl fmt::Display for PanelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown panel type `{s}`"))
    }
}

// =============================================================================
// Block
// =============================================================================

/// Block container node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Node variant and attributes
    pub kind: BlockKind,
    /// Child nodes
    pub content: Children,
}

impl Block {
    /// Create an empty block.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            content: Children::new(),
        }
    }

    /// Builder: append children.
    pub fn with_content(mut self, content: impl IntoIterator<Item = Node>) -> Self {
        self.content.extend(content);
        self
    }
}
