//! JSON transformer: typed documents to and from ADF JSON.
//!
//! Key order is fixed (`serde_json` is built with `preserve_order`), so
//! pretty-printed output is stable and line diffs between vendors only
//! show real differences.

use serde_json::{Map, Value, json};

use crate::builder::build_fragment;
use crate::error::{AdfError, AdfResult, Malformed};
use crate::node::{ADF_VERSION, Block, BlockKind, Document, Inline, Mark, Node};

/// Shared encoder between typed documents and ADF JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTransformer;

impl JsonTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Encode a document as `{"version", "type": "doc", "content"}`.
    pub fn encode(&self, doc: &Document) -> Value {
        json!({
            "version": doc.version,
            "type": "doc",
            "content": doc.content.iter().map(encode_node).collect::<Vec<_>>(),
        })
    }

    /// Parse ADF JSON into a typed document.
    ///
    /// The root must be an object with `type: "doc"`; `version` defaults
    /// to the current one.
    pub fn parse(&self, value: &Value) -> AdfResult<Document> {
        let obj = value
            .as_object()
            .ok_or_else(|| AdfError::malformed("/", Malformed::WrongShape("a document object")))?;

        match obj.get("type").and_then(Value::as_str) {
            Some("doc") => {}
            Some(other) => {
                return Err(AdfError::malformed(
                    "/type",
                    Malformed::UnknownNodeType(other.to_owned()),
                ));
            }
            None => return Err(AdfError::malformed("/", Malformed::MissingField("type"))),
        }

        let version = match obj.get("version") {
            None | Some(Value::Null) => ADF_VERSION,
            Some(v) => v
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    AdfError::malformed("/version", Malformed::WrongShape("an integer version"))
                })?,
        };

        let content = build_fragment(obj.get("content").unwrap_or(&Value::Null))?;
        Ok(Document { version, content })
    }
}

// =============================================================================
// Nodes
// =============================================================================

fn encode_node(node: &Node) -> Value {
    match node {
        Node::Block(block) => encode_block(block),
        Node::Text(text) => {
            let mut obj = Map::new();
            obj.insert("type".into(), "text".into());
            obj.insert("text".into(), text.content.as_str().into());
            if !text.marks.is_empty() {
                let marks = text.marks.iter().map(encode_mark).collect();
                obj.insert("marks".into(), Value::Array(marks));
            }
            Value::Object(obj)
        }
        Node::Inline(inline) => encode_inline(inline),
    }
}

fn encode_block(block: &Block) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), block.kind.type_name().into());

    let attrs = block_attrs(&block.kind);
    if !attrs.is_empty() {
        obj.insert("attrs".into(), Value::Object(attrs));
    }
    if !block.content.is_empty() {
        let content = block.content.iter().map(encode_node).collect();
        obj.insert("content".into(), Value::Array(content));
    }
    Value::Object(obj)
}

fn block_attrs(kind: &BlockKind) -> Map<String, Value> {
    let mut attrs = Map::new();
    match kind {
        BlockKind::Heading { level } => {
            attrs.insert("level".into(), (*level).into());
        }
        BlockKind::OrderedList { order: Some(order) } => {
            attrs.insert("order".into(), (*order).into());
        }
        BlockKind::CodeBlock { language: Some(language) } => {
            attrs.insert("language".into(), language.as_str().into());
        }
        BlockKind::Panel { panel_type } => {
            attrs.insert("panelType".into(), panel_type.as_str().into());
        }
        _ => {}
    }
    attrs
}

fn encode_inline(inline: &Inline) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), inline.type_name().into());

    let mut attrs = Map::new();
    match inline {
        Inline::HardBreak => {}
        Inline::Mention { id, text } => {
            attrs.insert("id".into(), id.as_str().into());
            if let Some(text) = text {
                attrs.insert("text".into(), text.as_str().into());
            }
        }
        Inline::Emoji { short_name, text } => {
            attrs.insert("shortName".into(), short_name.as_str().into());
            if let Some(text) = text {
                attrs.insert("text".into(), text.as_str().into());
            }
        }
    }
    if !attrs.is_empty() {
        obj.insert("attrs".into(), Value::Object(attrs));
    }
    Value::Object(obj)
}

fn encode_mark(mark: &Mark) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), mark.type_name().into());

    let attrs = match mark {
        Mark::Link { href, title } => {
            let mut attrs = Map::new();
            attrs.insert("href".into(), href.as_str().into());
            if let Some(title) = title {
                attrs.insert("title".into(), title.as_str().into());
            }
            Some(attrs)
        }
        Mark::TextColor { color } => {
            Some(Map::from_iter([("color".to_owned(), Value::from(color.as_str()))]))
        }
        Mark::SubSup(kind) => {
            Some(Map::from_iter([("type".to_owned(), Value::from(kind.as_str()))]))
        }
        Mark::Em | Mark::Strong | Mark::Strike | Mark::Underline | Mark::Code => None,
    };
    if let Some(attrs) = attrs {
        obj.insert("attrs".into(), Value::Object(attrs));
    }
    Value::Object(obj)
}
