//! Document-tree builder: ADF JSON to typed nodes.
//!
//! The builder only borrows its input; every string in the resulting tree
//! is a fresh copy. Anything outside the supported node set is rejected
//! with [`AdfError::MalformedDocument`], carrying a JSON-pointer style path
//! to the offending value.

use serde_json::{Map, Value};

use crate::error::{AdfError, AdfResult, Malformed};
use crate::node::{
    BlockKind, Children, Inline, Mark, MarkKind, Marks, Node, PanelType, SubSup, Text,
    normalize_set, push_merging,
};
use crate::schema::{NodeType, mark_kind_from_name};

/// Path reported for problems with the fragment value itself.
const ROOT_PATH: &str = "/";

// =============================================================================
// Fragment
// =============================================================================

/// Build a fragment from the `content` array of a document.
///
/// `null` yields an empty fragment. The fragment holds blocks only; an
/// inline node at the top level is malformed. Adjacent text runs with
/// equal marks are merged.
pub fn build_fragment(value: &Value) -> AdfResult<Children> {
    build_children(value, "", ROOT_PATH, true)
}

fn build_children(
    value: &Value,
    base: &str,
    shape_path: &str,
    top_level: bool,
) -> AdfResult<Children> {
    let items = match value {
        Value::Null => return Ok(Children::new()),
        Value::Array(items) => items,
        _ => {
            return Err(AdfError::malformed(
                shape_path,
                Malformed::WrongShape("an array of nodes"),
            ));
        }
    };

    let mut children = Children::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("{base}/{i}");
        let node = build_node(item, &path)?;
        if top_level && node.is_inline_content() {
            return Err(AdfError::malformed(
                path,
                Malformed::UnexpectedChild {
                    parent: "doc",
                    child: node.type_name(),
                },
            ));
        }
        push_merging(&mut children, node);
    }
    Ok(children)
}

// =============================================================================
// Nodes
// =============================================================================

fn build_node(value: &Value, path: &str) -> AdfResult<Node> {
    let obj = value
        .as_object()
        .ok_or_else(|| AdfError::malformed(path, Malformed::WrongShape("a node object")))?;

    let type_name = match obj.get("type") {
        None => return Err(AdfError::malformed(path, Malformed::MissingField("type"))),
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(AdfError::malformed(
                format!("{path}/type"),
                Malformed::WrongShape("a string"),
            ));
        }
    };

    let node_type = NodeType::from_name(type_name).ok_or_else(|| {
        AdfError::malformed(path, Malformed::UnknownNodeType(type_name.to_owned()))
    })?;

    let attrs = AttrReader::new(obj, path)?;

    let kind = match node_type {
        NodeType::Text => return build_text(obj, path).map(Node::Text),
        NodeType::HardBreak => return Ok(Node::Inline(Inline::HardBreak)),
        NodeType::Mention => {
            return Ok(Node::Inline(Inline::Mention {
                id: attrs.required_str("id")?.to_owned(),
                text: attrs.optional_str("text")?.map(str::to_owned),
            }));
        }
        NodeType::Emoji => {
            return Ok(Node::Inline(Inline::Emoji {
                short_name: attrs.required_str("shortName")?.to_owned(),
                text: attrs.optional_str("text")?.map(str::to_owned),
            }));
        }
        NodeType::Paragraph => BlockKind::Paragraph,
        NodeType::Heading => {
            let level = attrs.required_u64("level")?;
            if !(1..=6).contains(&level) {
                return Err(attrs.invalid("level", "must be between 1 and 6"));
            }
            BlockKind::Heading { level: level as u8 }
        }
        NodeType::BulletList => BlockKind::BulletList,
        NodeType::OrderedList => {
            let order = attrs
                .optional_u64("order")?
                .map(|o| u32::try_from(o).map_err(|_| attrs.invalid("order", "out of range")))
                .transpose()?;
            BlockKind::OrderedList { order }
        }
        NodeType::ListItem => BlockKind::ListItem,
        NodeType::Blockquote => BlockKind::Blockquote,
        NodeType::CodeBlock => BlockKind::CodeBlock {
            language: attrs.optional_str("language")?.map(str::to_owned),
        },
        NodeType::Panel => {
            let panel_type = match attrs.optional_str("panelType")? {
                Some(s) => s
                    .parse::<PanelType>()
                    .map_err(|msg| attrs.invalid("panelType", msg))?,
                None => PanelType::default(),
            };
            BlockKind::Panel { panel_type }
        }
        NodeType::Rule => BlockKind::Rule,
        NodeType::Table => BlockKind::Table,
        NodeType::TableRow => BlockKind::TableRow,
        NodeType::TableHeader => BlockKind::TableHeader,
        NodeType::TableCell => BlockKind::TableCell,
    };

    let content_path = format!("{path}/content");
    let content = obj.get("content").unwrap_or(&Value::Null);
    let children = build_children(content, &content_path, &content_path, false)?;
    check_content(&kind, &children, path)?;
    Ok(Node::block(kind, children))
}

/// Inline-holding blocks take only inline content, containers only blocks,
/// leaves nothing.
fn check_content(kind: &BlockKind, children: &[Node], path: &str) -> AdfResult<()> {
    let misplaced = children.iter().position(|child| {
        if kind.is_leaf() {
            true
        } else if kind.holds_inline() {
            !child.is_inline_content()
        } else {
            child.is_inline_content()
        }
    });

    match misplaced {
        Some(i) => Err(AdfError::malformed(
            format!("{path}/content/{i}"),
            Malformed::UnexpectedChild {
                parent: kind.type_name(),
                child: children[i].type_name(),
            },
        )),
        None => Ok(()),
    }
}

fn build_text(obj: &Map<String, Value>, path: &str) -> AdfResult<Text> {
    let content = match obj.get("text") {
        None => return Err(AdfError::malformed(path, Malformed::MissingField("text"))),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(AdfError::malformed(path, Malformed::EmptyText));
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(AdfError::malformed(
                format!("{path}/text"),
                Malformed::WrongShape("a string"),
            ));
        }
    };

    let marks = build_marks(obj.get("marks").unwrap_or(&Value::Null), path)?;
    Ok(Text::new(content).with_marks(marks))
}

// =============================================================================
// Marks
// =============================================================================

fn build_marks(value: &Value, path: &str) -> AdfResult<Marks> {
    let items = match value {
        Value::Null => return Ok(Marks::new()),
        Value::Array(items) => items,
        _ => {
            return Err(AdfError::malformed(
                format!("{path}/marks"),
                Malformed::WrongShape("an array of marks"),
            ));
        }
    };

    let mut marks = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        marks.push(build_mark(item, &format!("{path}/marks/{i}"))?);
    }
    Ok(normalize_set(marks))
}

fn build_mark(value: &Value, path: &str) -> AdfResult<Mark> {
    let obj = value
        .as_object()
        .ok_or_else(|| AdfError::malformed(path, Malformed::WrongShape("a mark object")))?;

    let type_name = match obj.get("type") {
        None => return Err(AdfError::malformed(path, Malformed::MissingField("type"))),
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(AdfError::malformed(
                format!("{path}/type"),
                Malformed::WrongShape("a string"),
            ));
        }
    };

    let kind = mark_kind_from_name(type_name).ok_or_else(|| {
        AdfError::malformed(path, Malformed::UnknownMarkType(type_name.to_owned()))
    })?;

    let attrs = AttrReader::new(obj, path)?;
    let mark = match kind {
        MarkKind::Link => Mark::Link {
            href: attrs.required_str("href")?.to_owned(),
            title: attrs.optional_str("title")?.map(str::to_owned),
        },
        MarkKind::Em => Mark::Em,
        MarkKind::Strong => Mark::Strong,
        MarkKind::TextColor => Mark::TextColor {
            color: attrs.required_str("color")?.to_owned(),
        },
        MarkKind::Strike => Mark::Strike,
        MarkKind::SubSup => match attrs.required_str("type")? {
            "sub" => Mark::SubSup(SubSup::Sub),
            "sup" => Mark::SubSup(SubSup::Sup),
            other => {
                return Err(attrs.invalid("type", format!("expected `sub` or `sup`, got `{other}`")));
            }
        },
        MarkKind::Underline => Mark::Underline,
        MarkKind::Code => Mark::Code,
    };
    Ok(mark)
}

// =============================================================================
// AttrReader
// =============================================================================

/// Typed access to a node's `attrs` object. Unknown keys are ignored;
/// `null` counts as absent.
struct AttrReader<'a> {
    attrs: Option<&'a Map<String, Value>>,
    path: &'a str,
}

impl<'a> AttrReader<'a> {
    fn new(obj: &'a Map<String, Value>, path: &'a str) -> AdfResult<Self> {
        let attrs = match obj.get("attrs") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(AdfError::malformed(
                    format!("{path}/attrs"),
                    Malformed::WrongShape("an attrs object"),
                ));
            }
        };
        Ok(Self { attrs, path })
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.attrs
            .and_then(|map| map.get(name))
            .filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &'static str, message: impl Into<String>) -> AdfError {
        AdfError::malformed(
            format!("{}/attrs/{name}", self.path),
            Malformed::invalid_attr(name, message),
        )
    }

    fn missing(&self, name: &'static str) -> AdfError {
        AdfError::malformed(format!("{}/attrs", self.path), Malformed::MissingField(name))
    }

    fn optional_str(&self, name: &'static str) -> AdfResult<Option<&'a str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.invalid(name, "expected a string")),
        }
    }

    fn required_str(&self, name: &'static str) -> AdfResult<&'a str> {
        self.optional_str(name)?.ok_or_else(|| self.missing(name))
    }

    fn optional_u64(&self, name: &'static str) -> AdfResult<Option<u64>> {
        match self.get(name) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.invalid(name, "expected a non-negative integer")),
        }
    }

    fn required_u64(&self, name: &'static str) -> AdfResult<u64> {
        self.optional_u64(name)?.ok_or_else(|| self.missing(name))
    }
}
