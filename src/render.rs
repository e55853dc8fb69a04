//! HTML serialization for ADF documents
//!
//! Renders typed document fragments straight to HTML strings, producing the
//! markup a browser would report as `innerHTML` for the DOM the schema
//! mapping describes. No live DOM is involved.

use serde_json::Value;
use tracing::debug;

use crate::attr::Attrs;
use crate::builder::build_fragment;
use crate::error::AdfResult;
use crate::node::{Block, Document, Mark, Node};
use crate::normalize::normalize;
use crate::schema::{DomSpec, DomTag, block_spec, inline_spec, mark_spec};

// =============================================================================
// Entry points
// =============================================================================

/// Render an ADF JSON document to normalized HTML.
///
/// `None` and JSON `null` render as the empty string, as does a document
/// without `content`. The input is only borrowed; a malformed document
/// fails with [`AdfError::MalformedDocument`](crate::AdfError) and produces
/// no output.
pub fn to_html(doc: Option<&Value>) -> AdfResult<String> {
    let Some(doc) = doc.filter(|d| !d.is_null()) else {
        return Ok(String::new());
    };

    let content = doc.get("content").unwrap_or(&Value::Null);
    let fragment = build_fragment(content)?;
    let html = normalize(&serialize_fragment(&fragment));

    debug!(
        top_level_nodes = fragment.len(),
        html_bytes = html.len(),
        "rendered ADF document to HTML"
    );
    Ok(html)
}

/// Render an already typed document to normalized HTML.
pub fn to_html_document(doc: &Document) -> String {
    normalize(&serialize_fragment(&doc.content))
}

/// Render a fragment to HTML without normalization.
pub fn serialize_fragment(nodes: &[Node]) -> String {
    let mut output = String::new();
    render_content(nodes, &mut output);
    output
}

// =============================================================================
// Tree walk
// =============================================================================

/// Render a sibling list. Inline runs keep shared marks open across
/// siblings; blocks render one after another.
fn render_content(nodes: &[Node], output: &mut String) {
    let mut open: Vec<&Mark> = Vec::new();

    for node in nodes {
        let marks: &[Mark] = match node {
            Node::Text(text) => &text.marks,
            _ => &[],
        };

        // Longest prefix of the open marks this node continues
        let keep = open
            .iter()
            .zip(marks)
            .take_while(|(active, next)| **active == *next)
            .count();

        while open.len() > keep {
            if let Some(mark) = open.pop() {
                close_tag(mark_spec(mark).name, output);
            }
        }
        for mark in &marks[keep..] {
            open_tag(&mark_spec(mark), output);
            open.push(mark);
        }

        render_node(node, output);
    }

    while let Some(mark) = open.pop() {
        close_tag(mark_spec(mark).name, output);
    }
}

fn render_node(node: &Node, output: &mut String) {
    match node {
        Node::Block(block) => render_block(block, output),
        Node::Text(text) => escape_text_into(&text.content, output),
        Node::Inline(inline) => render_spec(&inline_spec(inline), &[], output),
    }
}

fn render_block(block: &Block, output: &mut String) {
    render_spec(&block_spec(&block.kind), &block.content, output);
}

/// Open the spec's tags, write its text or the content, close in reverse.
fn render_spec(spec: &DomSpec, content: &[Node], output: &mut String) {
    for tag in &spec.tags {
        open_tag(tag, output);
    }

    if let Some(text) = &spec.text {
        escape_text_into(text, output);
    } else {
        render_content(content, output);
    }

    for tag in spec.tags.iter().rev() {
        if !is_void_element(tag.name) {
            close_tag(tag.name, output);
        }
    }
}

fn open_tag(tag: &DomTag, output: &mut String) {
    output.push('<');
    output.push_str(tag.name);
    render_attrs(&tag.attrs, output);
    output.push('>');
}

fn close_tag(name: &str, output: &mut String) {
    output.push_str("</");
    output.push_str(name);
    output.push('>');
}

/// Render attributes to HTML.
fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        escape_attr_into(value, output);
        output.push('"');
    }
}

// =============================================================================
// Escaping
// =============================================================================

/// Escape text content the way `innerHTML` serializes it.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    escape_text_into(s, &mut result);
    result
}

fn escape_text_into(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape an attribute value the way `innerHTML` serializes it.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    escape_attr_into(s, &mut result);
    result
}

fn escape_attr_into(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Check if element is a void element (no closing tag).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Malformed;
    use crate::node::{BlockKind, Inline, PanelType, Text};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn para(content: impl IntoIterator<Item = Node>) -> Node {
        Node::block(BlockKind::Paragraph, content)
    }

    fn marked(text: &str, marks: impl IntoIterator<Item = Mark>) -> Node {
        let mut t = Text::new(text);
        for mark in marks {
            t = t.with_mark(mark);
        }
        Node::Text(t)
    }

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(to_html(None).unwrap(), "");
        assert_eq!(to_html(Some(&Value::Null)).unwrap(), "");
        assert_eq!(to_html(Some(&json!({"type": "doc"}))).unwrap(), "");
        assert_eq!(to_html(Some(&json!({"type": "doc", "content": null}))).unwrap(), "");
    }

    #[test]
    fn test_bold_then_plain() {
        let doc = json!({
            "version": 1,
            "type": "doc",
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "qwe", "marks": [{"type": "strong"}]},
                {"type": "text", "text": " text"}
            ]}]
        });
        assert_eq!(to_html(Some(&doc)).unwrap(), "<p><strong>qwe</strong> text</p>");
    }

    #[test]
    fn test_output_is_normalized() {
        let doc = json!({"type": "doc", "content": [{"type": "paragraph", "content": [
            {"type": "text", "text": "a", "marks": [{"type": "em"}]},
            {"type": "hardBreak"},
            {"type": "text", "text": "b"}
        ]}]});
        assert_eq!(to_html(Some(&doc)).unwrap(), "<p><i>a</i><br />b</p>");
    }

    #[test]
    fn test_malformed_propagates() {
        let doc = json!({"type": "doc", "content": [{"type": "marquee"}]});
        let err = to_html(Some(&doc)).unwrap_err();
        assert_eq!(err.reason(), &Malformed::UnknownNodeType("marquee".into()));
    }

    #[test]
    fn test_top_level_text_is_rejected() {
        let doc = json!({"type": "doc", "content": [{"type": "text", "text": "top"}]});
        let err = to_html(Some(&doc)).unwrap_err();
        assert_eq!(err.path(), "/0");
        assert_eq!(
            err.reason(),
            &Malformed::UnexpectedChild { parent: "doc", child: "text" }
        );
    }

    #[test]
    fn test_deterministic() {
        let doc = json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "T"}]},
            {"type": "rule"}
        ]});
        let first = to_html(Some(&doc)).unwrap();
        assert_eq!(first, "<h1>T</h1><hr>");
        assert_eq!(to_html(Some(&doc)).unwrap(), first);
    }

    #[test]
    fn test_marks_stay_open_across_siblings() {
        let nodes = [para([
            marked("a", [Mark::link("/x")]),
            marked("b", [Mark::link("/x"), Mark::Strong]),
            marked("c", [Mark::link("/x")]),
        ])];
        assert_eq!(
            serialize_fragment(&nodes),
            r#"<p><a href="/x">a<strong>b</strong>c</a></p>"#
        );
    }

    #[test]
    fn test_mark_order_follows_rank() {
        let nodes = [para([
            marked("a", [Mark::Strong]),
            marked("b", [Mark::Strong, Mark::Em]),
        ])];
        // em ranks before strong, so strong cannot stay open around it
        assert_eq!(
            serialize_fragment(&nodes),
            "<p><strong>a</strong><em><strong>b</strong></em></p>"
        );
    }

    #[test]
    fn test_marks_close_before_atoms() {
        let nodes = [para([
            marked("a", [Mark::Code]),
            Node::Inline(Inline::HardBreak),
            marked("b", [Mark::Code]),
        ])];
        assert_eq!(serialize_fragment(&nodes), "<p><code>a</code><br><code>b</code></p>");
    }

    #[test]
    fn test_escaping() {
        let nodes = [para([
            Node::text("a < b & c > d\u{a0}e"),
            marked("l", [Mark::Link { href: "/?a=1&b=\"2\"".into(), title: None }]),
        ])];
        assert_eq!(
            serialize_fragment(&nodes),
            r#"<p>a &lt; b &amp; c &gt; d&nbsp;e<a href="/?a=1&amp;b=&quot;2&quot;">l</a></p>"#
        );
    }

    #[test]
    fn test_block_mapping() {
        let doc = Document::new([
            Node::block(
                BlockKind::OrderedList { order: Some(3) },
                [Node::block(BlockKind::ListItem, [para([Node::text("x")])])],
            ),
            Node::block(
                BlockKind::CodeBlock { language: Some("rust".into()) },
                [Node::text("fn main() {}\n")],
            ),
            Node::block(
                BlockKind::Panel { panel_type: PanelType::Note },
                [para([Node::text("n")])],
            ),
            Node::block(
                BlockKind::Table,
                [Node::block(
                    BlockKind::TableRow,
                    [Node::block(BlockKind::TableHeader, [para([Node::text("h")])])],
                )],
            ),
        ]);

        assert_eq!(
            to_html_document(&doc),
            concat!(
                r#"<ol class="ak-ol" start="3"><li><p>x</p></li></ol>"#,
                r#"<pre><code data-language="rust">fn main() {}"#,
                "\n</code></pre>",
                r#"<div data-panel-type="note"><p>n</p></div>"#,
                "<table><tbody><tr><th><p>h</p></th></tr></tbody></table>",
            )
        );
    }

    #[test]
    fn test_atoms_render_text() {
        let nodes = [para([
            Node::Inline(Inline::Mention { id: "42".into(), text: Some("@Ana".into()) }),
            Node::text(" "),
            Node::Inline(Inline::Emoji { short_name: ":smile:".into(), text: None }),
        ])];
        assert_eq!(
            serialize_fragment(&nodes),
            concat!(
                r#"<p><span data-mention-id="42" contenteditable="false">@Ana</span> "#,
                r#"<span data-emoji-short-name=":smile:">:smile:</span></p>"#,
            )
        );
    }

    #[test]
    fn test_escape_helpers() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_attr("a \"b\" <c>"), "a &quot;b&quot; <c>");
    }
}
