//! Shared HTML reader.
//!
//! Walks a `scraper` fragment and builds a document, asking the vendor
//! transformer for element rules first and falling back to the generic
//! mapping. Whitespace handling follows the usual rich-text editor
//! conventions: runs collapse to one space, a space is dropped at the
//! start of a block, after a hard break or after a space, and trailing
//! space is trimmed when the block closes.

use std::mem;

use scraper::{ElementRef, Html, Node as HtmlNode};
use tracing::trace;

use super::{ElementRule, Transformer};
use crate::node::{
    BlockKind, Children, Document, Inline, Mark, Marks, Node, PanelType, SubSup, Text, add_to_set,
    push_merging,
};
use crate::schema::{NodeType, VendorSchema};

/// Elements whose content is never document text.
const IGNORED_TAGS: &[&str] = &["script", "style", "head", "title", "noscript", "template"];

/// Unknown elements that still end an open paragraph.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "body", "center", "details", "dd", "dir", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "frameset", "header", "hgroup", "main",
    "menu", "nav", "section", "summary",
];

/// Parse `html` with `transformer`'s rules.
pub fn read_document<T: Transformer + ?Sized>(transformer: &T, html: &str) -> Document {
    let source = transformer.preprocess(html);
    let fragment = Html::parse_fragment(&source);

    let reader = Reader {
        transformer,
        schema: transformer.schema(),
    };
    let mut sink = BlockSink::default();
    reader.read_blocks(fragment.root_element(), &Marks::new(), &mut sink);
    Document::new(sink.finish())
}

// =============================================================================
// Generic element mapping
// =============================================================================

/// Rule for an element when the vendor has nothing specific to say.
pub fn generic_rule(el: ElementRef<'_>) -> ElementRule {
    let element = el.value();
    let name = element.name();

    match name {
        "p" => ElementRule::Block(BlockKind::Paragraph),
        "h1" => ElementRule::Block(BlockKind::Heading { level: 1 }),
        "h2" => ElementRule::Block(BlockKind::Heading { level: 2 }),
        "h3" => ElementRule::Block(BlockKind::Heading { level: 3 }),
        "h4" => ElementRule::Block(BlockKind::Heading { level: 4 }),
        "h5" => ElementRule::Block(BlockKind::Heading { level: 5 }),
        "h6" => ElementRule::Block(BlockKind::Heading { level: 6 }),
        "ul" => ElementRule::Block(BlockKind::BulletList),
        "ol" => ElementRule::Block(BlockKind::OrderedList {
            order: element.attr("start").and_then(|s| s.trim().parse().ok()),
        }),
        "li" => ElementRule::Block(BlockKind::ListItem),
        "blockquote" => ElementRule::Block(BlockKind::Blockquote),
        "pre" => code_block_rule(el, code_language(el)),
        "hr" => ElementRule::Block(BlockKind::Rule),
        "br" => ElementRule::Atom(Inline::HardBreak),
        "table" => ElementRule::Block(BlockKind::Table),
        "tr" => ElementRule::Block(BlockKind::TableRow),
        "th" => ElementRule::Block(BlockKind::TableHeader),
        "td" => ElementRule::Block(BlockKind::TableCell),
        "thead" | "tbody" | "tfoot" => ElementRule::Transparent,
        "strong" | "b" => ElementRule::Mark(Mark::Strong),
        "em" | "i" => ElementRule::Mark(Mark::Em),
        "s" | "del" | "strike" => ElementRule::Mark(Mark::Strike),
        "u" => ElementRule::Mark(Mark::Underline),
        "code" => ElementRule::Mark(Mark::Code),
        "sub" => ElementRule::Mark(Mark::SubSup(SubSup::Sub)),
        "sup" => ElementRule::Mark(Mark::SubSup(SubSup::Sup)),
        "a" => match element.attr("href") {
            Some(href) => ElementRule::Mark(Mark::Link {
                href: href.to_owned(),
                title: element.attr("title").map(str::to_owned),
            }),
            None => ElementRule::Transparent,
        },
        "span" => span_rule(el),
        "div" => match element.attr("data-panel-type") {
            Some(panel) => ElementRule::Block(BlockKind::Panel {
                panel_type: panel.parse().unwrap_or(PanelType::Info),
            }),
            None => ElementRule::Wrapper,
        },
        _ if IGNORED_TAGS.contains(&name) => ElementRule::Ignore,
        _ if BLOCK_TAGS.contains(&name) => ElementRule::Wrapper,
        _ => ElementRule::Transparent,
    }
}

fn span_rule(el: ElementRef<'_>) -> ElementRule {
    let element = el.value();

    if let Some(id) = element.attr("data-mention-id") {
        let text = element_text(el);
        let fallback = format!("@{id}");
        return ElementRule::Atom(Inline::Mention {
            id: id.to_owned(),
            text: Some(text).filter(|t| !t.is_empty() && *t != fallback),
        });
    }

    if let Some(short_name) = element.attr("data-emoji-short-name") {
        let text = element_text(el);
        return ElementRule::Atom(Inline::Emoji {
            short_name: short_name.to_owned(),
            text: Some(text).filter(|t| !t.is_empty() && t != short_name),
        });
    }

    match element.attr("style").and_then(style_color) {
        Some(color) => ElementRule::Mark(Mark::TextColor { color }),
        None => ElementRule::Transparent,
    }
}

// =============================================================================
// Helpers shared with vendor rules
// =============================================================================

/// Concatenated text of an element's subtree.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// First class of `el` starting with `prefix`, with the prefix removed.
pub fn class_suffix(el: ElementRef<'_>, prefix: &str) -> Option<String> {
    el.value()
        .classes()
        .find_map(|class| class.strip_prefix(prefix))
        .filter(|suffix| !suffix.is_empty())
        .map(str::to_owned)
}

/// Whether `el` carries `class`.
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// First child element named `name`.
pub fn child_element<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == name)
}

/// Value of the `color` declaration in an inline style.
pub fn style_color(style: &str) -> Option<String> {
    style.split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        let value = value.trim();
        (key.trim().eq_ignore_ascii_case("color") && !value.is_empty()).then(|| value.to_owned())
    })
}

/// Code language from `data-language` or a `language-*` class on the
/// element or a `code` child.
pub fn code_language(el: ElementRef<'_>) -> Option<String> {
    std::iter::once(el)
        .chain(child_element(el, "code"))
        .find_map(|e| {
            e.value()
                .attr("data-language")
                .filter(|l| !l.is_empty())
                .map(str::to_owned)
                .or_else(|| class_suffix(e, "language-"))
        })
}

/// Code block holding the verbatim text of `el`.
pub fn code_block_rule(el: ElementRef<'_>, language: Option<String>) -> ElementRule {
    code_block_text(element_text(el), language)
}

/// Code block from already extracted text; one trailing newline is dropped.
pub fn code_block_text(mut text: String, language: Option<String>) -> ElementRule {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    ElementRule::CodeBlock { language, text }
}

// =============================================================================
// Inline runs
// =============================================================================

/// Inline content being collected for one textblock.
#[derive(Debug, Default)]
struct InlineRun {
    nodes: Children,
}

impl InlineRun {
    fn push_text(&mut self, raw: &str, marks: &Marks) {
        let collapsed = collapse_whitespace(raw);
        let text = match collapsed.strip_prefix(' ') {
            Some(rest) if self.swallows_leading_space() => rest,
            _ => collapsed.as_str(),
        };
        if text.is_empty() {
            return;
        }
        push_merging(
            &mut self.nodes,
            Node::Text(Text::new(text).with_marks(marks.clone())),
        );
    }

    fn push_atom(&mut self, inline: Inline) {
        self.nodes.push(Node::Inline(inline));
    }

    /// A leading space is redundant at the start, after a break, or after
    /// text that already ends in a space.
    fn swallows_leading_space(&self) -> bool {
        match self.nodes.last() {
            None | Some(Node::Inline(Inline::HardBreak)) => true,
            Some(Node::Text(text)) => text.content.ends_with(' '),
            Some(_) => false,
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Close the run, trimming trailing whitespace.
    fn finish(mut self) -> Children {
        if let Some(Node::Text(last)) = self.nodes.last_mut() {
            let trimmed = last.content.trim_end_matches(' ').len();
            last.content.truncate(trimmed);
            if last.content.is_empty() {
                self.nodes.pop();
            }
        }
        self.nodes
    }
}

/// Collapse HTML whitespace runs (not U+00A0) to one space.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{c}') {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

// =============================================================================
// Block sink
// =============================================================================

/// Block content being collected for one container. Stray inline content
/// is gathered into a paragraph.
#[derive(Debug, Default)]
struct BlockSink {
    blocks: Children,
    run: InlineRun,
}

impl BlockSink {
    fn push_block(&mut self, node: Node) {
        self.flush();
        self.blocks.push(node);
    }

    fn flush(&mut self) {
        let run = mem::take(&mut self.run).finish();
        if !run.is_empty() {
            self.blocks.push(Node::block(BlockKind::Paragraph, run));
        }
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.run.is_empty()
    }

    fn finish(mut self) -> Children {
        self.flush();
        self.blocks
    }
}

// =============================================================================
// Reader
// =============================================================================

struct Reader<'t, T: ?Sized> {
    transformer: &'t T,
    schema: &'t VendorSchema,
}

impl<T: Transformer + ?Sized> Reader<'_, T> {
    /// Vendor rule, then generic rule, then schema degradation.
    fn rule(&self, el: ElementRef<'_>) -> ElementRule {
        let rule = self
            .transformer
            .element_rule(el)
            .unwrap_or_else(|| generic_rule(el));
        self.degrade(rule, el)
    }

    fn degrade(&self, rule: ElementRule, el: ElementRef<'_>) -> ElementRule {
        let schema = self.schema.name;
        match rule {
            ElementRule::Mark(mark) if !self.schema.allows_mark(mark.kind()) => {
                trace!(schema, mark = mark.type_name(), "dropping disallowed mark");
                ElementRule::Transparent
            }
            ElementRule::Block(kind) if !self.schema.allows_block(&kind) => {
                trace!(schema, node = kind.type_name(), "unwrapping disallowed block");
                if kind.is_leaf() {
                    ElementRule::Ignore
                } else {
                    ElementRule::Wrapper
                }
            }
            ElementRule::CodeBlock { .. } if !self.schema.allows_node(NodeType::CodeBlock) => {
                trace!(schema, "reading disallowed code block as paragraph");
                ElementRule::Block(BlockKind::Paragraph)
            }
            ElementRule::Atom(inline) if !self.schema.allows_node(NodeType::of_inline(&inline)) => {
                trace!(schema, node = inline.type_name(), "flattening disallowed atom");
                ElementRule::Text(inline.display_text().into_owned())
            }
            ElementRule::Ignore => {
                trace!(schema, element = el.value().name(), "ignoring element");
                ElementRule::Ignore
            }
            rule => rule,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Block context
    // ─────────────────────────────────────────────────────────────────────────

    fn read_blocks(&self, parent: ElementRef<'_>, marks: &Marks, sink: &mut BlockSink) {
        for child in parent.children() {
            match child.value() {
                HtmlNode::Text(text) => sink.run.push_text(text, marks),
                HtmlNode::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.read_block_element(el, marks, sink);
                    }
                }
                _ => {}
            }
        }
    }

    fn read_block_element(&self, el: ElementRef<'_>, marks: &Marks, sink: &mut BlockSink) {
        match self.rule(el) {
            ElementRule::Ignore => {}
            ElementRule::Transparent => self.read_blocks(el, marks, sink),
            ElementRule::Wrapper => {
                sink.flush();
                self.read_blocks(el, marks, sink);
                sink.flush();
            }
            // Rows, cells and items only mean something inside their parent
            ElementRule::Block(
                BlockKind::ListItem
                | BlockKind::TableRow
                | BlockKind::TableHeader
                | BlockKind::TableCell,
            ) => {
                sink.flush();
                self.read_blocks(el, marks, sink);
                sink.flush();
            }
            ElementRule::Mark(mark) => self.read_blocks(el, &add_to_set(marks, mark), sink),
            ElementRule::Atom(inline) => sink.run.push_atom(inline),
            ElementRule::Text(text) => sink.run.push_text(&text, marks),
            ElementRule::CodeBlock { language, text } => {
                sink.push_block(code_block(language, text));
            }
            ElementRule::Block(kind) => {
                let node = self.read_block(kind, el, marks);
                sink.push_block(node);
            }
        }
    }

    fn read_block(&self, kind: BlockKind, el: ElementRef<'_>, marks: &Marks) -> Node {
        let content = if kind.is_leaf() {
            Children::new()
        } else if kind.holds_inline() {
            let mut run = InlineRun::default();
            self.read_inline(el, marks, &mut run);
            run.finish()
        } else {
            match kind {
                BlockKind::BulletList | BlockKind::OrderedList { .. } => self.read_list(el, marks),
                BlockKind::Table => {
                    let mut rows = Children::new();
                    self.read_table(el, marks, &mut rows);
                    rows
                }
                BlockKind::TableRow => {
                    let mut cells = Children::new();
                    self.read_row(el, marks, &mut cells);
                    cells
                }
                _ => {
                    let mut sink = BlockSink::default();
                    self.read_blocks(el, marks, &mut sink);
                    sink.finish()
                }
            }
        };
        Node::block(kind, content)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists and tables
    // ─────────────────────────────────────────────────────────────────────────

    /// List items; content outside `li` is wrapped in an item of its own.
    fn read_list(&self, el: ElementRef<'_>, marks: &Marks) -> Children {
        let mut items = Children::new();
        let mut stray = BlockSink::default();

        for child in el.children() {
            match child.value() {
                HtmlNode::Text(text) => stray.run.push_text(text, marks),
                HtmlNode::Element(_) => {
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    match self.rule(child_el) {
                        ElementRule::Block(BlockKind::ListItem) => {
                            flush_list_item(&mut stray, &mut items);
                            items.push(self.read_block(BlockKind::ListItem, child_el, marks));
                        }
                        _ => self.read_block_element(child_el, marks, &mut stray),
                    }
                }
                _ => {}
            }
        }

        flush_list_item(&mut stray, &mut items);
        items
    }

    /// Rows of a table, looking through row groups.
    fn read_table(&self, el: ElementRef<'_>, marks: &Marks, rows: &mut Children) {
        for child in el.children().filter_map(ElementRef::wrap) {
            match self.rule(child) {
                ElementRule::Block(BlockKind::TableRow) => {
                    rows.push(self.read_block(BlockKind::TableRow, child, marks));
                }
                ElementRule::Transparent | ElementRule::Wrapper => {
                    self.read_table(child, marks, rows);
                }
                other => {
                    trace!(element = child.value().name(), rule = ?other, "dropping table content");
                }
            }
        }
    }

    /// Cells of a row.
    fn read_row(&self, el: ElementRef<'_>, marks: &Marks, cells: &mut Children) {
        for child in el.children().filter_map(ElementRef::wrap) {
            match self.rule(child) {
                ElementRule::Block(kind @ (BlockKind::TableHeader | BlockKind::TableCell)) => {
                    cells.push(self.read_block(kind, child, marks));
                }
                ElementRule::Transparent | ElementRule::Wrapper => {
                    self.read_row(child, marks, cells);
                }
                other => {
                    trace!(element = child.value().name(), rule = ?other, "dropping row content");
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline context
    // ─────────────────────────────────────────────────────────────────────────

    fn read_inline(&self, parent: ElementRef<'_>, marks: &Marks, run: &mut InlineRun) {
        for child in parent.children() {
            match child.value() {
                HtmlNode::Text(text) => run.push_text(text, marks),
                HtmlNode::Element(_) => {
                    if let Some(el) = ElementRef::wrap(child) {
                        self.read_inline_element(el, marks, run);
                    }
                }
                _ => {}
            }
        }
    }

    fn read_inline_element(&self, el: ElementRef<'_>, marks: &Marks, run: &mut InlineRun) {
        match self.rule(el) {
            ElementRule::Ignore => {}
            ElementRule::Mark(mark) => self.read_inline(el, &add_to_set(marks, mark), run),
            ElementRule::Atom(inline) => run.push_atom(inline),
            ElementRule::Text(text) => run.push_text(&text, marks),
            ElementRule::CodeBlock { text, .. } => run.push_text(&text, marks),
            ElementRule::Block(kind) if kind.is_leaf() => {}
            // Blocks nested in a textblock are flattened into it
            ElementRule::Block(_) | ElementRule::Wrapper | ElementRule::Transparent => {
                self.read_inline(el, marks, run);
            }
        }
    }
}

fn flush_list_item(stray: &mut BlockSink, items: &mut Children) {
    if !stray.is_empty() {
        let content = mem::take(stray).finish();
        if !content.is_empty() {
            items.push(Node::block(BlockKind::ListItem, content));
        }
    }
}

fn code_block(language: Option<String>, text: String) -> Node {
    let content = (!text.is_empty()).then(|| Node::text(text));
    Node::block(BlockKind::CodeBlock { language }, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Generic mapping with the full schema.
    struct Plain;

    impl Transformer for Plain {
        fn schema(&self) -> &VendorSchema {
            &VendorSchema::DEFAULT
        }
    }

    /// Generic mapping with the restricted Bitbucket allow-list.
    struct Restricted;

    impl Transformer for Restricted {
        fn schema(&self) -> &VendorSchema {
            &VendorSchema::BITBUCKET
        }
    }

    fn para(content: impl IntoIterator<Item = Node>) -> Node {
        Node::block(BlockKind::Paragraph, content)
    }

    fn marked(text: &str, marks: impl IntoIterator<Item = Mark>) -> Node {
        Node::Text(marks.into_iter().fold(Text::new(text), Text::with_mark))
    }

    fn blocks(html: &str) -> Vec<Node> {
        Plain.parse(html).content.into_vec()
    }

    #[test]
    fn test_stray_inline_is_wrapped_in_paragraph() {
        assert_eq!(
            blocks("<strong>qwe</strong>\ntext"),
            vec![para([marked("qwe", [Mark::Strong]), Node::text(" text")])]
        );
    }

    #[test]
    fn test_heading_levels() {
        let levels: Vec<_> = blocks("<h1>a</h1><h2>b</h2><h3>c</h3><h4>d</h4><h5>e</h5><h6>f</h6>")
            .iter()
            .filter_map(Node::as_block)
            .map(|b| b.kind.clone())
            .collect();
        assert_eq!(
            levels,
            (1..=6).map(|level| BlockKind::Heading { level }).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_whitespace_collapsing() {
        assert_eq!(
            blocks("<p>  a \n\t b  <br>  c </p>"),
            vec![para([
                Node::text("a b "),
                Node::Inline(Inline::HardBreak),
                Node::text("c"),
            ])]
        );
        assert_eq!(blocks("<p>x\u{a0} y</p>"), vec![para([Node::text("x\u{a0} y")])]);
    }

    #[test]
    fn test_whitespace_between_blocks_is_dropped() {
        assert_eq!(
            blocks("<p>a</p>\n  \n<p>b</p>"),
            vec![para([Node::text("a")]), para([Node::text("b")])]
        );
    }

    #[test]
    fn test_div_splits_paragraphs() {
        assert_eq!(
            blocks("<div>one</div><div>two</div>"),
            vec![para([Node::text("one")]), para([Node::text("two")])]
        );
    }

    #[test]
    fn test_marks_nest_and_merge() {
        assert_eq!(
            blocks("<p><b>bo<i>th</i></b><strong> more</strong></p>"),
            vec![para([
                marked("bo", [Mark::Strong]),
                marked("th", [Mark::Em, Mark::Strong]),
                marked(" more", [Mark::Strong]),
            ])]
        );
    }

    #[test]
    fn test_links_and_colors() {
        assert_eq!(
            blocks(r#"<p><a href="/x" title="X">go</a> <span style="color: #ff5630;">red</span></p>"#),
            vec![para([
                marked("go", [Mark::Link { href: "/x".into(), title: Some("X".into()) }]),
                Node::text(" "),
                marked("red", [Mark::TextColor { color: "#ff5630".into() }]),
            ])]
        );
    }

    #[test]
    fn test_lists() {
        let doc = Plain.parse(r#"<ol start="3"><li>one</li><li><p>two</p><ul><li>x</li></ul></li></ol>"#);
        let list = doc.content[0].as_block().unwrap();
        assert_eq!(list.kind, BlockKind::OrderedList { order: Some(3) });
        assert_eq!(list.content.len(), 2);

        let second: Vec<_> = list.content[1]
            .as_block()
            .unwrap()
            .content
            .iter()
            .filter_map(Node::as_block)
            .map(|b| b.kind.type_name())
            .collect();
        assert_eq!(second, vec!["paragraph", "bulletList"]);
        assert_eq!(
            list.content[0],
            Node::block(BlockKind::ListItem, [para([Node::text("one")])])
        );
    }

    #[test]
    fn test_code_block_is_verbatim() {
        assert_eq!(
            blocks("<pre><code class=\"language-rust\">fn  main() {\n    x\n}\n</code></pre>"),
            vec![Node::block(
                BlockKind::CodeBlock { language: Some("rust".into()) },
                [Node::text("fn  main() {\n    x\n}")],
            )]
        );
    }

    #[test]
    fn test_table_through_row_groups() {
        let doc = Plain.parse("<table><thead><tr><th>h</th></tr></thead><tr><td>c</td></tr></table>");
        let table = doc.content[0].as_block().unwrap();
        let cells: Vec<_> = table
            .content
            .iter()
            .filter_map(Node::as_block)
            .flat_map(|row| row.content.iter().filter_map(Node::as_block))
            .map(|b| b.kind.type_name())
            .collect();
        assert_eq!(cells, vec!["tableHeader", "tableCell"]);
    }

    #[test]
    fn test_ignored_elements() {
        assert_eq!(
            blocks("<style>p { color: red }</style><p>a<script>x()</script></p>"),
            vec![para([Node::text("a")])]
        );
    }

    #[test]
    fn test_atoms_from_rendered_spans() {
        assert_eq!(
            blocks(concat!(
                r#"<p><span data-mention-id="42" contenteditable="false">@42</span>"#,
                r#"<span data-emoji-short-name=":smile:">😄</span></p>"#,
            )),
            vec![para([
                Node::Inline(Inline::Mention { id: "42".into(), text: None }),
                Node::Inline(Inline::Emoji {
                    short_name: ":smile:".into(),
                    text: Some("😄".into()),
                }),
            ])]
        );
    }

    #[test]
    fn test_schema_degradation() {
        let doc = Restricted.parse(r#"<div data-panel-type="note"><p><u>under</u> <em>em</em></p></div>"#);
        assert_eq!(
            doc.content.into_vec(),
            vec![para([Node::text("under "), marked("em", [Mark::Em])])]
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(style_color("font-weight: bold; COLOR : red"), Some("red".into()));
        assert_eq!(style_color("background-color: red"), None);
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
    }
}
