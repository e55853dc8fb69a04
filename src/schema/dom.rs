//! Node-type to HTML element mapping.
//!
//! Every node and mark maps to a short path of nested elements; content is
//! rendered inside the innermost one. Atoms may carry fixed text instead of
//! content.

use smallvec::{SmallVec, smallvec};

use crate::attr::{Attrs, AttrsExt};
use crate::node::{BlockKind, Inline, Mark};

/// One HTML element of a [`DomSpec`] path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTag {
    pub name: &'static str,
    pub attrs: Attrs,
}

impl DomTag {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Attrs::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Builder: add an attribute when present.
    pub fn opt_attr(mut self, name: &str, value: Option<&str>) -> Self {
        self.attrs.set_opt_attr(name, value);
        self
    }
}

/// HTML produced for one node or mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSpec {
    /// Elements from outermost to innermost
    pub tags: SmallVec<[DomTag; 2]>,
    /// Fixed text for atoms, rendered inside the innermost element
    pub text: Option<String>,
}

impl DomSpec {
    fn one(tag: DomTag) -> Self {
        Self {
            tags: smallvec![tag],
            text: None,
        }
    }

    fn nested(outer: DomTag, inner: DomTag) -> Self {
        Self {
            tags: smallvec![outer, inner],
            text: None,
        }
    }

    fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The element content goes into.
    pub fn innermost(&self) -> Option<&DomTag> {
        self.tags.last()
    }
}

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements for a block node.
pub fn block_spec(kind: &BlockKind) -> DomSpec {
    match kind {
        BlockKind::Paragraph => DomSpec::one(DomTag::new("p")),
        BlockKind::Heading { level } => {
            let idx = usize::from(level.clamp(&1, &6) - 1);
            DomSpec::one(DomTag::new(HEADINGS[idx]))
        }
        BlockKind::BulletList => DomSpec::one(DomTag::new("ul").attr("class", "ak-ul")),
        BlockKind::OrderedList { order } => {
            let start = order.filter(|&o| o != 1).map(|o| o.to_string());
            DomSpec::one(
                DomTag::new("ol")
                    .attr("class", "ak-ol")
                    .opt_attr("start", start.as_deref()),
            )
        }
        BlockKind::ListItem => DomSpec::one(DomTag::new("li")),
        BlockKind::Blockquote => DomSpec::one(DomTag::new("blockquote")),
        BlockKind::CodeBlock { language } => DomSpec::nested(
            DomTag::new("pre"),
            DomTag::new("code").opt_attr("data-language", language.as_deref()),
        ),
        BlockKind::Panel { panel_type } => {
            DomSpec::one(DomTag::new("div").attr("data-panel-type", panel_type.as_str()))
        }
        BlockKind::Rule => DomSpec::one(DomTag::new("hr")),
        BlockKind::Table => DomSpec::nested(DomTag::new("table"), DomTag::new("tbody")),
        BlockKind::TableRow => DomSpec::one(DomTag::new("tr")),
        BlockKind::TableHeader => DomSpec::one(DomTag::new("th")),
        BlockKind::TableCell => DomSpec::one(DomTag::new("td")),
    }
}

/// Elements for an inline atom.
pub fn inline_spec(inline: &Inline) -> DomSpec {
    match inline {
        Inline::HardBreak => DomSpec::one(DomTag::new("br")),
        Inline::Mention { id, .. } => DomSpec::one(
            DomTag::new("span")
                .attr("data-mention-id", id.as_str())
                .attr("contenteditable", "false"),
        )
        .with_text(inline.display_text()),
        Inline::Emoji { short_name, .. } => DomSpec::one(
            DomTag::new("span").attr("data-emoji-short-name", short_name.as_str()),
        )
        .with_text(inline.display_text()),
    }
}

/// Element wrapping text runs that carry `mark`.
pub fn mark_spec(mark: &Mark) -> DomTag {
    match mark {
        Mark::Link { href, title } => DomTag::new("a")
            .attr("href", href.as_str())
            .opt_attr("title", title.as_deref()),
        Mark::Em => DomTag::new("em"),
        Mark::Strong => DomTag::new("strong"),
        Mark::TextColor { color } => DomTag::new("span").attr("style", format!("color: {color}")),
        Mark::Strike => DomTag::new("s"),
        Mark::SubSup(kind) => DomTag::new(kind.as_str()),
        Mark::Underline => DomTag::new("u"),
        Mark::Code => DomTag::new("code"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{PanelType, SubSup};

    fn names(spec: &DomSpec) -> Vec<&'static str> {
        spec.tags.iter().map(|t| t.name).collect()
    }

    fn attr<'a>(tag: &'a DomTag, name: &str) -> Option<&'a str> {
        tag.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_block_specs() {
        assert_eq!(names(&block_spec(&BlockKind::Heading { level: 3 })), vec!["h3"]);
        assert_eq!(
            names(&block_spec(&BlockKind::CodeBlock { language: None })),
            vec!["pre", "code"]
        );
        assert_eq!(names(&block_spec(&BlockKind::Table)), vec!["table", "tbody"]);

        let panel = block_spec(&BlockKind::Panel {
            panel_type: PanelType::Warning,
        });
        assert_eq!(attr(&panel.tags[0], "data-panel-type"), Some("warning"));
    }

    #[test]
    fn test_ordered_list_start_only_when_not_one() {
        let default = block_spec(&BlockKind::OrderedList { order: Some(1) });
        assert_eq!(attr(&default.tags[0], "start"), None);

        let custom = block_spec(&BlockKind::OrderedList { order: Some(4) });
        assert_eq!(attr(&custom.tags[0], "start"), Some("4"));
    }

    #[test]
    fn test_code_block_language_attr() {
        let spec = block_spec(&BlockKind::CodeBlock {
            language: Some("rust".into()),
        });
        assert_eq!(
            spec.innermost().and_then(|t| attr(t, "data-language")),
            Some("rust")
        );
    }

    #[test]
    fn test_inline_specs_carry_text() {
        let mention = inline_spec(&Inline::Mention {
            id: "abc".into(),
            text: Some("@Ana".into()),
        });
        assert_eq!(mention.text.as_deref(), Some("@Ana"));
        assert!(inline_spec(&Inline::HardBreak).text.is_none());
    }

    #[test]
    fn test_mark_specs() {
        assert_eq!(mark_spec(&Mark::SubSup(SubSup::Sup)).name, "sup");
        let color = mark_spec(&Mark::TextColor {
            color: "#ff5630".into(),
        });
        assert_eq!(attr(&color, "style"), Some("color: #ff5630"));
    }
}
