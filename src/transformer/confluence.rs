//! Confluence storage format.
//!
//! Storage format is XHTML with `ac:` and `ri:` namespaced elements. An
//! HTML parser mistreats two of its XML-isms, so they are rewritten first:
//! CDATA sections become escaped text and self-closing namespaced tags get
//! explicit end tags.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::ElementRef;
use tracing::trace;

use super::reader::{child_element, code_block_text, element_text};
use super::{ElementRule, Transformer};
use crate::node::{BlockKind, Inline, PanelType};
use crate::render::escape_html;
use crate::schema::VendorSchema;

static CDATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("CDATA: hardcoded regex is valid")
});

static SELF_CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<((?:ac|ri):[\w:-]+)([^<>]*?)\s*/>")
        .expect("SELF_CLOSING: hardcoded regex is valid")
});

/// Transformer for Confluence storage format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfluenceTransformer;

impl ConfluenceTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for ConfluenceTransformer {
    fn schema(&self) -> &VendorSchema {
        &VendorSchema::CONFLUENCE
    }

    fn preprocess<'a>(&self, html: &'a str) -> Cow<'a, str> {
        let unwrapped = CDATA.replace_all(html, |caps: &Captures<'_>| escape_html(&caps[1]));
        if !SELF_CLOSING.is_match(&unwrapped) {
            return unwrapped;
        }
        let expanded = SELF_CLOSING.replace_all(&unwrapped, "<${1}${2}></${1}>");
        Cow::Owned(expanded.into_owned())
    }

    fn element_rule(&self, el: ElementRef<'_>) -> Option<ElementRule> {
        let name = el.value().name();
        match name {
            "ac:structured-macro" | "ac:macro" => Some(macro_rule(el)),
            "ac:link" => Some(link_rule(el)),
            "ac:emoticon" => {
                let element = el.value();
                let short_name = match element.attr("ac:emoji-shortname") {
                    Some(short_name) => short_name.to_owned(),
                    None => format!(":{}:", element.attr("ac:name")?),
                };
                Some(ElementRule::Atom(Inline::Emoji {
                    short_name,
                    text: element.attr("ac:emoji-fallback").map(str::to_owned),
                }))
            }
            "ac:parameter" | "ac:image" | "ac:placeholder" | "colgroup" => Some(ElementRule::Ignore),
            _ if name.starts_with("ri:") => Some(ElementRule::Ignore),
            _ => None,
        }
    }
}

/// Value of the `ac:parameter` named `name`.
fn macro_parameter(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|child| {
            child.value().name() == "ac:parameter" && child.value().attr("ac:name") == Some(name)
        })
        .map(element_text)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn macro_rule(el: ElementRef<'_>) -> ElementRule {
    let macro_name = el.value().attr("ac:name").unwrap_or_default();

    let panel = |panel_type| ElementRule::Block(BlockKind::Panel { panel_type });
    match macro_name {
        "code" | "noformat" => {
            let body = child_element(el, "ac:plain-text-body")
                .map(element_text)
                .unwrap_or_default();
            let language = (macro_name == "code")
                .then(|| macro_parameter(el, "language"))
                .flatten();
            code_block_text(body, language)
        }
        "info" | "panel" => panel(PanelType::Info),
        "note" => panel(PanelType::Note),
        "tip" => panel(PanelType::Success),
        "warning" => panel(PanelType::Warning),
        other => {
            trace!(macro_name = other, "dropping unsupported macro");
            ElementRule::Ignore
        }
    }
}

/// `ac:link` around `ri:user` is a mention; any other link keeps its text.
fn link_rule(el: ElementRef<'_>) -> ElementRule {
    let Some(user) = child_element(el, "ri:user") else {
        return ElementRule::Transparent;
    };

    let user = user.value();
    let Some(id) = ["ri:account-id", "ri:userkey", "ri:username"]
        .into_iter()
        .find_map(|attr| user.attr(attr))
    else {
        return ElementRule::Transparent;
    };

    let text = ["ac:plain-text-link-body", "ac:link-body"]
        .into_iter()
        .filter_map(|body| child_element(el, body))
        .map(element_text)
        .map(|t| t.trim().to_owned())
        .find(|t| !t.is_empty())
        .map(|t| if t.starts_with('@') { t } else { format!("@{t}") });

    ElementRule::Atom(Inline::Mention {
        id: id.to_owned(),
        text,
    })
}
