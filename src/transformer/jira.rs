//! Jira rendered wiki markup.

use scraper::ElementRef;

use super::reader::{class_suffix, code_block_rule, code_language, element_text, has_class};
use super::{ElementRule, Transformer};
use crate::node::{BlockKind, Inline, Mark, PanelType};
use crate::schema::VendorSchema;

/// Jira emoticon image names and their emoji short names.
const EMOTICONS: &[(&str, &str)] = &[
    ("smile", ":slight_smile:"),
    ("sad", ":disappointed:"),
    ("tongue", ":stuck_out_tongue:"),
    ("biggrin", ":grinning:"),
    ("wink", ":wink:"),
    ("thumbs_up", ":thumbsup:"),
    ("thumbs_down", ":thumbsdown:"),
    ("information", ":information_source:"),
    ("check", ":white_check_mark:"),
    ("error", ":x:"),
    ("warning", ":warning:"),
];

/// Transformer for HTML rendered from Jira wiki markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct JiraTransformer;

impl JiraTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for JiraTransformer {
    fn schema(&self) -> &VendorSchema {
        &VendorSchema::JIRA
    }

    fn element_rule(&self, el: ElementRef<'_>) -> Option<ElementRule> {
        let element = el.value();

        match element.name() {
            "div" if has_class(el, "code") || has_class(el, "preformatted") => {
                Some(ElementRule::Wrapper)
            }
            "div" if has_class(el, "panel") => {
                Some(ElementRule::Block(BlockKind::Panel { panel_type: PanelType::Info }))
            }
            "div" if has_class(el, "panelHeader") => Some(ElementRule::Block(BlockKind::Paragraph)),
            "pre" => {
                let language = class_suffix(el, "code-").or_else(|| code_language(el));
                Some(code_block_rule(el, language))
            }
            "a" if has_class(el, "user-hover") => {
                let id = element
                    .attr("data-account-id")
                    .or_else(|| element.attr("rel"))?;
                let name = element_text(el);
                let name = name.trim();
                Some(ElementRule::Atom(Inline::Mention {
                    id: id.to_owned(),
                    text: (!name.is_empty()).then(|| {
                        if name.starts_with('@') {
                            name.to_owned()
                        } else {
                            format!("@{name}")
                        }
                    }),
                }))
            }
            "img" if has_class(el, "emoticon") => {
                let stem = emoticon_name(element.attr("src")?)?;
                let short_name = EMOTICONS
                    .iter()
                    .find(|(name, _)| *name == stem)
                    .map_or_else(|| format!(":{stem}:"), |(_, short)| (*short).to_owned());
                Some(ElementRule::Atom(Inline::Emoji { short_name, text: None }))
            }
            "tt" => Some(ElementRule::Mark(Mark::Code)),
            "ins" => Some(ElementRule::Mark(Mark::Underline)),
            "cite" => Some(ElementRule::Mark(Mark::Em)),
            "font" => element.attr("color").map(|color| {
                ElementRule::Mark(Mark::TextColor {
                    color: color.to_owned(),
                })
            }),
            _ => None,
        }
    }
}

/// File stem of an emoticon image URL (`.../emoticons/smile.png` is `smile`).
fn emoticon_name(src: &str) -> Option<&str> {
    let file = src.split(['?', '#']).next()?.rsplit('/').next()?;
    let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
    (!stem.is_empty()).then_some(stem)
}
