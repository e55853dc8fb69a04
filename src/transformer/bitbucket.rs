//! Bitbucket-flavoured HTML.

use scraper::ElementRef;

use super::reader::{class_suffix, code_block_rule, element_text, has_class};
use super::{ElementRule, Transformer};
use crate::node::Inline;
use crate::schema::VendorSchema;

/// Transformer for Bitbucket markdown renders.
///
/// Bitbucket has no panels and only basic inline formatting; its renderer
/// wraps highlighted code in `div.codehilite` and marks mentions and emoji
/// with dedicated classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitbucketTransformer;

impl BitbucketTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for BitbucketTransformer {
    fn schema(&self) -> &VendorSchema {
        &VendorSchema::BITBUCKET
    }

    fn element_rule(&self, el: ElementRef<'_>) -> Option<ElementRule> {
        let element = el.value();

        if element.name() == "div" && has_class(el, "codehilite") {
            return Some(code_block_rule(el, class_suffix(el, "language-")));
        }

        if has_class(el, "ap-mention") {
            let id = element.attr("data-mention-id")?;
            let text = element_text(el);
            return Some(ElementRule::Atom(Inline::Mention {
                id: id.to_owned(),
                text: Some(text).filter(|t| !t.is_empty()),
            }));
        }

        if element.name() == "img" && has_class(el, "emoji") {
            let short_name = element
                .attr("data-emoji-short-name")
                .or_else(|| element.attr("alt"))?;
            return Some(ElementRule::Atom(Inline::Emoji {
                short_name: short_name.to_owned(),
                text: None,
            }));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BlockKind, Mark, Node, Text};
    use pretty_assertions::assert_eq;

    fn parse(html: &str) -> Vec<Node> {
        BitbucketTransformer::new().parse(html).content.into_vec()
    }

    #[test]
    fn test_codehilite_language() {
        assert_eq!(
            parse(r#"<div class="codehilite language-python"><pre><span></span>print(1)
</pre></div>"#),
            vec![Node::block(
                BlockKind::CodeBlock { language: Some("python".into()) },
                [Node::text("print(1)")],
            )]
        );
    }

    #[test]
    fn test_mentions_and_emoji() {
        let html = concat!(
            r#"<p>hi <span class="ap-mention" data-mention-id="{abc}">@Ana</span> "#,
            r#"<img class="emoji" data-emoji-short-name=":smile:" alt=":smile:"></p>"#,
        );
        assert_eq!(
            parse(html),
            vec![Node::block(
                BlockKind::Paragraph,
                [
                    Node::text("hi "),
                    Node::Inline(Inline::Mention { id: "{abc}".into(), text: Some("@Ana".into()) }),
                    Node::text(" "),
                    Node::Inline(Inline::Emoji { short_name: ":smile:".into(), text: None }),
                ],
            )]
        );
    }

    #[test]
    fn test_unsupported_formatting_is_dropped() {
        assert_eq!(
            parse("<p><u>a</u><sup>b</sup><s>c</s></p>"),
            vec![Node::block(
                BlockKind::Paragraph,
                [Node::text("ab"), Node::Text(Text::new("c").with_mark(Mark::Strike))],
            )]
        );
    }

    #[test]
    fn test_panels_are_unwrapped() {
        assert_eq!(
            parse(r#"<div data-panel-type="info"><p>inside</p></div>"#),
            vec![Node::block(BlockKind::Paragraph, [Node::text("inside")])]
        );
    }
}
