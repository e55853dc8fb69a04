//! Inline atoms - leaf nodes that live between text runs.

use std::borrow::Cow;

/// Inline leaf nodes other than text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    HardBreak,
    Mention {
        /// Account identifier
        id: String,
        /// Display text, usually `@Name`
        text: Option<String>,
    },
    Emoji {
        /// Short name such as `:smile:`
        short_name: String,
        /// Unicode fallback
        text: Option<String>,
    },
}

impl Inline {
    impl_type_names!(
        HardBreak => "hardBreak",
        Mention => "mention",
        Emoji => "emoji",
    );

    /// Text shown for this atom when rendered or flattened.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Inline::HardBreak => Cow::Borrowed("\n"),
            Inline::Mention { id, text } => match text {
                Some(text) => Cow::Borrowed(text),
                None => Cow::Owned(format!("@{id}")),
            },
            Inline::Emoji { short_name, text } => {
                Cow::Borrowed(text.as_deref().unwrap_or(short_name))
            }
        }
    }
}
