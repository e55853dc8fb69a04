//! Line diff between two texts.
//!
//! Texts are split into line tokens where every line terminator is a token
//! of its own, tokens are interned to integer ids, and the Myers LCS decides
//! which ones are unchanged. The result is a list of merged segments in
//! document order.
//!
//! # Example
//!
//! ```
//! use adflens::diff::{ChangeKind, compute_diff};
//!
//! let segments = compute_diff("a\nb\n", "a\nc\n");
//! assert_eq!(segments[0].kind, ChangeKind::Unchanged);
//! assert_eq!(segments[0].text, "a\n");
//! ```

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algo::{Edit, diff_sequences};
use crate::render::escape_html;

// =============================================================================
// Types
// =============================================================================

/// Classification of a diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Unchanged,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Unchanged => "unchanged",
        }
    }

    /// CSS colour the segment is rendered in.
    pub fn color(self) -> &'static str {
        match self {
            ChangeKind::Added => "green",
            ChangeKind::Removed => "red",
            ChangeKind::Unchanged => "grey",
        }
    }
}

/// A merged run of same-kind tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub kind: ChangeKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: ChangeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Line counts per change kind; terminators are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffStats {
    /// Count the lines in `segments`.
    pub fn of(segments: &[DiffSegment]) -> Self {
        segments.iter().fold(Self::default(), |mut stats, segment| {
            let lines = tokenize(&segment.text)
                .into_iter()
                .filter(|t| !is_newline(t))
                .count();
            match segment.kind {
                ChangeKind::Unchanged => stats.unchanged += lines,
                ChangeKind::Added => stats.added += lines,
                ChangeKind::Removed => stats.removed += lines,
            }
            stats
        })
    }

    /// Whether the two texts were identical.
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Split `text` into line bodies and line terminators (`\n` or `\r\n`).
///
/// Empty tokens are skipped, so concatenating the tokens gives back `text`.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, _) in text.match_indices('\n') {
        let newline_start = if i > start && text.as_bytes()[i - 1] == b'\r' {
            i - 1
        } else {
            i
        };
        if newline_start > start {
            tokens.push(&text[start..newline_start]);
        }
        tokens.push(&text[newline_start..=i]);
        start = i + 1;
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn is_newline(token: &str) -> bool {
    token == "\n" || token == "\r\n"
}

/// Map tokens to dense ids so the LCS compares integers.
fn intern<'a>(tokens: &[&'a str], table: &mut FxHashMap<&'a str, u32>) -> Vec<u32> {
    tokens
        .iter()
        .map(|token| {
            let next = table.len() as u32;
            *table.entry(*token).or_insert(next)
        })
        .collect()
}

// =============================================================================
// Diff
// =============================================================================

/// Diff two texts line by line.
///
/// Unchanged and removed segments concatenate to `a`; unchanged and added
/// segments concatenate to `b`. Within one change, removals come first.
pub fn compute_diff(a: &str, b: &str) -> Vec<DiffSegment> {
    let old = tokenize(a);
    let new = tokenize(b);

    let mut table = FxHashMap::default();
    let old_ids = intern(&old, &mut table);
    let new_ids = intern(&new, &mut table);

    let mut builder = SegmentBuilder::default();
    for edit in diff_sequences(&old_ids, &new_ids).edits {
        match edit {
            Edit::Keep { old_idx, .. } => builder.push(ChangeKind::Unchanged, old[old_idx]),
            Edit::Delete { old_idx } => builder.push(ChangeKind::Removed, old[old_idx]),
            Edit::Insert { new_idx } => builder.push(ChangeKind::Added, new[new_idx]),
        }
    }
    builder.segments
}

#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<DiffSegment>,
}

impl SegmentBuilder {
    fn push(&mut self, kind: ChangeKind, token: &str) {
        match self.segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(token),
            _ => self.segments.push(DiffSegment::new(kind, token)),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render segments as a `<div>` of coloured spans.
pub fn render_html(segments: &[DiffSegment]) -> String {
    let mut html = String::from("<div>");
    for segment in segments {
        // Writing to a String cannot fail
        let _ = write!(
            html,
            r#"<span style="color: {}; width: 100%">{}</span>"#,
            segment.kind.color(),
            escape_html(&segment.text)
        );
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn reconstruct(segments: &[DiffSegment], skip: ChangeKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_tokenize_newline_is_token() {
        assert_eq!(tokenize("a\nb"), vec!["a", "\n", "b"]);
        assert_eq!(tokenize("a\r\n\nb\n"), vec!["a", "\r\n", "\n", "b", "\n"]);
        assert_eq!(tokenize("\r\n"), vec!["\r\n"]);
        assert_eq!(tokenize("x\ry"), vec!["x\ry"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_bare_carriage_return_stays_in_line() {
        assert_eq!(tokenize("a\r"), vec!["a\r"]);
        assert_eq!(
            compute_diff("a\r", "a\r\n"),
            vec![
                DiffSegment::new(ChangeKind::Removed, "a\r"),
                DiffSegment::new(ChangeKind::Added, "a\r\n"),
            ]
        );
    }

    #[test]
    fn test_identical_texts() {
        let text = "{\n  \"type\": \"doc\"\n}";
        assert_eq!(compute_diff(text, text), vec![DiffSegment::new(ChangeKind::Unchanged, text)]);
        assert!(compute_diff("", "").is_empty());
    }

    #[test]
    fn test_changed_line() {
        let segments = compute_diff("a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(
            segments,
            vec![
                DiffSegment::new(ChangeKind::Unchanged, "a\n"),
                DiffSegment::new(ChangeKind::Removed, "b"),
                DiffSegment::new(ChangeKind::Added, "x"),
                DiffSegment::new(ChangeKind::Unchanged, "\nc\n"),
            ]
        );
        assert_eq!(
            DiffStats::of(&segments),
            DiffStats { unchanged: 2, added: 1, removed: 1 }
        );
    }

    #[test]
    fn test_added_and_removed_only() {
        assert_eq!(compute_diff("", "new\n"), vec![DiffSegment::new(ChangeKind::Added, "new\n")]);
        assert_eq!(compute_diff("old", ""), vec![DiffSegment::new(ChangeKind::Removed, "old")]);
    }

    #[test]
    fn test_render_html() {
        let html = render_html(&[
            DiffSegment::new(ChangeKind::Unchanged, "<a>\n"),
            DiffSegment::new(ChangeKind::Added, "b"),
        ]);
        assert_eq!(
            html,
            concat!(
                r#"<div><span style="color: grey; width: 100%">&lt;a&gt;"#,
                "\n</span>",
                r#"<span style="color: green; width: 100%">b</span></div>"#,
            )
        );
    }

    proptest! {
        #[test]
        fn prop_segments_reconstruct_inputs(
            a in proptest::collection::vec("[abc]{0,2}\n?", 0..20).prop_map(|v| v.concat()),
            b in proptest::collection::vec("[abc]{0,2}\n?", 0..20).prop_map(|v| v.concat()),
        ) {
            let segments = compute_diff(&a, &b);
            prop_assert_eq!(reconstruct(&segments, ChangeKind::Added), a);
            prop_assert_eq!(reconstruct(&segments, ChangeKind::Removed), b);
        }

        #[test]
        fn prop_self_diff_is_unchanged(a in "[ab\n]{0,60}") {
            let segments = compute_diff(&a, &a);
            prop_assert!(segments.iter().all(|s| s.kind == ChangeKind::Unchanged));
            prop_assert_eq!(reconstruct(&segments, ChangeKind::Added), a);
        }

        #[test]
        fn prop_adjacent_segments_differ_in_kind(a in "[ab\n]{0,40}", b in "[ab\n]{0,40}") {
            let segments = compute_diff(&a, &b);
            prop_assert!(segments.windows(2).all(|w| w[0].kind != w[1].kind));
        }
    }
}
