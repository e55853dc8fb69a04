//! Marks - inline formatting carried by text runs.
//!
//! Marks are kept sorted by rank so that equal mark sets compare equal and
//! serialize to the same nesting. The rank order is the schema order:
//!
//! | Rank | Mark |
//! |------|------|
//! | 0 | link |
//! | 1 | em |
//! | 2 | strong |
//! | 3 | textColor |
//! | 4 | strike |
//! | 5 | subsup |
//! | 6 | underline |
//! | 7 | code |

use smallvec::SmallVec;

/// Mark set attached to a text run.
pub type Marks = SmallVec<[Mark; 2]>;

/// Subscript or superscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubSup {
    Sub,
    Sup,
}

impl SubSup {
    pub fn as_str(self) -> &'static str {
        match self {
            SubSup::Sub => "sub",
            SubSup::Sup => "sup",
        }
    }
}

/// Inline formatting mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Link { href: String, title: Option<String> },
    Em,
    Strong,
    TextColor { color: String },
    Strike,
    SubSup(SubSup),
    Underline,
    Code,
}

/// Attribute-free discriminant of [`Mark`], used for schema allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkKind {
    Link,
    Em,
    Strong,
    TextColor,
    Strike,
    SubSup,
    Underline,
    Code,
}

impl MarkKind {
    pub const ALL: [MarkKind; 8] = [
        MarkKind::Link,
        MarkKind::Em,
        MarkKind::Strong,
        MarkKind::TextColor,
        MarkKind::Strike,
        MarkKind::SubSup,
        MarkKind::Underline,
        MarkKind::Code,
    ];
}

impl Mark {
    impl_type_names!(
        Link => "link",
        Em => "em",
        Strong => "strong",
        TextColor => "textColor",
        Strike => "strike",
        SubSup => "subsup",
        Underline => "underline",
        Code => "code",
    );

    /// Create a link mark without a title.
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            href: href.into(),
            title: None,
        }
    }

    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Link { .. } => MarkKind::Link,
            Mark::Em => MarkKind::Em,
            Mark::Strong => MarkKind::Strong,
            Mark::TextColor { .. } => MarkKind::TextColor,
            Mark::Strike => MarkKind::Strike,
            Mark::SubSup(_) => MarkKind::SubSup,
            Mark::Underline => MarkKind::Underline,
            Mark::Code => MarkKind::Code,
        }
    }

    /// Schema rank; lower ranks wrap higher ones when rendered.
    pub fn rank(&self) -> u8 {
        self.kind() as u8
    }
}

/// Return a copy of `set` with `mark` added.
///
/// A mark of the same kind already in the set is replaced; the result stays
/// sorted by rank.
pub fn add_to_set(set: &[Mark], mark: Mark) -> Marks {
    let mut out: Marks = set.iter().filter(|m| m.kind() != mark.kind()).cloned().collect();
    let pos = out.iter().position(|m| m.rank() > mark.rank()).unwrap_or(out.len());
    out.insert(pos, mark);
    out
}

/// Sort and deduplicate an arbitrary list of marks (last one of a kind wins).
pub fn normalize_set(marks: impl IntoIterator<Item = Mark>) -> Marks {
    marks
        .into_iter()
        .fold(Marks::new(), |set, mark| add_to_set(&set, mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_set_orders_by_rank() {
        let set = add_to_set(&[], Mark::Code);
        let set = add_to_set(&set, Mark::Strong);
        let set = add_to_set(&set, Mark::link("https://example.com"));

        let kinds: Vec<_> = set.iter().map(Mark::kind).collect();
        assert_eq!(kinds, vec![MarkKind::Link, MarkKind::Strong, MarkKind::Code]);
    }

    #[test]
    fn test_add_to_set_replaces_same_kind() {
        let set = add_to_set(&[Mark::link("/a")], Mark::link("/b"));
        assert_eq!(set.as_slice(), &[Mark::link("/b")]);
    }

    #[test]
    fn test_normalize_set() {
        let set = normalize_set([Mark::Underline, Mark::Em, Mark::SubSup(SubSup::Sup)]);
        let names: Vec<_> = set.iter().map(Mark::type_name).collect();
        assert_eq!(names, vec!["em", "subsup", "underline"]);
    }

    #[test]
    fn test_rank_matches_kind_order() {
        for pair in MarkKind::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Mark::Code.rank(), 7);
    }
}
