//! Text node type
//!
//! Text runs with their mark set.

use super::mark::{Mark, Marks, add_to_set};

// =============================================================================
// Text
// =============================================================================

/// Text content node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Text content (never empty in a well-formed tree)
    pub content: String,
    /// Marks, sorted by rank, at most one per kind
    pub marks: Marks,
}

impl Text {
    /// Create an unmarked text node
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            marks: Marks::new(),
        }
    }

    /// Builder: add a mark, keeping the set sorted
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks = add_to_set(&self.marks, mark);
        self
    }

    /// Builder: replace the whole mark set
    pub fn with_marks(mut self, marks: Marks) -> Self {
        self.marks = marks;
        self
    }
}
